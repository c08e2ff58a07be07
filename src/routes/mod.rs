pub mod auth;
pub mod health;
pub mod history;
pub mod interview;
pub mod questions;
pub mod statistics;
pub mod taxonomy;
