pub mod interview;
pub mod question;
pub mod taxonomy;
pub mod user;
pub mod user_answer;
