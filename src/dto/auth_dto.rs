use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::taxonomy::{Direction, Language};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 2, max = 50, message = "Name must be 2 to 50 characters"))]
    pub name: String,
    #[validate(
        length(min = 5, max = 50, message = "Password must be 5 to 50 characters"),
        must_match(other = "confirm_password", message = "Passwords do not match")
    )]
    pub password: String,
    pub confirm_password: String,
    #[validate(length(min = 1, message = "Select at least one direction"))]
    pub direction_ids: Vec<i32>,
    #[validate(length(min = 1, message = "Select at least one language"))]
    pub language_ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 5, max = 50, message = "Password must be 5 to 50 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub access_token: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub directions: Vec<Direction>,
    pub languages: Vec<Language>,
}
