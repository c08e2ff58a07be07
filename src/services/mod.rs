pub mod gigachat_service;
pub mod history_service;
pub mod interview_service;
pub mod question_service;
pub mod statistics_service;
pub mod user_service;
