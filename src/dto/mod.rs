pub mod auth_dto;
pub mod history_dto;
pub mod interview_dto;
pub mod question_dto;
pub mod statistics_dto;
pub mod taxonomy_dto;
