pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    gigachat_service::GigaChatService, history_service::HistoryService,
    interview_service::InterviewService, question_service::QuestionService,
    statistics_service::StatisticsService, user_service::UserService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_service: UserService,
    pub question_service: QuestionService,
    pub interview_service: InterviewService,
    pub history_service: HistoryService,
    pub statistics_service: StatisticsService,
    pub gigachat: GigaChatService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let user_service = UserService::new(pool.clone());
        let question_service = QuestionService::new(pool.clone());
        let interview_service = InterviewService::new(pool.clone());
        let history_service = HistoryService::new(pool.clone());
        let statistics_service =
            StatisticsService::new(pool.clone(), config.min_score_to_pass);
        let gigachat = GigaChatService::new(
            config.gigachat_credentials.clone(),
            config.gigachat_scope.clone(),
            config.gigachat_model.clone(),
        );

        Self {
            pool,
            user_service,
            question_service,
            interview_service,
            history_service,
            statistics_service,
            gigachat,
        }
    }
}
