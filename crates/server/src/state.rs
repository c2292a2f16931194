use crate::analysis::queue::AnalysisQueue;
use sea_orm::DatabaseConnection;

/// Shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub analysis: AnalysisQueue,
}
