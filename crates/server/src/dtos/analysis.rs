use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalysisRequest {
    /// CV or profile text to analyze
    pub text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalysisAccepted {
    pub id: Uuid,
}
