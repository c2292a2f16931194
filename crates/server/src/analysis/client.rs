use log::warn;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    Analyzer,
    Fallback,
}

/// Feedback on a CV or profile text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    /// 0-100, absent when the analyzer could not be reached
    pub score: Option<u8>,
    pub strengths: Vec<String>,
    pub suggestions: Vec<String>,
    pub source: AnalysisSource,
}

impl AnalysisResult {
    /// Static result used whenever the analyzer call fails
    pub fn fallback() -> Self {
        Self {
            score: None,
            strengths: Vec::new(),
            suggestions: vec![
                "Lead with a short summary of the role you are aiming for".to_string(),
                "Quantify the impact of your projects and internships".to_string(),
                "List the tools and languages you have used in practice".to_string(),
            ],
            source: AnalysisSource::Fallback,
        }
    }
}

#[derive(Error, Debug)]
enum AnalyzerError {
    #[error("No analyzer URL configured")]
    NotConfigured,

    #[error("Analyzer request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AnalyzerResponse {
    score: Option<u8>,
    strengths: Vec<String>,
    suggestions: Vec<String>,
}

/// Proxies analysis requests to an external HTTP analyzer
#[derive(Debug, Clone)]
pub struct AnalyzerClient {
    http: Client,
    url: Option<String>,
}

impl AnalyzerClient {
    const TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(url: Option<String>) -> Self {
        let http = Client::builder()
            .timeout(Self::TIMEOUT)
            .build()
            .unwrap_or_default();

        Self { http, url }
    }

    /// Never fails: any error degrades to [`AnalysisResult::fallback`]
    pub async fn analyze(&self, text: &str) -> AnalysisResult {
        match self.try_analyze(text).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Using fallback analysis: {e}");
                AnalysisResult::fallback()
            }
        }
    }

    async fn try_analyze(&self, text: &str) -> Result<AnalysisResult, AnalyzerError> {
        let url = self.url.as_deref().ok_or(AnalyzerError::NotConfigured)?;

        let response: AnalyzerResponse = self
            .http
            .post(url)
            .json(&json!({ "text": text }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(AnalysisResult {
            score: response.score.map(|score| score.min(100)),
            strengths: response.strengths,
            suggestions: response.suggestions,
            source: AnalysisSource::Analyzer,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_analyzer_falls_back() {
        let client = AnalyzerClient::new(None);

        let result = client.analyze("Graduate software engineer").await;
        assert_eq!(result, AnalysisResult::fallback());
        assert_eq!(result.source, AnalysisSource::Fallback);
    }

    #[tokio::test]
    async fn test_unreachable_analyzer_falls_back() {
        // Nothing listens on the discard port
        let client = AnalyzerClient::new(Some("http://127.0.0.1:9/analyze".to_string()));

        let result = client.analyze("Graduate software engineer").await;
        assert_eq!(result.source, AnalysisSource::Fallback);
        assert_eq!(result.score, None);
    }
}
