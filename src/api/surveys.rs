//! Typed wrappers for the survey endpoints.

use serde::{Deserialize, Serialize};

use super::client::GrcClient;
use crate::survey::{Survey, SurveyResponse};

/// One page of a listing endpoint. Items use the same Survey/Response
/// shapes as the single-resource endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total_count: usize,
}

impl GrcClient {
    /// Fetch the published schema for one survey document.
    pub async fn fetch_survey(&self, doc_id: &str) -> anyhow::Result<Survey> {
        let path = format!(
            "survey?doc_id={}&survey_status=published",
            urlencoding::encode(doc_id)
        );
        self.get_json(&path).await
    }

    /// Fetch the most recent draft/submitted response for a survey
    /// instance, or `None` when the respondent has not saved anything yet.
    pub async fn fetch_latest_response(
        &self,
        survey_id: &str,
    ) -> anyhow::Result<Option<SurveyResponse>> {
        let path = format!("survey-response?survey_id={}", urlencoding::encode(survey_id));
        self.get_json_opt(&path).await
    }

    /// One page of the template listing.
    pub async fn list_templates(
        &self,
        page: usize,
        page_size: usize,
    ) -> anyhow::Result<Page<Survey>> {
        let path = format!("survey-templates?page={}&page_size={}", page, page_size);
        self.get_json(&path).await
    }

    /// One page of the response listing.
    pub async fn list_responses(
        &self,
        page: usize,
        page_size: usize,
    ) -> anyhow::Result<Page<SurveyResponse>> {
        let path = format!("survey-responses?page={}&page_size={}", page, page_size);
        self.get_json(&path).await
    }

    /// Create or overwrite the response record for a survey instance.
    /// Draft saves and submits both land here; the body's
    /// `response_status` is the only difference.
    pub async fn put_response(&self, response: &SurveyResponse) -> anyhow::Result<u16> {
        let path = format!(
            "survey-response?survey_id={}",
            urlencoding::encode(&response.survey_id)
        );
        self.put_json(&path, response).await
    }
}
