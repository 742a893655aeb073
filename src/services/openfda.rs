use serde::Deserialize;

use crate::config;
use crate::models::DrugLabel;

use super::ServiceError;

/// Client for the OpenFDA drug-label endpoint.
pub struct OpenFdaClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct LabelResponse {
    #[serde(default)]
    results: Vec<DrugLabel>,
}

impl OpenFdaClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn public() -> Self {
        Self::new(config::OPENFDA_BASE_URL)
    }

    /// Look up the label record for a medicine's brand/common name.
    /// Returns `Ok(None)` when OpenFDA has no match — the API reports
    /// that as 404, which is absence rather than failure.
    pub async fn fetch_label(&self, medicine_name: &str) -> Result<Option<DrugLabel>, ServiceError> {
        let url = format!("{}/drug/label.json", self.base_url);
        let search = format!("openfda.brand_name:{medicine_name}");

        let response = self
            .client
            .get(&url)
            .query(&[("search", search.as_str()), ("limit", "1")])
            .send()
            .await
            .map_err(|e| ServiceError::from_transport(e, &self.base_url))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
            });
        }

        let parsed: LabelResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::ResponseParsing(e.to_string()))?;

        Ok(parsed.results.into_iter().next())
    }
}
