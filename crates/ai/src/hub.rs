//! Client for a Hugging Face style hosted inference endpoint.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moodlens_core::{ClassificationResult, ResultSet};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::classifier::{ClassifierFactory, TextClassifier};
use crate::error::{ClassifierError, ClassifierResult};

pub const DEFAULT_MODEL_ID: &str = "vedabtpatil07/Mental-Health-Analysis";
pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_HUB_URL: &str = "https://huggingface.co";

const TEXT_CLASSIFICATION: &str = "text-classification";

/// Where and how to reach the model.
#[derive(Debug, Clone)]
pub struct HubConfig {
    pub model_id: String,
    /// Base URL of the inference API (no trailing slash needed).
    pub inference_url: String,
    /// Base URL of the model hub, used to verify the model on load.
    pub hub_url: String,
    /// Bearer token, if the endpoint needs one.
    pub token: Option<String>,
    pub timeout: Duration,
    /// Check the hub metadata before accepting the model.
    pub verify_model: bool,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            inference_url: DEFAULT_INFERENCE_URL.to_string(),
            hub_url: DEFAULT_HUB_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(60),
            verify_model: true,
        }
    }
}

impl HubConfig {
    pub fn for_model(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            ..Self::default()
        }
    }

    fn build_client(&self) -> ClassifierResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ClassifierError::model_load(&self.model_id, e))
    }

    /// Confirm the model exists and is a text classifier.
    async fn verify(&self, client: &reqwest::Client) -> ClassifierResult<()> {
        let url = format!(
            "{}/api/models/{}",
            self.hub_url.trim_end_matches('/'),
            self.model_id
        );
        info!(url = %url, "verifying model metadata");

        let mut req = client.get(&url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ClassifierError::model_load(&self.model_id, e))?;
        let status = resp.status();
        if !status.is_success() {
            let reason = if status == reqwest::StatusCode::NOT_FOUND {
                "model not found on hub".to_string()
            } else {
                format!("hub returned {}", status.as_u16())
            };
            return Err(ClassifierError::model_load(&self.model_id, reason));
        }

        let meta: ModelMetadata = resp
            .json()
            .await
            .map_err(|e| ClassifierError::model_load(&self.model_id, e))?;

        match meta.pipeline_tag.as_deref() {
            None | Some(TEXT_CLASSIFICATION) => Ok(()),
            Some(other) => Err(ClassifierError::model_load(
                &self.model_id,
                format!("pipeline '{other}' is not {TEXT_CLASSIFICATION}"),
            )),
        }
    }
}

#[derive(Deserialize)]
struct ModelMetadata {
    pipeline_tag: Option<String>,
}

#[async_trait]
impl ClassifierFactory for HubConfig {
    fn model(&self) -> &str {
        &self.model_id
    }

    async fn load(&self) -> ClassifierResult<Arc<dyn TextClassifier>> {
        let client = self.build_client()?;
        if self.verify_model {
            self.verify(&client).await?;
        }

        Ok(Arc::new(HubClassifier {
            endpoint: format!(
                "{}/models/{}",
                self.inference_url.trim_end_matches('/'),
                self.model_id
            ),
            model_id: self.model_id.clone(),
            token: self.token.clone(),
            client,
        }))
    }
}

/// Classifier backed by the hosted inference API.
pub struct HubClassifier {
    client: reqwest::Client,
    model_id: String,
    endpoint: String,
    token: Option<String>,
}

/// The endpoint answers `[[{label, score}, ...]]` for a single input, some
/// deployments flatten that to `[{label, score}, ...]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum HubOutput {
    Nested(Vec<Vec<ClassificationResult>>),
    Flat(Vec<ClassificationResult>),
}

impl HubOutput {
    fn into_results(self) -> Vec<ClassificationResult> {
        match self {
            Self::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
            Self::Flat(results) => results,
        }
    }
}

#[derive(Deserialize)]
struct HubErrorBody {
    error: String,
}

#[async_trait]
impl TextClassifier for HubClassifier {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn classify(&self, text: &str) -> ClassifierResult<ResultSet> {
        // top_k = null asks for every label, not just the best one.
        let body = json!({
            "inputs": text,
            "parameters": { "top_k": null },
            "options": { "wait_for_model": true },
        });

        let started = Instant::now();
        let mut req = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let raw = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<HubErrorBody>(&raw)
                .map(|b| b.error)
                .unwrap_or(raw);
            return Err(ClassifierError::Endpoint {
                status: status.as_u16(),
                message,
            });
        }

        let output: HubOutput = resp.json().await?;
        let results = ResultSet::from_unsorted(output.into_results())?;

        debug!(
            model = %self.model_id,
            labels = results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "classified text"
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_output_takes_first_batch() {
        let out: HubOutput = serde_json::from_str(
            r#"[[{"label":"Anxiety","score":0.8734},{"label":"Neutral","score":0.1}]]"#,
        )
        .unwrap();
        let results = out.into_results();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].label, "Anxiety");
    }

    #[test]
    fn flat_output_is_accepted() {
        let out: HubOutput =
            serde_json::from_str(r#"[{"label":"Neutral","score":0.2},{"label":"Positive","score":0.7}]"#)
                .unwrap();
        assert_eq!(out.into_results().len(), 2);
    }

    #[test]
    fn empty_nested_output_yields_no_results() {
        let out: HubOutput = serde_json::from_str("[]").unwrap();
        assert!(out.into_results().is_empty());
    }

    #[test]
    fn default_config_targets_the_mental_health_model() {
        let cfg = HubConfig::default();
        assert_eq!(cfg.model_id, DEFAULT_MODEL_ID);
        assert!(cfg.verify_model);
        assert_eq!(HubConfig::for_model("a/b").model_id, "a/b");
    }
}
