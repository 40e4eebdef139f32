use super::types::{
    AbTestRequest, AbTestResponse, NewPrompt, NewVersion, Prompt, PromptUpdate, PromptVersion,
    TestResult, Variation, VariationTestRequest, VariationTestResponse,
};
use crate::config::Config;
use crate::error::ApiError;
use crate::template::Template;
use anyhow::{Context, Result};
use log::debug;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub struct PromptBoxClient {
    client: Client,
    api_url: String,
    abtest_url: String,
}

impl PromptBoxClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.backend.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: config.backend.api_url.trim_end_matches('/').to_string(),
            abtest_url: config.backend.abtest_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    pub async fn list_prompts(&self) -> Result<Vec<Prompt>> {
        self.send(self.client.get(self.url("/prompts/")))
            .await
            .context("Failed to fetch prompts")
    }

    pub async fn create_prompt(&self, prompt: &NewPrompt) -> Result<Prompt> {
        debug!("Creating prompt: {:?}", prompt);
        self.send(self.client.post(self.url("/prompts/")).json(prompt))
            .await
            .context("Failed to create prompt")
    }

    pub async fn update_prompt(&self, id: &str, prompt: &PromptUpdate) -> Result<Prompt> {
        debug!("Updating prompt {}: {:?}", id, prompt);
        self.send(self.client.put(self.url(&format!("/prompts/{}", id))).json(prompt))
            .await
            .with_context(|| format!("Failed to update prompt {}", id))
    }

    pub async fn list_versions(&self, prompt_id: &str) -> Result<Vec<PromptVersion>> {
        self.send(
            self.client
                .get(self.url(&format!("/prompts/{}/versions", prompt_id))),
        )
        .await
        .with_context(|| format!("Failed to fetch versions for prompt {}", prompt_id))
    }

    /// The backend acknowledges with a free-form message body.
    pub async fn create_version(
        &self,
        prompt_id: &str,
        version: &NewVersion,
    ) -> Result<serde_json::Value> {
        debug!("Creating version of {}: {:?}", prompt_id, version);
        self.send(
            self.client
                .post(self.url(&format!("/prompts/{}/versions", prompt_id)))
                .json(version),
        )
        .await
        .with_context(|| format!("Failed to create version for prompt {}", prompt_id))
    }

    pub async fn list_templates(&self) -> Result<Vec<Template>> {
        self.send(self.client.get(self.url("/templates")))
            .await
            .context("Failed to fetch templates")
    }

    pub async fn run_variations(
        &self,
        variations: &[&Variation],
        test_input: &str,
    ) -> Result<Vec<TestResult>> {
        let request = VariationTestRequest {
            variations: variations.to_vec(),
            test_input,
        };
        debug!("Sending variation test: {:?}", request);

        let response: VariationTestResponse = self
            .send(self.client.post(self.url("/test/")).json(&request))
            .await
            .context("Failed to run variation test")?;
        Ok(response.results)
    }

    pub async fn run_abtest(&self, request: &AbTestRequest) -> Result<AbTestResponse> {
        debug!("Sending A/B test to {}: {:?}", self.abtest_url, request);
        self.send(self.client.post(&self.abtest_url).json(request))
            .await
            .context("Failed to run A/B test")
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .header("Content-Type", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}
