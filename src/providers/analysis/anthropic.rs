//! Anthropic 端点的分析提供方

use async_trait::async_trait;
use serde_json::json;

use super::{AnalysisInput, AnalysisProvider, AnalysisResult, build_grading_prompt,
    parse_analysis_text};
use crate::config::AnalysisProviderConfig;
use crate::errors::{EduProofError, Result};

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    config: AnalysisProviderConfig,
    client: reqwest::Client,
}

impl AnthropicProvider {
    pub fn new(config: AnalysisProviderConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl AnalysisProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult> {
        let url = format!("{}/v1/messages", self.config.base_url);
        let body = json!({
            "model": self.config.model,
            "max_tokens": 1024,
            "messages": [
                {"role": "user", "content": build_grading_prompt(input)}
            ],
        });

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| EduProofError::provider_unavailable(format!("Anthropic 请求失败: {e}")))?;

        if !response.status().is_success() {
            return Err(EduProofError::provider_unavailable(format!(
                "Anthropic 返回错误状态: {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response.json().await.map_err(|e| {
            EduProofError::provider_unavailable(format!("Anthropic 响应解析失败: {e}"))
        })?;

        let content = payload
            .get("content")
            .and_then(|content| content.get(0))
            .and_then(|block| block.get("text"))
            .and_then(|text| text.as_str())
            .ok_or_else(|| EduProofError::provider_unavailable("Anthropic 响应缺少内容"))?;

        Ok(parse_analysis_text(content, self.name()))
    }
}
