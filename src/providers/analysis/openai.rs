//! OpenAI 兼容端点的分析提供方

use async_trait::async_trait;
use serde_json::json;

use super::{AnalysisInput, AnalysisProvider, AnalysisResult, build_grading_prompt,
    parse_analysis_text};
use crate::config::AnalysisProviderConfig;
use crate::errors::{EduProofError, Result};

pub struct OpenAiProvider {
    config: AnalysisProviderConfig,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(config: AnalysisProviderConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl AnalysisProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult> {
        let url = format!("{}/v1/chat/completions", self.config.base_url);
        let body = json!({
            "model": self.config.model,
            "messages": [
                {"role": "user", "content": build_grading_prompt(input)}
            ],
            "temperature": 0.2,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EduProofError::provider_unavailable(format!("OpenAI 请求失败: {e}")))?;

        if !response.status().is_success() {
            return Err(EduProofError::provider_unavailable(format!(
                "OpenAI 返回错误状态: {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| EduProofError::provider_unavailable(format!("OpenAI 响应解析失败: {e}")))?;

        let content = payload
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| EduProofError::provider_unavailable("OpenAI 响应缺少内容"))?;

        Ok(parse_analysis_text(content, self.name()))
    }
}
