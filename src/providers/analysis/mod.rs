//! AI 分析提供方
//!
//! 外部托管模型的包装：构造提示词、调用 HTTP API、解析返回的 JSON。
//! 提供方按固定顺序组成调用链，前一个失败（或超时）才轮到下一个，
//! 全部失败时调用方得到 None 并保持 ai_analysis 为空。
//! 没有重试，也不保证与同一提交上其他操作的先后顺序。

pub mod anthropic;
pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::errors::Result;
use crate::models::submissions::entities::FileKind;

/// 提交给提供方的分析输入
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub submission_id: i64,
    pub file_url: String,
    pub file_kind: FileKind,
    pub homework_title: String,
    pub homework_description: Option<String>,
}

/// 提供方返回的分析结果
///
/// 结构是尽力而为的：提供方输出能解析出什么字段就填什么字段，
/// 存储层原样保存，不做进一步校验。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub suggested_grade: Option<f64>,
    pub confidence: Option<f64>,
    pub reasoning: Option<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub errors_found: Vec<String>,
    pub provider: String,
}

/// 单个 AI 分析提供方
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult>;
}

/// 按序回退的提供方调用链
pub struct ProviderChain {
    providers: Vec<Arc<dyn AnalysisProvider>>,
    timeout: Duration,
}

impl ProviderChain {
    pub fn new(providers: Vec<Arc<dyn AnalysisProvider>>, timeout: Duration) -> Self {
        Self { providers, timeout }
    }

    /// 根据配置构建调用链：openai -> anthropic，未配置 api_key 的跳过
    pub fn from_config(config: &AnalysisConfig) -> Self {
        let mut providers: Vec<Arc<dyn AnalysisProvider>> = Vec::new();

        if !config.openai.api_key.is_empty() {
            providers.push(Arc::new(openai::OpenAiProvider::new(config.openai.clone())));
        }
        if !config.anthropic.api_key.is_empty() {
            providers.push(Arc::new(anthropic::AnthropicProvider::new(
                config.anthropic.clone(),
            )));
        }

        if providers.is_empty() {
            warn!("No AI analysis provider configured, analysis requests will be no-ops");
        }

        Self::new(providers, Duration::from_secs(config.timeout))
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// 依次尝试每个提供方，返回第一个成功的结果
    ///
    /// 单次调用受超时约束；所有提供方都失败时返回 None，不向调用方抛错。
    pub async fn analyze(&self, input: &AnalysisInput) -> Option<AnalysisResult> {
        for provider in &self.providers {
            match tokio::time::timeout(self.timeout, provider.analyze(input)).await {
                Ok(Ok(result)) => {
                    info!(
                        "Analysis provider {} succeeded for submission {}",
                        provider.name(),
                        input.submission_id
                    );
                    return Some(result);
                }
                Ok(Err(e)) => {
                    warn!(
                        "Analysis provider {} failed for submission {}: {}",
                        provider.name(),
                        input.submission_id,
                        e
                    );
                }
                Err(_) => {
                    warn!(
                        "Analysis provider {} timed out for submission {}",
                        provider.name(),
                        input.submission_id
                    );
                }
            }
        }
        None
    }
}

/// 构造评分提示词
pub(crate) fn build_grading_prompt(input: &AnalysisInput) -> String {
    let description = input.homework_description.as_deref().unwrap_or("(none)");
    format!(
        r#"You are an educational grading assistant. A student submitted a {kind} file for the assignment below. Analyze the submission referenced by the URL and provide a grade suggestion.

Assignment: {title}
Instructions: {description}
Submission file: {file_url}

Respond in the following JSON format only:
{{
    "suggested_grade": <number between 0 and 100>,
    "confidence": <number between 0 and 1>,
    "reasoning": "<brief explanation of the grade>",
    "improvements": ["<suggestion 1>", "<suggestion 2>"],
    "errors_found": ["<error 1>", "<error 2>"]
}}

Be fair but thorough in your assessment."#,
        kind = input.file_kind,
        title = input.homework_title,
        description = description,
        file_url = input.file_url,
    )
}

/// 解析提供方返回的文本
///
/// 模型偶尔会把 JSON 包在代码块里，先剥掉围栏再解析；
/// 解析失败时把原始文本放进 reasoning，尽力保留信息。
pub(crate) fn parse_analysis_text(text: &str, provider: &'static str) -> AnalysisResult {
    let trimmed = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => AnalysisResult {
            suggested_grade: value.get("suggested_grade").and_then(|v| v.as_f64()),
            confidence: value.get("confidence").and_then(|v| v.as_f64()),
            reasoning: value
                .get("reasoning")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
            improvements: value
                .get("improvements")
                .and_then(|v| v.as_array())
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|item| item.as_str().map(|s| s.to_string()))
                        .collect()
                })
                .unwrap_or_default(),
            errors_found: value
                .get("errors_found")
                .and_then(|v| v.as_array())
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|item| item.as_str().map(|s| s.to_string()))
                        .collect()
                })
                .unwrap_or_default(),
            provider: provider.to_string(),
        },
        Err(_) => AnalysisResult {
            suggested_grade: None,
            confidence: None,
            reasoning: Some(text.trim().to_string()),
            improvements: vec![],
            errors_found: vec![],
            provider: provider.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EduProofError;

    struct FailingProvider;
    struct EchoProvider;

    #[async_trait]
    impl AnalysisProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn analyze(&self, _input: &AnalysisInput) -> Result<AnalysisResult> {
            Err(EduProofError::provider_unavailable("boom"))
        }
    }

    #[async_trait]
    impl AnalysisProvider for EchoProvider {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn analyze(&self, _input: &AnalysisInput) -> Result<AnalysisResult> {
            Ok(AnalysisResult {
                suggested_grade: Some(75.0),
                confidence: Some(0.5),
                reasoning: None,
                improvements: vec![],
                errors_found: vec![],
                provider: "echo".to_string(),
            })
        }
    }

    fn input() -> AnalysisInput {
        AnalysisInput {
            submission_id: 1,
            file_url: "/api/v1/files/x.pdf".to_string(),
            file_kind: FileKind::Pdf,
            homework_title: "Algebra".to_string(),
            homework_description: None,
        }
    }

    #[tokio::test]
    async fn test_chain_falls_back_in_order() {
        let chain = ProviderChain::new(
            vec![Arc::new(FailingProvider), Arc::new(EchoProvider)],
            Duration::from_secs(1),
        );
        let result = chain.analyze(&input()).await.unwrap();
        assert_eq!(result.provider, "echo");
    }

    #[tokio::test]
    async fn test_chain_all_failed_returns_none() {
        let chain = ProviderChain::new(vec![Arc::new(FailingProvider)], Duration::from_secs(1));
        assert!(chain.analyze(&input()).await.is_none());
    }

    #[tokio::test]
    async fn test_empty_chain_returns_none() {
        let chain = ProviderChain::new(vec![], Duration::from_secs(1));
        assert!(chain.is_empty());
        assert!(chain.analyze(&input()).await.is_none());
    }

    #[test]
    fn test_parse_analysis_with_code_fence() {
        let text = "```json\n{\"suggested_grade\": 82.5, \"confidence\": 0.9, \"reasoning\": \"solid work\", \"improvements\": [\"show steps\"], \"errors_found\": []}\n```";
        let result = parse_analysis_text(text, "openai");
        assert_eq!(result.suggested_grade, Some(82.5));
        assert_eq!(result.reasoning.as_deref(), Some("solid work"));
        assert_eq!(result.improvements, vec!["show steps".to_string()]);
        assert_eq!(result.provider, "openai");
    }

    #[test]
    fn test_parse_analysis_plain_text_fallback() {
        let result = parse_analysis_text("the model rambled instead", "anthropic");
        assert!(result.suggested_grade.is_none());
        assert_eq!(result.reasoning.as_deref(), Some("the model rambled instead"));
    }
}
