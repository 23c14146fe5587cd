use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::EduProofError;
use crate::models::ApiResponse;
use crate::providers::analysis::AnalysisInput;

/// 触发 AI 分析
/// POST /submissions/{id}/analyze
///
/// 对调用方而言唯一的失败是提交不存在。分析在后台尽力执行：
/// 提供方失败或超时只记日志，ai_analysis 保持为空，不重试，
/// 也不保证与同一提交上其他操作的先后顺序。
pub async fn trigger_ai_analysis(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let chain = service.get_analysis_chain(request);

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(EduProofError::submission_not_found("提交不存在").to_http_response());
        }
        Err(e) => return Ok(e.to_http_response()),
    };

    let homework = match storage.get_homework_by_id(submission.homework_id).await {
        Ok(Some(homework)) => homework,
        Ok(None) => {
            return Ok(EduProofError::assignment_not_found("作业不存在").to_http_response());
        }
        Err(e) => return Ok(e.to_http_response()),
    };

    let input = AnalysisInput {
        submission_id: submission.id,
        file_url: submission.file_url.clone(),
        file_kind: submission.file_kind,
        homework_title: homework.title,
        homework_description: homework.description,
    };

    tokio::spawn(async move {
        let Some(result) = chain.analyze(&input).await else {
            // 所有提供方都失败：ai_analysis 保持为空
            return;
        };
        match serde_json::to_value(&result) {
            Ok(payload) => {
                if let Err(e) = storage.set_submission_analysis(input.submission_id, payload).await
                {
                    tracing::warn!(
                        "Failed to store analysis for submission {}: {}",
                        input.submission_id,
                        e
                    );
                }
            }
            Err(e) => {
                tracing::warn!("Failed to serialize analysis result: {}", e);
            }
        }
    });

    Ok(HttpResponse::Accepted().json(ApiResponse::success_empty("分析已触发")))
}
