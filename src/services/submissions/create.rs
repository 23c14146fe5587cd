use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::ApiResponse;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::providers::notify::{NotifyEvent, dispatch};

/// 创建提交
/// POST /submissions
///
/// 前置条件（作业存在、未重复提交、未过截止时间）由存储层按序检查，
/// 唯一索引兜底并发重复提交。
pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    student_id: i64,
    req: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let submission = match storage.create_submission(student_id, req).await {
        Ok(submission) => submission,
        Err(e) => return Ok(e.to_http_response()),
    };

    // 通知作业的布置教师（尽力而为）
    if let Ok(Some(homework)) = storage.get_homework_by_id(submission.homework_id).await {
        let notifier = service.get_notifier(request);
        dispatch(
            &notifier,
            homework.teacher_id,
            NotifyEvent::SubmissionReceived,
            serde_json::json!({
                "submission_id": submission.id,
                "homework_id": homework.id,
                "student_id": student_id,
            }),
        );
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(submission, "提交成功")))
}
