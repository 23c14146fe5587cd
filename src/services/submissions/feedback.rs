use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::ApiResponse;
use crate::models::submissions::requests::FeedbackRequest;
use crate::providers::notify::{NotifyEvent, dispatch};

/// 留言
/// PUT /submissions/{id}/feedback
///
/// pending 的提交转入 reviewed；已 graded 的提交只更新留言，
/// 状态保持 graded 不回退。
pub async fn add_feedback(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    teacher_id: i64,
    req: FeedbackRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let submission = match storage
        .add_submission_feedback(submission_id, teacher_id, req.feedback)
        .await
    {
        Ok(submission) => submission,
        Err(e) => return Ok(e.to_http_response()),
    };

    // 通知学生有新留言（尽力而为）
    let notifier = service.get_notifier(request);
    dispatch(
        &notifier,
        submission.student_id,
        NotifyEvent::FeedbackAdded,
        serde_json::json!({
            "submission_id": submission.id,
            "homework_id": submission.homework_id,
        }),
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "留言成功")))
}
