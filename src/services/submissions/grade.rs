use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::ApiResponse;
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::providers::notify::{NotifyEvent, dispatch};

/// 评分
/// PUT /submissions/{id}/grade
///
/// 分数范围、提交存在性与作业所有权由存储层按序校验；
/// 可重复调用，新的分数覆盖旧的。
pub async fn grade_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    teacher_id: i64,
    req: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let submission = match storage
        .grade_submission(submission_id, teacher_id, req.grade, req.feedback)
        .await
    {
        Ok(submission) => submission,
        Err(e) => return Ok(e.to_http_response()),
    };

    // 通知学生成绩已出（尽力而为）
    let notifier = service.get_notifier(request);
    dispatch(
        &notifier,
        submission.student_id,
        NotifyEvent::SubmissionGraded,
        serde_json::json!({
            "submission_id": submission.id,
            "homework_id": submission.homework_id,
            "grade": submission.grade,
        }),
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "评分成功")))
}
