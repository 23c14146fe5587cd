use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HomeworkService;
use crate::errors::EduProofError;
use crate::models::ApiResponse;
use crate::models::homeworks::requests::CreateHomeworkRequest;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::UserListQuery;
use crate::providers::notify::{NotifyEvent, dispatch};

/// 创建作业
/// POST /homeworks
///
/// 不校验 due_at 是否在未来：教师可以补录历史作业。
pub async fn create_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    teacher_id: i64,
    req: CreateHomeworkRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if req.title.trim().is_empty() {
        return Ok(EduProofError::validation("作业标题不能为空").to_http_response());
    }

    // 目标班级必须存在
    match storage.get_class_by_id(req.class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(EduProofError::not_found("班级不存在").to_http_response());
        }
        Err(e) => return Ok(e.to_http_response()),
    }

    let class_id = req.class_id;
    let homework = match storage.create_homework(teacher_id, req).await {
        Ok(homework) => homework,
        Err(e) => return Ok(e.to_http_response()),
    };

    // 向班级学生派发新作业通知（尽力而为）
    let notifier = service.get_notifier(request);
    let payload = serde_json::json!({
        "homework_id": homework.id,
        "title": homework.title.clone(),
        "due_at": homework.due_at,
    });
    if let Ok(students) = storage
        .list_users_with_pagination(UserListQuery {
            page: Some(1),
            size: Some(100),
            role: Some(UserRole::Student),
            class_id: Some(class_id),
            include_inactive: None,
        })
        .await
    {
        for student in &students.items {
            dispatch(
                &notifier,
                student.id,
                NotifyEvent::HomeworkAssigned,
                payload.clone(),
            );
        }
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(homework, "作业已创建")))
}
