pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::homeworks::requests::{
    CreateHomeworkRequest, HomeworkListQuery, UpdateHomeworkRequest,
};
use crate::providers::notify::NotificationSink;
use crate::storage::Storage;

pub struct HomeworkService {
    storage: Option<Arc<dyn Storage>>,
}

impl HomeworkService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_notifier(&self, request: &HttpRequest) -> Arc<dyn NotificationSink> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn NotificationSink>>>()
            .expect("Notification sink not found in app data")
            .get_ref()
            .clone()
    }

    /// 创建作业
    pub async fn create_homework(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
        req: CreateHomeworkRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_homework(self, request, teacher_id, req).await
    }

    /// 获取作业详情（可附带统计）
    pub async fn get_homework(
        &self,
        request: &HttpRequest,
        homework_id: i64,
        include_stats: bool,
    ) -> ActixResult<HttpResponse> {
        detail::get_homework(self, request, homework_id, include_stats).await
    }

    /// 更新作业
    pub async fn update_homework(
        &self,
        request: &HttpRequest,
        homework_id: i64,
        teacher_id: i64,
        req: UpdateHomeworkRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_homework(self, request, homework_id, teacher_id, req).await
    }

    /// 删除作业（级联删除提交）
    pub async fn delete_homework(
        &self,
        request: &HttpRequest,
        homework_id: i64,
        teacher_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_homework(self, request, homework_id, teacher_id).await
    }

    /// 列出我布置的作业（教师视角）
    pub async fn list_my_homeworks(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
        query: HomeworkListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_my_homeworks(self, request, teacher_id, query).await
    }

    /// 列出班级作业
    pub async fn list_class_homeworks(
        &self,
        request: &HttpRequest,
        class_id: i64,
        query: HomeworkListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_class_homeworks(self, request, class_id, query).await
    }

    /// 学生的待交作业列表
    pub async fn list_pending_homeworks(
        &self,
        request: &HttpRequest,
        query: HomeworkListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_pending_homeworks(self, request, query).await
    }
}
