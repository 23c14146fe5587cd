pub mod analysis;
pub mod create;
pub mod delete;
pub mod detail;
pub mod feedback;
pub mod grade;
pub mod list;
pub mod stats;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::{
    CreateSubmissionRequest, FeedbackRequest, GradeSubmissionRequest, SubmissionListQuery,
};
use crate::providers::analysis::ProviderChain;
use crate::providers::notify::NotificationSink;
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
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

    pub(crate) fn get_analysis_chain(&self, request: &HttpRequest) -> Arc<ProviderChain> {
        request
            .app_data::<actix_web::web::Data<Arc<ProviderChain>>>()
            .expect("Analysis chain not found in app data")
            .get_ref()
            .clone()
    }

    /// 创建提交
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        student_id: i64,
        req: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, student_id, req).await
    }

    /// 获取提交详情
    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        include_ai: bool,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, submission_id, include_ai).await
    }

    /// 评分
    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        teacher_id: i64,
        req: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, request, submission_id, teacher_id, req).await
    }

    /// 留言
    pub async fn add_feedback(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        teacher_id: i64,
        req: FeedbackRequest,
    ) -> ActixResult<HttpResponse> {
        feedback::add_feedback(self, request, submission_id, teacher_id, req).await
    }

    /// 删除/撤回提交
    pub async fn delete_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_submission(self, request, submission_id, student_id).await
    }

    /// 触发 AI 分析
    pub async fn trigger_ai_analysis(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        analysis::trigger_ai_analysis(self, request, submission_id).await
    }

    /// 列出某作业的提交
    pub async fn list_homework_submissions(
        &self,
        request: &HttpRequest,
        homework_id: i64,
        query: SubmissionListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_homework_submissions(self, request, homework_id, query).await
    }

    /// 列出我的提交（学生视角）
    pub async fn list_my_submissions(
        &self,
        request: &HttpRequest,
        student_id: i64,
        query: SubmissionListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_my_submissions(self, request, student_id, query).await
    }

    /// 教师的待批改队列（先交先批）
    pub async fn list_pending_queue(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
        query: SubmissionListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_pending_queue(self, request, teacher_id, query).await
    }

    /// 学生提交统计
    pub async fn student_stats(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        stats::student_stats(self, request, student_id).await
    }
}
