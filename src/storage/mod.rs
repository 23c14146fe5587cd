use std::sync::Arc;

use crate::models::{
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest},
        responses::ClassListResponse,
    },
    homeworks::{
        entities::Homework,
        requests::{CreateHomeworkRequest, UpdateHomeworkRequest},
        responses::{HomeworkListResponse, HomeworkStats},
    },
    submissions::{
        entities::Submission,
        requests::{CreateSubmissionRequest, SubmissionListQuery},
        responses::{StudentStats, SubmissionListResponse},
    },
    textbooks::{
        entities::Textbook,
        requests::{CreateTextbookRequest, TextbookListQuery},
        responses::TextbookListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（req.password 字段须为已哈希的密码）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息（精确匹配，大小写敏感）
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息（部分更新，角色不可变更）
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 更新用户密码哈希
    async fn update_user_password(&self, id: i64, password_hash: &str) -> Result<bool>;
    // 停用用户（软删除：is_active=false，记录保留）
    async fn deactivate_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;
    // 列出某家长的子女
    async fn list_children(&self, parent_id: i64) -> Result<Vec<User>>;

    /// 班级管理方法
    // 创建班级
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 列出班级
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;

    /// 教材管理方法
    // 创建教材
    async fn create_textbook(
        &self,
        uploaded_by: i64,
        textbook: CreateTextbookRequest,
    ) -> Result<Textbook>;
    // 通过ID获取教材信息
    async fn get_textbook_by_id(&self, textbook_id: i64) -> Result<Option<Textbook>>;
    // 列出教材
    async fn list_textbooks_with_pagination(
        &self,
        query: TextbookListQuery,
    ) -> Result<TextbookListResponse>;
    // 删除教材（仅上传者）
    async fn delete_textbook(&self, textbook_id: i64, uploaded_by: i64) -> Result<()>;

    /// 作业管理方法
    // 创建作业
    async fn create_homework(
        &self,
        teacher_id: i64,
        homework: CreateHomeworkRequest,
    ) -> Result<Homework>;
    // 通过ID获取作业信息
    async fn get_homework_by_id(&self, homework_id: i64) -> Result<Option<Homework>>;
    // 获取作业的提交统计（按状态聚合）
    async fn get_homework_stats(&self, homework_id: i64) -> Result<HomeworkStats>;
    // 更新作业（所有权校验 + 部分更新）
    async fn update_homework(
        &self,
        homework_id: i64,
        teacher_id: i64,
        update: UpdateHomeworkRequest,
    ) -> Result<Homework>;
    // 删除作业并级联删除其全部提交（单事务，所有权校验）
    async fn delete_homework_cascade(&self, homework_id: i64, teacher_id: i64) -> Result<()>;
    // 列出教师布置的作业（按截止时间倒序）
    async fn list_homeworks_by_teacher(
        &self,
        teacher_id: i64,
        class_id: Option<i64>,
        page: i64,
        size: i64,
    ) -> Result<HomeworkListResponse>;
    // 列出班级的作业（按创建时间倒序）
    async fn list_homeworks_by_class(
        &self,
        class_id: i64,
        subject: Option<String>,
        page: i64,
        size: i64,
    ) -> Result<HomeworkListResponse>;
    // 列出学生未提交且未截止的作业（对提交表做反连接）
    async fn list_pending_homeworks_for_student(
        &self,
        student_id: i64,
        class_id: i64,
        page: i64,
        size: i64,
    ) -> Result<Vec<Homework>>;

    /// 提交管理方法
    // 创建提交（状态机入口：作业存在 -> 未重复提交 -> 未过截止时间）
    async fn create_submission(
        &self,
        student_id: i64,
        submission: CreateSubmissionRequest,
    ) -> Result<Submission>;
    // 通过ID获取提交信息
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 评分（-> graded，可重复调用覆盖）
    async fn grade_submission(
        &self,
        submission_id: i64,
        teacher_id: i64,
        grade: f64,
        feedback: Option<String>,
    ) -> Result<Submission>;
    // 留言（-> reviewed；已 graded 的提交保持 graded）
    async fn add_submission_feedback(
        &self,
        submission_id: i64,
        teacher_id: i64,
        feedback: String,
    ) -> Result<Submission>;
    // 删除提交（仅提交者本人，仅 pending 状态）
    async fn delete_submission(&self, submission_id: i64, student_id: i64) -> Result<()>;
    // 写入 AI 分析结果
    async fn set_submission_analysis(
        &self,
        submission_id: i64,
        analysis: serde_json::Value,
    ) -> Result<bool>;
    // 列出提交（按条件过滤 + 分页）
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 教师的待批改队列（按提交时间升序，先交先批）
    async fn list_pending_submissions_for_teacher(
        &self,
        teacher_id: i64,
        page: i64,
        size: i64,
    ) -> Result<Vec<Submission>>;
    // 学生提交统计
    async fn student_submission_stats(&self, student_id: i64) -> Result<StudentStats>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
