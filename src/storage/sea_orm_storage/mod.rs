//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 提交与作业的生命周期状态机在这一层落地：所有前置条件失败都以
//! 带稳定代码的类型化错误同步返回，每个写操作是单个事务。

mod classes;
mod homeworks;
mod submissions;
mod textbooks;
mod users;

use crate::config::AppConfig;
use crate::errors::{EduProofError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| EduProofError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| EduProofError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| EduProofError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| EduProofError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(EduProofError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 测试专用：内存 SQLite（单连接，迁移已执行）
    #[cfg(test)]
    pub(crate) async fn new_in_memory() -> Self {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1);
        let db = Database::connect(opt)
            .await
            .expect("Failed to open in-memory SQLite");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
        Self { db }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_user_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        self.update_user_password_impl(id, password_hash).await
    }

    async fn deactivate_user(&self, id: i64) -> Result<bool> {
        self.deactivate_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn list_children(&self, parent_id: i64) -> Result<Vec<User>> {
        self.list_children_impl(parent_id).await
    }

    // 班级模块
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    // 教材模块
    async fn create_textbook(
        &self,
        uploaded_by: i64,
        textbook: CreateTextbookRequest,
    ) -> Result<Textbook> {
        self.create_textbook_impl(uploaded_by, textbook).await
    }

    async fn get_textbook_by_id(&self, textbook_id: i64) -> Result<Option<Textbook>> {
        self.get_textbook_by_id_impl(textbook_id).await
    }

    async fn list_textbooks_with_pagination(
        &self,
        query: TextbookListQuery,
    ) -> Result<TextbookListResponse> {
        self.list_textbooks_with_pagination_impl(query).await
    }

    async fn delete_textbook(&self, textbook_id: i64, uploaded_by: i64) -> Result<()> {
        self.delete_textbook_impl(textbook_id, uploaded_by).await
    }

    // 作业模块
    async fn create_homework(
        &self,
        teacher_id: i64,
        homework: CreateHomeworkRequest,
    ) -> Result<Homework> {
        self.create_homework_impl(teacher_id, homework).await
    }

    async fn get_homework_by_id(&self, homework_id: i64) -> Result<Option<Homework>> {
        self.get_homework_by_id_impl(homework_id).await
    }

    async fn get_homework_stats(&self, homework_id: i64) -> Result<HomeworkStats> {
        self.get_homework_stats_impl(homework_id).await
    }

    async fn update_homework(
        &self,
        homework_id: i64,
        teacher_id: i64,
        update: UpdateHomeworkRequest,
    ) -> Result<Homework> {
        self.update_homework_impl(homework_id, teacher_id, update)
            .await
    }

    async fn delete_homework_cascade(&self, homework_id: i64, teacher_id: i64) -> Result<()> {
        self.delete_homework_cascade_impl(homework_id, teacher_id)
            .await
    }

    async fn list_homeworks_by_teacher(
        &self,
        teacher_id: i64,
        class_id: Option<i64>,
        page: i64,
        size: i64,
    ) -> Result<HomeworkListResponse> {
        self.list_homeworks_by_teacher_impl(teacher_id, class_id, page, size)
            .await
    }

    async fn list_homeworks_by_class(
        &self,
        class_id: i64,
        subject: Option<String>,
        page: i64,
        size: i64,
    ) -> Result<HomeworkListResponse> {
        self.list_homeworks_by_class_impl(class_id, subject, page, size)
            .await
    }

    async fn list_pending_homeworks_for_student(
        &self,
        student_id: i64,
        class_id: i64,
        page: i64,
        size: i64,
    ) -> Result<Vec<Homework>> {
        self.list_pending_homeworks_for_student_impl(student_id, class_id, page, size)
            .await
    }

    // 提交模块
    async fn create_submission(
        &self,
        student_id: i64,
        submission: CreateSubmissionRequest,
    ) -> Result<Submission> {
        self.create_submission_impl(student_id, submission).await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn grade_submission(
        &self,
        submission_id: i64,
        teacher_id: i64,
        grade: f64,
        feedback: Option<String>,
    ) -> Result<Submission> {
        self.grade_submission_impl(submission_id, teacher_id, grade, feedback)
            .await
    }

    async fn add_submission_feedback(
        &self,
        submission_id: i64,
        teacher_id: i64,
        feedback: String,
    ) -> Result<Submission> {
        self.add_submission_feedback_impl(submission_id, teacher_id, feedback)
            .await
    }

    async fn delete_submission(&self, submission_id: i64, student_id: i64) -> Result<()> {
        self.delete_submission_impl(submission_id, student_id).await
    }

    async fn set_submission_analysis(
        &self,
        submission_id: i64,
        analysis: serde_json::Value,
    ) -> Result<bool> {
        self.set_submission_analysis_impl(submission_id, analysis)
            .await
    }

    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(query).await
    }

    async fn list_pending_submissions_for_teacher(
        &self,
        teacher_id: i64,
        page: i64,
        size: i64,
    ) -> Result<Vec<Submission>> {
        self.list_pending_submissions_for_teacher_impl(teacher_id, page, size)
            .await
    }

    async fn student_submission_stats(&self, student_id: i64) -> Result<StudentStats> {
        self.student_submission_stats_impl(student_id).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! 存储测试共用的数据构造函数

    use super::SeaOrmStorage;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::homeworks::requests::CreateHomeworkRequest;
    use crate::models::submissions::entities::FileKind;
    use crate::models::submissions::requests::CreateSubmissionRequest;
    use crate::models::users::entities::UserRole;
    use crate::models::users::requests::CreateUserRequest;

    pub async fn seed_user(
        storage: &SeaOrmStorage,
        email: &str,
        role: UserRole,
        class_id: Option<i64>,
    ) -> i64 {
        storage
            .create_user_impl(CreateUserRequest {
                email: email.to_string(),
                password: "hashed".to_string(),
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                phone: None,
                avatar_url: None,
                role,
                class_id,
                parent_id: None,
            })
            .await
            .expect("seed user")
            .id
    }

    pub async fn seed_class(storage: &SeaOrmStorage, name: &str) -> i64 {
        storage
            .create_class_impl(CreateClassRequest {
                name: name.to_string(),
                grade_level: None,
            })
            .await
            .expect("seed class")
            .id
    }

    /// 创建作业，截止时间为 now + due_in_secs（可为负，用于构造已过期作业）
    pub async fn seed_homework(
        storage: &SeaOrmStorage,
        teacher_id: i64,
        class_id: i64,
        due_in_secs: i64,
    ) -> i64 {
        storage
            .create_homework_impl(
                teacher_id,
                CreateHomeworkRequest {
                    class_id,
                    subject: Some("math".to_string()),
                    textbook_id: None,
                    page_range: None,
                    title: "Exercise".to_string(),
                    description: None,
                    due_at: chrono::Utc::now() + chrono::Duration::seconds(due_in_secs),
                },
            )
            .await
            .expect("seed homework")
            .id
    }

    pub fn submission_request(homework_id: i64) -> CreateSubmissionRequest {
        CreateSubmissionRequest {
            homework_id,
            file_url: "/api/v1/files/test.pdf".to_string(),
            file_kind: FileKind::Pdf,
        }
    }
}
