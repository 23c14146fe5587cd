//! 数据模型定义

pub mod auth;
pub mod classes;
pub mod common;
pub mod homeworks;
pub mod submissions;
pub mod textbooks;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间（用于运行时长统计）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
