use serde::Deserialize;
use ts_rs::TS;

// 创建作业请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct CreateHomeworkRequest {
    pub class_id: i64,
    pub subject: Option<String>,
    pub textbook_id: Option<i64>,
    pub page_range: Option<String>,
    pub title: String,
    pub description: Option<String>,
    // 不要求 due_at 在未来，教师可以补录历史作业
    pub due_at: chrono::DateTime<chrono::Utc>,
}

// 更新作业请求（部分更新：缺省字段保持不变）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct UpdateHomeworkRequest {
    pub subject: Option<String>,
    pub textbook_id: Option<i64>,
    pub page_range: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_at: Option<chrono::DateTime<chrono::Utc>>,
}

// 作业列表查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct HomeworkListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub class_id: Option<i64>,
    pub subject: Option<String>,
}

// 作业详情查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct HomeworkDetailQuery {
    /// 是否附带按状态聚合的提交统计
    pub include_stats: Option<bool>,
}
