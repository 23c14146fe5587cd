use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 作业实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct Homework {
    // 唯一 ID
    pub id: i64,
    // 布置作业的教师 ID（所有者）
    pub teacher_id: i64,
    // 目标班级 ID
    pub class_id: i64,
    // 科目
    pub subject: Option<String>,
    // 关联教材 ID
    pub textbook_id: Option<i64>,
    // 教材页码范围，如 "12-15"
    pub page_range: Option<String>,
    // 作业标题
    pub title: String,
    // 作业说明
    pub description: Option<String>,
    // 截止时间（包含边界：恰好等于截止时间的提交有效）
    pub due_at: chrono::DateTime<chrono::Utc>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
