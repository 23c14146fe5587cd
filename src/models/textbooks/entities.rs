use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教材实体
//
// is_indexed 由外部索引管线回写，本服务只创建时置 false。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/textbook.ts")]
pub struct Textbook {
    pub id: i64,
    pub title: String,
    pub subject: Option<String>,
    pub class_id: Option<i64>,
    pub file_url: String,
    pub uploaded_by: i64,
    pub is_indexed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
