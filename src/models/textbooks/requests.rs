use serde::Deserialize;
use ts_rs::TS;

// 创建教材请求（file_url 来自先行的文件上传）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/textbook.ts")]
pub struct CreateTextbookRequest {
    pub title: String,
    pub subject: Option<String>,
    pub class_id: Option<i64>,
    pub file_url: String,
}

// 教材列表查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/textbook.ts")]
pub struct TextbookListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub subject: Option<String>,
    pub class_id: Option<i64>,
}
