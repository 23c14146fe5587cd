use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Textbook;
use crate::models::common::pagination::PaginationInfo;

// 教材列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/textbook.ts")]
pub struct TextbookListResponse {
    pub items: Vec<Textbook>,
    pub pagination: PaginationInfo,
}
