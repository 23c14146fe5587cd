use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Class;
use crate::models::common::pagination::PaginationInfo;

// 班级列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassListResponse {
    pub items: Vec<Class>,
    pub pagination: PaginationInfo,
}
