use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Homework;
use crate::models::common::pagination::PaginationInfo;

// 作业列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct HomeworkListResponse {
    pub items: Vec<Homework>,
    pub pagination: PaginationInfo,
}

// 单个作业的提交统计（按状态聚合）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct HomeworkStats {
    pub total: i64,
    pub pending: i64,
    pub reviewed: i64,
    pub graded: i64,
}

// 作业详情响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct HomeworkDetailResponse {
    pub homework: Homework,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<HomeworkStats>,
}
