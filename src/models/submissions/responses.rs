use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Submission;
use crate::models::common::pagination::PaginationInfo;

// 提交列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<Submission>,
    pub pagination: PaginationInfo,
}

// 学生提交统计
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct StudentStats {
    pub total: i64,
    pub pending: i64,
    pub reviewed: i64,
    pub graded: i64,
    /// 仅对有分数的提交取平均；一个分数都没有时为 null
    pub average_grade: Option<f64>,
}
