use serde::Deserialize;
use ts_rs::TS;

use super::entities::{FileKind, SubmissionStatus};

// 创建提交请求（file_url 来自先行的文件上传）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct CreateSubmissionRequest {
    pub homework_id: i64,
    pub file_url: String,
    pub file_kind: FileKind,
}

// 评分请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradeSubmissionRequest {
    /// 分数，必须位于 [0, 100]
    pub grade: f64,
    pub feedback: Option<String>,
}

// 留言请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct FeedbackRequest {
    pub feedback: String,
}

// 提交列表查询
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub homework_id: Option<i64>,
    pub student_id: Option<i64>,
    pub status: Option<SubmissionStatus>,
}

// 提交详情查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionDetailQuery {
    /// 是否附带 AI 分析结果
    pub include_ai: Option<bool>,
}
