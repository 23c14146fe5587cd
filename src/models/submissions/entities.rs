use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 提交状态
//
// 状态只沿偏序 pending < reviewed、pending < graded 前进，pending 不会被
// 重新进入。reviewed 与 graded 互不可比：批改后的提交可以再次批改，
// 已留言的提交可以批改（reviewed -> graded），但 graded 不会退回 reviewed。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum SubmissionStatus {
    Pending,  // 待批改
    Reviewed, // 已留言
    Graded,   // 已评分
}

impl SubmissionStatus {
    pub const PENDING: &'static str = "pending";
    pub const REVIEWED: &'static str = "reviewed";
    pub const GRADED: &'static str = "graded";
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            SubmissionStatus::PENDING => Ok(SubmissionStatus::Pending),
            SubmissionStatus::REVIEWED => Ok(SubmissionStatus::Reviewed),
            SubmissionStatus::GRADED => Ok(SubmissionStatus::Graded),
            _ => Err(serde::de::Error::custom(format!(
                "无效的提交状态: '{s}'. 支持的状态: pending, reviewed, graded"
            ))),
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Pending => write!(f, "{}", SubmissionStatus::PENDING),
            SubmissionStatus::Reviewed => write!(f, "{}", SubmissionStatus::REVIEWED),
            SubmissionStatus::Graded => write!(f, "{}", SubmissionStatus::GRADED),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SubmissionStatus::Pending),
            "reviewed" => Ok(SubmissionStatus::Reviewed),
            "graded" => Ok(SubmissionStatus::Graded),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

// 提交文件类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum FileKind {
    Image, // 图片 (jpeg/png)
    Pdf,   // PDF 文档
}

impl FileKind {
    pub const IMAGE: &'static str = "image";
    pub const PDF: &'static str = "pdf";
}

impl<'de> Deserialize<'de> for FileKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            FileKind::IMAGE => Ok(FileKind::Image),
            FileKind::PDF => Ok(FileKind::Pdf),
            _ => Err(serde::de::Error::custom(format!(
                "无效的文件类型: '{s}'. 支持的类型: image, pdf"
            ))),
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Image => write!(f, "{}", FileKind::IMAGE),
            FileKind::Pdf => write!(f, "{}", FileKind::PDF),
        }
    }
}

impl std::str::FromStr for FileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(FileKind::Image),
            "pdf" => Ok(FileKind::Pdf),
            _ => Err(format!("Invalid file kind: {s}")),
        }
    }
}

// 提交实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub homework_id: i64,
    pub student_id: i64,
    pub file_url: String,
    pub file_kind: FileKind,
    pub status: SubmissionStatus,
    pub grade: Option<f64>,
    pub teacher_feedback: Option<String>,
    // AI 分析结果原样存储，内部结构不做校验
    pub ai_analysis: Option<serde_json::Value>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    // reviewed_at 有值当且仅当 status 为 reviewed 或 graded
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for s in ["pending", "reviewed", "graded"] {
            let status: SubmissionStatus = s.parse().unwrap();
            assert_eq!(status.to_string(), s);
        }
        assert!("done".parse::<SubmissionStatus>().is_err());
    }

    #[test]
    fn test_file_kind_roundtrip() {
        assert_eq!("image".parse::<FileKind>().unwrap(), FileKind::Image);
        assert_eq!("pdf".parse::<FileKind>().unwrap(), FileKind::Pdf);
        assert!("video".parse::<FileKind>().is_err());
    }
}
