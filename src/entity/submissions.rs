//! 提交实体

use sea_orm::entity::prelude::*;
use std::str::FromStr;

use crate::models::submissions::entities::{FileKind, Submission, SubmissionStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub homework_id: i64,
    pub student_id: i64,
    pub file_url: String,
    pub file_kind: String,
    pub status: String,
    pub grade: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub teacher_feedback: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub ai_analysis: Option<String>,
    pub submitted_at: i64,
    pub reviewed_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::homeworks::Entity",
        from = "Column::HomeworkId",
        to = "super::homeworks::Column::Id"
    )]
    Homework,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
}

impl Related<super::homeworks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Homework.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转换为业务模型
    pub fn into_submission(self) -> Submission {
        Submission {
            id: self.id,
            homework_id: self.homework_id,
            student_id: self.student_id,
            file_url: self.file_url,
            file_kind: FileKind::from_str(&self.file_kind).unwrap_or(FileKind::Image),
            status: SubmissionStatus::from_str(&self.status).unwrap_or(SubmissionStatus::Pending),
            grade: self.grade,
            teacher_feedback: self.teacher_feedback,
            ai_analysis: self
                .ai_analysis
                .as_deref()
                .and_then(|s| serde_json::from_str(s).ok()),
            submitted_at: chrono::DateTime::from_timestamp(self.submitted_at, 0)
                .unwrap_or(chrono::DateTime::UNIX_EPOCH),
            reviewed_at: self
                .reviewed_at
                .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0)),
        }
    }
}
