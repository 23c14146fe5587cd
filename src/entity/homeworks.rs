//! 作业实体

use sea_orm::entity::prelude::*;

use crate::models::homeworks::entities::Homework;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "homeworks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub class_id: i64,
    pub subject: Option<String>,
    pub textbook_id: Option<i64>,
    pub page_range: Option<String>,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub due_at: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id"
    )]
    Teacher,
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
    #[sea_orm(
        belongs_to = "super::textbooks::Entity",
        from = "Column::TextbookId",
        to = "super::textbooks::Column::Id"
    )]
    Textbook,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::textbooks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Textbook.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转换为业务模型
    pub fn into_homework(self) -> Homework {
        Homework {
            id: self.id,
            teacher_id: self.teacher_id,
            class_id: self.class_id,
            subject: self.subject,
            textbook_id: self.textbook_id,
            page_range: self.page_range,
            title: self.title,
            description: self.description,
            due_at: chrono::DateTime::from_timestamp(self.due_at, 0)
                .unwrap_or(chrono::DateTime::UNIX_EPOCH),
            created_at: chrono::DateTime::from_timestamp(self.created_at, 0)
                .unwrap_or(chrono::DateTime::UNIX_EPOCH),
            updated_at: chrono::DateTime::from_timestamp(self.updated_at, 0)
                .unwrap_or(chrono::DateTime::UNIX_EPOCH),
        }
    }
}
