//! 教材实体

use sea_orm::entity::prelude::*;

use crate::models::textbooks::entities::Textbook;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "textbooks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub subject: Option<String>,
    pub class_id: Option<i64>,
    pub file_url: String,
    pub uploaded_by: i64,
    pub is_indexed: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UploadedBy",
        to = "super::users::Column::Id"
    )]
    Uploader,
    #[sea_orm(has_many = "super::homeworks::Entity")]
    Homeworks,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Uploader.def()
    }
}

impl Related<super::homeworks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Homeworks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_textbook(self) -> Textbook {
        Textbook {
            id: self.id,
            title: self.title,
            subject: self.subject,
            class_id: self.class_id,
            file_url: self.file_url,
            uploaded_by: self.uploaded_by,
            is_indexed: self.is_indexed,
            created_at: chrono::DateTime::from_timestamp(self.created_at, 0)
                .unwrap_or(chrono::DateTime::UNIX_EPOCH),
        }
    }
}
