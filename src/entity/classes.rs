//! 班级实体

use sea_orm::entity::prelude::*;

use crate::models::classes::entities::Class;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub grade_level: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::users::Entity")]
    Users,
    #[sea_orm(has_many = "super::homeworks::Entity")]
    Homeworks,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::homeworks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Homeworks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_class(self) -> Class {
        Class {
            id: self.id,
            name: self.name,
            grade_level: self.grade_level,
            created_at: chrono::DateTime::from_timestamp(self.created_at, 0)
                .unwrap_or(chrono::DateTime::UNIX_EPOCH),
            updated_at: chrono::DateTime::from_timestamp(self.updated_at, 0)
                .unwrap_or(chrono::DateTime::UNIX_EPOCH),
        }
    }
}
