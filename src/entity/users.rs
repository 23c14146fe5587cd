//! 用户实体

use sea_orm::entity::prelude::*;
use std::str::FromStr;

use crate::models::users::entities::{User, UserRole};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub class_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
    #[sea_orm(has_many = "super::homeworks::Entity")]
    Homeworks,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::homeworks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Homeworks.def()
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
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            email: self.email,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            avatar_url: self.avatar_url,
            role: UserRole::from_str(&self.role).unwrap_or(UserRole::Student),
            is_active: self.is_active,
            is_verified: self.is_verified,
            class_id: self.class_id,
            parent_id: self.parent_id,
            last_login: self
                .last_login
                .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0)),
            created_at: chrono::DateTime::from_timestamp(self.created_at, 0)
                .unwrap_or(chrono::DateTime::UNIX_EPOCH),
            updated_at: chrono::DateTime::from_timestamp(self.updated_at, 0)
                .unwrap_or(chrono::DateTime::UNIX_EPOCH),
        }
    }
}
