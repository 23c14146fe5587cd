//! 用户存储操作
//!
//! 用户是软删除：deactivate 只翻转 is_active 标志，记录保留。

use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{EduProofError, Result};
use crate::models::{
    PaginationInfo,
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};

impl SeaOrmStorage {
    /// 创建用户（req.password 字段须为已哈希的密码）
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            email: Set(req.email),
            password_hash: Set(req.password),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            phone: Set(req.phone),
            avatar_url: Set(req.avatar_url),
            role: Set(req.role.to_string()),
            is_active: Set(true),
            is_verified: Set(false),
            class_id: Set(req.class_id),
            parent_id: Set(req.parent_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(m) => Ok(m.into_user()),
            Err(e) => match e.sql_err() {
                // 邮箱唯一约束由数据库兜底
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(EduProofError::email_exists("该邮箱已注册"))
                }
                _ => Err(EduProofError::database_operation(format!(
                    "创建用户失败: {e}"
                ))),
            },
        }
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户（精确匹配，大小写敏感）
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 列出用户（分页）
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Users::find();

        // 角色筛选
        if let Some(ref role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        // 班级筛选
        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        // 默认不返回已停用账号
        if !query.include_inactive.unwrap_or(false) {
            select = select.filter(Column::IsActive.eq(true));
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询用户总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询用户页数失败: {e}")))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新用户信息（部分更新：缺省字段保持不变，角色不可变更）
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        let existing = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询用户失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        if let Some(first_name) = update.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(phone) = update.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(avatar_url) = update.avatar_url {
            active.avatar_url = Set(Some(avatar_url));
        }
        if let Some(class_id) = update.class_id {
            active.class_id = Set(Some(class_id));
        }
        if let Some(parent_id) = update.parent_id {
            active.parent_id = Set(Some(parent_id));
        }
        if let Some(is_verified) = update.is_verified {
            active.is_verified = Set(is_verified);
        }
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("更新用户失败: {e}")))?;

        Ok(Some(updated.into_user()))
    }

    /// 更新用户密码哈希
    pub async fn update_user_password_impl(&self, id: i64, password_hash: &str) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(
                Column::PasswordHash,
                sea_orm::sea_query::Expr::value(password_hash.to_string()),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("更新密码失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 停用用户（软删除）
    pub async fn deactivate_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("停用用户失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(
                Column::LastLogin,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("更新登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("统计用户数量失败: {e}")))
    }

    /// 列出某家长的子女
    pub async fn list_children_impl(&self, parent_id: i64) -> Result<Vec<User>> {
        let results = Users::find()
            .filter(Column::ParentId.eq(parent_id))
            .filter(Column::IsActive.eq(true))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询子女列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_user()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    fn user_request(email: &str, role: UserRole) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            password: "hashed".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            phone: None,
            avatar_url: None,
            role,
            class_id: None,
            parent_id: None,
        }
    }

    #[tokio::test]
    async fn test_email_uniqueness_is_case_sensitive() {
        let storage = SeaOrmStorage::new_in_memory().await;
        storage
            .create_user_impl(user_request("Alice@example.com", UserRole::Student))
            .await
            .unwrap();

        // 完全相同的邮箱冲突
        let err = storage
            .create_user_impl(user_request("Alice@example.com", UserRole::Student))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "EMAIL_EXISTS");

        // 精确匹配查询不命中大小写不同的邮箱
        assert!(
            storage
                .get_user_by_email_impl("alice@example.com")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_deactivate_is_soft_delete() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let user = storage
            .create_user_impl(user_request("bob@example.com", UserRole::Teacher))
            .await
            .unwrap();

        assert!(storage.deactivate_user_impl(user.id).await.unwrap());

        // 记录保留，仅 is_active 翻转
        let reloaded = storage.get_user_by_id_impl(user.id).await.unwrap().unwrap();
        assert!(!reloaded.is_active);
    }

    #[tokio::test]
    async fn test_role_is_immutable_via_update() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let user = storage
            .create_user_impl(user_request("carol@example.com", UserRole::Student))
            .await
            .unwrap();

        let updated = storage
            .update_user_impl(
                user.id,
                UpdateUserRequest {
                    first_name: Some("Carol".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.first_name, "Carol");
        assert_eq!(updated.role, UserRole::Student);
    }
}
