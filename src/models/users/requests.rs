use serde::Deserialize;
use ts_rs::TS;

use super::entities::UserRole;

// 创建用户请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub role: UserRole,
    pub class_id: Option<i64>,
    pub parent_id: Option<i64>,
}

// 更新用户请求（部分更新：缺省字段保持不变，角色创建后不可变更）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub class_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub is_verified: Option<bool>,
}

// 用户列表查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub role: Option<UserRole>,
    pub class_id: Option<i64>,
    /// 是否包含已停用账号，默认不包含
    pub include_inactive: Option<bool>,
}
