//! 授权守卫
//!
//! 纯函数式的角色级权限判定：给定 principal 的角色与某类操作允许的
//! 角色集合，返回允许或携带原因代码的拒绝。不做任何 I/O。
//!
//! 这里只回答"该角色是否被允许尝试这类操作"。资源级所有权
//! （例如"是否是这份作业的布置教师"）需要查库，由各生命周期管理器
//! 在每次调用时单独校验，两类检查有意分开：角色检查是静态可缓存的，
//! 所有权检查必须逐次重新验证。

use crate::errors::{EduProofError, Result};
use crate::models::users::entities::UserRole;

pub struct AuthorizationGuard;

impl AuthorizationGuard {
    /// 角色级权限判定。纯函数，全函数，无 I/O。
    pub fn check(role: &UserRole, allowed_roles: &[&UserRole]) -> Result<()> {
        if allowed_roles.iter().any(|allowed| *allowed == role) {
            Ok(())
        } else {
            Err(EduProofError::forbidden(format!(
                "角色 {role} 不允许执行该操作"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_role_passes() {
        assert!(AuthorizationGuard::check(&UserRole::Teacher, UserRole::teacher_roles()).is_ok());
        assert!(AuthorizationGuard::check(&UserRole::Student, UserRole::student_roles()).is_ok());
    }

    #[test]
    fn test_denied_role_carries_forbidden_code() {
        let err = AuthorizationGuard::check(&UserRole::Student, UserRole::teacher_roles())
            .unwrap_err();
        assert_eq!(err.code(), "FORBIDDEN");
    }

    #[test]
    fn test_admin_is_superset_of_principal() {
        // Admin 在所有要求 Principal 的位置均被允许
        assert!(AuthorizationGuard::check(&UserRole::Admin, UserRole::principal_roles()).is_ok());
        assert!(
            AuthorizationGuard::check(&UserRole::Admin, UserRole::teacher_or_principal_roles())
                .is_ok()
        );
        // 但 Admin 不出现在仅教师的集合中
        assert!(AuthorizationGuard::check(&UserRole::Admin, UserRole::teacher_roles()).is_err());
    }

    #[test]
    fn test_parent_only_set() {
        assert!(AuthorizationGuard::check(&UserRole::Parent, UserRole::parent_roles()).is_ok());
        assert!(AuthorizationGuard::check(&UserRole::Teacher, UserRole::parent_roles()).is_err());
    }
}
