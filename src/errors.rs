//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，每个错误携带稳定的机器可读代码、
//! 类型名称和对应的 HTTP 状态码，调用方可以直接根据代码分支。

use actix_web::http::StatusCode;
use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回稳定的错误代码（机器可读）
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - status_code() 方法 - 返回 HTTP 状态码
/// - 便捷构造函数
macro_rules! define_eduproof_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum EduProofError {
            $($variant(String),)*
        }

        impl EduProofError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(EduProofError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(EduProofError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(EduProofError::$variant(msg) => msg,)*
                }
            }

            /// 获取对应的 HTTP 状态码
            pub fn status_code(&self) -> StatusCode {
                match self {
                    $(EduProofError::$variant(_) => {
                        StatusCode::from_u16($status).expect("Invalid status code in error table")
                    })*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl EduProofError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        EduProofError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_eduproof_errors! {
    // 基础设施错误（与领域错误区分，统一表现为 500/502）
    CacheConnection("CACHE_CONNECTION", "Cache Connection Error", 500),
    CachePluginNotFound("CACHE_PLUGIN_NOT_FOUND", "Cache Plugin Not Found", 500),
    DatabaseConfig("DATABASE_CONFIG", "Database Configuration Error", 500),
    DatabaseConnection("DATABASE_CONNECTION", "Database Connection Error", 500),
    DatabaseOperation("DATABASE_OPERATION", "Database Operation Error", 500),
    FileOperation("FILE_OPERATION", "File Operation Error", 500),
    Serialization("SERIALIZATION", "Serialization Error", 500),
    DateParse("DATE_PARSE", "Date Parse Error", 500),
    ProviderUnavailable("PROVIDER_UNAVAILABLE", "Analysis Provider Unavailable", 502),

    // 领域错误：资源不存在
    NotFound("NOT_FOUND", "Resource Not Found", 404),
    AssignmentNotFound("ASSIGNMENT_NOT_FOUND", "Assignment Not Found", 404),
    SubmissionNotFound("SUBMISSION_NOT_FOUND", "Submission Not Found", 404),
    UserNotFound("USER_NOT_FOUND", "User Not Found", 404),

    // 领域错误：认证与授权
    Unauthorized("UNAUTHORIZED", "Authentication Required", 401),
    InvalidCredentials("INVALID_CREDENTIALS", "Invalid Credentials", 401),
    AccountInactive("ACCOUNT_INACTIVE", "Account Inactive", 403),
    Forbidden("FORBIDDEN", "Insufficient Permissions", 403),
    NotHomeworkOwner("NOT_HOMEWORK_OWNER", "Not The Assignment Owner", 403),
    NotSubmissionOwner("NOT_SUBMISSION_OWNER", "Not The Submission Owner", 403),

    // 领域错误：冲突与非法状态
    AlreadySubmitted("ALREADY_SUBMITTED", "Submission Already Exists", 409),
    EmailExists("EMAIL_EXISTS", "Email Already Registered", 409),
    PastDueDate("PAST_DUE_DATE", "Past The Due Date", 400),
    CannotDeleteGraded("CANNOT_DELETE_GRADED", "Submission No Longer Pending", 400),

    // 领域错误：输入校验
    Validation("VALIDATION", "Validation Error", 422),
}

impl EduProofError {
    /// 是否为领域错误（非基础设施错误）
    pub fn is_domain(&self) -> bool {
        self.status_code() != StatusCode::INTERNAL_SERVER_ERROR
            && self.status_code() != StatusCode::BAD_GATEWAY
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for EduProofError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for EduProofError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for EduProofError {
    fn from(err: sea_orm::DbErr) -> Self {
        EduProofError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for EduProofError {
    fn from(err: std::io::Error) -> Self {
        EduProofError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for EduProofError {
    fn from(err: serde_json::Error) -> Self {
        EduProofError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for EduProofError {
    fn from(err: chrono::ParseError) -> Self {
        EduProofError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EduProofError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            EduProofError::already_submitted("test").code(),
            "ALREADY_SUBMITTED"
        );
        assert_eq!(EduProofError::past_due_date("test").code(), "PAST_DUE_DATE");
        assert_eq!(
            EduProofError::not_homework_owner("test").code(),
            "NOT_HOMEWORK_OWNER"
        );
        assert_eq!(
            EduProofError::cannot_delete_graded("test").code(),
            "CANNOT_DELETE_GRADED"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            EduProofError::assignment_not_found("test").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            EduProofError::already_submitted("test").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            EduProofError::not_submission_owner("test").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            EduProofError::validation("test").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            EduProofError::database_operation("test").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_domain_split() {
        assert!(EduProofError::past_due_date("test").is_domain());
        assert!(EduProofError::forbidden("test").is_domain());
        assert!(!EduProofError::database_connection("test").is_domain());
    }

    #[test]
    fn test_error_message() {
        let err = EduProofError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = EduProofError::validation("分数超出范围");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("分数超出范围"));
    }
}
