//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称以及 HTTP 状态映射。

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::models::ErrorBody;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_store_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum StoreError {
            $($variant(String),)*
        }

        impl StoreError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(StoreError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(StoreError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(StoreError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl StoreError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        StoreError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_store_errors! {
    Validation("E001", "Validation Error"),
    NotFound("E002", "Resource Not Found"),
    Integrity("E003", "Integrity Error"),
    Infrastructure("E004", "Infrastructure Error"),
    Authorization("E005", "Authorization Error"),
    Configuration("E006", "Configuration Error"),
    Serialization("E007", "Serialization Error"),
}

impl StoreError {
    /// 字段级校验错误，消息格式为 `field: reason`
    pub fn invalid_field(field: &str, reason: impl fmt::Display) -> Self {
        StoreError::Validation(format!("{field}: {reason}"))
    }

    /// 是否为内部错误（详情只记录日志，不对外暴露）
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            StoreError::Infrastructure(_)
                | StoreError::Configuration(_)
                | StoreError::Serialization(_)
        )
    }

    /// 对外可见的错误详情
    pub fn public_message(&self) -> &str {
        match self {
            StoreError::Infrastructure(_) => "storage backend is unavailable",
            StoreError::Configuration(_) => "storage backend is misconfigured",
            StoreError::Serialization(_) => "stored record could not be decoded",
            other => other.message(),
        }
    }

    /// 转换为对外的错误响应体
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.error_type().to_string(),
            code: self.code().to_string(),
            details: self.public_message().to_string(),
        }
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

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for StoreError {}

impl ResponseError for StoreError {
    fn status_code(&self) -> StatusCode {
        match self {
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Integrity(_) => StatusCode::CONFLICT,
            StoreError::Authorization(_) => StatusCode::FORBIDDEN,
            StoreError::Infrastructure(_)
            | StoreError::Configuration(_)
            | StoreError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.is_internal() {
            tracing::error!("{}", self.format_simple());
        }
        HttpResponse::build(self.status_code()).json(self.to_body())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        StoreError::Infrastructure(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
