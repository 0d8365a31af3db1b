use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::messages::entities::MessageType;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid username regex"));

static FILE_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(https?://|/)\S+$").expect("Invalid file url regex"));

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：3 <= x <= 32
    if username.len() < 3 || username.len() > 32 {
        return Err("length must be between 3 and 32 characters");
    }
    // 用户名格式校验：只能包含字母、数字、下划线、点或连字符
    if !USERNAME_RE.is_match(username) {
        return Err("must contain only letters, numbers, underscores, dots or hyphens");
    }
    Ok(())
}

/// 必填字段不能为空白
pub fn validate_required(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("must not be empty");
    }
    Ok(())
}

/// 校验消息类型与 file_url 的对应关系
pub fn validate_file_url(
    message_type: MessageType,
    file_url: Option<&str>,
) -> Result<(), &'static str> {
    match (message_type.requires_file_url(), file_url) {
        (true, None) => Err("is required for file and image messages"),
        (true, Some(url)) if !FILE_URL_RE.is_match(url) => {
            Err("must be an absolute http(s) URL or a root-relative path")
        }
        (true, Some(_)) => Ok(()),
        (false, Some(_)) => Err("is not allowed for text messages"),
        (false, None) => Ok(()),
    }
}
