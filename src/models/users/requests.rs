use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::{PaginationQuery, SortOrder};

// 用户创建请求，password 须由调用方预先哈希
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: Option<String>,
    pub is_super_admin: Option<bool>,
}

// 用户更新请求，username 不可修改
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UpdateUserRequest {
    pub password: Option<String>,
    pub role: Option<String>,
    pub is_super_admin: Option<bool>,
}

// 用户排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "user.ts")]
pub enum UserSortField {
    Username,
    CreatedAt,
}

// 用户列表查询参数
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserListQuery {
    pub role: Option<String>,
    pub is_super_admin: Option<bool>,
    pub search: Option<String>,
    pub sort_by: Option<UserSortField>,
    pub order: Option<SortOrder>,
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}
