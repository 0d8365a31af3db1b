use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::{PaginationQuery, SortOrder};

// 学生创建请求，password 须由调用方预先哈希
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct CreateStudentRequest {
    pub full_name: String,
    pub username: String,
    pub level: String,
    pub grade_id: i64,
    pub gender: String,
    pub password: String,
    pub is_active: Option<bool>,
}

// 学生更新请求
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct UpdateStudentRequest {
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub level: Option<String>,
    pub grade_id: Option<i64>,
    pub gender: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

// 学生排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "student.ts")]
pub enum StudentSortField {
    FullName,
    Username,
    CreatedAt,
}

// 学生列表查询参数
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentListQuery {
    pub grade_id: Option<i64>,
    pub is_active: Option<bool>,
    pub level: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<StudentSortField>,
    pub order: Option<SortOrder>,
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}
