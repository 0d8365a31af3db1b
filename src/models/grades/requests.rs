use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::{PaginationQuery, SortOrder};

// 年级创建请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct CreateGradeRequest {
    pub name: String,
    pub level: Option<String>,
    pub description: Option<String>,
}

impl CreateGradeRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
            description: None,
        }
    }
}

// 年级更新请求，未提供的字段保持不变
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct UpdateGradeRequest {
    pub name: Option<String>,
    pub level: Option<String>,
    pub description: Option<String>,
}

// 年级排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "grade.ts")]
pub enum GradeSortField {
    Name,
    Level,
    CreatedAt,
}

// 年级列表查询参数
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeListQuery {
    pub level: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<GradeSortField>,
    pub order: Option<SortOrder>,
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}
