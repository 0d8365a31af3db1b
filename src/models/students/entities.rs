use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::grades::entities::GradeSummary;

// 学生实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct Student {
    pub id: i64,
    pub full_name: String,
    pub username: String,
    pub level: String,
    pub grade_id: i64,
    pub gender: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub is_active: bool,
    /// 查询时联表得到的年级投影，不单独存储
    pub grade_relation: Option<GradeSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
