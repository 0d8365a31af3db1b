use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 年级实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct Grade {
    pub id: i64,
    pub name: String,
    pub level: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// 年级摘要，作为学生记录上的只读投影
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeSummary {
    pub id: i64,
    pub name: String,
    pub level: Option<String>,
}

// 删除年级时对引用学生的处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "grade.ts")]
pub enum DeletePolicy {
    /// 存在引用学生时拒绝删除
    #[default]
    Restrict,
    /// 在同一事务内先删除引用学生
    Cascade,
}

// 年级删除结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeDeletion {
    pub grade_id: i64,
    pub students_removed: u64,
}
