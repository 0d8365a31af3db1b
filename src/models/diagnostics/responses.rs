use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::{grades::entities::Grade, users::entities::User};

// 诊断快照：只包含数据，不包含任何连接配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "diagnostics.ts")]
pub struct StoreSnapshot {
    pub grades: Vec<Grade>,
    pub admin: Vec<User>,
}
