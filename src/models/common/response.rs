use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 统一的错误响应体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    pub details: String,
}
