//! 诊断快照命令

use crate::errors::Result;
use crate::storage::Storage;

/// 返回快照的 JSON 文本，失败时由调用方输出 ErrorBody
pub async fn cmd_snapshot(storage: &dyn Storage) -> Result<String> {
    let snapshot = storage.snapshot().await?;
    Ok(serde_json::to_string_pretty(&snapshot)?)
}
