use std::sync::Arc;

use tokio::signal;
use tracing::{error, warn};

use crate::storage::Storage;

pub async fn listen_for_shutdown() {
    // 等待 Ctrl+C 信号，无法监听时永不返回
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received, initiating graceful shutdown...");
}

/// 关闭存储，失败只记录日志
pub async fn close_storage(storage: &Arc<dyn Storage>) {
    if let Err(e) = storage.close().await {
        error!("Failed to close storage: {}", e);
    }
}
