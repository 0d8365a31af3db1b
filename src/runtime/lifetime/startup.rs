use crate::config::AppConfig;
use crate::errors::Result;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 准备运行上下文
/// 打开存储并完成迁移，存储句柄由调用方持有并负责关闭
pub async fn prepare_startup(config: &AppConfig) -> Result<StartupContext> {
    debug!(
        "Opening storage (pool_size: {}, timeout: {}s)",
        config.database.pool_size, config.database.timeout
    );

    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    Ok(StartupContext { storage })
}
