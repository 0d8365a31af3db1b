//! 提升超级管理员命令

use crate::errors::Result;
use crate::models::users::entities::User;
use crate::storage::Storage;
use tracing::{error, info};

pub async fn cmd_promote_admin(storage: &dyn Storage, username: &str) -> Result<User> {
    match storage.promote_super_admin(username).await {
        Ok(user) => {
            info!(
                "User '{}' (ID: {}) is now a super admin",
                user.username, user.id
            );
            Ok(user)
        }
        Err(e) => {
            error!("Failed to promote '{}' to super admin: {}", username, e);
            Err(e)
        }
    }
}
