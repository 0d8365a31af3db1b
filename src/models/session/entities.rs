use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::ADMIN_ROLE;

// 会话层提供的当前操作者信息，存储层只信任其中的 id 与 role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "session.ts")]
pub struct SessionUser {
    pub id: i64,
    pub role: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

impl SessionUser {
    pub fn new(id: i64, role: impl Into<String>) -> Self {
        Self {
            id,
            role: role.into(),
            name: None,
            email: None,
            image: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}
