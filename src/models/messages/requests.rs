use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::MessageType;
use crate::models::common::{PaginationQuery, SortOrder};

// 发送消息请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "message.ts")]
pub struct SendMessageRequest {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    #[serde(rename = "type", default)]
    pub message_type: MessageType,
    pub file_url: Option<String>,
}

impl SendMessageRequest {
    pub fn text(sender_id: i64, receiver_id: i64, content: impl Into<String>) -> Self {
        Self {
            sender_id,
            receiver_id,
            content: content.into(),
            message_type: MessageType::Text,
            file_url: None,
        }
    }
}

// 消息列表查询参数
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "message.ts")]
pub struct MessageListQuery {
    pub sender_id: Option<i64>,
    pub receiver_id: Option<i64>,
    /// 作为发送方或接收方参与的用户
    pub participant_id: Option<i64>,
    #[serde(rename = "type")]
    pub message_type: Option<MessageType>,
    pub order: Option<SortOrder>,
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}

// 批量清理消息请求，至少指定一个条件
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "message.ts")]
pub struct PurgeMessagesRequest {
    pub sender_id: Option<i64>,
    pub receiver_id: Option<i64>,
    /// 仅清理早于该时间的消息
    pub before: Option<DateTime<Utc>>,
}

impl PurgeMessagesRequest {
    pub fn is_empty(&self) -> bool {
        self.sender_id.is_none() && self.receiver_id.is_none() && self.before.is_none()
    }
}
