use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 消息类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "message.ts")]
pub enum MessageType {
    #[default]
    Text,
    File,
    Image,
}

impl MessageType {
    pub const TEXT: &'static str = "text";
    pub const FILE: &'static str = "file";
    pub const IMAGE: &'static str = "image";

    /// 该类型是否必须携带 file_url
    pub fn requires_file_url(&self) -> bool {
        match self {
            MessageType::Text => false,
            MessageType::File | MessageType::Image => true,
        }
    }
}

impl<'de> Deserialize<'de> for MessageType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<MessageType>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的消息类型: '{s}'. 支持的类型: text, file, image"
            ))
        })
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageType::Text => write!(f, "{}", MessageType::TEXT),
            MessageType::File => write!(f, "{}", MessageType::FILE),
            MessageType::Image => write!(f, "{}", MessageType::IMAGE),
        }
    }
}

impl std::str::FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            MessageType::TEXT => Ok(MessageType::Text),
            MessageType::FILE => Ok(MessageType::File),
            MessageType::IMAGE => Ok(MessageType::Image),
            _ => Err(format!("Invalid message type: {s}")),
        }
    }
}

// 消息实体，创建后不可修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "message.ts")]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub file_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn involves(&self, user_id: i64) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }
}
