//! 消息实体
//!
//! sender_id / receiver_id 只是用户 ID 的弱引用，没有外键关系。

use sea_orm::entity::prelude::*;

use crate::errors::StoreError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub message_type: String,
    pub file_url: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型，未知的消息类型视为数据损坏
impl Model {
    pub fn try_into_message(self) -> crate::errors::Result<crate::models::messages::entities::Message> {
        use crate::models::messages::entities::{Message, MessageType};

        let message_type = self.message_type.parse::<MessageType>().map_err(|e| {
            StoreError::serialization(format!("消息 {} 类型无法解析: {e}", self.id))
        })?;

        Ok(Message {
            id: self.id,
            sender_id: self.sender_id,
            receiver_id: self.receiver_id,
            content: self.content,
            message_type,
            file_url: self.file_url,
            created_at: super::from_timestamp(self.created_at),
        })
    }
}
