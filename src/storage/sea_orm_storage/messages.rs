//! 消息存储操作
//!
//! 消息没有外键，发送方与接收方只需是正整数 ID。

use super::{SeaOrmStorage, db_error, now, require};
use crate::entity::messages::{ActiveModel, Column, Entity as Messages};
use crate::errors::{Result, StoreError};
use crate::models::{
    messages::{
        entities::Message,
        requests::{MessageListQuery, PurgeMessagesRequest, SendMessageRequest},
    },
    session::entities::SessionUser,
};
use crate::utils::validate::{validate_file_url, validate_required};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, Order, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::{debug, info, warn};

fn message_not_found(id: i64) -> StoreError {
    StoreError::not_found(format!("message {id} not found"))
}

fn positive_id(id: i64) -> std::result::Result<(), &'static str> {
    if id <= 0 {
        return Err("must be a positive id");
    }
    Ok(())
}

impl SeaOrmStorage {
    /// 发送消息
    pub async fn send_message_impl(&self, req: SendMessageRequest) -> Result<Message> {
        require("sender_id", positive_id(req.sender_id))?;
        require("receiver_id", positive_id(req.receiver_id))?;
        require("content", validate_required(&req.content))?;
        require(
            "file_url",
            validate_file_url(req.message_type, req.file_url.as_deref()),
        )?;

        let model = ActiveModel {
            sender_id: Set(req.sender_id),
            receiver_id: Set(req.receiver_id),
            content: Set(req.content),
            message_type: Set(req.message_type.to_string()),
            file_url: Set(req.file_url),
            created_at: Set(now()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("发送消息失败", e))?;

        info!(
            "Message {} sent from {} to {}",
            result.id, result.sender_id, result.receiver_id
        );
        result.try_into_message()
    }

    /// 通过 ID 获取消息
    pub async fn get_message_impl(&self, id: i64) -> Result<Message> {
        Messages::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询消息失败", e))?
            .ok_or_else(|| message_not_found(id))?
            .try_into_message()
    }

    /// 列出消息，默认按发送时间升序
    pub async fn list_messages_impl(&self, query: MessageListQuery) -> Result<Vec<Message>> {
        debug!("Listing messages with {:?}", query);

        let mut select = Messages::find();

        if let Some(sender_id) = query.sender_id {
            select = select.filter(Column::SenderId.eq(sender_id));
        }

        if let Some(receiver_id) = query.receiver_id {
            select = select.filter(Column::ReceiverId.eq(receiver_id));
        }

        // 参与者：发送方或接收方
        if let Some(participant_id) = query.participant_id {
            select = select.filter(
                Condition::any()
                    .add(Column::SenderId.eq(participant_id))
                    .add(Column::ReceiverId.eq(participant_id)),
            );
        }

        if let Some(message_type) = query.message_type {
            select = select.filter(Column::MessageType.eq(message_type.to_string()));
        }

        let order: Order = query.order.unwrap_or_default().into();
        select = select
            .order_by(Column::CreatedAt, order.clone())
            .order_by(Column::Id, order);

        if let Some((offset, limit)) = query.pagination.window() {
            select = select.offset(offset).limit(limit);
        }

        select
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询消息列表失败", e))?
            .into_iter()
            .map(|m| m.try_into_message())
            .collect()
    }

    /// 两个用户之间的往来消息，按时间顺序
    pub async fn conversation_impl(&self, user_a: i64, user_b: i64) -> Result<Vec<Message>> {
        let direction = |from: i64, to: i64| {
            Condition::all()
                .add(Column::SenderId.eq(from))
                .add(Column::ReceiverId.eq(to))
        };

        Messages::find()
            .filter(
                Condition::any()
                    .add(direction(user_a, user_b))
                    .add(direction(user_b, user_a)),
            )
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询会话消息失败", e))?
            .into_iter()
            .map(|m| m.try_into_message())
            .collect()
    }

    /// 删除单条消息，仅管理员或消息参与者可操作
    pub async fn delete_message_impl(&self, actor: &SessionUser, id: i64) -> Result<()> {
        let message = self.get_message_impl(id).await?;

        if !actor.is_admin() && !message.involves(actor.id) {
            warn!("User {} attempted to delete message {}", actor.id, id);
            return Err(StoreError::authorization(format!(
                "user {} may not delete message {id}",
                actor.id
            )));
        }

        let result = Messages::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除消息失败", e))?;

        // 读取与删除之间被并发删除
        if result.rows_affected == 0 {
            return Err(message_not_found(id));
        }

        info!("Message {} deleted by user {}", id, actor.id);
        Ok(())
    }

    /// 批量清理消息，仅管理员可操作，返回删除条数
    pub async fn purge_messages_impl(
        &self,
        actor: &SessionUser,
        request: PurgeMessagesRequest,
    ) -> Result<u64> {
        if !actor.is_admin() {
            warn!("Non-admin user {} attempted to purge messages", actor.id);
            return Err(StoreError::authorization("only admins may purge messages"));
        }

        if request.is_empty() {
            return Err(StoreError::validation(
                "purge requires at least one of sender_id, receiver_id or before",
            ));
        }

        let mut condition = Condition::all();
        if let Some(sender_id) = request.sender_id {
            condition = condition.add(Column::SenderId.eq(sender_id));
        }
        if let Some(receiver_id) = request.receiver_id {
            condition = condition.add(Column::ReceiverId.eq(receiver_id));
        }
        if let Some(before) = request.before {
            condition = condition.add(Column::CreatedAt.lt(before.timestamp()));
        }

        let result = Messages::delete_many()
            .filter(condition)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("清理消息失败", e))?;

        info!(
            "User {} purged {} message(s)",
            actor.id, result.rows_affected
        );
        Ok(result.rows_affected)
    }
}
