mod common;

use chrono::{Duration, Utc};
use common::spawn_store;
use school_registry::errors::StoreError;
use school_registry::models::{
    SortOrder,
    messages::{
        entities::MessageType,
        requests::{MessageListQuery, PurgeMessagesRequest, SendMessageRequest},
    },
    session::entities::SessionUser,
    users::entities::ADMIN_ROLE,
};

fn attachment(message_type: MessageType, file_url: Option<&str>) -> SendMessageRequest {
    SendMessageRequest {
        sender_id: 1,
        receiver_id: 2,
        content: "see attached".to_string(),
        message_type,
        file_url: file_url.map(str::to_string),
    }
}

#[tokio::test]
async fn test_send_and_get_message() {
    let store = spawn_store().await;

    let sent = store
        .send_message(SendMessageRequest::text(1, 2, "hello"))
        .await
        .unwrap();
    assert_eq!(sent.message_type, MessageType::Text);
    assert!(sent.file_url.is_none());

    let fetched = store.get_message(sent.id).await.unwrap();
    assert_eq!(fetched, sent);

    let json = serde_json::to_value(&fetched).unwrap();
    assert_eq!(json["type"], "text");
}

#[tokio::test]
async fn test_file_url_rules() {
    let store = spawn_store().await;

    let err = store
        .send_message(attachment(MessageType::File, None))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert!(err.message().starts_with("file_url:"));

    let err = store
        .send_message(attachment(MessageType::Image, None))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let mut text = SendMessageRequest::text(1, 2, "hi");
    text.file_url = Some("https://cdn.example/a.png".to_string());
    assert!(matches!(
        store.send_message(text).await.unwrap_err(),
        StoreError::Validation(_)
    ));

    let image = store
        .send_message(attachment(
            MessageType::Image,
            Some("https://cdn.example/a.png"),
        ))
        .await
        .unwrap();
    assert_eq!(image.message_type, MessageType::Image);
    assert_eq!(image.file_url.as_deref(), Some("https://cdn.example/a.png"));
}

#[tokio::test]
async fn test_send_rejects_blank_content_and_bad_ids() {
    let store = spawn_store().await;

    let err = store
        .send_message(SendMessageRequest::text(1, 2, "  "))
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::validation("content: must not be empty"));

    let err = store
        .send_message(SendMessageRequest::text(0, 2, "hi"))
        .await
        .unwrap_err();
    assert!(err.message().starts_with("sender_id:"));
}

#[tokio::test]
async fn test_conversation_includes_both_directions_in_order() {
    let store = spawn_store().await;

    let m1 = store
        .send_message(SendMessageRequest::text(1, 2, "ping"))
        .await
        .unwrap();
    store
        .send_message(SendMessageRequest::text(1, 3, "elsewhere"))
        .await
        .unwrap();
    let m2 = store
        .send_message(SendMessageRequest::text(2, 1, "pong"))
        .await
        .unwrap();

    let thread = store.conversation(2, 1).await.unwrap();
    let ids: Vec<_> = thread.iter().map(|m| m.id).collect();
    assert_eq!(ids, [m1.id, m2.id]);

    let involving_one = store
        .list_messages(MessageListQuery {
            participant_id: Some(1),
            order: Some(SortOrder::Desc),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(involving_one.len(), 3);
    assert_eq!(involving_one[0].id, m2.id);
}

#[tokio::test]
async fn test_list_messages_by_type() {
    let store = spawn_store().await;
    store
        .send_message(SendMessageRequest::text(1, 2, "hi"))
        .await
        .unwrap();
    store
        .send_message(attachment(MessageType::File, Some("/uploads/report.pdf")))
        .await
        .unwrap();

    let files = store
        .list_messages(MessageListQuery {
            message_type: Some(MessageType::File),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_url.as_deref(), Some("/uploads/report.pdf"));
}

#[tokio::test]
async fn test_delete_message_requires_participant_or_admin() {
    let store = spawn_store().await;
    let message = store
        .send_message(SendMessageRequest::text(1, 2, "private"))
        .await
        .unwrap();

    let outsider = SessionUser::new(3, "student");
    let err = store
        .delete_message(&outsider, message.id)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Authorization(_)));

    let receiver = SessionUser::new(2, "student");
    store.delete_message(&receiver, message.id).await.unwrap();

    let err = store
        .delete_message(&receiver, message.id)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[tokio::test]
async fn test_purge_requires_admin() {
    let store = spawn_store().await;
    for content in ["a", "b"] {
        store
            .send_message(SendMessageRequest::text(1, 2, content))
            .await
            .unwrap();
    }
    store
        .send_message(SendMessageRequest::text(3, 2, "c"))
        .await
        .unwrap();

    let request = PurgeMessagesRequest {
        sender_id: Some(1),
        ..Default::default()
    };

    let err = store
        .purge_messages(&SessionUser::new(1, "student"), request.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Authorization(_)));
    assert_eq!(err.code(), "E005");

    let admin = SessionUser::new(99, ADMIN_ROLE);
    let err = store
        .purge_messages(&admin, PurgeMessagesRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    assert_eq!(store.purge_messages(&admin, request).await.unwrap(), 2);

    let remaining = store
        .list_messages(MessageListQuery::default())
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].sender_id, 3);
}

#[tokio::test]
async fn test_purge_before_timestamp() {
    let store = spawn_store().await;
    store
        .send_message(SendMessageRequest::text(1, 2, "recent"))
        .await
        .unwrap();

    let admin = SessionUser::new(99, ADMIN_ROLE);
    let older_than_an_hour = PurgeMessagesRequest {
        before: Some(Utc::now() - Duration::hours(1)),
        ..Default::default()
    };
    assert_eq!(
        store
            .purge_messages(&admin, older_than_an_hour)
            .await
            .unwrap(),
        0
    );

    let everything = PurgeMessagesRequest {
        before: Some(Utc::now() + Duration::hours(1)),
        ..Default::default()
    };
    assert_eq!(store.purge_messages(&admin, everything).await.unwrap(), 1);
}
