//! Chat service over the HTTP chat gateway

#[path = "support.rs"]
mod support;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use greenloop_common::ErrorCode;
use greenloop_core::ChatService;
use greenloop_domain::{Conversation, ConversationRole, DeliveryState};
use greenloop_infra::ChatApi;
use serde_json::json;
use support::{client_with, conversation_row, fast_retry, message_row, ok, signed_in_client, TOKEN};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server: &MockServer) -> ChatService {
    ChatService::new(Arc::new(ChatApi::new(signed_in_client(server))))
}

async fn mount_inbox(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/chat/conversations/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!([
            conversation_row("c-old", "me", "s-1", Some("2024-07-01T10:00:00Z")),
            conversation_row("c-empty", "b-9", "me", None),
            conversation_row("c-new", "me", "s-2", Some("2024-07-03T10:00:00Z")),
        ]))))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_inbox_sorted_with_roles() {
    let server = MockServer::start().await;
    mount_inbox(&server).await;

    let inbox = service(&server).inbox("me").await.expect("inbox loads");

    let ids: Vec<_> = inbox.iter().map(|v| v.conversation.id.as_str()).collect();
    assert_eq!(ids, vec!["c-new", "c-old", "c-empty"]);
    assert_eq!(inbox[0].role, ConversationRole::Buyer);
    assert_eq!(inbox[2].role, ConversationRole::Seller);
    assert_eq!(inbox[2].counterpart_id(), Some("b-9"));
}

#[tokio::test]
async fn test_send_updates_only_target_conversation() {
    let server = MockServer::start().await;
    mount_inbox(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/chat/messages"))
        .and(body_json(json!({
            "conversation_id": "c-old",
            "sender_id": "me",
            "text": "Still available?"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(ok(message_row("m-1", "c-old", "Still available?"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let chat = service(&server);
    let mut conversations: Vec<_> =
        chat.inbox("me").await.expect("inbox").into_iter().map(|v| v.conversation).collect();
    let before = conversations.clone();
    let mut messages = Vec::new();

    let sent = chat
        .send(&mut conversations, &mut messages, "c-old", "me", "  Still available?  ")
        .await
        .expect("message sent");

    assert_eq!(sent.id, "m-1");
    assert_eq!(sent.timestamp, Utc.with_ymd_and_hms(2024, 8, 1, 9, 30, 0).unwrap());
    assert_eq!(messages, vec![sent.clone()]);
    assert_eq!(messages[0].delivery, DeliveryState::Sent);

    let ids: Vec<_> = conversations.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c-new", "c-old", "c-empty"]);
    assert_eq!(conversations[1].last_message.as_deref(), Some("Still available?"));
    assert_eq!(conversations[1].last_message_time, Some(sent.timestamp));
    assert_eq!(conversations[0], before[0]);
    assert_eq!(conversations[2], before[2]);
}

#[tokio::test]
async fn test_failed_send_keeps_message_marked_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/messages"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let api = ChatApi::new(client_with(&server, Some(TOKEN), fast_retry(0)));
    let chat = ChatService::new(Arc::new(api));
    let mut conversations: Vec<Conversation> = Vec::new();
    let mut messages = Vec::new();

    let err = chat
        .send(&mut conversations, &mut messages, "c-1", "me", "hello")
        .await
        .unwrap_err();

    assert_eq!(err.status, 500);
    assert_eq!(err.message, "boom");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].delivery, DeliveryState::Failed);
    assert!(messages[0].id.starts_with("local-"));
}

#[tokio::test]
async fn test_open_marks_conversation_read() {
    let server = MockServer::start().await;
    mount_inbox(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/chat/messages/c-new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!([
            message_row("m-1", "c-new", "Hi"),
            { "id": 2, "conversation_id": "c-new", "content": "Hello", "sender_id": "s-2",
              "created_at": "2024-08-01T09:31:00Z" }
        ]))))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/chat/conversations/c-new/read"))
        .and(body_json(json!({ "user_id": "me" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let chat = service(&server);
    let mut conversations: Vec<_> =
        chat.inbox("me").await.expect("inbox").into_iter().map(|v| v.conversation).collect();

    let messages = chat.open(&mut conversations, "c-new", "me").await.expect("thread opens");

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].text, "Hello");
    assert_eq!(conversations[0].unread_count, 0);
    assert_eq!(conversations[1].unread_count, 1);
}

#[tokio::test]
async fn test_start_conversation_returns_buyer_view() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/conversations"))
        .and(body_json(json!({ "listing_id": "l-1", "buyer_id": "me", "seller_id": "s-1" })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(ok(conversation_row("c-9", "me", "s-1", None))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let view = service(&server).start("l-1", "me", "s-1").await.expect("conversation starts");

    assert_eq!(view.conversation.id, "c-9");
    assert_eq!(view.role, ConversationRole::Buyer);
    assert_eq!(view.counterpart_id(), Some("s-1"));
}

#[tokio::test]
async fn test_blank_message_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let chat = service(&server);
    let mut messages = Vec::new();
    let err = chat.send(&mut [], &mut messages, "c-1", "me", "   ").await.unwrap_err();

    assert_eq!(err.code, ErrorCode::Validation);
    assert!(messages.is_empty());
}
