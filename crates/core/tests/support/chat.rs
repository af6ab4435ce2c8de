//! In-memory `ChatGateway` with scripted send results

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use greenloop_common::{ApiError, ApiResult};
use greenloop_core::ChatGateway;
use greenloop_domain::{ChatMessage, Conversation, DeliveryState};
use parking_lot::Mutex;

/// Mock gateway recording how often each endpoint was hit.
#[derive(Default)]
pub struct MockChatGateway {
    pub conversations: Vec<Conversation>,
    pub messages: Vec<ChatMessage>,
    send_results: Mutex<VecDeque<ApiResult<()>>>,
    pub fail_mark_read: bool,
    pub send_calls: AtomicU32,
    pub mark_read_calls: AtomicU32,
}

impl MockChatGateway {
    pub fn with_conversations(conversations: Vec<Conversation>) -> Self {
        Self { conversations, ..Self::default() }
    }

    /// Queue the outcome of the next `send_message` call.
    pub fn script_send(&self, result: ApiResult<()>) {
        self.send_results.lock().push_back(result);
    }

    pub fn sends(&self) -> u32 {
        self.send_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatGateway for MockChatGateway {
    async fn fetch_conversations(&self, _user_id: &str) -> ApiResult<Vec<Conversation>> {
        Ok(self.conversations.clone())
    }

    async fn fetch_messages(&self, conversation_id: &str) -> ApiResult<Vec<ChatMessage>> {
        Ok(self
            .messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect())
    }

    async fn send_message(
        &self,
        conversation_id: &str,
        sender_id: &str,
        text: &str,
    ) -> ApiResult<ChatMessage> {
        let n = self.send_calls.fetch_add(1, Ordering::SeqCst);
        self.send_results.lock().pop_front().unwrap_or(Ok(()))?;

        Ok(ChatMessage {
            id: format!("srv-{n}"),
            conversation_id: conversation_id.to_string(),
            text: text.to_string(),
            sender_id: sender_id.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 8, 1, 9, 0, 0).unwrap(),
            delivery: DeliveryState::Sent,
        })
    }

    async fn start_conversation(
        &self,
        listing_id: &str,
        buyer_id: &str,
        seller_id: &str,
    ) -> ApiResult<Conversation> {
        Ok(conversation("new", listing_id, buyer_id, seller_id))
    }

    async fn mark_read(&self, _conversation_id: &str, _user_id: &str) -> ApiResult<()> {
        self.mark_read_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mark_read {
            return Err(ApiError::http(500, "read receipts unavailable"));
        }
        Ok(())
    }
}

pub fn conversation(id: &str, listing_id: &str, buyer_id: &str, seller_id: &str) -> Conversation {
    Conversation {
        id: id.to_string(),
        listing_id: Some(listing_id.to_string()),
        buyer_id: buyer_id.to_string(),
        seller_id: seller_id.to_string(),
        participant_name: "Sam".to_string(),
        listing_title: Some("Cargo bike".to_string()),
        last_message: None,
        last_message_time: None,
        unread_count: 0,
        is_online: false,
        is_verified: false,
    }
}
