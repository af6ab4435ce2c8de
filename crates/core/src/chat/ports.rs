//! Port interface for chat

use async_trait::async_trait;
use greenloop_common::ApiResult;
use greenloop_domain::{ChatMessage, Conversation};

/// Conversation and message endpoints. Every call requires sign-in.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn fetch_conversations(&self, user_id: &str) -> ApiResult<Vec<Conversation>>;

    /// Messages of one conversation, oldest first
    async fn fetch_messages(&self, conversation_id: &str) -> ApiResult<Vec<ChatMessage>>;

    /// Send a message; returns the stored message with its server id
    async fn send_message(
        &self,
        conversation_id: &str,
        sender_id: &str,
        text: &str,
    ) -> ApiResult<ChatMessage>;

    /// Open (or reuse) the conversation between a buyer and a listing's seller
    async fn start_conversation(
        &self,
        listing_id: &str,
        buyer_id: &str,
        seller_id: &str,
    ) -> ApiResult<Conversation>;

    /// Mark every message in a conversation read for `user_id`
    async fn mark_read(&self, conversation_id: &str, user_id: &str) -> ApiResult<()>;
}
