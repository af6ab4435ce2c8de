//! Chat endpoints. All of them require sign-in.

use std::sync::Arc;

use async_trait::async_trait;
use greenloop_common::ApiResult;
use greenloop_core::chat::{to_conversation, to_message};
use greenloop_core::ChatGateway;
use greenloop_domain::{
    ChatMessage, Conversation, ConversationRecord, MessageRecord, NewConversation,
    OutgoingMessage, ReadReceipt,
};
use tracing::{debug, instrument};

use super::client::{segment, ApiClient, AuthMode};

#[derive(Debug, Clone)]
pub struct ChatApi {
    client: Arc<ApiClient>,
}

impl ChatApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatGateway for ChatApi {
    #[instrument(skip(self))]
    async fn fetch_conversations(&self, user_id: &str) -> ApiResult<Vec<Conversation>> {
        let records: Vec<ConversationRecord> = self
            .client
            .get(
                &format!("/api/chat/conversations/{}", segment(user_id)),
                &[],
                AuthMode::Bearer,
                "Failed to load conversations",
            )
            .await
            .inspect_err(|err| debug!(error = %err, "fetch_conversations failed"))?;
        Ok(records.iter().map(to_conversation).collect())
    }

    #[instrument(skip(self))]
    async fn fetch_messages(&self, conversation_id: &str) -> ApiResult<Vec<ChatMessage>> {
        let records: Vec<MessageRecord> = self
            .client
            .get(
                &format!("/api/chat/messages/{}", segment(conversation_id)),
                &[],
                AuthMode::Bearer,
                "Failed to load messages",
            )
            .await
            .inspect_err(|err| debug!(error = %err, "fetch_messages failed"))?;
        Ok(records.iter().map(to_message).collect())
    }

    #[instrument(skip(self, text))]
    async fn send_message(
        &self,
        conversation_id: &str,
        sender_id: &str,
        text: &str,
    ) -> ApiResult<ChatMessage> {
        let body = OutgoingMessage {
            conversation_id: conversation_id.to_string(),
            sender_id: sender_id.to_string(),
            text: text.to_string(),
        };
        let record: MessageRecord = self
            .client
            .post("/api/chat/messages", &body, AuthMode::Bearer, "Failed to send message")
            .await
            .inspect_err(|err| debug!(error = %err, "send_message failed"))?;
        Ok(to_message(&record))
    }

    #[instrument(skip(self))]
    async fn start_conversation(
        &self,
        listing_id: &str,
        buyer_id: &str,
        seller_id: &str,
    ) -> ApiResult<Conversation> {
        let body = NewConversation {
            listing_id: listing_id.to_string(),
            buyer_id: buyer_id.to_string(),
            seller_id: seller_id.to_string(),
        };
        let record: ConversationRecord = self
            .client
            .post("/api/chat/conversations", &body, AuthMode::Bearer, "Failed to start conversation")
            .await
            .inspect_err(|err| debug!(error = %err, "start_conversation failed"))?;
        Ok(to_conversation(&record))
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, conversation_id: &str, user_id: &str) -> ApiResult<()> {
        let body = ReadReceipt { user_id: user_id.to_string() };
        self.client
            .put_ack(
                &format!("/api/chat/conversations/{}/read", segment(conversation_id)),
                &body,
                AuthMode::Bearer,
                "Failed to mark conversation read",
            )
            .await
            .inspect_err(|err| debug!(error = %err, "mark_read failed"))
    }
}
