//! Chat service - conversation loading and optimistic message sending

use std::sync::Arc;

use chrono::Utc;
use greenloop_common::{ApiError, ApiResult, FieldErrors};
use greenloop_domain::constants::LOCAL_MESSAGE_ID_PREFIX;
use greenloop_domain::{ChatMessage, Conversation, ConversationView, DeliveryState};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::ports::ChatGateway;
use super::transform::{apply_sent_message, clear_unread, decorate, sort_by_recent};

/// Chat use cases on top of a [`ChatGateway`]
pub struct ChatService {
    gateway: Arc<dyn ChatGateway>,
}

impl ChatService {
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self { gateway }
    }

    /// Conversations for the inbox, most recent first, with the user's role
    #[instrument(skip(self))]
    pub async fn inbox(&self, user_id: &str) -> ApiResult<Vec<ConversationView>> {
        let mut conversations = self.gateway.fetch_conversations(user_id).await?;
        sort_by_recent(&mut conversations);
        Ok(decorate(conversations, user_id))
    }

    /// Load a thread and mark it read
    ///
    /// A failed read receipt is logged and does not fail the call: the
    /// messages were already fetched.
    #[instrument(skip(self, conversations))]
    pub async fn open(
        &self,
        conversations: &mut [Conversation],
        conversation_id: &str,
        user_id: &str,
    ) -> ApiResult<Vec<ChatMessage>> {
        let messages = self.gateway.fetch_messages(conversation_id).await?;

        match self.gateway.mark_read(conversation_id, user_id).await {
            Ok(()) => {
                clear_unread(conversations, conversation_id);
            }
            Err(err) => debug!(error = %err, "Failed to mark conversation read"),
        }

        Ok(messages)
    }

    /// Send a message with an optimistic pending entry
    ///
    /// The pending message is appended to `messages` before the request and
    /// replaced by the server's message on success. On failure it stays in
    /// place marked [`DeliveryState::Failed`] and the error is returned.
    ///
    /// # Errors
    /// `Validation` when the trimmed text is empty (nothing is appended and
    /// no request is made), otherwise the gateway's error.
    #[instrument(skip(self, conversations, messages, text))]
    pub async fn send(
        &self,
        conversations: &mut [Conversation],
        messages: &mut Vec<ChatMessage>,
        conversation_id: &str,
        sender_id: &str,
        text: &str,
    ) -> ApiResult<ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            let mut fields = FieldErrors::new();
            fields.insert("text".into(), vec!["Message cannot be empty".into()]);
            return Err(ApiError::validation("Message cannot be empty", fields));
        }

        let pending = pending_message(conversation_id, sender_id, text);
        let local_id = pending.id.clone();
        messages.push(pending);

        match self.gateway.send_message(conversation_id, sender_id, text).await {
            Ok(sent) => {
                if let Some(slot) = messages.iter_mut().find(|m| m.id == local_id) {
                    *slot = sent.clone();
                }
                apply_sent_message(conversations, &sent);
                Ok(sent)
            }
            Err(err) => {
                debug!(error = %err, local_id = %local_id, "Message send failed");
                if let Some(slot) = messages.iter_mut().find(|m| m.id == local_id) {
                    slot.delivery = DeliveryState::Failed;
                }
                Err(err)
            }
        }
    }

    /// Start a conversation about a listing and return it decorated
    #[instrument(skip(self))]
    pub async fn start(
        &self,
        listing_id: &str,
        buyer_id: &str,
        seller_id: &str,
    ) -> ApiResult<ConversationView> {
        let conversation =
            self.gateway.start_conversation(listing_id, buyer_id, seller_id).await?;
        let mut views = decorate(vec![conversation], buyer_id);
        views.pop().ok_or_else(|| ApiError::unknown("Conversation was not returned"))
    }
}

fn pending_message(conversation_id: &str, sender_id: &str, text: &str) -> ChatMessage {
    ChatMessage {
        id: format!("{LOCAL_MESSAGE_ID_PREFIX}{}", Uuid::new_v4()),
        conversation_id: conversation_id.to_string(),
        text: text.to_string(),
        sender_id: sender_id.to_string(),
        timestamp: Utc::now(),
        delivery: DeliveryState::Pending,
    }
}
