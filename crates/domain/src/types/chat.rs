//! Conversations and messages
//!
//! Server rows are snake_case; the view models serialize camelCase for the
//! UI. Message delivery state is client-only and never sent by the server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_string_enum_conversions;
use crate::utils::serde::{opt_string_or_number, string_or_number};

/// Conversation row from `GET /api/chat/conversations/:userId`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub listing_id: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub buyer_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub seller_id: String,
    #[serde(default, alias = "other_user_name")]
    pub participant_name: Option<String>,
    #[serde(default)]
    pub listing_title: Option<String>,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub last_message_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unread_count: Option<u32>,
    #[serde(default)]
    pub is_online: Option<bool>,
    #[serde(default)]
    pub is_verified: Option<bool>,
}

/// Conversation view model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub listing_id: Option<String>,
    pub buyer_id: String,
    pub seller_id: String,
    pub participant_name: String,
    pub listing_title: Option<String>,
    pub last_message: Option<String>,
    pub last_message_time: Option<DateTime<Utc>>,
    pub unread_count: u32,
    pub is_online: bool,
    pub is_verified: bool,
}

/// Which side of a conversation the current user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationRole {
    Buyer,
    Seller,
    /// Neither participant, e.g. an admin view
    Observer,
}

impl_string_enum_conversions!(ConversationRole {
    Buyer => "buyer",
    Seller => "seller",
    Observer => "observer",
});

impl ConversationRole {
    /// Role of `user_id` in a conversation between `buyer_id` and `seller_id`
    ///
    /// Buyer wins when a user somehow sits on both sides.
    pub fn of(user_id: &str, buyer_id: &str, seller_id: &str) -> Self {
        if user_id == buyer_id {
            Self::Buyer
        } else if user_id == seller_id {
            Self::Seller
        } else {
            Self::Observer
        }
    }
}

/// A conversation decorated with the current user's role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationView {
    #[serde(flatten)]
    pub conversation: Conversation,
    pub role: ConversationRole,
}

impl ConversationView {
    /// Id of the other participant, `None` for observers
    pub fn counterpart_id(&self) -> Option<&str> {
        match self.role {
            ConversationRole::Buyer => Some(&self.conversation.seller_id),
            ConversationRole::Seller => Some(&self.conversation.buyer_id),
            ConversationRole::Observer => None,
        }
    }
}

/// Message row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub conversation_id: String,
    #[serde(alias = "content")]
    pub text: String,
    #[serde(deserialize_with = "string_or_number")]
    pub sender_id: String,
    #[serde(alias = "created_at")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryState {
    /// Shown optimistically, not yet acknowledged
    Pending,
    #[default]
    Sent,
    Failed,
}

impl_string_enum_conversions!(DeliveryState {
    Pending => "pending",
    Sent => "sent",
    Failed => "failed",
});

/// Message view model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub conversation_id: String,
    pub text: String,
    pub sender_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub delivery: DeliveryState,
}

impl ChatMessage {
    pub fn is_pending(&self) -> bool {
        self.delivery == DeliveryState::Pending
    }

    pub fn is_from(&self, user_id: &str) -> bool {
        self.sender_id == user_id
    }
}

/// Payload for `POST /api/chat/messages`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    pub conversation_id: String,
    pub sender_id: String,
    pub text: String,
}

/// Payload for `POST /api/chat/conversations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewConversation {
    pub listing_id: String,
    pub buyer_id: String,
    pub seller_id: String,
}

/// Payload for `PUT /api/chat/conversations/:id/read`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadReceipt {
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_of() {
        assert_eq!(ConversationRole::of("b", "b", "s"), ConversationRole::Buyer);
        assert_eq!(ConversationRole::of("s", "b", "s"), ConversationRole::Seller);
        assert_eq!(ConversationRole::of("x", "b", "s"), ConversationRole::Observer);
    }

    #[test]
    fn test_message_record_aliases() {
        let record: MessageRecord = serde_json::from_value(serde_json::json!({
            "id": 12,
            "conversation_id": 4,
            "content": "Is this still available?",
            "sender_id": "u-2",
            "created_at": "2024-07-02T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(record.id, "12");
        assert_eq!(record.text, "Is this still available?");
    }

    #[test]
    fn test_message_delivery_defaults_to_sent() {
        let msg: ChatMessage = serde_json::from_value(serde_json::json!({
            "id": "m1",
            "conversationId": "c1",
            "text": "hi",
            "senderId": "u1",
            "timestamp": "2024-07-02T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(msg.delivery, DeliveryState::Sent);
        assert!(msg.is_from("u1"));
        assert_eq!("FAILED".parse::<DeliveryState>(), Ok(DeliveryState::Failed));
    }
}
