//! Pure transforms over conversation lists and message rows

use std::cmp::Ordering;

use greenloop_domain::constants::UNKNOWN_PARTICIPANT_NAME;
use greenloop_domain::{
    ChatMessage, Conversation, ConversationRecord, ConversationRole, ConversationView,
    DeliveryState, MessageRecord,
};

pub fn to_conversation(record: &ConversationRecord) -> Conversation {
    Conversation {
        id: record.id.clone(),
        listing_id: record.listing_id.clone(),
        buyer_id: record.buyer_id.clone(),
        seller_id: record.seller_id.clone(),
        participant_name: record
            .participant_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_PARTICIPANT_NAME)
            .to_string(),
        listing_title: record.listing_title.clone(),
        last_message: record.last_message.clone(),
        last_message_time: record.last_message_time,
        unread_count: record.unread_count.unwrap_or(0),
        is_online: record.is_online.unwrap_or(false),
        is_verified: record.is_verified.unwrap_or(false),
    }
}

/// Fetched messages have been stored by the server, so they are `Sent`
pub fn to_message(record: &MessageRecord) -> ChatMessage {
    ChatMessage {
        id: record.id.clone(),
        conversation_id: record.conversation_id.clone(),
        text: record.text.clone(),
        sender_id: record.sender_id.clone(),
        timestamp: record.timestamp,
        delivery: DeliveryState::Sent,
    }
}

/// Attach the current user's role to each conversation
pub fn decorate(conversations: Vec<Conversation>, user_id: &str) -> Vec<ConversationView> {
    conversations
        .into_iter()
        .map(|conversation| {
            let role =
                ConversationRole::of(user_id, &conversation.buyer_id, &conversation.seller_id);
            ConversationView { conversation, role }
        })
        .collect()
}

/// Update the preview of the conversation a message belongs to
///
/// Only `last_message` and `last_message_time` of the matching conversation
/// change; the order of the slice is untouched. Returns `false` when no
/// conversation matches.
pub fn apply_sent_message(conversations: &mut [Conversation], message: &ChatMessage) -> bool {
    match conversations.iter_mut().find(|c| c.id == message.conversation_id) {
        Some(conversation) => {
            conversation.last_message = Some(message.text.clone());
            conversation.last_message_time = Some(message.timestamp);
            true
        }
        None => false,
    }
}

/// Most recent activity first; conversations without messages go last
///
/// The sort is stable, so ties keep their server order.
pub fn sort_by_recent(conversations: &mut [Conversation]) {
    conversations.sort_by(|a, b| match (a.last_message_time, b.last_message_time) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

pub fn total_unread(conversations: &[Conversation]) -> u32 {
    conversations.iter().fold(0, |sum, c| sum.saturating_add(c.unread_count))
}

/// Zero the unread badge of one conversation; returns whether it existed
pub fn clear_unread(conversations: &mut [Conversation], conversation_id: &str) -> bool {
    match conversations.iter_mut().find(|c| c.id == conversation_id) {
        Some(conversation) => {
            conversation.unread_count = 0;
            true
        }
        None => false,
    }
}
