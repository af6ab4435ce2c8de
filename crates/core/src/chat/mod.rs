//! Chat: record mapping, conversation-list transforms and the optimistic
//! send flow

pub mod ports;
pub mod service;
pub mod transform;

pub use ports::ChatGateway;
pub use service::ChatService;
pub use transform::{
    apply_sent_message, clear_unread, decorate, sort_by_recent, to_conversation, to_message,
    total_unread,
};
