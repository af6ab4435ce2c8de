//! Marketplace records and view models
//!
//! `*Record` types deserialize the backend's rows as-is. The view models are
//! what feature code hands to the UI.

pub mod chat;
pub mod envelope;
pub mod favorite;
pub mod listing;
pub mod seller;
pub mod upload;

pub use chat::{
    ChatMessage, Conversation, ConversationRecord, ConversationRole, ConversationView,
    DeliveryState, MessageRecord, NewConversation, OutgoingMessage, ReadReceipt,
};
pub use envelope::{Ack, ApiEnvelope};
pub use favorite::{Favorite, FavoriteRecord, FavoriteStatus, NewFavorite};
pub use listing::{
    Listing, ListingFilter, ListingRecord, ListingSort, ListingUpdate, NewListing, SellerSummary,
};
pub use seller::{BioUpdate, SellerProfile, SellerRecord};
pub use upload::{ImageFile, UploadedImage};
