//! Domain constants shared by the client layers

// HTTP defaults
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("greenloop-sdk/", env!("CARGO_PKG_VERSION"));

// Retry defaults
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

// Logging
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

// Listing validation
pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_ECO_SCORE: u8 = 100;

/// Prefix of ids given to optimistic chat messages before the server answers
pub const LOCAL_MESSAGE_ID_PREFIX: &str = "local-";

/// Raw bodies quoted in error messages are cut to this many characters
pub const MAX_ERROR_BODY_CHARS: usize = 200;

/// Multipart field name expected by the image upload endpoint
pub const UPLOAD_FIELD_NAME: &str = "image";

// Display fallbacks for rows with missing names
pub const UNKNOWN_SELLER_NAME: &str = "Unknown seller";
pub const UNKNOWN_PARTICIPANT_NAME: &str = "Unknown user";
