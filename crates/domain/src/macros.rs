//! Macro for implementing Display and FromStr for small string-backed enums
//!
//! For enums that cross the API boundary as lowercase strings, like the
//! listing sort key and the chat enums.
//!
//! # Example
//!
//! ```rust
//! use greenloop_domain::impl_string_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Visibility {
//!     Public,
//!     Hidden,
//! }
//!
//! impl_string_enum_conversions!(Visibility {
//!     Public => "public",
//!     Hidden => "hidden",
//! });
//!
//! assert_eq!(Visibility::Hidden.to_string(), "hidden");
//! assert_eq!("PUBLIC".parse::<Visibility>(), Ok(Visibility::Public));
//! ```

/// Implements Display and FromStr for a fieldless enum
///
/// - Display writes the mapped string
/// - FromStr parses case-insensitively and trims surrounding whitespace
#[macro_export]
macro_rules! impl_string_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $enum_name {
            /// The wire representation of this variant
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
