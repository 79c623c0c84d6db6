//! Data models
//!
//! Shared between order-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), all timestamps are
//! UTC milliseconds.

/// Closed string enumerations: serde, sqlx TEXT and `FromStr` agree on the
/// same snake_case spelling.
macro_rules! text_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "snake_case")]
        #[cfg_attr(feature = "db", derive(sqlx::Type))]
        #[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err($crate::models::UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

pub mod category;
pub mod dining_table;
pub mod menu_item;
pub mod money;
pub mod order;
pub mod payment;
pub mod session;
pub mod staff_call;
pub mod store;
pub mod user;

// Re-exports
pub use category::*;
pub use dining_table::*;
pub use menu_item::*;
pub use money::*;
pub use order::*;
pub use payment::*;
pub use session::*;
pub use staff_call::*;
pub use store::*;
pub use user::*;

/// A string that does not name any variant of a closed enumeration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Parse a closed enumeration from request input, turning a bad value
/// into a 400 that lists the accepted spellings.
pub fn parse_enum<T>(value: &str, field: &str, allowed: &[T]) -> crate::AppResult<T>
where
    T: std::str::FromStr + std::fmt::Display,
{
    value.parse::<T>().map_err(|_| {
        let accepted: Vec<String> = allowed.iter().map(ToString::to_string).collect();
        crate::AppError::validation(format!(
            "Invalid {}: {} (expected one of {})",
            field,
            value,
            accepted.join(", ")
        ))
        .with_detail("field", field)
    })
}
