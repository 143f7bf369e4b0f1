// SPDX-License-Identifier: MIT

//! ID generation abstractions.
//!
//! Task-facing IDs (`TaskId`, `ContextId`, `ExecutionId`, `ArtifactId`) must be
//! globally unique and time-ordered (spec: "ULID/UUIDv7"). We use UUIDv7 via
//! [`uuid::Uuid::now_v7`] rather than the teacher's fixed-width nanoid buffer,
//! since a v7 UUID already carries the ordering property the teacher's
//! monotonic `created_at` field otherwise had to provide separately.

use std::borrow::Borrow;
use std::fmt;

/// A string-backed identifier. Always non-empty once constructed through
/// [`new`](IdString::new) or [`from_string`](IdString::from_string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct IdString(String);

impl IdString {
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for IdString {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for IdString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Define a newtype ID wrapper around [`IdString`], time-ordered (UUIDv7-backed).
///
/// Generates `new()` for random generation, `from_string()` for parsing,
/// `as_str()`, `Display`, `From<String>`, `From<&str>`, `PartialEq<str>`,
/// `Borrow<str>`, and `Deref` implementations — mirrors the ergonomics of the
/// teacher's `define_id!` macro (`oj-core::id`), generalized from a fixed-width
/// nanoid buffer to a UUIDv7 string since task ids must be time-ordered.
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $crate::id::IdString);

        impl $name {
            /// Generate a new time-ordered ID (UUIDv7).
            pub fn new() -> Self {
                Self($crate::id::IdString::generate())
            }

            /// Construct from an existing string (parsing/deserialization/resume).
            pub fn from_string(id: impl Into<String>) -> Self {
                Self($crate::id::IdString::from_string(id))
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::from_string(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::from_string(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0.as_str() == other
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                self.0.as_str()
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                self.0.as_str()
            }
        }
    };
}

/// Canonicalize a workflow plugin id: `-` becomes `_`, then lower-cased.
///
/// Applied at registration time and at every subsequent lookup so plugin ids
/// are treated as values rather than host-language identifiers (spec §9).
pub fn canonicalize_plugin_id(raw: &str) -> String {
    raw.replace('-', "_").to_lowercase()
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
