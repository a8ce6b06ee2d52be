//! Type-safe identifier wrappers.
//!
//! Sessions are keyed by a UUID v7. Catalog objects and special situations
//! are keyed by short, human-readable slugs (`"bed"`, `"yoga-mat"`,
//! `"perfect_morning"`) because the presentation layer addresses them by
//! name. Both kinds are distinct newtypes so an object key can never be
//! passed where a situation key is expected.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

/// Generates a newtype wrapper around a string slug.
macro_rules! define_key {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create a key from any string-like value.
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            /// Borrow the key as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self(key.to_owned())
            }
        }
    };
}

define_id! {
    /// Unique identifier for one play session (one owned `GameState`).
    SessionId
}

define_key! {
    /// Key of an interactable object in the catalog (e.g. `"bed"`).
    ObjectId
}

define_key! {
    /// Key of a special situation in the registry (e.g. `"power_nap"`).
    SituationId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_unique() {
        let a = SessionId::new();
        let b = SessionId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }

    #[test]
    fn object_id_serializes_as_plain_string() {
        let id = ObjectId::from("yoga-mat");
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("\"yoga-mat\""));
    }

    #[test]
    fn keys_are_plain_strings_in_bindings() {
        assert_eq!(ObjectId::inline(), "string");
        assert_eq!(SituationId::inline(), "string");
    }

    #[test]
    fn object_id_deserializes_from_plain_string() {
        let id: Option<ObjectId> = serde_json::from_str("\"bed\"").ok();
        assert_eq!(id, Some(ObjectId::from("bed")));
    }

    #[test]
    fn key_display_is_the_slug() {
        let id = SituationId::new("power_nap");
        assert_eq!(id.to_string(), "power_nap");
        assert_eq!(id.as_str(), "power_nap");
    }
}
