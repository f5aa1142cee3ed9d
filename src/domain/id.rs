//! Provider-assigned identifier types.
//!
//! The provider issues numeric ids today, but the workflow treats them as
//! opaque. Decoding accepts either a JSON number or a JSON string and keeps
//! the canonical text; anything else is a shape mismatch.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    fn into_text(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Create a new `", stringify!($name), "`.")]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into_text()))
            }
        }
    };
}

opaque_id!(
    /// Identifier of a transfer held at the provider.
    TransferId
);

opaque_id!(
    /// Identifier of a rate-locking quote.
    QuoteId
);

opaque_id!(
    /// Identifier of the recipient account a transfer pays into.
    AccountId
);

opaque_id!(
    /// Identifier of the provider profile that owns quotes and transfers.
    ProfileId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_numeric_ids_as_text() {
        let id: TransferId = serde_json::from_str("47901234").unwrap();
        assert_eq!(id.as_str(), "47901234");
    }

    #[test]
    fn decodes_string_ids_unchanged() {
        let id: QuoteId = serde_json::from_str("\"0b1f6e2a-quote\"").unwrap();
        assert_eq!(id.as_str(), "0b1f6e2a-quote");
    }

    #[test]
    fn rejects_other_json_types() {
        assert!(serde_json::from_str::<AccountId>("true").is_err());
        assert!(serde_json::from_str::<AccountId>("{\"id\": 1}").is_err());
        assert!(serde_json::from_str::<AccountId>("-4").is_err());
    }

    #[test]
    fn displays_inner_text() {
        let id = ProfileId::from("1200");
        assert_eq!(id.to_string(), "1200");
    }
}
