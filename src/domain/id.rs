//! Typed UUID identifiers for domain entities

use uuid::Uuid;

/// Common behaviour of the UUID-backed identifier newtypes
pub trait EntityId: Copy + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync {
    fn from_uuid(uuid: Uuid) -> Self;

    fn as_uuid(&self) -> Uuid;
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Generate a fresh random identifier
            pub fn generate() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Parse an identifier from its string form
            pub fn parse(value: &str) -> Result<Self, $crate::domain::DomainError> {
                ::uuid::Uuid::parse_str(value.trim()).map(Self).map_err(|_| {
                    $crate::domain::DomainError::invalid_id(format!("'{}' is not a valid {} id", value, $label))
                })
            }
        }

        impl $crate::domain::id::EntityId for $name {
            fn from_uuid(uuid: ::uuid::Uuid) -> Self {
                Self(uuid)
            }

            fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(uuid: ::uuid::Uuid) -> Self {
                Self(uuid)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub(crate) use entity_id;
