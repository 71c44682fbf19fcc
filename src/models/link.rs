//! References between entities.
//!
//! The API points at related entities with link objects such as
//! `{"href": "http://api.football-data.org/v1/teams/66"}`, and only
//! sometimes embeds the full object instead. [`Related`] keeps the two
//! apart.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::Entity;

/// A pointer to another entity, by ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    /// The referenced entity's ID.
    pub id: u64,
    /// The link the ID was taken from, if the payload carried one.
    pub href: Option<String>,
}

impl EntityRef {
    /// Parse the ID out of the last path segment of a link.
    pub fn from_href(href: &str) -> Option<Self> {
        let id = href
            .split(['?', '#'])
            .next()?
            .trim_end_matches('/')
            .rsplit('/')
            .next()?
            .parse()
            .ok()?;
        Some(Self {
            id,
            href: Some(href.to_string()),
        })
    }
}

impl<'de> Deserialize<'de> for EntityRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Id(u64),
            Link { href: String },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Id(id) => Ok(Self { id, href: None }),
            Repr::Link { href } => Self::from_href(&href)
                .ok_or_else(|| D::Error::custom(format!("link has no numeric id: {href}"))),
        }
    }
}

/// A related entity: either embedded in full or only referenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Related<T> {
    /// The payload carried the whole object.
    Embedded(Box<T>),
    /// The payload carried only a link or bare ID.
    Reference(EntityRef),
}

impl<T: Entity> Related<T> {
    /// ID of the related entity, if known.
    pub fn id(&self) -> Option<u64> {
        match self {
            Related::Embedded(entity) => entity.id(),
            Related::Reference(r) => Some(r.id),
        }
    }
}

impl<T> Related<T> {
    pub fn is_embedded(&self) -> bool {
        matches!(self, Related::Embedded(_))
    }

    /// The embedded entity, if the payload carried it.
    pub fn embedded(&self) -> Option<&T> {
        match self {
            Related::Embedded(entity) => Some(&**entity),
            Related::Reference(_) => None,
        }
    }
}

impl<T: DeserializeOwned> Related<T> {
    pub(crate) fn from_value(value: Value) -> serde_json::Result<Self> {
        let is_reference = match &value {
            Value::Number(_) => true,
            // Link objects may carry extra keys such as `title`.
            Value::Object(map) => map.contains_key("href") && !map.contains_key("id"),
            _ => false,
        };

        if is_reference {
            serde_json::from_value(value).map(Related::Reference)
        } else {
            serde_json::from_value(value).map(|entity| Related::Embedded(Box::new(entity)))
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Related<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(D::Error::custom)
    }
}
