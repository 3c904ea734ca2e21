use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Phantom-typed opaque identifier. `ID<Table>` and `ID<Agent>` are
/// distinct types at compile time even though both wrap a `Uuid`.
pub struct ID<T> {
    inner: Uuid,
    marker: PhantomData<fn() -> T>,
}

impl<T> ID<T> {
    pub fn new(inner: Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.inner
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self::new(Uuid::new_v4())
    }
}

impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ID<T> {}

impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Eq for ID<T> {}

impl<T> std::hash::Hash for ID<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state)
    }
}

impl<T> fmt::Debug for ID<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl<T> fmt::Display for ID<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl<T> FromStr for ID<T> {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(Uuid::parse_str(s)?))
    }
}

impl<T> From<Uuid> for ID<T> {
    fn from(inner: Uuid) -> Self {
        Self::new(inner)
    }
}

impl<T> Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Self::new(Uuid::deserialize(deserializer)?))
    }
}

/// Marker trait for types that expose a stable identity.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Table;
    struct Agent;

    #[test]
    fn distinct_phantom_types_share_uuid_layout() {
        let raw = Uuid::new_v4();
        let t: ID<Table> = ID::new(raw);
        let a: ID<Agent> = ID::new(raw);
        assert_eq!(t.uuid(), a.uuid());
    }

    #[test]
    fn display_roundtrips_through_from_str() {
        let id: ID<Table> = ID::default();
        let text = id.to_string();
        let parsed: ID<Table> = text.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn default_ids_are_unique() {
        let a: ID<Table> = ID::default();
        let b: ID<Table> = ID::default();
        assert_ne!(a, b);
    }
}
