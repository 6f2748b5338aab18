//! Typed key markers for reference fields.
//!
//! A [`Key<M>`] is an opaque string that is the primary key of exactly one
//! record of model type `M`. Using it as a field type is what makes the field
//! discoverable as a reference by the resolution engine. [`KeyList<M>`] is the
//! ordered, possibly-empty counterpart for one-to-many references.
//!
//! On the wire a key is the plain string (or null when unset); the target type
//! exists only at the type level, via a phantom parameter.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::{KeyRefs, Model};

/// A typed primary-key reference to a single record of model `M`.
///
/// An unset key is valid: it serializes as null and resolves to "no referenced
/// object". Empty strings are normalized to unset.
pub struct Key<M> {
    value: Option<String>,
    _target: PhantomData<fn() -> M>,
}

impl<M> Key<M> {
    /// A key pointing at the record with the given primary key.
    pub fn new(key: impl Into<String>) -> Self {
        Self::from(Some(key.into()))
    }

    /// An unset key.
    pub fn none() -> Self {
        Self {
            value: None,
            _target: PhantomData,
        }
    }

    /// The key value, if set.
    pub fn get(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn set(&mut self, key: impl Into<String>) {
        *self = Self::new(key);
    }

    pub fn clear(&mut self) {
        self.value = None;
    }

    /// View this key the way the reference walker consumes it.
    pub fn key_refs(&self) -> KeyRefs<'_> {
        match self.value.as_deref() {
            Some(key) => KeyRefs::One(key),
            None => KeyRefs::Absent,
        }
    }
}

impl<M: Model> Key<M> {
    /// Name of the model type this key targets.
    pub fn target(&self) -> &'static str {
        M::TYPE_NAME
    }
}

impl<M> From<Option<String>> for Key<M> {
    fn from(value: Option<String>) -> Self {
        let value = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            value,
            _target: PhantomData,
        }
    }
}

impl<M> From<String> for Key<M> {
    fn from(value: String) -> Self {
        Self::from(Some(value))
    }
}

impl<M> From<&str> for Key<M> {
    fn from(value: &str) -> Self {
        Self::from(Some(value.to_string()))
    }
}

impl<M> Default for Key<M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<M> Clone for Key<M> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _target: PhantomData,
        }
    }
}

impl<M> PartialEq for Key<M> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<M> Eq for Key<M> {}

impl<M> Hash for Key<M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<M> fmt::Display for Key<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value.as_deref().unwrap_or(""))
    }
}

impl<M: Model> fmt::Debug for Key<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key<{}>({:?})", M::TYPE_NAME, self.value)
    }
}

impl<M> Serialize for Key<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, M> Deserialize<'de> for Key<M> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from(value))
    }
}

/// An ordered sequence of keys, all targeting model `M`.
///
/// Order is preserved through serialization and attach. Duplicates are allowed
/// and resolve to the same cached object.
pub struct KeyList<M> {
    keys: Vec<String>,
    _target: PhantomData<fn() -> M>,
}

impl<M> KeyList<M> {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            _target: PhantomData,
        }
    }

    pub fn push(&mut self, key: impl Into<String>) {
        let key = key.into();
        if !key.is_empty() {
            self.keys.push(key);
        }
    }

    /// Keys in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// View this list the way the reference walker consumes it.
    pub fn key_refs(&self) -> KeyRefs<'_> {
        KeyRefs::Many(self.iter().collect())
    }
}

impl<M: Model> KeyList<M> {
    /// Name of the model type these keys target.
    pub fn target(&self) -> &'static str {
        M::TYPE_NAME
    }
}

impl<M, K: Into<String>> FromIterator<K> for KeyList<M> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut list = Self::new();
        for key in iter {
            list.push(key);
        }
        list
    }
}

impl<M> Default for KeyList<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for KeyList<M> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            _target: PhantomData,
        }
    }
}

impl<M> PartialEq for KeyList<M> {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys
    }
}

impl<M> Eq for KeyList<M> {}

impl<M: Model> fmt::Debug for KeyList<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyList<{}>({:?})", M::TYPE_NAME, self.keys)
    }
}

impl<M> Serialize for KeyList<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.keys.serialize(serializer)
    }
}

impl<'de, M> Deserialize<'de> for KeyList<M> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let keys = Vec::<String>::deserialize(deserializer)?;
        Ok(keys.into_iter().collect())
    }
}
