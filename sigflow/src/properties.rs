//! Pipeline-scoped property storage.
//!
//! Properties are named, dynamically-typed values attached to a pipeline.
//! They are metadata for the pipeline's owner and its stages (tunable
//! parameters, calibration tables); the engine never interprets them and
//! never passes them to stages on its own.

use crate::errors::PropertyError;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The kind of value held by a [`PropertyValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyKind {
    /// A boolean flag.
    Bool,
    /// A signed integer.
    Int,
    /// A double-precision float.
    Float,
    /// A string.
    Str,
    /// A shared array of single-precision floats.
    Floats,
    /// An arbitrary JSON value.
    Json,
}

impl PropertyKind {
    /// The lowercase name used in diagnostics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Floats => "floats",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamically-typed property value.
///
/// Cloning is cheap: bulk payloads are reference-counted, so a value stored
/// in a bag and a value held by the caller share ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A double-precision float.
    Float(f64),
    /// A string.
    Str(String),
    /// A shared array of single-precision floats.
    Floats(Arc<Vec<f32>>),
    /// An arbitrary JSON value.
    Json(serde_json::Value),
}

impl PropertyValue {
    /// The kind of this value.
    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Bool(_) => PropertyKind::Bool,
            Self::Int(_) => PropertyKind::Int,
            Self::Float(_) => PropertyKind::Float,
            Self::Str(_) => PropertyKind::Str,
            Self::Floats(_) => PropertyKind::Floats,
            Self::Json(_) => PropertyKind::Json,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<f32>> for PropertyValue {
    fn from(value: Vec<f32>) -> Self {
        Self::Floats(Arc::new(value))
    }
}

impl From<Arc<Vec<f32>>> for PropertyValue {
    fn from(value: Arc<Vec<f32>>) -> Self {
        Self::Floats(value)
    }
}

impl From<serde_json::Value> for PropertyValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

/// A bag of named properties.
///
/// Setting an existing name overwrites the previous value; a stored value
/// lives until it is overwritten or the bag is dropped. Reads return clones,
/// which share ownership of bulk payloads with the bag.
#[derive(Debug, Default)]
pub struct PropertyBag {
    values: RwLock<HashMap<String, PropertyValue>>,
}

impl PropertyBag {
    /// Creates a new empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value under `name`, overwriting any prior value.
    pub fn set(&self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.values.write().insert(name.into(), value.into());
    }

    /// Gets the value stored under `name`, or `None` if it was never set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<PropertyValue> {
        self.values.read().get(name).cloned()
    }

    /// Checks if a name is set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.read().contains_key(name)
    }

    /// Gets a boolean property.
    pub fn get_bool(&self, name: &str) -> Result<bool, PropertyError> {
        match self.lookup(name)? {
            PropertyValue::Bool(v) => Ok(v),
            other => Err(PropertyError::wrong_kind(name, PropertyKind::Bool, other.kind())),
        }
    }

    /// Gets an integer property.
    pub fn get_int(&self, name: &str) -> Result<i64, PropertyError> {
        match self.lookup(name)? {
            PropertyValue::Int(v) => Ok(v),
            other => Err(PropertyError::wrong_kind(name, PropertyKind::Int, other.kind())),
        }
    }

    /// Gets a float property.
    pub fn get_float(&self, name: &str) -> Result<f64, PropertyError> {
        match self.lookup(name)? {
            PropertyValue::Float(v) => Ok(v),
            other => Err(PropertyError::wrong_kind(name, PropertyKind::Float, other.kind())),
        }
    }

    /// Gets a string property.
    pub fn get_str(&self, name: &str) -> Result<String, PropertyError> {
        match self.lookup(name)? {
            PropertyValue::Str(v) => Ok(v),
            other => Err(PropertyError::wrong_kind(name, PropertyKind::Str, other.kind())),
        }
    }

    /// Gets a float-array property, sharing ownership with the bag.
    pub fn get_floats(&self, name: &str) -> Result<Arc<Vec<f32>>, PropertyError> {
        match self.lookup(name)? {
            PropertyValue::Floats(v) => Ok(v),
            other => Err(PropertyError::wrong_kind(name, PropertyKind::Floats, other.kind())),
        }
    }

    /// Gets a JSON property.
    pub fn get_json(&self, name: &str) -> Result<serde_json::Value, PropertyError> {
        match self.lookup(name)? {
            PropertyValue::Json(v) => Ok(v),
            other => Err(PropertyError::wrong_kind(name, PropertyKind::Json, other.kind())),
        }
    }

    /// Bulk-stores properties, overwriting existing names.
    pub fn extend<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (String, PropertyValue)>,
    {
        self.values.write().extend(entries);
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Returns true if the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    /// Returns all property names.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.values.read().keys().cloned().collect()
    }

    /// Returns a copy of all properties.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, PropertyValue> {
        self.values.read().clone()
    }

    fn lookup(&self, name: &str) -> Result<PropertyValue, PropertyError> {
        self.get(name).ok_or_else(|| PropertyError::missing(name))
    }
}

impl Clone for PropertyBag {
    fn clone(&self) -> Self {
        Self {
            values: RwLock::new(self.values.read().clone()),
        }
    }
}
