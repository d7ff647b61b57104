//! Core data model types.
//!
//! Statically typed pipelines run over an owned [`Sequence`] or a borrowed, zero-copy [`View`].
//! Dynamically typed pipelines ([`crate::dynamic`]) run over slices of [`Value`]s whose shape is
//! described by a [`DataType`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered, owned collection of elements of a single type.
///
/// Stages never mutate a sequence; each stage produces a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence<T> {
    /// Element storage, in order.
    pub items: Vec<T>,
}

impl<T> Sequence<T> {
    /// Create a sequence from a vector of elements.
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the sequence has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Borrow the elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Consume the sequence, returning its elements.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Borrow every element into a zero-copy [`View`].
    pub fn view(&self) -> View<'_, T> {
        View::from_iter_refs(self.items.iter())
    }

    /// Create a new sequence containing only elements that match `predicate`.
    ///
    /// The predicate is called exactly once per element, in order.
    pub fn filter_items<F>(&self, mut predicate: F) -> Self
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        let items = self
            .items
            .iter()
            .filter(|item| predicate(*item))
            .cloned()
            .collect();
        Self { items }
    }

    /// Create a new sequence by applying `mapper` to every element.
    pub fn map_items<U, F>(&self, mapper: F) -> Sequence<U>
    where
        F: FnMut(&T) -> U,
    {
        Sequence {
            items: self.items.iter().map(mapper).collect(),
        }
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Build a [`Sequence`] from a list of elements, like `vec!`.
///
/// ```rust
/// let s = seq_view::seq![1, 2, 3];
/// assert_eq!(s.len(), 3);
/// ```
#[macro_export]
macro_rules! seq {
    () => {
        $crate::types::Sequence::new(::std::vec::Vec::new())
    };
    ($($x:expr),+ $(,)?) => {
        $crate::types::Sequence::new(::std::vec![$($x),+])
    };
}

/// Zero-copy view: an ordered list of references into elements owned elsewhere.
///
/// Views accept the same stages as [`Sequence`]. Filtering a view yields another view without
/// cloning elements; `selecting` over a view yields an owned [`Sequence`].
#[derive(Debug, PartialEq, Eq)]
pub struct View<'a, T> {
    items: Vec<&'a T>,
}

impl<'a, T> View<'a, T> {
    /// Create a view from references, keeping their order.
    pub fn from_iter_refs<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = &'a T>,
    {
        Self {
            items: iter.into_iter().collect(),
        }
    }

    /// Number of referenced elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the view references no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate the referenced elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.items.iter().copied()
    }

    /// Keep only references whose target matches `predicate`.
    pub fn filter_items<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        Self {
            items: self.items.iter().copied().filter(|item| predicate(*item)).collect(),
        }
    }

    /// Clone the referenced elements into an owned [`Sequence`].
    pub fn to_sequence(&self) -> Sequence<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T> Clone for View<'_, T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<'a, T> IntoIterator for View<'a, T> {
    type Item = &'a T;
    type IntoIter = std::vec::IntoIter<&'a T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Logical data type of a dynamic [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
    /// Record built by a dynamic `selecting` stage, identified by its type name.
    Record(String),
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int64 => f.write_str("Int64"),
            Self::Float64 => f.write_str("Float64"),
            Self::Bool => f.write_str("Bool"),
            Self::Utf8 => f.write_str("Utf8"),
            Self::Record(name) => write!(f, "Record({name})"),
        }
    }
}

/// A single typed value in a dynamic pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value; accepted wherever any type is expected.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
    /// Constructed record.
    Record(Record),
}

impl Value {
    /// Returns the logical type of this value, or `None` for [`Value::Null`].
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Self::Null => None,
            Self::Int64(_) => Some(DataType::Int64),
            Self::Float64(_) => Some(DataType::Float64),
            Self::Bool(_) => Some(DataType::Bool),
            Self::Utf8(_) => Some(DataType::Utf8),
            Self::Record(r) => Some(DataType::Record(r.type_name.clone())),
        }
    }

    /// Returns the integer payload, if this is an [`Value::Int64`].
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the record payload, if this is a [`Value::Record`].
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Utf8(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Utf8(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Self::Record(v)
    }
}

/// Object produced by a dynamic `selecting` stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Name of the [`crate::dynamic::RecordType`] that built this record.
    pub type_name: String,
    /// Field values, in the record type's field order.
    pub fields: Vec<Value>,
}

impl Record {
    /// Create a record of type `type_name` with the given field values.
    pub fn new(type_name: impl Into<String>, fields: Vec<Value>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }
}
