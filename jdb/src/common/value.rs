use crate::collection::Document;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};

/// Compare two floats for equality with proper NaN handling.
#[inline]
fn num_eq_float(a: f64, b: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        true
    } else {
        a == b
    }
}

/// Compare two floats with NaN ordered after all other values.
#[inline]
fn num_cmp_float(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Represents a [Document] value. It can be a scalar like [Value::I64] or
/// [Value::String], or a composite like [Value::Array] or [Value::Document].
///
/// # Purpose
/// Provides a unified representation for everything that fits in a JSON
/// document: null, booleans, numbers (64-bit integer or float), strings,
/// arrays, and nested documents.
///
/// # Characteristics
/// - **Comparable**: Implements a total order so any two values can be sorted
/// - **Numeric equality**: `I64` and `F64` compare by numeric value, so
///   `Value::I64(1) == Value::F64(1.0)`
/// - **Serializable**: Round-trips through plain JSON without any type tags
/// - **Default**: Defaults to Null
///
/// # Usage
/// Create values using the From trait or the `doc_value!` macro:
/// ```text
/// let v1: Value = 42i64.into();
/// let v2 = Value::from("hello");
/// let doc = doc! { "age": 42, "name": "Alice" };
/// ```
#[derive(Clone, Default)]
pub enum Value {
    /// Represents a null value.
    #[default]
    Null,
    /// Represents a boolean value.
    Bool(bool),
    /// Represents a signed 64-bit integer value.
    I64(i64),
    /// Represents a 64-bit floating point value.
    F64(f64),
    /// Represents a string value.
    String(String),
    /// Represents an array value.
    Array(Vec<Value>),
    /// Represents a nested document value.
    Document(Document),
}

impl Value {
    /// Creates a new [Value] from the given value that implements [`Into<Value>`].
    pub fn from<T: Into<Value>>(value: T) -> Value {
        value.into()
    }

    /// Creates a new [Value] from the given [Option] value. [None] becomes
    /// [Value::Null].
    pub fn from_option<T: Into<Value>>(value: Option<T>) -> Value {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::I64(_) | Value::F64(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the numeric value as `f64` for both integer and float variants.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::I64(i) => Some(*i as f64),
            Value::F64(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(d) => Some(d),
            _ => None,
        }
    }

    /// Compares two values only when they are of comparable types.
    ///
    /// Numbers compare with numbers and strings with strings. Any other
    /// pairing returns [None]. Range filters use this so that, for example,
    /// `age > 5` never matches a string field.
    pub fn try_compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (a, b) if a.is_number() && b.is_number() => {
                // as_f64 is Some for both numeric variants
                Some(num_cmp_float(a.as_f64()?, b.as_f64()?))
            }
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Renders a scalar value as text for regex matching.
    ///
    /// Composite values and nulls have no text form and return [None].
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::I64(i) => Some(i.to_string()),
            Value::F64(f) => Some(f.to_string()),
            _ => None,
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::I64(_) | Value::F64(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Document(_) => 5,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if self.is_number() && other.is_number() {
            if let (Some(a), Some(b)) = (self.as_f64(), other.as_f64()) {
                return num_eq_float(a, b);
            }
        }

        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => *a == *b,
            (Value::String(a), Value::String(b)) => *a == *b,
            (Value::Array(a), Value::Array(b)) => *a == *b,
            (Value::Document(a), Value::Document(b)) => *a == *b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.is_number() && other.is_number() {
            if let (Some(a), Some(b)) = (self.as_f64(), other.as_f64()) {
                return num_cmp_float(a, b);
            }
        }

        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Array(a), Value::Array(b)) => a.cmp(b),
            (Value::Document(a), Value::Document(b)) => a.cmp(b),
            // mixed types sort by a fixed rank so ordering stays total
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::I64(i) => write!(f, "{}", i),
            Value::F64(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Document(doc) => write!(f, "{}", doc),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I64(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::I64(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::I64(v as i64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::F64(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<Document> for Value {
    fn from(v: Document) -> Self {
        Value::Document(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        Value::from_option(v)
    }
}

// Values serialize as plain JSON so collection files stay readable and
// editable with any JSON tooling.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::I64(i) => serializer.serialize_i64(*i),
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Document(doc) => {
                let mut map = serializer.serialize_map(Some(doc.len()))?;
                for (key, value) in doc.iter() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a JSON value")
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
        Ok(Value::I64(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
        if v <= i64::MAX as u64 {
            Ok(Value::I64(v as i64))
        } else {
            Ok(Value::F64(v as f64))
        }
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
        Ok(Value::F64(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut doc = Document::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            doc.put_value(&key, value);
        }
        Ok(Value::Document(doc))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_cross_type_equality() {
        assert_eq!(Value::I64(1), Value::F64(1.0));
        assert_eq!(Value::F64(2.5), Value::F64(2.5));
        assert_ne!(Value::I64(1), Value::F64(1.5));
    }

    #[test]
    fn test_nan_equals_nan() {
        assert_eq!(Value::F64(f64::NAN), Value::F64(f64::NAN));
    }

    #[test]
    fn test_null_not_equal_to_zero() {
        assert_ne!(Value::Null, Value::I64(0));
        assert_ne!(Value::Null, Value::Bool(false));
        assert_ne!(Value::Null, Value::String("".to_string()));
    }

    #[test]
    fn test_try_compare_numbers() {
        assert_eq!(
            Value::I64(1).try_compare(&Value::F64(2.0)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::F64(3.0).try_compare(&Value::I64(3)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn test_try_compare_strings() {
        assert_eq!(
            Value::from("apple").try_compare(&Value::from("banana")),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_try_compare_mixed_types_is_none() {
        assert_eq!(Value::I64(5).try_compare(&Value::from("5")), None);
        assert_eq!(Value::Null.try_compare(&Value::I64(5)), None);
        assert_eq!(Value::Bool(true).try_compare(&Value::Bool(false)), None);
    }

    #[test]
    fn test_total_order_across_types() {
        let mut values = vec![
            Value::from("zebra"),
            Value::I64(10),
            Value::Null,
            Value::Bool(true),
        ];
        values.sort();
        assert_eq!(values[0], Value::Null);
        assert_eq!(values[1], Value::Bool(true));
        assert_eq!(values[2], Value::I64(10));
        assert_eq!(values[3], Value::from("zebra"));
    }

    #[test]
    fn test_as_text_scalars_only() {
        assert_eq!(Value::from("abc").as_text(), Some("abc".to_string()));
        assert_eq!(Value::I64(42).as_text(), Some("42".to_string()));
        assert_eq!(Value::Bool(true).as_text(), Some("true".to_string()));
        assert_eq!(Value::Null.as_text(), None);
        assert_eq!(Value::Array(vec![]).as_text(), None);
    }

    #[test]
    fn test_json_round_trip() {
        let value = Value::Array(vec![
            Value::Null,
            Value::Bool(true),
            Value::I64(-7),
            Value::F64(1.5),
            Value::from("text"),
        ]);
        let json = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, back);
    }

    #[test]
    fn test_deserialize_large_u64_falls_back_to_float() {
        let json = u64::MAX.to_string();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert!(matches!(value, Value::F64(_)));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from_option::<i64>(None), Value::Null);
        assert_eq!(Value::from_option(Some(42i64)), Value::I64(42));
    }
}
