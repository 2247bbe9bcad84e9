use crate::common::Value;

use super::{Filter, FilterOp};

/// Creates a fluent filter builder for the specified field name.
///
/// The returned `FluentFilter` provides methods for building equality,
/// comparison, membership, and regex filters on that field.
///
/// ```rust,ignore
/// use jdb::filter::field;
///
/// let adults = collection.find(&field("age").gte(18i64))?;
/// ```
pub fn field(field_name: &str) -> FluentFilter {
    FluentFilter {
        field_name: field_name.to_string(),
    }
}

/// A fluent builder for constructing filters on a specific field.
///
/// Each method consumes the builder and returns a [Filter] that can be used
/// directly with collection `find()` operations or combined with other
/// filters.
pub struct FluentFilter {
    field_name: String,
}

impl FluentFilter {
    /// Creates a filter that matches documents where the field equals the specified value.
    #[inline]
    pub fn eq<T: Into<Value>>(self, value: T) -> Filter {
        Filter::Equality {
            field: self.field_name,
            value: value.into(),
        }
    }

    /// Creates a filter that matches documents where the field does not equal the specified value.
    ///
    /// Documents that do not carry the field at all also match.
    #[inline]
    pub fn ne<T: Into<Value>>(self, value: T) -> Filter {
        self.op(FilterOp::Ne, value.into())
    }

    /// Creates a filter that matches documents where the field is greater than the specified value.
    #[inline]
    pub fn gt<T: Into<Value>>(self, value: T) -> Filter {
        self.op(FilterOp::Gt, value.into())
    }

    /// Creates a filter that matches documents where the field is greater than or equal to the specified value.
    #[inline]
    pub fn gte<T: Into<Value>>(self, value: T) -> Filter {
        self.op(FilterOp::Gte, value.into())
    }

    /// Creates a filter that matches documents where the field is less than the specified value.
    #[inline]
    pub fn lt<T: Into<Value>>(self, value: T) -> Filter {
        self.op(FilterOp::Lt, value.into())
    }

    /// Creates a filter that matches documents where the field is less than or equal to the specified value.
    #[inline]
    pub fn lte<T: Into<Value>>(self, value: T) -> Filter {
        self.op(FilterOp::Lte, value.into())
    }

    /// Creates a filter that matches documents where the field equals one of the specified values.
    #[inline]
    pub fn in_array<T: Into<Value>>(self, values: Vec<T>) -> Filter {
        let values: Vec<Value> = values.into_iter().map(|v| v.into()).collect();
        self.op(FilterOp::In, Value::Array(values))
    }

    /// Creates a filter that matches documents where the field equals none of the specified values.
    ///
    /// Documents that do not carry the field at all also match.
    #[inline]
    pub fn not_in_array<T: Into<Value>>(self, values: Vec<T>) -> Filter {
        let values: Vec<Value> = values.into_iter().map(|v| v.into()).collect();
        self.op(FilterOp::NotIn, Value::Array(values))
    }

    /// Creates a filter that matches documents where the field's text form
    /// matches the given regular expression.
    ///
    /// Numbers and booleans are rendered as text before matching; arrays and
    /// nested documents never match.
    #[inline]
    pub fn regex(self, pattern: &str) -> Filter {
        self.op(FilterOp::Regex, Value::from(pattern))
    }

    fn op(self, op: FilterOp, value: Value) -> Filter {
        Filter::Operator {
            field: self.field_name,
            op,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_builds_equality() {
        let filter = field("name").eq("Alice");
        assert_eq!(
            filter,
            Filter::Equality {
                field: "name".to_string(),
                value: Value::from("Alice"),
            }
        );
    }

    #[test]
    fn test_comparison_builders() {
        let filter = field("age").gt(21i64);
        assert_eq!(
            filter,
            Filter::Operator {
                field: "age".to_string(),
                op: FilterOp::Gt,
                value: Value::I64(21),
            }
        );

        let filter = field("age").lte(65i64);
        assert_eq!(
            filter,
            Filter::Operator {
                field: "age".to_string(),
                op: FilterOp::Lte,
                value: Value::I64(65),
            }
        );
    }

    #[test]
    fn test_in_array_builder() {
        let filter = field("status").in_array(vec!["new", "open"]);
        assert_eq!(
            filter,
            Filter::Operator {
                field: "status".to_string(),
                op: FilterOp::In,
                value: Value::Array(vec![Value::from("new"), Value::from("open")]),
            }
        );
    }

    #[test]
    fn test_regex_builder() {
        let filter = field("name").regex("^A.*");
        assert_eq!(
            filter,
            Filter::Operator {
                field: "name".to_string(),
                op: FilterOp::Regex,
                value: Value::from("^A.*"),
            }
        );
    }
}
