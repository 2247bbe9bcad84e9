use crate::collection::Document;
use crate::common::Value;
use crate::errors::{ErrorKind, JdbError, JdbResult};
use regex::Regex;
use std::fmt::{Debug, Display, Formatter};

/// A comparison operator applied to a single document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Matches when the field equals the value
    Eq,
    /// Matches when the field does not equal the value
    Ne,
    /// Matches when the field is greater than the value
    Gt,
    /// Matches when the field is greater than or equal to the value
    Gte,
    /// Matches when the field is less than the value
    Lt,
    /// Matches when the field is less than or equal to the value
    Lte,
    /// Matches when the field is one of the values in an array
    In,
    /// Matches when the field is none of the values in an array
    NotIn,
    /// Matches when the field's text form matches a regular expression
    Regex,
}

/// A query filter for selecting documents from a collection.
///
/// Filters form a tree: leaves test a single field against a value, and
/// `And`/`Or` nodes combine subtrees. Evaluation walks every candidate
/// document; there is no index involved.
///
/// Filters are usually built with the fluent API rather than constructed
/// directly:
///
/// ```rust,ignore
/// use jdb::filter::{field, and};
///
/// let filter = and(vec![
///     field("age").gte(18i64),
///     field("name").regex("^A"),
/// ]);
/// let adults = collection.find(&filter)?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document.
    All,
    /// Matches when the field holds exactly the given value.
    Equality { field: String, value: Value },
    /// Matches when the field satisfies the operator against the value.
    Operator {
        field: String,
        op: FilterOp,
        value: Value,
    },
    /// Matches when every sub-filter matches. Empty `And` matches everything.
    And(Vec<Filter>),
    /// Matches when at least one sub-filter matches. Empty `Or` matches nothing.
    Or(Vec<Filter>),
}

impl Filter {
    /// Evaluates this filter against a document.
    ///
    /// Equality and range operators never match an absent field, while `Ne`
    /// and `NotIn` do.
    ///
    /// # Errors
    ///
    /// Returns a `FilterError` when the filter itself is malformed, e.g. an
    /// `In` operand that is not an array or an invalid regex pattern.
    pub fn apply(&self, document: &Document) -> JdbResult<bool> {
        match self {
            Filter::All => Ok(true),
            Filter::Equality { field, value } => {
                Ok(matches!(document.get_opt(field), Some(actual) if actual == value))
            }
            Filter::Operator { field, op, value } => {
                apply_operator(document.get_opt(field), *op, value)
            }
            Filter::And(filters) => {
                for filter in filters {
                    if !filter.apply(document)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Filter::Or(filters) => {
                for filter in filters {
                    if filter.apply(document)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Combines this filter with another using logical AND.
    pub fn and(self, filter: Filter) -> Self {
        Filter::And(vec![self, filter])
    }

    /// Combines this filter with another using logical OR.
    pub fn or(self, filter: Filter) -> Self {
        Filter::Or(vec![self, filter])
    }
}

fn apply_operator(actual: Option<&Value>, op: FilterOp, value: &Value) -> JdbResult<bool> {
    match op {
        FilterOp::Eq => Ok(matches!(actual, Some(actual) if actual == value)),
        FilterOp::Ne => Ok(!matches!(actual, Some(actual) if actual == value)),
        FilterOp::Gt => Ok(compare(actual, value, |ord| ord.is_gt())),
        FilterOp::Gte => Ok(compare(actual, value, |ord| ord.is_ge())),
        FilterOp::Lt => Ok(compare(actual, value, |ord| ord.is_lt())),
        FilterOp::Lte => Ok(compare(actual, value, |ord| ord.is_le())),
        FilterOp::In => {
            let candidates = operand_array(value, "$in")?;
            Ok(matches!(actual, Some(actual) if candidates.contains(actual)))
        }
        FilterOp::NotIn => {
            let candidates = operand_array(value, "$nin")?;
            Ok(!matches!(actual, Some(actual) if candidates.contains(actual)))
        }
        FilterOp::Regex => {
            let pattern = value.as_str().ok_or_else(|| {
                log::error!("$regex operand must be a string");
                JdbError::new("$regex operand must be a string", ErrorKind::FilterError)
            })?;
            let regex = Regex::new(pattern).map_err(|err| {
                log::error!("Invalid regex pattern '{}': {}", pattern, err);
                JdbError::new(
                    &format!("Invalid regex pattern '{}': {}", pattern, err),
                    ErrorKind::FilterError,
                )
            })?;
            match actual.and_then(|v| v.as_text()) {
                Some(text) => Ok(regex.is_match(&text)),
                None => Ok(false),
            }
        }
    }
}

// Range operators match only when the field is present and comparable with
// the operand. A string field never satisfies a numeric range.
fn compare(
    actual: Option<&Value>,
    value: &Value,
    predicate: impl Fn(std::cmp::Ordering) -> bool,
) -> bool {
    actual
        .and_then(|actual| actual.try_compare(value))
        .map(predicate)
        .unwrap_or(false)
}

fn operand_array<'a>(value: &'a Value, op_name: &str) -> JdbResult<&'a Vec<Value>> {
    value.as_array().ok_or_else(|| {
        log::error!("{} operand must be an array", op_name);
        JdbError::new(
            &format!("{} operand must be an array", op_name),
            ErrorKind::FilterError,
        )
    })
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::All => write!(f, "all"),
            Filter::Equality { field, value } => write!(f, "({} == {})", field, value),
            Filter::Operator { field, op, value } => {
                write!(f, "({} {:?} {})", field, op, value)
            }
            Filter::And(filters) => {
                let parts: Vec<String> = filters.iter().map(|x| x.to_string()).collect();
                write!(f, "({})", parts.join(" && "))
            }
            Filter::Or(filters) => {
                let parts: Vec<String> = filters.iter().map(|x| x.to_string()).collect();
                write!(f, "({})", parts.join(" || "))
            }
        }
    }
}

/// Creates a filter that matches all documents in a collection.
pub fn all() -> Filter {
    Filter::All
}

/// Combines multiple filters using logical AND.
///
/// Creates a filter that matches documents satisfying all of the provided
/// filters.
pub fn and(filters: Vec<Filter>) -> Filter {
    Filter::And(filters)
}

/// Combines multiple filters using logical OR.
///
/// Creates a filter that matches documents satisfying at least one of the
/// provided filters.
pub fn or(filters: Vec<Filter>) -> Filter {
    Filter::Or(filters)
}
