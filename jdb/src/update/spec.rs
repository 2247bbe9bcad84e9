use crate::collection::Document;
use crate::common::{Value, OP_INC, OP_PULL, OP_PUSH, OP_SET, OP_UNSET};
use crate::errors::{ErrorKind, JdbError, JdbResult};

/// The kind of mutation an [UpdateOp] performs on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    /// Sets the field to a value, creating it if absent
    Set,
    /// Removes the field
    Unset,
    /// Increments a numeric field by a delta
    Inc,
    /// Appends a value to an array field
    Push,
    /// Removes all occurrences of a value from an array field
    Pull,
}

/// A single field mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOp {
    pub(crate) kind: UpdateKind,
    pub(crate) field: String,
    pub(crate) value: Value,
}

/// An ordered list of field mutations applied to matching documents.
///
/// Operations apply in the order they were added, so later operations see the
/// effect of earlier ones. A spec is usually built with the fluent API or
/// parsed from a Mongo-style update document.
///
/// ```rust,ignore
/// use jdb::update::UpdateSpec;
///
/// let spec = UpdateSpec::new()
///     .set("status", "active")
///     .inc("logins", 1i64)
///     .unset("pending");
/// collection.update(&filter, &spec, true)?;
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateSpec {
    pub(crate) ops: Vec<UpdateOp>,
}

impl UpdateSpec {
    /// Creates an empty update spec.
    pub fn new() -> Self {
        UpdateSpec { ops: Vec::new() }
    }

    /// Returns true if the spec contains no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Sets the field to the given value.
    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.push_op(UpdateKind::Set, field, value.into());
        self
    }

    /// Removes the field from matching documents.
    pub fn unset(mut self, field: &str) -> Self {
        self.push_op(UpdateKind::Unset, field, Value::Null);
        self
    }

    /// Increments the numeric field by the given delta.
    ///
    /// A non-numeric or absent current value is treated as 0.
    pub fn inc(mut self, field: &str, delta: impl Into<Value>) -> Self {
        self.push_op(UpdateKind::Inc, field, delta.into());
        self
    }

    /// Appends the value to the array field, creating the array if needed.
    pub fn push(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.push_op(UpdateKind::Push, field, value.into());
        self
    }

    /// Removes all occurrences of the value from the array field.
    pub fn pull(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.push_op(UpdateKind::Pull, field, value.into());
        self
    }

    fn push_op(&mut self, kind: UpdateKind, field: &str, value: Value) {
        self.ops.push(UpdateOp {
            kind,
            field: field.to_string(),
            value,
        });
    }

    /// Parses a Mongo-style update document into an update spec.
    ///
    /// Recognized operators are `$set`, `$unset`, `$inc`, `$push` and `$pull`.
    /// Unknown `$`-prefixed operators are skipped so update documents written
    /// against newer operator sets degrade instead of failing.
    ///
    /// ```rust,ignore
    /// let spec = UpdateSpec::parse(&doc! {
    ///     "$set": { status: "active" },
    ///     "$inc": { logins: 1 },
    /// })?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` when an operator's operand is not a
    /// document, or when a top-level key is not a `$`-prefixed operator.
    pub fn parse(update: &Document) -> JdbResult<UpdateSpec> {
        let mut spec = UpdateSpec::new();

        for (op_key, operand) in update.iter() {
            let kind = match op_key.as_str() {
                OP_SET => UpdateKind::Set,
                OP_UNSET => UpdateKind::Unset,
                OP_INC => UpdateKind::Inc,
                OP_PUSH => UpdateKind::Push,
                OP_PULL => UpdateKind::Pull,
                unknown if unknown.starts_with('$') => {
                    log::debug!("Skipping unknown update operator '{}'", unknown);
                    continue;
                }
                plain => {
                    log::error!("Update document key '{}' is not an operator", plain);
                    return Err(JdbError::new(
                        &format!("Update document key '{}' is not an operator", plain),
                        ErrorKind::ValidationError,
                    ));
                }
            };

            let fields = operand.as_document().ok_or_else(|| {
                log::error!("{} operand must be a document", op_key);
                JdbError::new(
                    &format!("{} operand must be a document", op_key),
                    ErrorKind::ValidationError,
                )
            })?;

            for (field, value) in fields.iter() {
                spec.push_op(kind, field, value.clone());
            }
        }

        Ok(spec)
    }
}
