use crate::collection::Document;
use crate::common::{Value, RESERVED_FIELDS};
use crate::errors::JdbResult;
use crate::update::{UpdateKind, UpdateOp, UpdateSpec};

impl UpdateSpec {
    /// Applies every operation in this spec to the document, in order.
    ///
    /// Returns `true` when at least one operation was applied, even if the
    /// resulting value equals the previous one; every applied operation bumps
    /// `_updated` and the update count at the collection level.
    ///
    /// Operations naming reserved or empty fields are skipped with a warning
    /// so the engine keeps exclusive ownership of `_id` and the timestamps. A
    /// spec holding only skipped operations reports `false`, as does an empty
    /// spec.
    pub fn apply(&self, document: &mut Document) -> JdbResult<bool> {
        let mut applied = false;
        for op in &self.ops {
            if op.field.is_empty() {
                log::warn!("Skipping update operation with empty field name");
                continue;
            }
            if RESERVED_FIELDS.contains(&op.field.as_str()) {
                log::warn!("Skipping update operation on reserved field '{}'", op.field);
                continue;
            }
            apply_op(op, document)?;
            applied = true;
        }
        Ok(applied)
    }
}

fn apply_op(op: &UpdateOp, document: &mut Document) -> JdbResult<()> {
    match op.kind {
        UpdateKind::Set => {
            document.put(&op.field, op.value.clone())?;
        }
        UpdateKind::Unset => {
            document.remove(&op.field);
        }
        UpdateKind::Inc => apply_inc(op, document)?,
        UpdateKind::Push => {
            // non-array targets are replaced by a fresh array
            let mut items = match document.get_opt(&op.field) {
                Some(Value::Array(items)) => items.clone(),
                _ => Vec::new(),
            };
            items.push(op.value.clone());
            document.put(&op.field, Value::Array(items))?;
        }
        UpdateKind::Pull => {
            if let Some(Value::Array(items)) = document.get_opt(&op.field) {
                let kept: Vec<Value> =
                    items.iter().filter(|v| *v != &op.value).cloned().collect();
                document.put(&op.field, Value::Array(kept))?;
            }
        }
    }
    Ok(())
}

fn apply_inc(op: &UpdateOp, document: &mut Document) -> JdbResult<()> {
    // a non-numeric or absent current value counts from 0
    let current = document
        .get_opt(&op.field)
        .filter(|v| v.is_number())
        .cloned()
        .unwrap_or(Value::I64(0));

    let next = match (&current, &op.value) {
        (Value::I64(a), Value::I64(b)) => Value::I64(a.saturating_add(*b)),
        (a, b) if b.is_number() => {
            // as_f64 is Some for both numeric variants
            Value::F64(a.as_f64().unwrap_or(0.0) + b.as_f64().unwrap_or(0.0))
        }
        _ => {
            log::warn!(
                "Skipping $inc on field '{}': delta {} is not numeric",
                op.field,
                op.value
            );
            return Ok(());
        }
    };

    document.put(&op.field, next)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    fn sample() -> Document {
        doc! {
            name: "Alice",
            age: 30,
            tags: ["admin", "user"],
        }
    }

    #[test]
    fn test_set_new_field() {
        let mut doc = sample();
        let spec = UpdateSpec::new().set("status", "active");
        assert!(spec.apply(&mut doc).unwrap());
        assert_eq!(doc.get("status"), Value::from("active"));
    }

    #[test]
    fn test_set_same_value_still_applies() {
        let mut doc = sample();
        let spec = UpdateSpec::new().set("name", "Alice");
        assert!(spec.apply(&mut doc).unwrap());
        assert_eq!(doc.get("name"), Value::from("Alice"));
    }

    #[test]
    fn test_unset() {
        let mut doc = sample();
        let spec = UpdateSpec::new().unset("age");
        assert!(spec.apply(&mut doc).unwrap());
        assert!(!doc.contains_key("age"));

        // unsetting an absent field still counts as applied
        assert!(spec.apply(&mut doc).unwrap());
        assert!(!doc.contains_key("age"));
    }

    #[test]
    fn test_inc_integer() {
        let mut doc = sample();
        let spec = UpdateSpec::new().inc("age", 5i64);
        assert!(spec.apply(&mut doc).unwrap());
        assert_eq!(doc.get("age"), Value::I64(35));
    }

    #[test]
    fn test_inc_negative_delta() {
        let mut doc = sample();
        let spec = UpdateSpec::new().inc("age", -10i64);
        assert!(spec.apply(&mut doc).unwrap());
        assert_eq!(doc.get("age"), Value::I64(20));
    }

    #[test]
    fn test_inc_float_contaminates() {
        let mut doc = sample();
        let spec = UpdateSpec::new().inc("age", 0.5);
        assert!(spec.apply(&mut doc).unwrap());
        assert_eq!(doc.get("age"), Value::F64(30.5));
    }

    #[test]
    fn test_inc_absent_field_counts_from_zero() {
        let mut doc = sample();
        let spec = UpdateSpec::new().inc("visits", 3i64);
        assert!(spec.apply(&mut doc).unwrap());
        assert_eq!(doc.get("visits"), Value::I64(3));
    }

    #[test]
    fn test_inc_non_numeric_current_counts_from_zero() {
        let mut doc = sample();
        let spec = UpdateSpec::new().inc("name", 1i64);
        assert!(spec.apply(&mut doc).unwrap());
        assert_eq!(doc.get("name"), Value::I64(1));
    }

    #[test]
    fn test_inc_non_numeric_delta_leaves_value() {
        let mut doc = sample();
        let spec = UpdateSpec::new().inc("age", "oops");
        assert!(spec.apply(&mut doc).unwrap());
        assert_eq!(doc.get("age"), Value::I64(30));
    }

    #[test]
    fn test_inc_saturates_at_i64_max() {
        let mut doc = doc! { counter: (i64::MAX) };
        let spec = UpdateSpec::new().inc("counter", 1i64);
        assert!(spec.apply(&mut doc).unwrap());
        assert_eq!(doc.get("counter"), Value::I64(i64::MAX));
    }

    #[test]
    fn test_push() {
        let mut doc = sample();
        let spec = UpdateSpec::new().push("tags", "guest");
        assert!(spec.apply(&mut doc).unwrap());
        let tags = doc.get("tags");
        let tags = tags.as_array().unwrap();
        assert_eq!(tags.len(), 3);
        assert_eq!(tags[2], Value::from("guest"));
    }

    #[test]
    fn test_push_creates_array_over_non_array() {
        let mut doc = sample();
        let spec = UpdateSpec::new().push("name", "x");
        assert!(spec.apply(&mut doc).unwrap());
        assert_eq!(doc.get("name"), Value::Array(vec![Value::from("x")]));
    }

    #[test]
    fn test_pull() {
        let mut doc = sample();
        let spec = UpdateSpec::new().pull("tags", "admin");
        assert!(spec.apply(&mut doc).unwrap());
        assert_eq!(doc.get("tags"), Value::Array(vec![Value::from("user")]));
    }

    #[test]
    fn test_pull_missing_value_keeps_array() {
        let mut doc = sample();
        let spec = UpdateSpec::new().pull("tags", "nobody");
        assert!(spec.apply(&mut doc).unwrap());
        assert_eq!(doc.get("tags").as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_pull_non_array_leaves_value() {
        let mut doc = sample();
        let spec = UpdateSpec::new().pull("name", "Alice");
        assert!(spec.apply(&mut doc).unwrap());
        assert_eq!(doc.get("name"), Value::from("Alice"));
    }

    #[test]
    fn test_reserved_only_spec_is_not_applied() {
        let mut doc = sample();
        doc.put("_id", "fixed").unwrap();
        let spec = UpdateSpec::new().set("_id", "hijacked").unset("_updated");
        assert!(!spec.apply(&mut doc).unwrap());
        assert_eq!(doc.get("_id"), Value::from("fixed"));
    }

    #[test]
    fn test_reserved_fields_skipped() {
        let mut doc = sample();
        doc.put("_id", "fixed").unwrap();
        let spec = UpdateSpec::new()
            .set("_id", "hijacked")
            .set("_created", 0i64)
            .set("status", "active");
        assert!(spec.apply(&mut doc).unwrap());
        assert_eq!(doc.get("_id"), Value::from("fixed"));
        assert!(!doc.contains_key("_created"));
        assert_eq!(doc.get("status"), Value::from("active"));
    }

    #[test]
    fn test_ops_apply_in_order() {
        let mut doc = Document::new();
        let spec = UpdateSpec::new()
            .set("count", 10i64)
            .inc("count", 5i64)
            .push("log", "created");
        assert!(spec.apply(&mut doc).unwrap());
        assert_eq!(doc.get("count"), Value::I64(15));
    }
}
