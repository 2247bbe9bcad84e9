use crate::collection::Document;
use crate::common::{
    Value, OP_AND, OP_EQ, OP_GT, OP_GTE, OP_IN, OP_LT, OP_LTE, OP_NE, OP_NIN, OP_OR, OP_REGEX,
};
use crate::errors::{ErrorKind, JdbError, JdbResult};
use crate::filter::{Filter, FilterOp};

impl Filter {
    /// Parses a Mongo-style query document into a filter tree.
    ///
    /// Plain key-value pairs become equality filters, documents whose keys
    /// start with `$` become operator filters, and `$and`/`$or` keys combine
    /// sub-queries. Multiple top-level keys are combined with AND. Unknown
    /// `$`-prefixed operators are skipped, so queries written against newer
    /// operator sets degrade instead of failing.
    ///
    /// ```rust,ignore
    /// let query = doc! {
    ///     age: { "$gte": 18 },
    ///     name: { "$regex": "^A" },
    /// };
    /// let filter = Filter::parse(&query)?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a `FilterError` when `$and`/`$or` operands are not arrays of
    /// documents.
    pub fn parse(query: &Document) -> JdbResult<Filter> {
        let mut filters = Vec::new();

        for (key, value) in query.iter() {
            match key.as_str() {
                OP_AND => filters.push(Filter::And(parse_sub_queries(value, OP_AND)?)),
                OP_OR => filters.push(Filter::Or(parse_sub_queries(value, OP_OR)?)),
                _ => match value {
                    Value::Document(spec) if is_operator_doc(spec) => {
                        filters.extend(parse_operators(key, spec)?);
                    }
                    _ => filters.push(Filter::Equality {
                        field: key.clone(),
                        value: value.clone(),
                    }),
                },
            }
        }

        match filters.len() {
            0 => Ok(Filter::All),
            1 => Ok(filters.into_iter().next().unwrap_or(Filter::All)),
            _ => Ok(Filter::And(filters)),
        }
    }
}

fn is_operator_doc(spec: &Document) -> bool {
    !spec.is_empty() && spec.iter().all(|(key, _)| key.starts_with('$'))
}

fn parse_operators(field: &str, spec: &Document) -> JdbResult<Vec<Filter>> {
    let mut filters = Vec::new();
    for (op_key, operand) in spec.iter() {
        let op = match op_key.as_str() {
            OP_EQ => FilterOp::Eq,
            OP_NE => FilterOp::Ne,
            OP_GT => FilterOp::Gt,
            OP_GTE => FilterOp::Gte,
            OP_LT => FilterOp::Lt,
            OP_LTE => FilterOp::Lte,
            OP_IN => FilterOp::In,
            OP_NIN => FilterOp::NotIn,
            OP_REGEX => FilterOp::Regex,
            unknown => {
                log::debug!("Skipping unknown filter operator '{}'", unknown);
                continue;
            }
        };
        filters.push(Filter::Operator {
            field: field.to_string(),
            op,
            value: operand.clone(),
        });
    }
    Ok(filters)
}

fn parse_sub_queries(value: &Value, op_name: &str) -> JdbResult<Vec<Filter>> {
    let sub_queries = value.as_array().ok_or_else(|| {
        log::error!("{} operand must be an array of queries", op_name);
        JdbError::new(
            &format!("{} operand must be an array of queries", op_name),
            ErrorKind::FilterError,
        )
    })?;

    let mut filters = Vec::with_capacity(sub_queries.len());
    for sub_query in sub_queries {
        let sub_query = sub_query.as_document().ok_or_else(|| {
            log::error!("{} operand must contain only query documents", op_name);
            JdbError::new(
                &format!("{} operand must contain only query documents", op_name),
                ErrorKind::FilterError,
            )
        })?;
        filters.push(Filter::parse(sub_query)?);
    }
    Ok(filters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    #[test]
    fn test_empty_query_is_all() {
        let filter = Filter::parse(&doc! {}).unwrap();
        assert_eq!(filter, Filter::All);
    }

    #[test]
    fn test_plain_value_is_equality() {
        let filter = Filter::parse(&doc! { name: "Alice" }).unwrap();
        assert_eq!(
            filter,
            Filter::Equality {
                field: "name".to_string(),
                value: Value::from("Alice"),
            }
        );
    }

    #[test]
    fn test_operator_document() {
        let query = doc! { age: { "$gte": 18 } };
        let filter = Filter::parse(&query).unwrap();
        assert_eq!(
            filter,
            Filter::Operator {
                field: "age".to_string(),
                op: FilterOp::Gte,
                value: Value::I64(18),
            }
        );
    }

    #[test]
    fn test_multiple_operators_on_one_field() {
        let query = doc! { age: { "$gte": 18, "$lt": 65 } };
        let filter = Filter::parse(&query).unwrap();
        match filter {
            Filter::And(filters) => assert_eq!(filters.len(), 2),
            other => panic!("expected And, got {:?}", other),
        }
    }

    #[test]
    fn test_multiple_fields_combine_with_and() {
        let query = doc! { name: "Alice", age: 30 };
        let filter = Filter::parse(&query).unwrap();
        match filter {
            Filter::And(filters) => assert_eq!(filters.len(), 2),
            other => panic!("expected And, got {:?}", other),
        }
    }

    #[test]
    fn test_and_or_queries() {
        let query = doc! {
            "$or": [
                { age: { "$lt": 18 } },
                { age: { "$gte": 65 } },
            ]
        };
        let filter = Filter::parse(&query).unwrap();
        match filter {
            Filter::Or(filters) => assert_eq!(filters.len(), 2),
            other => panic!("expected Or, got {:?}", other),
        }
    }

    #[test]
    fn test_or_non_array_operand_is_error() {
        let query = doc! { "$or": 42 };
        let result = Filter::parse(&query);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::FilterError);
    }

    #[test]
    fn test_unknown_operator_skipped() {
        let query = doc! { age: { "$near": 10, "$gte": 18 } };
        let filter = Filter::parse(&query).unwrap();
        assert_eq!(
            filter,
            Filter::Operator {
                field: "age".to_string(),
                op: FilterOp::Gte,
                value: Value::I64(18),
            }
        );
    }

    #[test]
    fn test_nested_document_value_without_operators_is_equality() {
        let query = doc! { location: { city: "New York" } };
        let filter = Filter::parse(&query).unwrap();
        match filter {
            Filter::Equality { field, .. } => assert_eq!(field, "location"),
            other => panic!("expected Equality, got {:?}", other),
        }
    }
}
