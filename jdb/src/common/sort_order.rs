/// Specifies the direction for sorting documents.
///
/// Used with `order_by()` when querying collections:
/// ```text
/// let options = order_by("age", SortOrder::Ascending);
/// let results = collection.find_with_options(filter, &options)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortOrder {
    /// Sort in ascending order (smallest to largest, A-Z, oldest to newest)
    Ascending,
    /// Sort in descending order (largest to smallest, Z-A, newest to oldest)
    Descending,
}
