use crate::common::SortOrder;

/// Options for controlling find operations on documents.
///
/// `FindOptions` allows you to specify sorting and pagination for query
/// results. It supports method chaining for convenient configuration.
///
/// Sorting is applied before skip and limit, so pagination pages over the
/// sorted result set.
///
/// # Examples
///
/// ```rust,ignore
/// use jdb::collection::FindOptions;
/// use jdb::common::SortOrder;
///
/// // Create options with sorting, skip, and limit
/// let options = FindOptions::new()
///     .sort_by("age", SortOrder::Descending)
///     .skip(10)
///     .limit(20);
///
/// // Use convenience functions
/// let options = order_by("name", SortOrder::Ascending);
/// let options = skip_by(5);
/// let options = limit_to(100);
/// ```
pub struct FindOptions {
    pub(crate) sort_by: Vec<(String, SortOrder)>,
    pub(crate) skip: Option<u64>,
    pub(crate) limit: Option<u64>,
}

/// Creates `FindOptions` with sorting by a field.
pub fn order_by(field_name: &str, sort_order: SortOrder) -> FindOptions {
    FindOptions {
        sort_by: vec![(field_name.to_string(), sort_order)],
        skip: None,
        limit: None,
    }
}

/// Creates `FindOptions` that skips a number of results.
///
/// Useful for pagination: skip the first N results and process the remaining.
pub fn skip_by(skip: u64) -> FindOptions {
    FindOptions {
        sort_by: Vec::new(),
        skip: Some(skip),
        limit: None,
    }
}

/// Creates `FindOptions` that limits the number of results.
///
/// Combined with skip for pagination: skip(10).limit(20) returns results 11-30.
pub fn limit_to(limit: u64) -> FindOptions {
    FindOptions {
        sort_by: Vec::new(),
        skip: None,
        limit: Some(limit),
    }
}

impl FindOptions {
    /// Creates a new `FindOptions` with default settings.
    pub fn new() -> FindOptions {
        FindOptions {
            sort_by: Vec::new(),
            skip: None,
            limit: None,
        }
    }

    /// Sets the number of documents to skip.
    pub fn skip(mut self, skip: u64) -> FindOptions {
        self.skip = Some(skip);
        self
    }

    /// Sets the maximum number of documents to return.
    pub fn limit(mut self, limit: u64) -> FindOptions {
        self.limit = Some(limit);
        self
    }

    /// Adds a field and direction to sort results by.
    ///
    /// May be called multiple times; sort keys apply left to right, so later
    /// keys break ties left by earlier ones.
    pub fn sort_by(mut self, field_name: &str, sort_order: SortOrder) -> FindOptions {
        self.sort_by.push((field_name.to_string(), sort_order));
        self
    }
}

impl Default for FindOptions {
    fn default() -> Self {
        FindOptions::new()
    }
}
