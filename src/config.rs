//! Table configuration.

/// Bucket count used when none is configured.
pub const DEFAULT_BUCKET_COUNT: usize = 120;

/// What `insert` does when an equal key is already stored.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DuplicatePolicy {
    /// Keep every record; lookups see the earliest one first.
    #[default]
    Append,
    /// Overwrite the value of the first equal record.
    Replace,
}

/// How a key's hash selects a bucket.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum IndexMode {
    /// `hash % bucket_count`.
    #[default]
    Modulo,
    /// The hash is the bucket index and must be below `bucket_count`.
    Direct,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableConfig {
    pub bucket_count: usize,
    pub duplicates: DuplicatePolicy,
    /// Free a bucket's list as soon as its last record is removed.
    pub reclaim_empty_buckets: bool,
    pub index_mode: IndexMode,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            duplicates: DuplicatePolicy::Append,
            reclaim_empty_buckets: false,
            index_mode: IndexMode::Modulo,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket_count(mut self, bucket_count: usize) -> Self {
        self.bucket_count = bucket_count;
        self
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn with_reclaim_empty_buckets(mut self, reclaim: bool) -> Self {
        self.reclaim_empty_buckets = reclaim;
        self
    }

    pub fn with_index_mode(mut self, index_mode: IndexMode) -> Self {
        self.index_mode = index_mode;
        self
    }
}
