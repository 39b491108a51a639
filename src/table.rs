//! ChainedHashTable: fixed bucket array, one lazily created chain per bucket.

use crate::chain::ChainedList;
use crate::config::{DuplicatePolicy, IndexMode, TableConfig};
use crate::error::TableError;
use crate::policy::{FnPolicy, HashEq, KeyPolicy};
use crate::record::Record;
use crate::reentrancy::OpGuard;
use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use log::{debug, trace, warn};

type Bucket<K, V> = Option<ChainedList<Record<K, V>>>;

/// Separate-chaining hash table with a fixed number of buckets.
///
/// The key policy `P` is bound when the table is built and used by every
/// keyed operation on this instance only. Within a bucket, records keep
/// insertion order; lookups return the earliest matching record.
pub struct ChainedHashTable<K, V, P = HashEq> {
    policy: P,
    buckets: Box<[Bucket<K, V>]>,
    entries: usize,
    config: TableConfig,
    guard: OpGuard,
}

/// Snapshot of how records are spread across buckets.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TableStats {
    pub entries: usize,
    pub bucket_count: usize,
    /// Buckets whose chain has been created (may be empty without reclamation).
    pub allocated_buckets: usize,
    pub non_empty_buckets: usize,
    pub longest_chain: usize,
    pub load_factor: f64,
}

impl<K, V> ChainedHashTable<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_policy(HashEq::default())
    }
}

impl<K, V> Default for ChainedHashTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H, E> ChainedHashTable<K, V, FnPolicy<H, E>>
where
    H: Fn(&K) -> u64,
    E: Fn(&K, &K) -> bool,
{
    /// Build a table bound to a caller-supplied hash function and equality
    /// predicate.
    pub fn with_fns(hash: H, eq: E) -> Self {
        Self::with_policy(FnPolicy::new(hash, eq))
    }
}

// Stored keys are compared in their borrowed form `Q`.
#[inline]
fn key_matches<K, V, Q, P>(policy: &P, probe: &Q, rec: &Record<K, V>) -> bool
where
    K: Borrow<Q>,
    Q: ?Sized,
    P: KeyPolicy<Q>,
{
    policy.eq(probe, <K as Borrow<Q>>::borrow(rec.key()))
}

impl<K, V, P> ChainedHashTable<K, V, P> {
    /// Build a table with the default configuration.
    pub fn with_policy(policy: P) -> Self {
        let config = TableConfig::default();
        let buckets = (0..config.bucket_count).map(|_| None).collect();
        debug!("created chained table with {} buckets", config.bucket_count);
        Self {
            policy,
            buckets,
            entries: 0,
            config,
            guard: OpGuard::new(),
        }
    }

    /// Build a table with an explicit configuration.
    pub fn with_config(policy: P, config: TableConfig) -> Result<Self, TableError> {
        if config.bucket_count == 0 {
            return Err(TableError::ZeroBuckets);
        }
        let mut buckets: Vec<Bucket<K, V>> = Vec::new();
        buckets.try_reserve_exact(config.bucket_count)?;
        buckets.resize_with(config.bucket_count, || None);
        debug!(
            "created chained table with {} buckets ({:?} duplicates, {:?} indexing, reclaim={})",
            config.bucket_count, config.duplicates, config.index_mode, config.reclaim_empty_buckets
        );
        Ok(Self {
            policy,
            buckets: buckets.into_boxed_slice(),
            entries: 0,
            config,
            guard: OpGuard::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries
    }
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of buckets whose chain has been created.
    pub fn occupied_buckets(&self) -> usize {
        self.buckets.iter().filter(|b| b.is_some()).count()
    }

    /// Records chained in bucket `index`; `None` if there is no such bucket.
    pub fn bucket_len(&self, index: usize) -> Option<usize> {
        let slot = self.buckets.get(index)?;
        Some(slot.as_ref().map_or(0, ChainedList::len))
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn stats(&self) -> TableStats {
        let chains = self.buckets.iter().flatten();
        let (mut allocated, mut non_empty, mut longest) = (0, 0, 0);
        for chain in chains {
            allocated += 1;
            if !chain.is_empty() {
                non_empty += 1;
            }
            longest = longest.max(chain.len());
        }
        TableStats {
            entries: self.entries,
            bucket_count: self.buckets.len(),
            allocated_buckets: allocated,
            non_empty_buckets: non_empty,
            longest_chain: longest,
            load_factor: self.entries as f64 / self.buckets.len() as f64,
        }
    }

    /// All records, bucket by bucket; insertion order within a bucket.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.buckets
            .iter()
            .flatten()
            .flat_map(|chain| chain.iter())
            .map(|r| (r.key(), r.value()))
    }

    /// Visit every record with mutable access to its value, in `iter` order.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V),
    {
        for chain in self.buckets.iter_mut().flatten() {
            chain.for_each_mut(|r| {
                let (k, v) = r.parts_mut();
                f(k, v)
            });
        }
    }

    /// Drop every record and every chain. The bucket count is kept.
    pub fn clear(&mut self) {
        for slot in self.buckets.iter_mut() {
            *slot = None;
        }
        self.entries = 0;
    }

    /// Tear the table down, handing each surviving `(key, value)` to
    /// `destructor` exactly once. Returns the number of records destroyed.
    pub fn destroy_with<F>(mut self, mut destructor: F) -> usize
    where
        F: FnMut(K, V),
    {
        let mut destroyed = 0;
        for slot in self.buckets.iter_mut() {
            if let Some(mut chain) = slot.take() {
                for rec in chain.drain() {
                    let (k, v) = rec.into_parts();
                    destructor(k, v);
                    destroyed += 1;
                }
            }
        }
        debug_assert_eq!(destroyed, self.entries);
        debug!("destroyed chained table: {} records", destroyed);
        self.entries = 0;
        destroyed
    }

    /// Tear the table down without a destructor; keys and values are
    /// dropped in place.
    pub fn destroy(self) {
        debug!("dropping chained table: {} records", self.entries);
    }

    fn bucket_index(&self, hash: u64) -> Result<usize, TableError> {
        let buckets = self.buckets.len();
        match self.config.index_mode {
            IndexMode::Modulo => Ok((hash % buckets as u64) as usize),
            IndexMode::Direct => usize::try_from(hash)
                .ok()
                .filter(|&i| i < buckets)
                .ok_or(TableError::BucketOutOfRange {
                    index: hash,
                    buckets,
                }),
        }
    }

    // Lookups treat an unaddressable hash as "not present": insert never
    // stores a record under one.
    fn index_of<Q>(&self, key: &Q) -> Option<usize>
    where
        Q: ?Sized,
        P: KeyPolicy<Q>,
    {
        self.bucket_index(self.policy.hash(key)).ok()
    }

    fn chain_of<Q>(&self, key: &Q) -> Option<&ChainedList<Record<K, V>>>
    where
        Q: ?Sized,
        P: KeyPolicy<Q>,
    {
        let idx = self.index_of(key)?;
        self.buckets[idx].as_ref()
    }

    /// Store `value` under `key`.
    ///
    /// With [`DuplicatePolicy::Append`] an equal key already present is kept
    /// and the new record is chained after it (`Ok(None)`). With
    /// [`DuplicatePolicy::Replace`] the first equal record's value is
    /// swapped and the old value returned.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, TableError>
    where
        P: KeyPolicy<K>,
    {
        let _g = self.guard.enter("insert");
        let hash = self.policy.hash(&key);
        let idx = match self.bucket_index(hash) {
            Ok(idx) => idx,
            Err(e) => {
                warn!("rejecting insert: {}", e);
                return Err(e);
            }
        };

        let policy = &self.policy;
        let chain = self.buckets[idx].get_or_insert_with(|| {
            trace!("creating chain for bucket {}", idx);
            ChainedList::new()
        });
        if self.config.duplicates == DuplicatePolicy::Replace {
            if let Some(rec) = chain.find_mut(|r| policy.eq(&key, r.key())) {
                return Ok(Some(rec.replace_value(value)));
            }
        }
        chain.push_back(Record::new(key, value));
        self.entries += 1;
        Ok(None)
    }

    /// Value of the earliest record matching `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: KeyPolicy<Q>,
    {
        let _g = self.guard.enter("get");
        self.chain_of(key)?
            .find(|r| key_matches(&self.policy, key, r))
            .map(Record::value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: KeyPolicy<Q>,
    {
        let _g = self.guard.enter("get_mut");
        let idx = self.index_of(key)?;
        let policy = &self.policy;
        self.buckets[idx]
            .as_mut()?
            .find_mut(|r| key_matches(policy, key, r))
            .map(Record::value_mut)
    }

    /// Values of every record matching `key`, earliest first.
    pub fn get_all<Q>(&self, key: &Q) -> Vec<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: KeyPolicy<Q>,
    {
        let _g = self.guard.enter("get_all");
        match self.chain_of(key) {
            Some(chain) => chain
                .iter()
                .filter(|r| key_matches(&self.policy, key, *r))
                .map(Record::value)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn count_matches<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: KeyPolicy<Q>,
    {
        let _g = self.guard.enter("count_matches");
        self.chain_of(key).map_or(0, |chain| {
            chain
                .iter()
                .filter(|r| key_matches(&self.policy, key, *r))
                .count()
        })
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: KeyPolicy<Q>,
    {
        let _g = self.guard.enter("contains_key");
        self.chain_of(key)
            .map(|chain| chain.find(|r| key_matches(&self.policy, key, r)).is_some())
            .unwrap_or(false)
    }

    /// Unlink the earliest record matching `key` and return its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: KeyPolicy<Q>,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: KeyPolicy<Q>,
    {
        let _g = self.guard.enter("remove");
        let idx = self.index_of(key)?;
        let policy = &self.policy;
        let chain = self.buckets[idx].as_mut()?;
        let rec = chain.remove_first(|r| key_matches(policy, key, r))?;
        let emptied = chain.is_empty();
        self.entries -= 1;
        if emptied && self.config.reclaim_empty_buckets {
            trace!("reclaiming empty bucket {}", idx);
            self.buckets[idx] = None;
        }
        Some(rec.into_parts())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, P> fmt::Debug for ChainedHashTable<K, V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
