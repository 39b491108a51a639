//! Key policies: the hash function and equality predicate a table is bound to.
//!
//! A policy is owned by exactly one table and consulted on every keyed
//! operation. Two tables with different policies never observe each other.

use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

/// Hash/equality capability for keys of type `Q`.
///
/// Implementations must be pure: the same key always hashes the same way,
/// and `eq` must agree with `hash` (equal keys hash equally).
pub trait KeyPolicy<Q: ?Sized> {
    fn hash(&self, key: &Q) -> u64;

    /// Compare a lookup key against a stored key.
    fn eq(&self, probe: &Q, stored: &Q) -> bool;
}

/// Policy built from the key type's own `Hash` and `Eq`.
#[derive(Clone, Default)]
pub struct HashEq<S = DefaultHashBuilder> {
    hasher: S,
}

impl<S> HashEq<S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self { hasher }
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }
}

impl<S> fmt::Debug for HashEq<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashEq").finish_non_exhaustive()
    }
}

impl<Q, S> KeyPolicy<Q> for HashEq<S>
where
    Q: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    #[inline]
    fn hash(&self, key: &Q) -> u64 {
        self.hasher.hash_one(key)
    }

    #[inline]
    fn eq(&self, probe: &Q, stored: &Q) -> bool {
        probe == stored
    }
}

/// Policy built from a pair of caller-supplied functions.
#[derive(Clone)]
pub struct FnPolicy<H, E> {
    hash: H,
    eq: E,
}

impl<H, E> FnPolicy<H, E> {
    pub fn new(hash: H, eq: E) -> Self {
        Self { hash, eq }
    }
}

impl<H, E> fmt::Debug for FnPolicy<H, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPolicy").finish_non_exhaustive()
    }
}

impl<Q, H, E> KeyPolicy<Q> for FnPolicy<H, E>
where
    Q: ?Sized,
    H: Fn(&Q) -> u64,
    E: Fn(&Q, &Q) -> bool,
{
    #[inline]
    fn hash(&self, key: &Q) -> u64 {
        (self.hash)(key)
    }

    #[inline]
    fn eq(&self, probe: &Q, stored: &Q) -> bool {
        (self.eq)(probe, stored)
    }
}
