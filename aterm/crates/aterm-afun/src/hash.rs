//! Symbol hashing.
//!
//! The hash depends only on the name and the arity. The `quoted` flag is not
//! hashed; symbols that differ only in quoting share a bucket chain and are
//! told apart by the chain comparison.

/// Per-character multiplier
const HASH_STEP: u64 = 251;

/// Final multiplier, spreads the low bits across power-of-two bucket counts
const HASH_FINISH: u64 = 7;

/// Hash a `(name, arity)` pair
///
/// Deterministic and independent of table size; callers reduce the result
/// with the current bucket mask.
///
/// # Examples
///
/// ```
/// use aterm_afun::hash::symbol_hash;
///
/// assert_eq!(symbol_hash("", 0), 0);
/// assert_eq!(symbol_hash("a", 0), 97 * 7);
/// assert_ne!(symbol_hash("ab", 1), symbol_hash("ba", 1));
/// ```
#[inline]
pub fn symbol_hash(name: &str, arity: usize) -> u64 {
    let seed = (arity as u64).wrapping_mul(3);
    name.bytes()
        .fold(seed, |acc, byte| {
            acc.wrapping_mul(HASH_STEP).wrapping_add(u64::from(byte))
        })
        .wrapping_mul(HASH_FINISH)
}

/// Reduce a hash to a bucket index for a table with `mask + 1` buckets
#[inline]
pub fn bucket_of(hash: u64, mask: usize) -> usize {
    (hash & mask as u64) as usize
}
