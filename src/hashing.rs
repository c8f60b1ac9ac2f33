//! Hash functions and the double-hashing probe walk.
//!
//! The map hashes string keys with 32-bit FNV-1a. The set combines a
//! multiplicative primary hash with a division-method step, so colliding
//! keys fan out along different strides instead of forming clusters.

/// FNV-1a 32-bit offset basis.
pub const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
/// FNV-1a 32-bit prime.
pub const FNV_PRIME: u32 = 16_777_619;

/// Golden-ratio conjugate, `(sqrt(5) - 1) / 2`.
const GOLDEN_CONJUGATE: f64 = 0.618_033_988_749_894_9;

/// FNV-1a over the key's bytes, wrapping modulo 2^32.
#[inline]
pub fn fnv1a(key: &str) -> u32 {
    key.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Bucket index of a precomputed FNV-1a hash in a table of `size` buckets.
#[inline]
pub(crate) fn bucket_of(hash: u32, size: usize) -> usize {
    (hash as usize) % size
}

/// Primary hash: `floor(size * frac(key * (sqrt(5) - 1) / 2))`.
///
/// `frac(x) = x - floor(x)`, which stays in `[0, 1)` for negative keys too.
#[inline]
pub fn h1(key: i32, size: usize) -> usize {
    debug_assert!(size > 0);
    let x = f64::from(key) * GOLDEN_CONJUGATE;
    let frac = x - x.floor();
    // Rounding can push the product onto `size` for very large tables.
    ((size as f64 * frac) as usize).min(size - 1)
}

/// Probe step: `(key mod (size - 1)) + 1`, never zero.
///
/// A one-slot table has no room for a stride, so its step is `1`.
#[inline]
pub fn h2(key: i32, size: usize) -> usize {
    debug_assert!(size > 0);
    if size == 1 {
        return 1;
    }
    (i128::from(key).rem_euclid((size - 1) as i128)) as usize + 1
}

/// Slot indices visited for a key: `(h1 + i * h2) mod size` for
/// `i = 0..size`.
///
/// The walk is bounded by `size` steps. When the step and the size share a
/// factor the sequence cycles through only `size / gcd` distinct slots, and
/// the bound keeps a lookup on such a cycle from spinning forever.
#[derive(Clone, Debug)]
pub struct Probe {
    index: usize,
    step: usize,
    size: usize,
    remaining: usize,
}

impl Probe {
    /// Probe walk for `key` in a table of `size` slots; `size` must be non-zero.
    pub fn new(key: i32, size: usize) -> Self {
        Self {
            index: h1(key, size),
            step: h2(key, size) % size,
            size,
            remaining: size,
        }
    }
}

impl Iterator for Probe {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.index;
        self.index = (self.index + self.step) % self.size;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Probe {}

/// Trial-division primality test.
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3usize;
    while d.saturating_mul(d) <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Smallest prime `>= n`, or `None` if it does not fit in a `usize`.
pub fn next_prime(n: usize) -> Option<usize> {
    let mut candidate = n.max(2);
    while !is_prime(candidate) {
        candidate = candidate.checked_add(1)?;
    }
    Some(candidate)
}
