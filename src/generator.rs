//! Sparse-digit number generation
//!
//! Numbers above two digits keep only their top two digits non-zero, the way
//! large magnitudes are read aloud ("forty-three trillion" rather than an
//! arbitrary 16-digit string).

use rand::Rng;

/// Numbers per board
pub const SET_SIZE: usize = 5;

/// Smallest digit length drawn
pub const MIN_DIGITS: u32 = 2;

/// Largest digit length drawn
pub const MAX_DIGITS: u32 = 16;

/// Largest value the generator can produce (`99 * 10^14`)
pub const MAX_VALUE: u64 = 99 * 10_u64.pow(MAX_DIGITS - 2);

/// Source of uniformly distributed integers
///
/// Abstracted so tests can substitute a seeded or scripted source.
pub trait RandomSource {
    /// Draw an integer uniformly from `low..=high`
    fn next_in(&mut self, low: u64, high: u64) -> u64;
}

/// Adapter exposing any [`rand::Rng`] as a [`RandomSource`]
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<rand::rngs::ThreadRng> {
    /// Non-deterministic source backed by the thread-local generator
    #[must_use]
    pub fn thread() -> Self {
        Self(rand::thread_rng())
    }
}

impl RngSource<rand::rngs::StdRng> {
    /// Deterministic source for a given seed
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_in(&mut self, low: u64, high: u64) -> u64 {
        self.0.gen_range(low..=high)
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_in(&mut self, low: u64, high: u64) -> u64 {
        (**self).next_in(low, high)
    }
}

/// Draw `low..=high` and fail loudly if the source misbehaves
fn draw(rng: &mut impl RandomSource, low: u64, high: u64) -> u64 {
    let value = rng.next_in(low, high);
    assert!(
        (low..=high).contains(&value),
        "random source returned {value} outside {low}..={high}"
    );
    value
}

/// Generate a single sparse-digit number
///
/// # Panics
///
/// Panics if `rng` returns a value outside the requested range
pub fn sparse_number(rng: &mut impl RandomSource) -> u64 {
    let digits = draw(rng, u64::from(MIN_DIGITS), u64::from(MAX_DIGITS));

    if digits <= 2 {
        draw(rng, 0, 99)
    } else {
        let head = draw(rng, 1, 99);
        // digits is bounded by MAX_DIGITS, so the exponent fits
        #[allow(clippy::cast_possible_truncation)]
        let zeros = (digits - 2) as u32;
        head * 10_u64.pow(zeros)
    }
}

/// Generate `count` independently drawn sparse-digit numbers
///
/// # Panics
///
/// Panics if `rng` returns a value outside the requested range
pub fn generate(rng: &mut impl RandomSource, count: usize) -> Vec<u64> {
    (0..count).map(|_| sparse_number(rng)).collect()
}

/// Generate a full board of [`SET_SIZE`] numbers
///
/// # Panics
///
/// Panics if `rng` returns a value outside the requested range
pub fn generate_numbers(rng: &mut impl RandomSource) -> Vec<u64> {
    generate(rng, SET_SIZE)
}

/// Number of decimal digits in `n` (0 has one digit)
#[must_use]
pub const fn digit_count(n: u64) -> u32 {
    match n.checked_ilog10() {
        Some(log) => log + 1,
        None => 1,
    }
}
