use rand::Rng;

/// First UTF-16 surrogate code point.
const SURROGATE_START: u32 = 0xD800;
/// Number of surrogate code points (U+D800..=U+DFFF).
const SURROGATE_COUNT: u32 = 0x800;

/// Returns an integer uniformly distributed over `[min, max]` (inclusive).
///
/// The span is computed in `i128` and drawn as a `u64` offset, so ranges as
/// wide as the whole `i64` domain are handled without overflow.
///
/// # Determinism
/// For a given generator state, the same sequence of calls always yields the
/// same sequence of values. Random walks rely on this to be reproducible.
///
/// # Panics
/// In debug builds, if `min > max`.
pub fn sample<R: Rng + ?Sized>(min: i64, max: i64, rng: &mut R) -> i64 {
	debug_assert!(min <= max, "empty range [{min}, {max}]");
	let span = (max as i128 - min as i128) as u64;
	let offset = rng.random_range(0..=span);
	(min as i128 + offset as i128) as i64
}

/// Returns an index uniformly distributed over `[0, len - 1]`.
///
/// `len` must be strictly positive.
pub fn sample_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> usize {
	debug_assert!(len > 0, "cannot sample an index from an empty set");
	sample(0, len as i64 - 1, rng) as usize
}

/// Returns a character uniformly distributed over the Unicode scalar values
/// of `[min, max]`.
///
/// Surrogate code points are not valid `char`s, so the range is sampled in a
/// compacted index space where they do not exist. Every returned value is a
/// scalar value of the range, and each of them is equally likely.
pub fn sample_char<R: Rng + ?Sized>(min: char, max: char, rng: &mut R) -> char {
	let index = sample(compact(min) as i64, compact(max) as i64, rng) as u32;
	// Compact indices always map back to scalar values
	char::from_u32(expand(index)).unwrap_or(max)
}

/// Maps a `char` to its position among scalar values.
fn compact(c: char) -> u32 {
	let value = c as u32;
	if value >= SURROGATE_START { value - SURROGATE_COUNT } else { value }
}

/// Inverse of `compact`.
fn expand(index: u32) -> u32 {
	if index >= SURROGATE_START { index + SURROGATE_COUNT } else { index }
}
