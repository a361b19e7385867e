use std::sync::mpsc;
use std::thread;

use crate::error::WalkError;
use super::automaton::AutomatonModel;
use super::walker::RandomWalker;

/// Generates `count` strings from one automaton on all available cores.
///
/// # Parameters
/// - `automaton`: Shared, read-only automaton. Every worker walks it through `&A`.
/// - `count`: Number of strings to generate.
/// - `seed`: Base seed of the batch.
/// - `bounds`: `None` for unconstrained generation, `Some((min, max))` for
///   length-bounded generation.
///
/// # Returns
/// One result per item, in item order. Unconstrained items are always `Ok`.
///
/// # Behavior
/// - Splits the items into one chunk per CPU core.
/// - Spawns a scoped thread per chunk; results are collected through an MPSC channel.
/// - Item `i` is generated by its own walker seeded from `(seed, i)`.
///
/// # Notes
/// - Because every item has its own seed, the output does not depend on the
///   number of cores or on thread scheduling: the same `seed` always yields
///   the same batch.
/// - Failed bounded walks are reported, not retried.
pub fn generate_batch<A>(
	automaton: &A,
	count: usize,
	seed: u64,
	bounds: Option<(usize, usize)>,
) -> Vec<Result<String, WalkError>>
where
	A: AutomatonModel + Sync + ?Sized,
{
	if count == 0 {
		return Vec::new();
	}

	let cpus = num_cpus::get().max(1);
	let chunk_size = count.div_ceil(cpus);

	let (tx, rx) = mpsc::channel();
	thread::scope(|scope| {
		for start in (0..count).step_by(chunk_size) {
			let tx = tx.clone();
			let end = (start + chunk_size).min(count);

			scope.spawn(move || {
				log::trace!("batch worker generating items {}..{}", start, end);
				let results: Vec<Result<String, WalkError>> = (start..end)
					.map(|index| {
						let mut walker = RandomWalker::with_seed(automaton, item_seed(seed, index as u64));
						match bounds {
							Some((min_length, max_length)) => walker.generate_bounded(min_length, max_length),
							None => Ok(walker.generate()),
						}
					})
					.collect();
				if tx.send((start, results)).is_err() {
					log::warn!("batch receiver dropped before items {}..{} were sent", start, end);
				}
			});
		}
	});
	drop(tx);

	let mut chunks: Vec<(usize, Vec<Result<String, WalkError>>)> = rx.iter().collect();
	chunks.sort_by_key(|(start, _)| *start);
	chunks.into_iter().flat_map(|(_, results)| results).collect()
}

/// Derives the seed of one batch item from the batch seed.
pub fn item_seed(seed: u64, index: u64) -> u64 {
	seed.wrapping_add(index.wrapping_mul(0x9E3779B97F4A7C15))
}
