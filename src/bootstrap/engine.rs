//! bootstrap::engine — pluggable resample-and-reduce engines.
//!
//! Purpose
//! -------
//! Draw `R` nonparametric bootstrap resamples (with replacement, same length
//! as the data) and reduce each one to a [`ReplicateStat`]. The estimator
//! only sees the [`ResampleEngine`] trait, so the fan-out strategy is chosen
//! once per call and custom engines can be injected.
//!
//! Key behaviors
//! -------------
//! - [`SequentialEngine`]: replicates on the calling thread.
//! - [`WorkStealingEngine`]: one task per replicate on a dedicated rayon pool
//!   with `workers` threads.
//! - [`ChunkedEngine`]: replicates split into `workers` contiguous batches,
//!   one pool task per batch, results concatenated in batch order.
//! - [`build_engine`] maps a [`Parallelism`] to one of the above.
//!
//! Invariants & assumptions
//! ------------------------
//! - Replicate `i` of a row is drawn from its own generator seeded with
//!   `stream_seed(seed, i)`. Output order is replicate order, so for a fixed
//!   seed all three engines return identical vectors.
//! - `data` is non-empty whenever `replicates > 0`; callers enforce this.
//!
//! Conventions
//! -----------
//! - Generators are `Xoshiro256PlusPlus`; seeds are mixed with the
//!   SplitMix64 finalizer so neighbouring counters give unrelated streams.
use crate::bootstrap::{
    config::{EstimationConfig, Parallelism},
    errors::{EstimatorError, EstimatorResult},
    stats::ReplicateStat,
};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};

/// Reduction applied to every resample.
pub type Statistic = fn(&[f64]) -> ReplicateStat;

/// Resample-and-reduce capability used by the estimator.
pub trait ResampleEngine: Send + Sync {
    /// Draw `replicates` resamples of `data` and reduce each with `statistic`.
    ///
    /// Returns one [`ReplicateStat`] per replicate, in replicate order.
    fn resample_reduce(
        &self, data: &[f64], replicates: usize, seed: u64, statistic: Statistic,
    ) -> Vec<ReplicateStat>;

    /// Short name used in debug logs.
    fn name(&self) -> &'static str;
}

/// Derive the seed of stream `counter` under `base`.
pub fn stream_seed(base: u64, counter: u64) -> u64 {
    splitmix64(base ^ splitmix64(counter.wrapping_add(0x9E37_79B9_7F4A_7C15)))
}

/// Base seed of a call: the configured one, or a fresh draw from the thread RNG.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| rand::rng().random::<u64>())
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Fill `buffer` with a resample of `data` drawn from stream `replicate` and
/// reduce it.
fn draw_replicate(
    data: &[f64], seed: u64, replicate: usize, buffer: &mut [f64], statistic: Statistic,
) -> ReplicateStat {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(stream_seed(seed, replicate as u64));
    let n = data.len();
    for slot in buffer.iter_mut() {
        *slot = data[rng.random_range(0..n)];
    }
    statistic(buffer)
}

fn draw_range(
    data: &[f64], seed: u64, range: std::ops::Range<usize>, statistic: Statistic,
) -> Vec<ReplicateStat> {
    let mut buffer = vec![0.0; data.len()];
    range.map(|i| draw_replicate(data, seed, i, &mut buffer, statistic)).collect()
}

fn build_pool(workers: usize) -> EstimatorResult<ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("time-rolling-bootstrap-{i}"))
        .build()
        .map_err(|err| EstimatorError::WorkerPool { reason: err.to_string() })
}

/// Replicates drawn one after another on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialEngine;

impl ResampleEngine for SequentialEngine {
    fn resample_reduce(
        &self, data: &[f64], replicates: usize, seed: u64, statistic: Statistic,
    ) -> Vec<ReplicateStat> {
        draw_range(data, seed, 0..replicates, statistic)
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Fine-grained fan-out: every replicate is its own task on a work-stealing
/// pool. Each pool thread reuses one scratch buffer.
#[derive(Debug)]
pub struct WorkStealingEngine {
    pool: ThreadPool,
}

impl WorkStealingEngine {
    /// Build a pool with `workers` threads.
    ///
    /// Errors
    /// ------
    /// - `EstimatorError::WorkerPool` when the pool cannot be created.
    pub fn new(workers: usize) -> EstimatorResult<Self> {
        Ok(WorkStealingEngine { pool: build_pool(workers)? })
    }
}

impl ResampleEngine for WorkStealingEngine {
    fn resample_reduce(
        &self, data: &[f64], replicates: usize, seed: u64, statistic: Statistic,
    ) -> Vec<ReplicateStat> {
        self.pool.install(|| {
            (0..replicates)
                .into_par_iter()
                .map_init(
                    || vec![0.0; data.len()],
                    |buffer, i| draw_replicate(data, seed, i, buffer, statistic),
                )
                .collect()
        })
    }

    fn name(&self) -> &'static str {
        "multicore"
    }
}

/// Coarse fan-out: replicates split into `workers` contiguous batches, one
/// task per batch, batch results concatenated in order.
#[derive(Debug)]
pub struct ChunkedEngine {
    pool: ThreadPool,
    workers: usize,
}

impl ChunkedEngine {
    /// Build a pool with `workers` threads and as many batches.
    ///
    /// Errors
    /// ------
    /// - `EstimatorError::WorkerPool` when the pool cannot be created.
    pub fn new(workers: usize) -> EstimatorResult<Self> {
        Ok(ChunkedEngine { pool: build_pool(workers)?, workers })
    }

    /// Replicate ranges handled by each batch; trailing batches may be empty.
    fn batches(&self, replicates: usize) -> Vec<std::ops::Range<usize>> {
        let size = replicates.div_ceil(self.workers.max(1)).max(1);
        (0..self.workers)
            .map(|w| {
                let start = (w * size).min(replicates);
                let end = (start + size).min(replicates);
                start..end
            })
            .collect()
    }
}

impl ResampleEngine for ChunkedEngine {
    fn resample_reduce(
        &self, data: &[f64], replicates: usize, seed: u64, statistic: Statistic,
    ) -> Vec<ReplicateStat> {
        let batches = self.batches(replicates);
        let results: Vec<Vec<ReplicateStat>> = self.pool.install(|| {
            batches.into_par_iter().map(|range| draw_range(data, seed, range, statistic)).collect()
        });
        results.concat()
    }

    fn name(&self) -> &'static str {
        "snow"
    }
}

/// Build the engine selected by `config.parallelism`.
///
/// Errors
/// ------
/// - `EstimatorError::WorkerPool` when a pool-backed engine cannot start.
pub fn build_engine(config: &EstimationConfig) -> EstimatorResult<Box<dyn ResampleEngine>> {
    let engine: Box<dyn ResampleEngine> = match config.parallelism {
        Parallelism::None => Box::new(SequentialEngine),
        Parallelism::Multicore => Box::new(WorkStealingEngine::new(config.workers)?),
        Parallelism::Snow => Box::new(ChunkedEngine::new(config.workers)?),
    };
    Ok(engine)
}
