use crate::config::Config;
use crate::consts::DEFAULT_SAMPLE_COUNT;
use crate::core_types::{HistoryEntry, Identifier, Partition, Sample};
use crate::optimizer::generator::generate_partition;
use crate::scorer;
use rayon::prelude::*;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingOptions {
    pub sample_count: usize,
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for PairingOptions {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            seed: None,
            parallel: false,
        }
    }
}

impl From<&Config> for PairingOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            sample_count: cfg.search.samples,
            seed: cfg.search.seed,
            parallel: cfg.search.parallel,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizationResult {
    pub score: u64,
    pub partition: Partition,
    pub samples_evaluated: usize,
}

impl OptimizationResult {
    fn empty() -> Self {
        Self {
            score: 0,
            partition: Vec::new(),
            samples_evaluated: 0,
        }
    }
}

/// Receives updates whenever the sequential search finds a better sample.
/// Returning false stops the search and keeps the best sample so far.
pub trait ProgressCallback: Send + Sync {
    fn on_improvement(&self, sample: usize, score: u64, best: &Partition) -> bool;
}

pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_improvement(&self, _sample: usize, _score: u64, _best: &Partition) -> bool {
        true
    }
}

pub struct Optimizer {
    options: PairingOptions,
}

impl Optimizer {
    pub fn new(options: PairingOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PairingOptions {
        &self.options
    }

    /// One RNG seed per sample, drawn up front from a single master RNG so
    /// that the sequential and parallel paths see identical candidates.
    fn sample_seeds(&self) -> Vec<u64> {
        let mut master = match self.options.seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };
        let count = self.options.sample_count.max(1);
        (0..count).map(|_| master.u64(..)).collect()
    }

    pub fn run(&self, identifiers: &[Identifier], history: &[HistoryEntry]) -> OptimizationResult {
        self.run_with_callback(identifiers, history, &NoProgress)
    }

    pub fn run_with_callback<CB: ProgressCallback>(
        &self,
        identifiers: &[Identifier],
        history: &[HistoryEntry],
        callback: &CB,
    ) -> OptimizationResult {
        if identifiers.len() < 2 {
            return OptimizationResult::empty();
        }

        let start = Instant::now();
        let seeds = self.sample_seeds();

        let result = if self.options.parallel {
            run_parallel(identifiers, history, &seeds)
        } else {
            run_sequential(identifiers, history, &seeds, callback)
        };

        debug!(
            "Evaluated {} samples in {:.2?} (best score {})",
            result.samples_evaluated,
            start.elapsed(),
            result.score
        );

        result
    }

    /// Every sample the search would draw, in generation order.
    pub fn evaluate_all(&self, identifiers: &[Identifier], history: &[HistoryEntry]) -> Vec<Sample> {
        if identifiers.len() < 2 {
            return Vec::new();
        }
        self.sample_seeds()
            .into_iter()
            .map(|seed| draw_sample(identifiers, history, seed))
            .collect()
    }
}

fn draw_sample(identifiers: &[Identifier], history: &[HistoryEntry], seed: u64) -> Sample {
    let mut rng = fastrand::Rng::with_seed(seed);
    let partition = generate_partition(identifiers, &mut rng);
    let score = scorer::score(&partition, history);
    Sample { score, partition }
}

fn run_sequential<CB: ProgressCallback>(
    identifiers: &[Identifier],
    history: &[HistoryEntry],
    seeds: &[u64],
    callback: &CB,
) -> OptimizationResult {
    let mut best: Option<Sample> = None;
    let mut evaluated = 0;

    for (i, &seed) in seeds.iter().enumerate() {
        let sample = draw_sample(identifiers, history, seed);
        evaluated += 1;

        let improved = best.as_ref().map_or(true, |b| sample.score < b.score);
        if !improved {
            continue;
        }

        let keep_going = callback.on_improvement(i, sample.score, &sample.partition);
        let perfect = sample.score == 0;
        best = Some(sample);

        // Nothing can beat zero, and ties keep the earliest sample.
        if perfect || !keep_going {
            break;
        }
    }

    match best {
        Some(b) => OptimizationResult {
            score: b.score,
            partition: b.partition,
            samples_evaluated: evaluated,
        },
        None => OptimizationResult::empty(),
    }
}

fn run_parallel(
    identifiers: &[Identifier],
    history: &[HistoryEntry],
    seeds: &[u64],
) -> OptimizationResult {
    let best = seeds
        .par_iter()
        .enumerate()
        .map(|(i, &seed)| (i, draw_sample(identifiers, history, seed)))
        .min_by_key(|(i, sample)| (sample.score, *i));

    match best {
        Some((_, b)) => OptimizationResult {
            score: b.score,
            partition: b.partition,
            samples_evaluated: seeds.len(),
        },
        None => OptimizationResult::empty(),
    }
}
