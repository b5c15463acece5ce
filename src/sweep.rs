//! Threshold Sweep
//!
//! For every distinct observed value `v` of a numeric campaign feature,
//! computes the empirical probability that campaigns with feature >= `v`
//! were funded, together with the discrete derivative of that curve.
//!
//! The >= aggregates are built with a single descending suffix-sum pass
//! over the per-value groups, so the sweep is linear in the number of
//! distinct values rather than quadratic.
use crate::data::{Campaign, Dataset};
use crate::errors::CrowdsiftError;
use hashbrown::HashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One point of the threshold sweep curve.
///
/// `probability` is on the 0-100 percentage scale. `delta` is the finite
/// difference against the previous row and is `None` only for the first
/// row, which has no predecessor. Thresholds are irregularly spaced, the
/// gaps follow the distinct values actually observed in the data, so the
/// deltas are differences over uneven intervals.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct ThresholdRow {
    pub threshold: f64,
    pub probability: f64,
    pub delta: Option<f64>,
}

/// Optional inclusive value filter applied before the sweep, used to
/// exclude outliers such as campaigns with extreme backer counts or
/// goals. Which caps are sensible is a judgment call, so they are
/// parameters rather than built-in constants.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq)]
pub struct SweepBounds {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl SweepBounds {
    /// No filtering, every record participates in the sweep.
    pub fn none() -> Self {
        SweepBounds::default()
    }

    /// Keep only records with feature value <= `limit`.
    pub fn cap(limit: f64) -> Self {
        SweepBounds {
            lower: None,
            upper: Some(limit),
        }
    }

    /// Keep only records with `lower` <= feature value <= `upper`.
    pub fn between(lower: f64, upper: f64) -> Self {
        SweepBounds {
            lower: Some(lower),
            upper: Some(upper),
        }
    }

    fn validate(&self) -> Result<(), CrowdsiftError> {
        if let (Some(lo), Some(hi)) = (self.lower, self.upper) {
            if lo > hi {
                return Err(CrowdsiftError::InvalidBounds(lo, hi));
            }
        }
        Ok(())
    }

    fn contains(&self, v: f64) -> bool {
        self.lower.map_or(true, |lo| v >= lo) && self.upper.map_or(true, |hi| v <= hi)
    }
}

/// Sweep the success probability across every distinct value of a numeric
/// feature.
///
/// * `dataset` - The campaign records, taken as an immutable snapshot.
/// * `feature` - Accessor for the numeric feature to sweep over.
/// * `outcome` - Predicate marking a record as a success.
/// * `bounds` - Optional inclusive outlier filter on the feature value.
///
/// Returns rows in strictly ascending threshold order. The first row is a
/// synthetic baseline at threshold 0 whose probability is the success
/// percentage of the whole unfiltered dataset, representing "no
/// constraint applied". When 0 is itself an observed feature value that
/// row already covers the no-constraint case and no extra baseline is
/// inserted. Records with a NaN feature value are excluded.
///
/// The result is a pure function of the inputs, recomputed fully on each
/// call.
pub fn threshold_sweep<F, O>(
    dataset: &Dataset,
    feature: F,
    outcome: O,
    bounds: SweepBounds,
) -> Result<Vec<ThresholdRow>, CrowdsiftError>
where
    F: Fn(&Campaign) -> f64 + Sync,
    O: Fn(&Campaign) -> bool + Sync,
{
    bounds.validate()?;
    if dataset.is_empty() {
        return Err(CrowdsiftError::EmptyDataset);
    }

    // Baseline over the whole dataset, before any bounds filtering.
    let successes = dataset.iter().filter(|c| outcome(c)).count();
    let baseline = successes as f64 / dataset.len() as f64 * 100.0;

    // Group records by exact feature value. Keys are the value's bit
    // pattern so equal values share a bucket. Partitions are grouped in
    // parallel and merged, the suffix-sum pass below stays sequential.
    let groups: HashMap<u64, (u64, u64)> = dataset
        .records()
        .par_iter()
        .map(|c| (feature(c), outcome(c)))
        .filter(|(v, _)| !v.is_nan() && bounds.contains(*v))
        .fold(HashMap::new, |mut acc: HashMap<u64, (u64, u64)>, (v, hit)| {
            let entry = acc.entry(v.to_bits()).or_insert((0, 0));
            entry.0 += hit as u64;
            entry.1 += 1;
            acc
        })
        .reduce(HashMap::new, |mut a, b| {
            for (key, (hits, count)) in b {
                let entry = a.entry(key).or_insert((0, 0));
                entry.0 += hits;
                entry.1 += count;
            }
            a
        });

    if groups.is_empty() {
        return Err(CrowdsiftError::EmptyDataset);
    }

    let mut grouped: Vec<(f64, u64, u64)> = groups
        .into_iter()
        .map(|(key, (hits, count))| (f64::from_bits(key), hits, count))
        .collect();
    grouped.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));

    // Suffix sums: the >=v aggregate for a value equals the aggregate of
    // the next-larger value plus the group at v itself, so one descending
    // pass covers every threshold.
    let mut rows: Vec<ThresholdRow> = Vec::with_capacity(grouped.len() + 1);
    let mut run_hits = 0u64;
    let mut run_total = 0u64;
    for &(value, hits, count) in grouped.iter().rev() {
        run_hits += hits;
        run_total += count;
        if run_total == 0 {
            // Every group carries at least one record, so the running
            // total can never be zero here.
            return Err(CrowdsiftError::DivisionGuard(value));
        }
        rows.push(ThresholdRow {
            threshold: value,
            probability: run_hits as f64 / run_total as f64 * 100.0,
            delta: None,
        });
    }
    rows.reverse();

    // Prepend the baseline unless it would collide with an observed value
    // at or below zero, keeping thresholds strictly increasing.
    if rows.first().map_or(true, |r| r.threshold > 0.0) {
        rows.insert(
            0,
            ThresholdRow {
                threshold: 0.0,
                probability: baseline,
                delta: None,
            },
        );
    }

    for i in 1..rows.len() {
        let dt = rows[i].threshold - rows[i - 1].threshold;
        rows[i].delta = Some((rows[i].probability - rows[i - 1].probability) / dt);
    }

    Ok(rows)
}
