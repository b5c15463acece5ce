//! Descriptive Statistics
//!
//! The exploratory half of the analysis: outcome breakdowns, success
//! rates by category, and numeric profiles of campaign features. All
//! functions are pure over an immutable dataset snapshot.
use crate::data::{Campaign, CampaignState, Dataset};
use crate::errors::CrowdsiftError;
use crate::utils::median;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Count and share of records carrying one status label.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StateCount {
    pub state: CampaignState,
    pub count: usize,
    /// Share of the whole dataset, on the 0-100 percentage scale.
    pub share: f64,
}

/// Funded/total counts for one main category.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CategoryRate {
    pub main_category: String,
    pub funded: usize,
    pub total: usize,
    /// Funded share of the category, on the 0-100 percentage scale.
    pub percentage: f64,
}

/// Summary statistics for a numeric campaign feature.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NumericProfile {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

/// Count records per status label, sorted descending by count. Labels
/// with no records are omitted. Shares sum to 100 up to rounding.
pub fn state_breakdown(dataset: &Dataset) -> Result<Vec<StateCount>, CrowdsiftError> {
    if dataset.is_empty() {
        return Err(CrowdsiftError::EmptyDataset);
    }
    let mut counts: HashMap<CampaignState, usize> = HashMap::new();
    for campaign in dataset.iter() {
        *counts.entry(campaign.state).or_insert(0) += 1;
    }
    let total = dataset.len() as f64;
    let mut breakdown: Vec<StateCount> = counts
        .into_iter()
        .map(|(state, count)| StateCount {
            state,
            count,
            share: count as f64 / total * 100.0,
        })
        .collect();
    breakdown.sort_unstable_by(|a, b| b.count.cmp(&a.count).then(a.state.to_string().cmp(&b.state.to_string())));
    Ok(breakdown)
}

/// Success rate per main category, sorted descending by percentage with
/// category name as the tie breaker.
pub fn success_rate_by_category(dataset: &Dataset) -> Result<Vec<CategoryRate>, CrowdsiftError> {
    if dataset.is_empty() {
        return Err(CrowdsiftError::EmptyDataset);
    }
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for campaign in dataset.iter() {
        let entry = counts.entry(campaign.main_category.as_str()).or_insert((0, 0));
        entry.0 += campaign.is_funded() as usize;
        entry.1 += 1;
    }
    let mut rates: Vec<CategoryRate> = counts
        .into_iter()
        .map(|(main_category, (funded, total))| CategoryRate {
            main_category: main_category.to_string(),
            funded,
            total,
            percentage: funded as f64 / total as f64 * 100.0,
        })
        .collect();
    rates.sort_unstable_by(|a, b| {
        b.percentage
            .total_cmp(&a.percentage)
            .then_with(|| a.main_category.cmp(&b.main_category))
    });
    Ok(rates)
}

/// Profile a numeric feature over the dataset. NaN values are skipped,
/// profiling a feature that is NaN everywhere is an error.
pub fn numeric_profile<F>(dataset: &Dataset, feature: F) -> Result<NumericProfile, CrowdsiftError>
where
    F: Fn(&Campaign) -> f64,
{
    let mut values: Vec<f64> = dataset.iter().map(|c| feature(c)).filter(|v| !v.is_nan()).collect();
    if values.is_empty() {
        return Err(CrowdsiftError::EmptyDataset);
    }
    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let median = median(&mut values);
    Ok(NumericProfile {
        count,
        mean,
        median,
        min,
        max,
    })
}
