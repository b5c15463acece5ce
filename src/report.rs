//! Report Rendering
//!
//! Turns analyzer output into fixed-width text tables and JSON. Purely
//! read-only over the sequences it is handed.
use crate::errors::CrowdsiftError;
use crate::summary::{CategoryRate, NumericProfile, StateCount};
use crate::sweep::ThresholdRow;
use std::fmt::Write;

/// Render the threshold sweep as a text table. Probabilities and deltas
/// are shown with four decimal places, a row with no delta shows `-`.
pub fn render_sweep_table(rows: &[ThresholdRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>14}  {:>12}  {:>12}", "threshold", "prob_%", "delta");
    for row in rows {
        match row.delta {
            Some(delta) => {
                let _ = writeln!(out, "{:>14}  {:>12.4}  {:>12.4}", row.threshold, row.probability, delta);
            }
            None => {
                let _ = writeln!(out, "{:>14}  {:>12.4}  {:>12}", row.threshold, row.probability, "-");
            }
        }
    }
    out
}

/// Render the per-state outcome breakdown.
pub fn render_state_breakdown(breakdown: &[StateCount]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<12}  {:>8}  {:>8}", "state", "count", "share_%");
    for entry in breakdown {
        let _ = writeln!(
            out,
            "{:<12}  {:>8}  {:>8.2}",
            entry.state.to_string(),
            entry.count,
            entry.share
        );
    }
    out
}

/// Render the per-category success-rate table.
pub fn render_category_table(rates: &[CategoryRate]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<16}  {:>8}  {:>8}  {:>8}", "main_category", "funded", "total", "rate_%");
    for entry in rates {
        let _ = writeln!(
            out,
            "{:<16}  {:>8}  {:>8}  {:>8.2}",
            entry.main_category, entry.funded, entry.total, entry.percentage
        );
    }
    out
}

/// Render a one-line numeric feature profile.
pub fn render_numeric_profile(name: &str, profile: &NumericProfile) -> String {
    format!(
        "{}: n={} mean={:.4} median={:.4} min={:.4} max={:.4}\n",
        name, profile.count, profile.mean, profile.median, profile.min, profile.max
    )
}

/// Serialize the sweep rows as pretty-printed JSON.
pub fn sweep_to_json(rows: &[ThresholdRow]) -> Result<String, CrowdsiftError> {
    serde_json::to_string_pretty(rows).map_err(|e| CrowdsiftError::UnableToWrite(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CampaignState;

    fn sample_rows() -> Vec<ThresholdRow> {
        vec![
            ThresholdRow {
                threshold: 0.0,
                probability: 75.0,
                delta: None,
            },
            ThresholdRow {
                threshold: 2.0,
                probability: 100.0,
                delta: Some(12.5),
            },
        ]
    }

    #[test]
    fn test_render_sweep_table() {
        let table = render_sweep_table(&sample_rows());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("threshold"));
        assert!(lines[1].ends_with('-'));
        assert!(lines[2].contains("100.0000"));
        assert!(lines[2].contains("12.5000"));
    }

    #[test]
    fn test_render_state_breakdown() {
        let breakdown = vec![StateCount {
            state: CampaignState::Failed,
            count: 7,
            share: 58.33,
        }];
        let table = render_state_breakdown(&breakdown);
        assert!(table.contains("failed"));
        assert!(table.contains("58.33"));
    }

    #[test]
    fn test_render_category_table() {
        let rates = vec![CategoryRate {
            main_category: "Games".to_string(),
            funded: 3,
            total: 4,
            percentage: 75.0,
        }];
        let table = render_category_table(&rates);
        assert!(table.contains("Games"));
        assert!(table.contains("75.00"));
    }

    #[test]
    fn test_sweep_to_json_roundtrip() {
        let rows = sample_rows();
        let json = sweep_to_json(&rows).unwrap();
        let back: Vec<ThresholdRow> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rows);
    }
}
