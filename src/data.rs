//! Campaign Data
//!
//! Typed rows for the historical crowdfunding dataset, and the owned
//! collection the analyzers operate on. The dataset is loaded once and
//! treated as immutable for the duration of an analysis.
use crate::errors::CrowdsiftError;
use crate::utils::items_to_strings;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of status labels a campaign can carry.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CampaignState {
    /// The campaign reached its funding goal.
    Successful,
    /// The campaign ended without reaching its goal.
    Failed,
    /// The campaign was withdrawn before its deadline.
    Canceled,
    /// The campaign was still running when the data was collected.
    Live,
    /// The campaign was suspended by the platform.
    Suspended,
    /// The record carries no usable status.
    Undefined,
}

impl CampaignState {
    /// States whose outcome is final. `Live` and `Undefined` records are
    /// dropped before modeling since their outcome is unknown.
    pub fn is_settled(&self) -> bool {
        !matches!(self, CampaignState::Live | CampaignState::Undefined)
    }
}

impl FromStr for CampaignState {
    type Err = CrowdsiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "successful" => Ok(CampaignState::Successful),
            "failed" => Ok(CampaignState::Failed),
            "canceled" => Ok(CampaignState::Canceled),
            "live" => Ok(CampaignState::Live),
            "suspended" => Ok(CampaignState::Suspended),
            "undefined" => Ok(CampaignState::Undefined),

            _ => Err(CrowdsiftError::ParseString(
                s.to_string(),
                "state".to_string(),
                items_to_strings(vec![
                    "successful",
                    "failed",
                    "canceled",
                    "live",
                    "suspended",
                    "undefined",
                ]),
            )),
        }
    }
}

impl fmt::Display for CampaignState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CampaignState::Successful => "successful",
            CampaignState::Failed => "failed",
            CampaignState::Canceled => "canceled",
            CampaignState::Live => "live",
            CampaignState::Suspended => "suspended",
            CampaignState::Undefined => "undefined",
        };
        write!(f, "{}", label)
    }
}

/// One historical campaign observation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Campaign {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub main_category: String,
    pub currency: String,
    pub country: String,
    /// Moment the campaign went live.
    pub launched: NaiveDateTime,
    /// Last day pledges were accepted.
    pub deadline: NaiveDate,
    pub goal: f64,
    pub pledged: f64,
    /// Pledged amount converted to USD.
    pub usd_pledged: f64,
    pub backers: u64,
    pub state: CampaignState,
}

impl Campaign {
    /// Whether the campaign reached its funding goal.
    pub fn is_funded(&self) -> bool {
        matches!(self.state, CampaignState::Successful)
    }

    /// Days between launch and deadline.
    pub fn duration_days(&self) -> i64 {
        (self.deadline - self.launched.date()).num_days()
    }
}

/// An order-irrelevant collection of campaign records. There is no
/// uniqueness constraint on any feature value.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Campaign>,
}

impl Dataset {
    pub fn new(records: Vec<Campaign>) -> Self {
        Dataset { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Campaign] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Campaign> {
        self.records.iter()
    }

    /// Fraction of funded campaigns over the whole dataset, in [0, 1].
    pub fn success_rate(&self) -> Result<f64, CrowdsiftError> {
        if self.records.is_empty() {
            return Err(CrowdsiftError::EmptyDataset);
        }
        let funded = self.records.iter().filter(|c| c.is_funded()).count();
        Ok(funded as f64 / self.records.len() as f64)
    }

    /// Drop records whose outcome is not yet settled, returning how many
    /// were removed. This is the cleaning step applied before any
    /// success/failure analysis.
    pub fn retain_settled(&mut self) -> usize {
        let before = self.records.len();
        self.records.retain(|c| c.state.is_settled());
        before - self.records.len()
    }
}

impl FromIterator<Campaign> for Dataset {
    fn from_iter<I: IntoIterator<Item = Campaign>>(iter: I) -> Self {
        Dataset::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
pub(crate) fn test_campaign(id: u64, backers: u64, goal: f64, state: CampaignState) -> Campaign {
    use chrono::NaiveDate;
    let launched = NaiveDate::from_ymd_opt(2015, 8, 11)
        .unwrap()
        .and_hms_opt(12, 12, 28)
        .unwrap();
    Campaign {
        id,
        name: format!("campaign {}", id),
        category: "Tabletop Games".to_string(),
        main_category: "Games".to_string(),
        currency: "USD".to_string(),
        country: "US".to_string(),
        launched,
        deadline: NaiveDate::from_ymd_opt(2015, 10, 9).unwrap(),
        goal,
        pledged: goal / 2.0,
        usd_pledged: goal / 2.0,
        backers,
        state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_str() {
        assert_eq!("successful".parse::<CampaignState>().unwrap(), CampaignState::Successful);
        assert_eq!("canceled".parse::<CampaignState>().unwrap(), CampaignState::Canceled);
        let err = "finished".parse::<CampaignState>();
        assert!(matches!(err, Err(CrowdsiftError::ParseString(_, _, _))));
    }

    #[test]
    fn test_state_display_roundtrip() {
        for state in [
            CampaignState::Successful,
            CampaignState::Failed,
            CampaignState::Canceled,
            CampaignState::Live,
            CampaignState::Suspended,
            CampaignState::Undefined,
        ] {
            assert_eq!(state.to_string().parse::<CampaignState>().unwrap(), state);
        }
    }

    #[test]
    fn test_duration_days() {
        let c = test_campaign(1, 10, 1000.0, CampaignState::Successful);
        assert_eq!(c.duration_days(), 59);
    }

    #[test]
    fn test_success_rate() {
        let dataset: Dataset = vec![
            test_campaign(1, 5, 100.0, CampaignState::Successful),
            test_campaign(2, 0, 100.0, CampaignState::Failed),
            test_campaign(3, 2, 100.0, CampaignState::Canceled),
            test_campaign(4, 9, 100.0, CampaignState::Successful),
        ]
        .into_iter()
        .collect();
        assert_eq!(dataset.success_rate().unwrap(), 0.5);
    }

    #[test]
    fn test_success_rate_empty() {
        let dataset = Dataset::default();
        assert!(matches!(dataset.success_rate(), Err(CrowdsiftError::EmptyDataset)));
    }

    #[test]
    fn test_retain_settled() {
        let mut dataset: Dataset = vec![
            test_campaign(1, 5, 100.0, CampaignState::Successful),
            test_campaign(2, 1, 100.0, CampaignState::Live),
            test_campaign(3, 0, 100.0, CampaignState::Undefined),
            test_campaign(4, 3, 100.0, CampaignState::Suspended),
        ]
        .into_iter()
        .collect();
        let removed = dataset.retain_settled();
        assert_eq!(removed, 2);
        assert_eq!(dataset.len(), 2);
        assert!(dataset.iter().all(|c| c.state.is_settled()));
    }
}
