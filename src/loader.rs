//! Dataset Loading
//!
//! Reads the historical campaign CSV into typed records. Missing-value
//! handling happens here, before any analyzer sees the data: an empty
//! name gets a default label, a row with an unparseable numeric or date
//! cell is dropped, and a missing USD conversion falls back to the raw
//! pledged amount. Header order does not matter, columns are resolved by
//! name and surrounding whitespace in header cells is ignored.
use crate::data::{Campaign, CampaignState, Dataset};
use crate::errors::CrowdsiftError;
use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const DEFAULT_NAME: &str = "unnamed";
const LAUNCHED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DEADLINE_FORMAT: &str = "%Y-%m-%d";

struct Columns {
    id: usize,
    name: usize,
    category: usize,
    main_category: usize,
    currency: usize,
    country: usize,
    launched: usize,
    deadline: usize,
    goal: usize,
    pledged: usize,
    usd_pledged: usize,
    backers: usize,
    state: usize,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, CrowdsiftError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| CrowdsiftError::UnableToRead(format!("missing column '{}'", name)))
        };
        Ok(Columns {
            id: find("ID")?,
            name: find("name")?,
            category: find("category")?,
            main_category: find("main_category")?,
            currency: find("currency")?,
            country: find("country")?,
            launched: find("launched")?,
            deadline: find("deadline")?,
            goal: find("goal")?,
            pledged: find("pledged")?,
            usd_pledged: find("usd pledged")?,
            backers: find("backers")?,
            state: find("state")?,
        })
    }
}

/// Load a campaign dataset from a CSV file on disk.
pub fn read_campaigns_csv<P: AsRef<Path>>(path: P) -> Result<Dataset, CrowdsiftError> {
    let file = File::open(path.as_ref()).map_err(|e| CrowdsiftError::UnableToRead(e.to_string()))?;
    read_campaigns(BufReader::new(file))
}

/// Load a campaign dataset from any reader yielding CSV with a header row.
///
/// Fails with `ParseString` when a status label falls outside the
/// enumerated set, the label column is closed. Rows with malformed
/// numeric or date cells are dropped with a warning rather than failing
/// the whole load.
pub fn read_campaigns<R: Read>(reader: R) -> Result<Dataset, CrowdsiftError> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|e| CrowdsiftError::UnableToRead(e.to_string()))?
        .clone();
    let columns = Columns::resolve(&headers)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;
    let mut renamed = 0usize;
    let mut converted = 0usize;

    for result in csv_reader.records() {
        let record = result.map_err(|e| CrowdsiftError::UnableToRead(e.to_string()))?;

        let state: CampaignState = record[columns.state].trim().parse()?;

        let id = record[columns.id].trim().parse::<u64>();
        let goal = record[columns.goal].trim().parse::<f64>();
        let pledged = record[columns.pledged].trim().parse::<f64>();
        let backers = record[columns.backers].trim().parse::<u64>();
        let launched = NaiveDateTime::parse_from_str(record[columns.launched].trim(), LAUNCHED_FORMAT);
        let deadline = NaiveDate::parse_from_str(record[columns.deadline].trim(), DEADLINE_FORMAT);

        let (id, goal, pledged, backers, launched, deadline) =
            match (id, goal, pledged, backers, launched, deadline) {
                (Ok(i), Ok(g), Ok(p), Ok(b), Ok(l), Ok(d)) => (i, g, p, b, l, d),
                _ => {
                    dropped += 1;
                    continue;
                }
            };

        let mut name = record[columns.name].trim().to_string();
        if name.is_empty() {
            name = DEFAULT_NAME.to_string();
            renamed += 1;
        }

        let usd_pledged = match record[columns.usd_pledged].trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                converted += 1;
                pledged
            }
        };

        records.push(Campaign {
            id,
            name,
            category: record[columns.category].trim().to_string(),
            main_category: record[columns.main_category].trim().to_string(),
            currency: record[columns.currency].trim().to_string(),
            country: record[columns.country].trim().to_string(),
            launched,
            deadline,
            goal,
            pledged,
            usd_pledged,
            backers,
            state,
        });
    }

    if renamed > 0 {
        warn!("Substituted '{}' for {} empty campaign names", DEFAULT_NAME, renamed);
    }
    if converted > 0 {
        warn!(
            "Used raw pledged amount for {} records missing a USD conversion",
            converted
        );
    }
    if dropped > 0 {
        warn!("Dropped {} records with malformed numeric or date cells", dropped);
    }
    info!("Loaded {} campaign records", records.len());

    Ok(Dataset::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "ID,name,category,main_category,currency,deadline,goal,launched,pledged,state,backers,country,usd pledged";

    fn load(rows: &[&str]) -> Result<Dataset, CrowdsiftError> {
        let mut csv = String::from(HEADER);
        for row in rows {
            csv.push('\n');
            csv.push_str(row);
        }
        read_campaigns(csv.as_bytes())
    }

    #[test]
    fn test_read_fixture_file() {
        let dataset = read_campaigns_csv("resources/campaigns_sample.csv").unwrap();
        assert_eq!(dataset.len(), 12);
        let funded = dataset.iter().filter(|c| c.is_funded()).count();
        assert_eq!(funded, 5);
        let first = &dataset.records()[0];
        assert_eq!(first.main_category, "Games");
        assert_eq!(first.backers, 761);
    }

    #[test]
    fn test_empty_name_gets_default() {
        let dataset = load(&[
            "1,,Tabletop Games,Games,USD,2015-10-09,5000,2015-08-11 12:12:28,6000,successful,120,US,6000",
        ])
        .unwrap();
        assert_eq!(dataset.records()[0].name, "unnamed");
    }

    #[test]
    fn test_malformed_numeric_row_dropped() {
        let dataset = load(&[
            "1,alpha,Tabletop Games,Games,USD,2015-10-09,5000,2015-08-11 12:12:28,6000,successful,120,US,6000",
            "2,beta,Tabletop Games,Games,USD,2015-10-09,not-a-number,2015-08-11 12:12:28,0,failed,0,US,0",
        ])
        .unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].id, 1);
    }

    #[test]
    fn test_malformed_date_row_dropped() {
        let dataset = load(&[
            "1,alpha,Tabletop Games,Games,USD,09/10/2015,5000,2015-08-11 12:12:28,6000,successful,120,US,6000",
        ])
        .unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_unknown_state_label_rejected() {
        let res = load(&[
            "1,alpha,Tabletop Games,Games,USD,2015-10-09,5000,2015-08-11 12:12:28,6000,finished,120,US,6000",
        ]);
        assert!(matches!(res, Err(CrowdsiftError::ParseString(_, _, _))));
    }

    #[test]
    fn test_missing_usd_conversion_falls_back_to_pledged() {
        let dataset = load(&[
            "1,alpha,Tabletop Games,Games,GBP,2015-10-09,5000,2015-08-11 12:12:28,6000,successful,120,GB,",
        ])
        .unwrap();
        assert_eq!(dataset.records()[0].usd_pledged, 6000.0);
    }

    #[test]
    fn test_missing_column_reported() {
        let csv = "ID,name,category\n1,alpha,Tabletop Games";
        let res = read_campaigns(csv.as_bytes());
        assert!(matches!(res, Err(CrowdsiftError::UnableToRead(_))));
    }

    #[test]
    fn test_headers_with_trailing_whitespace() {
        let csv = "ID ,name ,category ,main_category ,currency ,deadline ,goal ,launched ,pledged ,state ,backers ,country ,usd pledged \n\
                   1,alpha,Tabletop Games,Games,USD,2015-10-09,5000,2015-08-11 12:12:28,6000,successful,120,US,6000";
        let dataset = read_campaigns(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 1);
    }
}
