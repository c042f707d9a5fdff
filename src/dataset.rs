//! The launch record table and its CSV loader.
//!
//! The dataset is read once at process start and is immutable afterwards.
//! Everything the dashboard derives from it (selector options, payload
//! bounds) is computed here at load time.

use std::{fs::File, io::Read, path::Path};

use serde::{Deserialize, Deserializer};

use crate::Error;

/// Whether a launch succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The launch failed (flag 0 in the source data).
    Failure,
    /// The launch succeeded (flag 1 in the source data).
    Success,
}

impl Outcome {
    /// Map the 0/1 outcome flag used by the source data to an [Outcome].
    ///
    /// Returns `None` for any other flag value.
    pub fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// The 0/1 flag representation used for charting.
    pub fn as_flag(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    /// The display label used in the proportion chart.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

fn outcome_from_flag<'de, D>(deserializer: D) -> Result<Outcome, D::Error>
where
    D: Deserializer<'de>,
{
    let flag = u8::deserialize(deserializer)?;
    Outcome::from_flag(flag).ok_or_else(|| {
        serde::de::Error::custom(format!("outcome flag must be 0 or 1, got {flag}"))
    })
}

/// One row of the launch dataset.
///
/// Field names map onto the column headers of the source CSV file. Columns
/// not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LaunchRecord {
    /// The launch site identifier, e.g. "KSC LC-39A".
    #[serde(rename = "Launch Site")]
    pub site: String,

    /// The payload mass in kilograms. Never negative.
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,

    /// The booster hardware variant, e.g. "FT".
    #[serde(rename = "Booster Version")]
    pub booster_version: String,

    /// Whether the launch succeeded, from the 0/1 `class` column.
    #[serde(rename = "class", deserialize_with = "outcome_from_flag")]
    pub outcome: Outcome,
}

/// The launch records loaded at startup, plus the metadata derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    sites: Vec<String>,
    min_payload: f64,
    max_payload: f64,
}

impl LaunchDataset {
    /// Load the launch dataset from a CSV file at `path`.
    ///
    /// # Errors
    /// Returns [Error::DatasetRead] if the file cannot be opened, otherwise
    /// any error from [LaunchDataset::from_reader].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|error| Error::DatasetRead {
            path: path.display().to_string(),
            reason: error.to_string(),
        })?;

        Self::from_reader(file)
    }

    /// Load the launch dataset from CSV text provided by `reader`.
    ///
    /// The first line must be a header row containing at least the columns
    /// `Launch Site`, `Payload Mass (kg)`, `Booster Version` and `class`.
    ///
    /// # Errors
    /// Returns [Error::InvalidCsv] if a row cannot be parsed (including when
    /// a required column is missing), otherwise any error from
    /// [LaunchDataset::new].
    pub fn from_reader(reader: impl Read) -> Result<Self, Error> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let records = csv_reader
            .deserialize()
            .collect::<Result<Vec<LaunchRecord>, csv::Error>>()
            .map_err(|error| Error::InvalidCsv(error.to_string()))?;

        Self::new(records)
    }

    /// Create a dataset from already parsed launch records.
    ///
    /// # Errors
    /// Returns [Error::EmptyDataset] if `records` is empty, or
    /// [Error::NegativePayload] if any record carries a negative payload
    /// mass.
    pub fn new(records: Vec<LaunchRecord>) -> Result<Self, Error> {
        if records.is_empty() {
            return Err(Error::EmptyDataset);
        }

        for (index, record) in records.iter().enumerate() {
            // Comparing this way round also rejects NaN payloads.
            if !(record.payload_mass_kg >= 0.0) {
                return Err(Error::NegativePayload { row: index + 1 });
            }
        }

        let mut sites: Vec<String> = Vec::new();
        for record in &records {
            if !sites.contains(&record.site) {
                sites.push(record.site.clone());
            }
        }

        let min_payload = records
            .iter()
            .map(|record| record.payload_mass_kg)
            .fold(f64::INFINITY, f64::min);
        let max_payload = records
            .iter()
            .map(|record| record.payload_mass_kg)
            .fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            records,
            sites,
            min_payload,
            max_payload,
        })
    }

    /// The launch records in source file order.
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// The distinct launch sites, in the order they first appear in the data.
    ///
    /// These populate the site selector, so the order is stable for a given
    /// input file.
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// The smallest payload mass observed in the dataset.
    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    /// The largest payload mass observed in the dataset.
    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, dataset::Outcome};

    use super::{LaunchDataset, LaunchRecord};

    const VALID_CSV: &str = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
1,CCAFS LC-40,0,0,F9 v1.0 B0003,v1.0
2,CCAFS LC-40,1,525,F9 v1.0 B0005,v1.0
3,VAFB SLC-4E,1,500,F9 v1.1 B1003,v1.1
4,KSC LC-39A,1,9600,F9 B4 B1040,B4
";

    #[test]
    fn parses_rows_and_ignores_extra_columns() {
        let dataset = LaunchDataset::from_reader(VALID_CSV.as_bytes()).unwrap();

        assert_eq!(dataset.records().len(), 4);
        assert_eq!(
            dataset.records()[1],
            LaunchRecord {
                site: "CCAFS LC-40".to_owned(),
                payload_mass_kg: 525.0,
                booster_version: "F9 v1.0 B0005".to_owned(),
                outcome: Outcome::Success,
            }
        );
    }

    #[test]
    fn collects_distinct_sites_in_first_appearance_order() {
        let dataset = LaunchDataset::from_reader(VALID_CSV.as_bytes()).unwrap();

        let sites: Vec<&str> = dataset.sites().iter().map(String::as_str).collect();
        assert_eq!(sites, ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);
    }

    #[test]
    fn computes_payload_bounds() {
        let dataset = LaunchDataset::from_reader(VALID_CSV.as_bytes()).unwrap();

        assert_eq!(dataset.min_payload(), 0.0);
        assert_eq!(dataset.max_payload(), 9600.0);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        // No `class` column.
        let csv = "\
Launch Site,Payload Mass (kg),Booster Version
CCAFS LC-40,500,F9 v1.0 B0003
";

        let result = LaunchDataset::from_reader(csv.as_bytes());

        assert!(matches!(result, Err(Error::InvalidCsv(_))), "{result:?}");
    }

    #[test]
    fn outcome_flag_other_than_zero_or_one_is_an_error() {
        let csv = "\
Launch Site,class,Payload Mass (kg),Booster Version
CCAFS LC-40,2,500,F9 v1.0 B0003
";

        let result = LaunchDataset::from_reader(csv.as_bytes());

        assert!(matches!(result, Err(Error::InvalidCsv(_))), "{result:?}");
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let csv = "Launch Site,class,Payload Mass (kg),Booster Version\n";

        let result = LaunchDataset::from_reader(csv.as_bytes());

        assert_eq!(result, Err(Error::EmptyDataset));
    }

    #[test]
    fn negative_payload_is_an_error() {
        let records = vec![
            LaunchRecord {
                site: "CCAFS LC-40".to_owned(),
                payload_mass_kg: 500.0,
                booster_version: "F9 v1.0".to_owned(),
                outcome: Outcome::Success,
            },
            LaunchRecord {
                site: "CCAFS LC-40".to_owned(),
                payload_mass_kg: -1.0,
                booster_version: "F9 v1.0".to_owned(),
                outcome: Outcome::Failure,
            },
        ];

        let result = LaunchDataset::new(records);

        assert_eq!(result, Err(Error::NegativePayload { row: 2 }));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = LaunchDataset::from_path("does/not/exist.csv");

        assert!(
            matches!(result, Err(Error::DatasetRead { .. })),
            "{result:?}"
        );
    }

    #[test]
    fn outcome_flag_round_trip() {
        assert_eq!(Outcome::from_flag(0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_flag(1), Some(Outcome::Success));
        assert_eq!(Outcome::from_flag(7), None);
        assert_eq!(Outcome::Success.as_flag(), 1);
        assert_eq!(Outcome::Failure.label(), "Failure");
    }
}
