//! Loading detection results from JSON lines or CSV.
//!
//! Each record describes one (threshold, window size) evaluation run. The
//! loader coerces the fixed column set to numeric types and rounds thresholds
//! to one decimal so that representation noise (`0.30000000000000004`)
//! collapses into discrete buckets.
//!
//! ## Required columns
//!
//! | Column        | Type  |
//! |---------------|-------|
//! | `det_ratio`   | float |
//! | `fp_rate`     | float |
//! | `ifp_rate`    | float |
//! | `threshold`   | float, rounded to 1 decimal |
//! | `window_size` | integer |
//!
//! Numeric columns accept JSON numbers, numeric strings and booleans
//! (`true` = 1, `false` = 0). Any other column is preserved untyped in
//! [`ResultRecord::extra`].

mod index;

pub use index::ThresholdIndex;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

const DET_RATIO: &str = "det_ratio";
const FP_RATE: &str = "fp_rate";
const IFP_RATE: &str = "ifp_rate";
const THRESHOLD: &str = "threshold";
const WINDOW_SIZE: &str = "window_size";

/// One evaluation run of the detector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    /// Fraction of true events detected, in `[0, 1]`.
    pub det_ratio: f64,
    /// False positive rate.
    pub fp_rate: f64,
    /// Inverse false positive rate in seconds.
    pub ifp_rate: f64,
    /// Detection threshold, rounded to one decimal.
    pub threshold: f64,
    /// Sliding-window size.
    pub window_size: i64,
    /// Columns outside the fixed schema.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ResultRecord {
    /// Builds a record from a column map, coercing the required columns.
    ///
    /// `line` is only used for error reporting.
    pub fn from_fields(line: usize, mut fields: Map<String, Value>) -> Result<Self> {
        let mut take = |name: &str| {
            fields.remove(name).ok_or_else(|| Error::MissingField {
                line,
                field: name.to_string(),
            })
        };

        let det_ratio = coerce_float(line, DET_RATIO, &take(DET_RATIO)?)?;
        let fp_rate = coerce_float(line, FP_RATE, &take(FP_RATE)?)?;
        let ifp_rate = coerce_float(line, IFP_RATE, &take(IFP_RATE)?)?;
        let threshold = coerce_float(line, THRESHOLD, &take(THRESHOLD)?)?;
        let window_size = coerce_int(line, WINDOW_SIZE, &take(WINDOW_SIZE)?)?;

        Ok(Self {
            det_ratio,
            fp_rate,
            ifp_rate,
            threshold: round_threshold(threshold),
            window_size,
            extra: fields.into_iter().collect(),
        })
    }
}

/// Rounds a threshold to one decimal place, ties to even.
///
/// ```
/// use dr_ifpr_plot::results::round_threshold;
///
/// assert_eq!(round_threshold(0.30000000000000004), 0.3);
/// assert_eq!(round_threshold(0.25), 0.2);
/// ```
#[must_use]
pub fn round_threshold(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

fn coerce_float(line: usize, field: &str, value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.ok_or_else(|| Error::InvalidField {
        line,
        field: field.to_string(),
        reason: format!("expected a number, got {value}"),
    })
}

/// Integer coercion truncates fractional values toward zero.
fn coerce_int(line: usize, field: &str, value: &Value) -> Result<i64> {
    let invalid = |reason: String| Error::InvalidField {
        line,
        field: field.to_string(),
        reason,
    };

    let float = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            n.as_f64()
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                return Ok(i);
            }
            s.parse::<f64>().ok()
        }
        Value::Bool(b) => return Ok(i64::from(*b)),
        _ => None,
    };

    match float {
        Some(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Ok(f.trunc() as i64),
        Some(f) => Err(invalid(format!("{f} does not fit an integer"))),
        None => Err(invalid(format!("expected an integer, got {value}"))),
    }
}

/// All records of a results file, in input order.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    records: Vec<ResultRecord>,
}

impl ResultTable {
    /// Creates a table from already-built records.
    #[must_use]
    pub fn new(records: Vec<ResultRecord>) -> Self {
        Self { records }
    }

    /// Loads a results file.
    ///
    /// Files ending in `.csv` are read as headed CSV, everything else as
    /// newline-delimited JSON. An input without any record is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;

        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

        let table = if is_csv {
            Self::from_csv_reader(file)?
        } else {
            Self::from_json_lines(BufReader::new(file))?
        };

        if table.is_empty() {
            return Err(Error::EmptyResults);
        }
        Ok(table)
    }

    /// Parses newline-delimited JSON objects. Blank lines are skipped.
    pub fn from_json_lines(reader: impl BufRead) -> Result<Self> {
        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Map<String, Value> = serde_json::from_str(&line)
                .map_err(|source| Error::Json { line: line_no, source })?;
            records.push(ResultRecord::from_fields(line_no, fields)?);
        }
        Ok(Self { records })
    }

    /// Parses a headed CSV file with the same column set.
    ///
    /// Line numbers in errors count the header as line 1.
    pub fn from_csv_reader(reader: impl Read) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut records = Vec::new();
        for (idx, row) in csv_reader.records().enumerate() {
            let row = row?;
            let fields: Map<String, Value> = headers
                .iter()
                .zip(row.iter())
                .map(|(h, v)| (h.to_string(), Value::String(v.to_string())))
                .collect();
            records.push(ResultRecord::from_fields(idx + 2, fields)?);
        }
        Ok(Self { records })
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in input order.
    #[must_use]
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    /// Records whose rounded threshold equals `threshold`, in input order.
    pub fn with_threshold(&self, threshold: f64) -> impl Iterator<Item = &ResultRecord> {
        self.records.iter().filter(move |r| r.threshold == threshold)
    }

    /// First record for a (threshold, window size) pair.
    ///
    /// Duplicate pairs are not rejected: the earliest record in input order
    /// wins and later ones are ignored. Duplicates most likely indicate a bug
    /// in whatever produced the results file.
    #[must_use]
    pub fn find(&self, threshold: f64, window_size: i64) -> Option<&ResultRecord> {
        self.with_threshold(threshold)
            .find(|r| r.window_size == window_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn json(lines: &str) -> Result<ResultTable> {
        ResultTable::from_json_lines(Cursor::new(lines))
    }

    #[test]
    fn test_parse_json_lines() {
        let table = json(concat!(
            r#"{"det_ratio": 0.9, "fp_rate": 0.01, "ifp_rate": 100.0, "threshold": 0.5, "window_size": 10}"#,
            "\n\n",
            r#"{"det_ratio": "0.95", "fp_rate": 0.1, "ifp_rate": 10, "threshold": 0.9000001, "window_size": "100", "note": "x"}"#,
            "\n",
        ))
        .unwrap();

        assert_eq!(table.len(), 2);
        let second = &table.records()[1];
        assert_eq!(second.det_ratio, 0.95);
        assert_eq!(second.ifp_rate, 10.0);
        assert_eq!(second.threshold, 0.9);
        assert_eq!(second.window_size, 100);
        assert_eq!(second.extra.get("note"), Some(&Value::from("x")));
    }

    #[test]
    fn test_threshold_rounding() {
        assert_eq!(round_threshold(0.30000000000000004), 0.3);
        assert_eq!(round_threshold(0.849), 0.8);
        assert_eq!(round_threshold(0.86), 0.9);
        // ties go to the even neighbour
        assert_eq!(round_threshold(0.25), 0.2);
        assert_eq!(round_threshold(0.75), 0.8);
    }

    #[test]
    fn test_rounding_idempotent() {
        for tenth in 0..=20 {
            let t = f64::from(tenth) / 10.0;
            let once = round_threshold(t);
            assert_eq!(round_threshold(once), once);
            assert_eq!(once, t);
        }
    }

    #[test]
    fn test_window_size_truncates() {
        let table = json(
            r#"{"det_ratio": 0.9, "fp_rate": 0.01, "ifp_rate": 100, "threshold": 0.5, "window_size": 12.7}"#,
        )
        .unwrap();
        assert_eq!(table.records()[0].window_size, 12);
    }

    #[test]
    fn test_bool_coerces_to_number() {
        let table = json(
            r#"{"det_ratio": true, "fp_rate": false, "ifp_rate": 100, "threshold": 0.5, "window_size": true}"#,
        )
        .unwrap();
        let record = &table.records()[0];
        assert_eq!(record.det_ratio, 1.0);
        assert_eq!(record.fp_rate, 0.0);
        assert_eq!(record.window_size, 1);
    }

    #[test]
    fn test_missing_field() {
        let err = json(r#"{"det_ratio": 0.9, "fp_rate": 0.01, "threshold": 0.5, "window_size": 10}"#)
            .unwrap_err();
        match err {
            Error::MissingField { line, field } => {
                assert_eq!(line, 1);
                assert_eq!(field, "ifp_rate");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_line() {
        let err = json(concat!(
            r#"{"det_ratio": 0.9, "fp_rate": 0.01, "ifp_rate": 1, "threshold": 0.5, "window_size": 10}"#,
            "\n{not json\n",
        ))
        .unwrap_err();
        assert!(matches!(err, Error::Json { line: 2, .. }));
    }

    #[test]
    fn test_uncoercible_value() {
        let err = json(
            r#"{"det_ratio": "high", "fp_rate": 0.01, "ifp_rate": 1, "threshold": 0.5, "window_size": 10}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidField { line: 1, ref field, .. } if field == "det_ratio"));
    }

    #[test]
    fn test_first_match_wins() {
        let table = json(concat!(
            r#"{"det_ratio": 0.91, "fp_rate": 0.01, "ifp_rate": 1, "threshold": 0.5, "window_size": 10}"#,
            "\n",
            r#"{"det_ratio": 0.97, "fp_rate": 0.01, "ifp_rate": 2, "threshold": 0.5, "window_size": 10}"#,
        ))
        .unwrap();
        let found = table.find(0.5, 10).unwrap();
        assert_eq!(found.det_ratio, 0.91);
        assert!(table.find(0.5, 20).is_none());
    }

    #[test]
    fn test_csv_input() {
        let csv = "threshold,window_size,det_ratio,fp_rate,ifp_rate\n\
                   0.5,10,0.9,0.01,100\n\
                   0.5,100,0.93,0.001,1000\n";
        let table = ResultTable::from_csv_reader(Cursor::new(csv)).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].window_size, 100);
        assert_eq!(table.records()[1].ifp_rate, 1000.0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ResultTable::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_load_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::write(&path, "\n\n").unwrap();
        assert!(matches!(ResultTable::load(&path), Err(Error::EmptyResults)));
    }
}
