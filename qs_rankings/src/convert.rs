//! Normalizers for the raw cells of the rankings workbook.

use std::sync::OnceLock;

use log::debug;
use regex::Regex;
use snafu::prelude::*;

use crate::RawCell;

/// The value used for cells that carry no data.
pub const MISSING: f64 = f64::NAN;

#[derive(Debug, Snafu, PartialEq)]
pub enum ConvertError {
    #[snafu(display("Cannot read a rank from {content:?}"))]
    RankFormat { content: String },
    #[snafu(display("Cannot read an overall score from {content:?}"))]
    OverallScoreFormat { content: String },
    #[snafu(display("Cannot read a score from {content:?}"))]
    ScoreFormat { content: String },
    #[snafu(display("Cannot read an integer from {content:?}"))]
    IntegerFormat { content: String },
    #[snafu(display("Cell holds a spreadsheet error: {content}"))]
    ErrorCell { content: String },
}

type ConvertResult<T> = Result<T, ConvertError>;

// "12", "12=", "12 =", "501+"
fn single_rank_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([0-9]+)[\s+=]*$").expect("valid regex"))
}

// "12-15"
fn rank_band_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([0-9]+)-([0-9]+)\s*$").expect("valid regex"))
}

// Digit runs of any length, rounded to the nearest float.
fn parse_digits(digits: &str, content: &str) -> ConvertResult<f64> {
    digits
        .parse::<f64>()
        .ok()
        .context(RankFormatSnafu { content })
}

/// Spreadsheets store every number as a float: integral ones count as integers.
fn is_integral(f: f64) -> bool {
    f.is_finite() && f.fract() == 0.0
}

// Integral and within the range of i64 (2^63 itself is out).
fn as_integer(f: f64) -> Option<i64> {
    if is_integral(f) && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Converts a cell of a rank column.
///
/// Ties carry no numeric effect ("12=" is 12.0) and bands are replaced by their
/// midpoint ("12-15" is 13.5). Empty cells are [MISSING].
///
/// ```
/// use qs_rankings::{convert_rank, RawCell};
///
/// assert_eq!(convert_rank(&RawCell::Int(12)).unwrap(), 12.0);
/// assert_eq!(convert_rank(&RawCell::text("12=")).unwrap(), 12.0);
/// assert_eq!(convert_rank(&RawCell::text("12-15")).unwrap(), 13.5);
/// assert!(convert_rank(&RawCell::text("")).unwrap().is_nan());
/// ```
pub fn convert_rank(cell: &RawCell) -> ConvertResult<f64> {
    match cell {
        RawCell::Int(i) => Ok(*i as f64),
        RawCell::Float(f) if is_integral(*f) => Ok(*f),
        RawCell::Float(f) => RankFormatSnafu {
            content: f.to_string(),
        }
        .fail(),
        RawCell::Empty => Ok(MISSING),
        RawCell::Text(s) if s.is_empty() => Ok(MISSING),
        RawCell::Text(s) => {
            if let Some(caps) = single_rank_re().captures(s) {
                return parse_digits(&caps[1], s);
            }
            let caps = rank_band_re()
                .captures(s)
                .context(RankFormatSnafu { content: s })?;
            let low = parse_digits(&caps[1], s)?;
            let high = parse_digits(&caps[2], s)?;
            debug!("convert_rank: band {:?} -> {}", s, (low + high) / 2.0);
            Ok((low + high) / 2.0)
        }
        RawCell::Error(e) => ErrorCellSnafu { content: e }.fail(),
        RawCell::Bool(b) => RankFormatSnafu {
            content: b.to_string(),
        }
        .fail(),
    }
}

/// Converts a cell of the overall score column.
///
/// Numbers pass through and a lone dash is [MISSING]. Every other text, the empty
/// string included, is rejected.
pub fn convert_overall_score(cell: &RawCell) -> ConvertResult<f64> {
    match cell {
        RawCell::Int(i) => Ok(*i as f64),
        RawCell::Float(f) => Ok(*f),
        RawCell::Text(s) if s == "-" => Ok(MISSING),
        RawCell::Text(s) => OverallScoreFormatSnafu { content: s }.fail(),
        RawCell::Empty => OverallScoreFormatSnafu { content: "" }.fail(),
        RawCell::Error(e) => ErrorCellSnafu { content: e }.fail(),
        RawCell::Bool(b) => OverallScoreFormatSnafu {
            content: b.to_string(),
        }
        .fail(),
    }
}

/// Converts a cell of a category score column. Empty cells are [MISSING].
pub fn convert_score(cell: &RawCell) -> ConvertResult<f64> {
    match cell {
        RawCell::Int(i) => Ok(*i as f64),
        RawCell::Float(f) => Ok(*f),
        RawCell::Empty => Ok(MISSING),
        RawCell::Text(s) if s.is_empty() => Ok(MISSING),
        RawCell::Error(e) => ErrorCellSnafu { content: e }.fail(),
        other => ScoreFormatSnafu {
            content: other.to_string(),
        }
        .fail(),
    }
}

pub fn convert_integer(cell: &RawCell) -> ConvertResult<i64> {
    match cell {
        RawCell::Int(i) => Ok(*i),
        RawCell::Float(f) => as_integer(*f).context(IntegerFormatSnafu {
            content: f.to_string(),
        }),
        RawCell::Error(e) => ErrorCellSnafu { content: e }.fail(),
        other => IntegerFormatSnafu {
            content: other.to_string(),
        }
        .fail(),
    }
}

/// Text is kept verbatim; surrounding whitespace is significant for name lookups.
pub fn convert_text(cell: &RawCell) -> ConvertResult<Option<String>> {
    match cell {
        RawCell::Empty => Ok(None),
        RawCell::Text(s) => Ok(Some(s.clone())),
        RawCell::Int(i) => Ok(Some(i.to_string())),
        RawCell::Float(f) => Ok(Some(f.to_string())),
        RawCell::Bool(b) => Ok(Some(b.to_string())),
        RawCell::Error(e) => ErrorCellSnafu { content: e }.fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(s: &str) -> ConvertResult<f64> {
        convert_rank(&RawCell::text(s))
    }

    #[test]
    fn rank_native_integers() {
        assert_eq!(convert_rank(&RawCell::Int(12)), Ok(12.0));
        assert_eq!(convert_rank(&RawCell::Int(7)), Ok(7.0));
        assert_eq!(convert_rank(&RawCell::Float(7.0)), Ok(7.0));
        assert!(convert_rank(&RawCell::Float(7.5)).is_err());
        assert!(convert_rank(&RawCell::Float(f64::INFINITY)).is_err());
    }

    #[test]
    fn rank_long_digit_runs() {
        assert_eq!(rank("99999999999999999999="), Ok(1e20));
        assert_eq!(rank("1-99999999999999999999"), Ok((1.0 + 1e20) / 2.0));
        assert_eq!(convert_rank(&RawCell::Float(1e20)), Ok(1e20));
    }

    #[test]
    fn rank_empty_is_missing() {
        assert!(rank("").unwrap().is_nan());
        assert!(convert_rank(&RawCell::Empty).unwrap().is_nan());
    }

    #[test]
    fn rank_ties() {
        assert_eq!(rank("12="), Ok(12.0));
        assert_eq!(rank("12 ="), Ok(12.0));
        assert_eq!(rank(" 12 "), Ok(12.0));
        assert_eq!(rank("501+"), Ok(501.0));
        assert_eq!(rank("12"), Ok(12.0));
    }

    #[test]
    fn rank_bands() {
        assert_eq!(rank("12-15"), Ok(13.5));
        assert_eq!(rank(" 1001-1200 "), Ok(1100.5));
        assert_eq!(rank("601-650"), Ok(625.5));
    }

    #[test]
    fn rank_rejects_other_shapes() {
        for s in ["abc", "12-", "-", "12 - 15", "=12", "12-15-18", "1.5"] {
            assert_eq!(
                rank(s),
                Err(ConvertError::RankFormat {
                    content: s.to_string()
                }),
                "{:?}",
                s
            );
        }
        assert!(convert_rank(&RawCell::Bool(true)).is_err());
        assert!(matches!(
            convert_rank(&RawCell::Error("#N/A".to_string())),
            Err(ConvertError::ErrorCell { .. })
        ));
    }

    #[test]
    fn overall_score() {
        assert_eq!(convert_overall_score(&RawCell::Float(7.5)), Ok(7.5));
        assert_eq!(convert_overall_score(&RawCell::Int(100)), Ok(100.0));
        assert!(convert_overall_score(&RawCell::text("-"))
            .unwrap()
            .is_nan());
        assert_eq!(
            convert_overall_score(&RawCell::text("abc")),
            Err(ConvertError::OverallScoreFormat {
                content: "abc".to_string()
            })
        );
        assert!(convert_overall_score(&RawCell::text("")).is_err());
        assert!(convert_overall_score(&RawCell::text("--")).is_err());
        assert!(convert_overall_score(&RawCell::Empty).is_err());
    }

    #[test]
    fn category_scores() {
        assert_eq!(convert_score(&RawCell::Float(98.4)), Ok(98.4));
        assert!(convert_score(&RawCell::Empty).unwrap().is_nan());
        assert!(convert_score(&RawCell::text("n/a")).is_err());
    }

    #[test]
    fn integers_and_text() {
        assert_eq!(convert_integer(&RawCell::Float(4.0)), Ok(4));
        assert_eq!(convert_integer(&RawCell::Int(5)), Ok(5));
        assert!(convert_integer(&RawCell::Float(4.2)).is_err());
        assert_eq!(
            convert_integer(&RawCell::Float(1e20)),
            Err(ConvertError::IntegerFormat {
                content: 1e20_f64.to_string()
            })
        );
        assert!(convert_integer(&RawCell::Empty).is_err());
        assert_eq!(
            convert_text(&RawCell::text("Sciences Po ")),
            Ok(Some("Sciences Po ".to_string()))
        );
        assert_eq!(convert_text(&RawCell::Empty), Ok(None));
        assert_eq!(convert_text(&RawCell::Int(3)), Ok(Some("3".to_string())));
    }
}
