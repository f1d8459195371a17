// crates/preingest-rs-metadata/src/converter/dates.rs

//! Resolution of the ToPX date shapes into MDTO date strings.
//!
//! ToPX wraps dates in `datumOfPeriode` or `datumOfJaar`, each a choice of
//! `<datum>`, `<datumEnTijd>` or `<jaar>`. A year resolves to January 1st.
//! Anything that cannot be read resolves to the 0001-01-01 sentinel.

use crate::model::topx::DatumOfPeriode;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::warn;
use std::cmp::Ordering;

/// A resolved point in time, keeping track of whether a time part was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalValue {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl TemporalValue {
    /// The value used when a date shape cannot be read.
    pub fn sentinel() -> Self {
        TemporalValue::Date(NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN))
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::sentinel()
    }

    /// Formats as `xs:date` or `xs:dateTime`.
    pub fn to_mdto_string(&self) -> String {
        match self {
            TemporalValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            TemporalValue::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }

    fn has_time(&self) -> bool {
        matches!(self, TemporalValue::DateTime(_))
    }

    fn as_datetime(&self) -> NaiveDateTime {
        match self {
            TemporalValue::Date(d) => d.and_hms_opt(0, 0, 0).unwrap_or(NaiveDateTime::MIN),
            TemporalValue::DateTime(dt) => *dt,
        }
    }
}

impl PartialOrd for TemporalValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Chronological; at the same instant a bare date sorts before a date-time,
/// so `Ordering::Equal` agrees with `==`.
impl Ord for TemporalValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_datetime()
            .cmp(&other.as_datetime())
            .then_with(|| self.has_time().cmp(&other.has_time()))
    }
}

/// Resolves a `datumOfPeriode` / `datumOfJaar` container.
///
/// The first populated child wins in the order `datum`, `datumEnTijd`, `jaar`.
pub fn resolve_datum_of_periode(container: &DatumOfPeriode) -> TemporalValue {
    let resolved = if let Some(datum) = non_blank(container.datum.as_deref()) {
        parse_date(datum)
    } else if let Some(datum_en_tijd) = non_blank(container.datum_en_tijd.as_deref()) {
        parse_date_time(datum_en_tijd)
    } else if let Some(jaar) = non_blank(container.jaar.as_deref()) {
        parse_year(jaar)
    } else {
        None
    };

    resolved.unwrap_or_else(|| {
        warn!("Unreadable ToPX date shape {:?}; using sentinel 0001-01-01", container);
        TemporalValue::sentinel()
    })
}

/// Resolves a bare date string (e.g. `eventPlan/datum`), trying every shape.
pub fn resolve_date_str(value: &str) -> TemporalValue {
    let value = value.trim();
    parse_date(value)
        .or_else(|| parse_date_time(value))
        .or_else(|| parse_year(value))
        .unwrap_or_else(|| {
            warn!("Unreadable date '{}'; using sentinel 0001-01-01", value);
            TemporalValue::sentinel()
        })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(value: &str) -> Option<TemporalValue> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        // xs:date may carry a zone suffix, e.g. "2001-04-01+02:00".
        .or_else(|| {
            let (head, zone) = (value.get(..10)?, value.get(10..)?);
            if !zone.starts_with(['+', '-', 'Z']) {
                return None;
            }
            NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
        })
        .map(TemporalValue::Date)
}

fn parse_date_time(value: &str) -> Option<TemporalValue> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.naive_local()))
        .map(TemporalValue::DateTime)
}

fn parse_year(value: &str) -> Option<TemporalValue> {
    value
        .parse::<i32>()
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        .map(TemporalValue::Date)
}
