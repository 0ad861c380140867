// File: crates/songplot-core/src/axis.rs
// Summary: Axis model: domain kind and tick label formats.

use chrono::{Datelike, NaiveDate};

/// How tick values are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TickFormat {
    /// Shortest decimal form, at most two fractional digits.
    #[default]
    Plain,
    Integer,
    /// `0.25` -> `25%`.
    Percent,
    /// Seconds as `m:ss`.
    MinutesSeconds,
}

impl TickFormat {
    pub fn format(&self, v: f64) -> String {
        match self {
            TickFormat::Plain => {
                let s = format!("{:.2}", v);
                let s = s.trim_end_matches('0').trim_end_matches('.');
                if s == "-0" { "0".to_string() } else { s.to_string() }
            }
            TickFormat::Integer => format!("{}", v.round() as i64),
            TickFormat::Percent => format!("{}%", (v * 100.0).round() as i64),
            TickFormat::MinutesSeconds => {
                let total = v.round().max(0.0) as i64;
                format!("{}:{:02}", total / 60, total % 60)
            }
        }
    }
}

/// Year label for calendar ticks.
pub fn format_year(d: NaiveDate) -> String {
    d.year().to_string()
}

/// Whether a Y domain is declared up front or follows the data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Domain {
    Fixed { min: f64, max: f64 },
    /// Recomputed from the min/max of the current subset on every refresh.
    Fitted,
}

impl Domain {
    /// Domain to build scaffolding with; fitted axes start at `[0, 1]` until data arrives.
    pub fn initial(&self) -> (f64, f64) {
        match *self {
            Domain::Fixed { min, max } => (min, max),
            Domain::Fitted => (0.0, 1.0),
        }
    }

    pub fn is_known_up_front(&self) -> bool {
        matches!(self, Domain::Fixed { .. })
    }
}
