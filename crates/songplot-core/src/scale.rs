// File: crates/songplot-core/src/scale.rs
// Summary: Calendar time (X) and linear value (Y) scales mapping data to pixels.

use chrono::{Datelike, NaiveDate};

/// Maps a domain value to a pixel coordinate along one axis.
pub trait Scale {
    type Domain: Copy;
    fn to_px(&self, v: Self::Domain) -> f32;
    /// Tick positions in domain units.
    fn ticks(&self) -> Vec<Self::Domain>;
}

/// Horizontal calendar scale over a fixed `[start, end]` date range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub left_px: f32,
    pub right_px: f32,
}

impl TimeScale {
    pub fn new(start: NaiveDate, end: NaiveDate, left_px: f32, right_px: f32) -> Self {
        // an empty or inverted range collapses to one day
        let end = if end <= start { start.succ_opt().unwrap_or(start) } else { end };
        Self { start, end, left_px, right_px }
    }

    fn span_days(&self) -> f64 {
        ((self.end - self.start).num_days() as f64).max(1.0)
    }
}

impl Scale for TimeScale {
    type Domain = NaiveDate;

    #[inline]
    fn to_px(&self, d: NaiveDate) -> f32 {
        let days = (d - self.start).num_days() as f64;
        self.left_px + (days / self.span_days()) as f32 * (self.right_px - self.left_px)
    }

    /// January 1st of every year (or every 2nd/5th/10th year for long ranges).
    fn ticks(&self) -> Vec<NaiveDate> {
        let first = self.start.year() + if self.start.ordinal() == 1 { 0 } else { 1 };
        let last = self.end.year();
        if last < first {
            return Vec::new();
        }
        let years = (last - first + 1) as usize;
        let step = [1usize, 2, 5, 10, 20, 50]
            .into_iter()
            .find(|s| years.div_ceil(*s) <= 8)
            .unwrap_or(100);
        (first..=last)
            .filter(|y| (*y as usize) % step == 0)
            .filter_map(|y| NaiveDate::from_ymd_opt(y, 1, 1))
            .collect()
    }
}

/// Vertical linear scale mapping `[vmin, vmax]` to `[bottom, top]` pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: f64,
    pub vmax: f64,
}

impl ValueScale {
    pub fn new_linear(top_px: f32, bottom_px: f32, vmin: f64, vmax: f64) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }

    /// Same pixel range, domain taken from the extent of `values`.
    /// Returns `None` when `values` is empty.
    pub fn fitted<I>(&self, values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for v in values {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if !lo.is_finite() || !hi.is_finite() {
            return None;
        }
        Some(Self::new_linear(self.top_px, self.bottom_px, lo, hi))
    }

    /// Ticks no closer together than `min_step`; integer-labelled axes pass 1.
    pub fn ticks_with_min_step(&self, min_step: f64) -> Vec<f64> {
        nice_ticks(self.vmin, self.vmax, 10, min_step)
    }

    pub fn same_domain(&self, other: &ValueScale) -> bool {
        (self.vmin - other.vmin).abs() < 1e-12 && (self.vmax - other.vmax).abs() < 1e-12
    }
}

impl Scale for ValueScale {
    type Domain = f64;

    #[inline]
    fn to_px(&self, y: f64) -> f32 {
        let span = (self.vmax - self.vmin).max(1e-12);
        self.bottom_px - ((y - self.vmin) / span) as f32 * (self.bottom_px - self.top_px)
    }

    /// Round-number ticks (1, 2 or 5 times a power of ten), about ten of them.
    fn ticks(&self) -> Vec<f64> {
        nice_ticks(self.vmin, self.vmax, 10, 0.0)
    }
}

pub fn nice_ticks(lo: f64, hi: f64, count: usize, min_step: f64) -> Vec<f64> {
    if !(hi > lo) || count == 0 {
        return vec![lo];
    }
    let raw = (hi - lo) / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let err = raw / power;
    let step = power * if err >= 7.07 { 10.0 } else if err >= 3.16 { 5.0 } else if err >= 1.41 { 2.0 } else { 1.0 };
    let step = step.max(min_step);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    // multiply instead of accumulating to keep 0.1 * 3 == 0.3 exact enough for labels
    (first..=last).map(|i| i as f64 * step).collect()
}
