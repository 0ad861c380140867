// File: crates/songplot-core/src/aggregate.rs
// Summary: Group-by aggregation producing a mean / standard deviation trend per x value.
// Notes:
// - Standard deviation is the *sample* deviation (n - 1 denominator);
//   groups with fewer than two members report exactly 0.
// - Output is sorted ascending by x with one entry per distinct x.

use std::collections::BTreeMap;

use crate::types::Point;

/// Summary of the y values that share one x value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrendPoint<K> {
    pub x: K,
    pub mean: f64,
    pub stddev: f64,
    pub count: usize,
}

impl<K> TrendPoint<K> {
    pub fn upper(&self) -> f64 {
        self.mean + self.stddev
    }

    pub fn lower(&self) -> f64 {
        self.mean - self.stddev
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation; 0 for fewer than two values.
pub fn sample_stddev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Group `records` by `x`, summarise `y` per group, sorted by x.
pub fn aggregate<T, K, FX, FY>(records: &[T], x: FX, y: FY) -> Vec<TrendPoint<K>>
where
    K: Ord,
    FX: Fn(&T) -> K,
    FY: Fn(&T) -> f64,
{
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for r in records {
        groups.entry(x(r)).or_default().push(y(r));
    }
    groups
        .into_iter()
        .map(|(x, ys)| TrendPoint { x, mean: mean(&ys), stddev: sample_stddev(&ys), count: ys.len() })
        .collect()
}

/// Closed polygon around the trend: `mean + sd` left to right, then `mean - sd` right to left.
pub fn band_outline<K, FX, FY>(trend: &[TrendPoint<K>], px: FX, py: FY) -> Vec<Point>
where
    K: Copy,
    FX: Fn(K) -> f32,
    FY: Fn(f64) -> f32,
{
    let upper = trend.iter().map(|t| Point::new(px(t.x), py(t.upper())));
    let lower = trend.iter().rev().map(|t| Point::new(px(t.x), py(t.lower())));
    upper.chain(lower).collect()
}

/// Polyline through the group means.
pub fn mean_line<K, FX, FY>(trend: &[TrendPoint<K>], px: FX, py: FY) -> Vec<Point>
where
    K: Copy,
    FX: Fn(K) -> f32,
    FY: Fn(f64) -> f32,
{
    trend.iter().map(|t| Point::new(px(t.x), py(t.mean))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singleton_group_has_zero_deviation() {
        let out = aggregate(&[(1963, 7.0)], |r| r.0, |r| r.1);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].stddev, 0.0);
        assert!(!out[0].stddev.is_nan());
        assert_eq!(out[0].mean, 7.0);
    }

    #[test]
    fn sample_deviation_of_ten_twenty_thirty() {
        let rows = [(1, 10.0), (1, 20.0), (1, 30.0)];
        let out = aggregate(&rows, |r| r.0, |r| r.1);
        assert_eq!(out[0].mean, 20.0);
        assert!((out[0].stddev - 10.0).abs() < 1e-12);
        assert_eq!(out[0].count, 3);
    }

    #[test]
    fn sorted_and_deduplicated_by_x() {
        let rows = [(1966, 1.0), (1963, 2.0), (1966, 3.0), (1964, 4.0), (1963, 4.0)];
        let out = aggregate(&rows, |r| r.0, |r| r.1);
        let xs: Vec<i32> = out.iter().map(|t| t.x).collect();
        assert_eq!(xs, vec![1963, 1964, 1966]);
        assert_eq!(out[0].mean, 3.0);
    }

    #[test]
    fn empty_input_gives_empty_trend() {
        let rows: [(i32, f64); 0] = [];
        assert!(aggregate(&rows, |r| r.0, |r| r.1).is_empty());
        assert_eq!(sample_stddev(&[]), 0.0);
    }

    #[test]
    fn band_goes_out_on_top_and_back_on_bottom() {
        let trend = vec![
            TrendPoint { x: 0, mean: 5.0, stddev: 1.0, count: 2 },
            TrendPoint { x: 1, mean: 6.0, stddev: 2.0, count: 2 },
        ];
        let band = band_outline(&trend, |x| x as f32, |y| y as f32);
        assert_eq!(band, vec![
            Point::new(0.0, 6.0),
            Point::new(1.0, 8.0),
            Point::new(1.0, 4.0),
            Point::new(0.0, 4.0),
        ]);
        let line = mean_line(&trend, |x| x as f32, |y| y as f32);
        assert_eq!(line, vec![Point::new(0.0, 5.0), Point::new(1.0, 6.0)]);
    }
}
