//! Chart downsampling
//!
//! Largest-Triangle-Three-Buckets: keeps the first and last points and, from
//! each bucket in between, the point forming the largest triangle with the
//! previously kept point and the next bucket's average. Peaks survive, which
//! matters for progression charts.

use crate::models::TimeSeriesPoint;

/// Reduce `points` to at most `threshold` points, preserving order.
/// Returns the input unchanged when it already fits or `threshold < 3`.
pub fn downsample(points: &[TimeSeriesPoint], threshold: usize) -> Vec<TimeSeriesPoint> {
  let len = points.len();
  if threshold >= len || threshold < 3 {
    return points.to_vec();
  }

  let mut sampled = Vec::with_capacity(threshold);
  sampled.push(points[0]);

  // Interior points split into threshold - 2 buckets
  let bucket_size = (len - 2) as f64 / (threshold - 2) as f64;
  let mut anchor = 0usize;

  for bucket in 0..threshold - 2 {
    let start = (bucket as f64 * bucket_size) as usize + 1;
    let end = (((bucket + 1) as f64 * bucket_size) as usize + 1).min(len - 1);

    // Average of the next bucket (or the last point for the final bucket)
    let next_start = end;
    let next_end = (((bucket + 2) as f64 * bucket_size) as usize + 1).min(len);
    let next = &points[next_start..next_end.max(next_start + 1)];
    let avg_x = next.iter().map(|p| p.date as f64).sum::<f64>() / next.len() as f64;
    let avg_y = next.iter().map(|p| p.value).sum::<f64>() / next.len() as f64;

    let a = points[anchor];
    let mut best = start;
    let mut best_area = -1.0;
    for (i, p) in points.iter().enumerate().take(end).skip(start) {
      let area = ((a.date as f64 - avg_x) * (p.value - a.value)
        - (a.date as f64 - p.date as f64) * (avg_y - a.value))
        .abs();
      if area > best_area {
        best_area = area;
        best = i;
      }
    }

    sampled.push(points[best]);
    anchor = best;
  }

  sampled.push(points[len - 1]);
  sampled
}
