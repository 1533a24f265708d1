//! Objective-space distances and density estimates.

use std::cmp::Ordering;

use crate::score::Scores;

/// A square matrix of pairwise Euclidean distances. The diagonal holds
/// `f64::INFINITY` so a point is never its own nearest neighbor.
pub type DistanceMatrix = Vec<Vec<f64>>;

/// Relative tolerance under which two distances are considered equal when
/// comparing sorted distance rows.
const TIE_TOLERANCE: f64 = 1e-12;

/// Euclidean distance between two objective vectors. NaN is reported as
/// `f64::INFINITY`, which keeps malformed points from ever being nearest.
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
  let d = a
    .iter()
    .zip(b)
    .map(|(x, y)| (x - y).powi(2))
    .sum::<f64>()
    .sqrt();
  if d.is_nan() || d < 0.0 {
    f64::INFINITY
  } else {
    d
  }
}

/// Computes the symmetric matrix of pairwise distances between `points`.
pub fn compute_distances<const N: usize>(
  points: &[&Scores<N>],
) -> DistanceMatrix {
  let n = points.len();
  let mut distances = vec![vec![f64::INFINITY; n]; n];
  for i in 0..n {
    for j in (i + 1)..n {
      let d = euclidean(points[i], points[j]);
      distances[i][j] = d;
      distances[j][i] = d;
    }
  }
  distances
}

/// Returns the distance from each point to its `k`-th nearest neighbor
/// (`k` starts at 1). Points with fewer than `k` neighbors get
/// `f64::INFINITY`.
pub fn kth_nearest(distances: &DistanceMatrix, k: usize) -> Vec<f64> {
  distances
    .iter()
    .map(|row| {
      let mut row = row.clone();
      row.sort_by(f64::total_cmp);
      k.checked_sub(1)
        .and_then(|i| row.get(i).copied())
        .unwrap_or(f64::INFINITY)
    })
    .collect()
}

/// Computes crowding distances of a front. Boundary points of each objective
/// get `f64::INFINITY`; an objective with zero range contributes nothing.
pub fn crowding_distance<const N: usize>(front: &[&Scores<N>]) -> Vec<f64> {
  let n = front.len();
  if n <= 2 {
    return vec![f64::INFINITY; n];
  }
  let mut distances = vec![0.0; n];
  let mut sorted: Vec<usize> = (0..n).collect();
  for o in 0..N {
    sorted.sort_by(|&a, &b| front[a][o].total_cmp(&front[b][o]));
    let (first, last) = (sorted[0], sorted[n - 1]);
    distances[first] = f64::INFINITY;
    distances[last] = f64::INFINITY;
    let range = front[last][o] - front[first][o];
    if !(range > 0.0) {
      continue;
    }
    for w in sorted.windows(3) {
      let (prev, idx, next) = (w[0], w[1], w[2]);
      distances[idx] += (front[next][o] - front[prev][o]) / range;
    }
  }
  distances
}

/// Compares two ascending rows of distances lexicographically, treating
/// values within a relative tolerance as equal.
fn compare_rows(a: &[f64], b: &[f64]) -> Ordering {
  for (x, y) in a.iter().zip(b) {
    if x == y {
      continue;
    }
    let scale = x.abs().max(y.abs()).max(1.0);
    if (x - y).abs() <= TIE_TOLERANCE * scale {
      continue;
    }
    return x.total_cmp(y);
  }
  a.len().cmp(&b.len())
}

/// Marks `k` points for deletion, one at a time.
///
/// At each step the surviving point whose ascending row of distances to the
/// other survivors is lexicographically smallest is deleted, i.e. the point
/// closest to its nearest neighbor, with ties broken by the second nearest
/// neighbor and so on. A complete tie deletes the lowest index. Returns a
/// mask where `true` means deleted.
pub fn truncation<const N: usize>(points: &[&Scores<N>], k: usize) -> Vec<bool> {
  let n = points.len();
  let distances = compute_distances(points);
  let mut deleted = vec![false; n];

  for _ in 0..k.min(n) {
    let rows: Vec<(usize, Vec<f64>)> = (0..n)
      .filter(|&i| !deleted[i])
      .map(|i| {
        let mut row: Vec<f64> = (0..n)
          .filter(|&j| !deleted[j])
          .map(|j| distances[i][j])
          .collect();
        row.sort_by(f64::total_cmp);
        (i, row)
      })
      .collect();

    let Some((victim, _)) = rows
      .iter()
      .min_by(|(_, a), (_, b)| compare_rows(a, b))
    else {
      break;
    };
    log::trace!("truncation removes point {victim} ({:?})", points[*victim]);
    deleted[*victim] = true;
  }

  deleted
}
