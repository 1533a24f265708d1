//! Hypervolume indicator and exclusive hypervolume contributions.

use std::cmp::Ordering;

/// Computes the hypervolume dominated by `points` and bounded by `reference`.
///
/// All objectives are minimized. Points that do not strictly dominate the
/// reference point in every objective are ignored. Uses recursive slicing
/// along the last objective, so it works for any number of objectives.
pub fn hypervolume(points: &[&[f64]], reference: &[f64]) -> f64 {
  let inside: Vec<&[f64]> = points
    .iter()
    .copied()
    .filter(|p| p.iter().zip(reference).all(|(x, r)| x < r))
    .collect();
  if inside.is_empty() || reference.is_empty() {
    return 0.0;
  }
  slice(&inside, reference)
}

/// Hypervolume of points that all lie inside the reference box.
fn slice(points: &[&[f64]], reference: &[f64]) -> f64 {
  let d = reference.len();
  if d == 1 {
    let best = points.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
    return (reference[0] - best).max(0.0);
  }
  if d == 2 {
    return sweep(points, reference);
  }
  if let [point] = points {
    return point
      .iter()
      .zip(reference)
      .map(|(x, r)| (r - x).max(0.0))
      .product();
  }

  let mut sorted = points.to_vec();
  sorted.sort_by(|a, b| a[d - 1].total_cmp(&b[d - 1]));

  let mut volume = 0.0;
  for i in 0..sorted.len() {
    let upper = sorted.get(i + 1).map_or(reference[d - 1], |p| p[d - 1]);
    let height = upper - sorted[i][d - 1];
    if !(height > 0.0) {
      continue;
    }
    let projected: Vec<&[f64]> =
      sorted[..=i].iter().map(|p| &p[..d - 1]).collect();
    volume += height * slice(&non_dominated(&projected), &reference[..d - 1]);
  }
  volume
}

/// Two-objective hypervolume in one pass over the points sorted by the first
/// objective. Dominated points and duplicates add nothing.
fn sweep(points: &[&[f64]], reference: &[f64]) -> f64 {
  let mut sorted = points.to_vec();
  sorted.sort_by(|a, b| a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1])));
  let mut floor = reference[1];
  let mut area = 0.0;
  for p in sorted {
    if p[1] < floor {
      area += (reference[0] - p[0]) * (floor - p[1]);
      floor = p[1];
    }
  }
  area
}

/// Keeps the points no other point weakly dominates. Duplicates keep one
/// copy only.
///
/// After a lexicographic sort a point can only be dominated by an earlier
/// one, so each point is checked against the points kept so far.
fn non_dominated<'a>(points: &[&'a [f64]]) -> Vec<&'a [f64]> {
  let mut sorted = points.to_vec();
  sorted.sort_by(|a, b| lexicographic(a, b));
  let mut kept: Vec<&[f64]> = Vec::new();
  for p in sorted {
    if !kept.iter().any(|q| weakly_dominates(q, p)) {
      kept.push(p);
    }
  }
  kept
}

fn lexicographic(a: &[f64], b: &[f64]) -> Ordering {
  a.iter()
    .zip(b)
    .map(|(x, y)| x.total_cmp(y))
    .find(|o| o.is_ne())
    .unwrap_or(Ordering::Equal)
}

fn weakly_dominates(a: &[f64], b: &[f64]) -> bool {
  a.iter().zip(b).all(|(x, y)| x <= y)
}

/// Computes the exclusive contribution of each point, i.e. the hypervolume
/// lost when that point alone is removed. Points outside the reference box,
/// weakly dominated points and duplicates contribute `0`.
pub fn contributions(points: &[&[f64]], reference: &[f64]) -> Vec<f64> {
  let d = reference.len();
  match d {
    0 => return vec![0.0; points.len()],
    2 => return sweep_contributions(points, reference),
    _ => {}
  }
  let mut limited = Vec::with_capacity(points.len().saturating_sub(1) * d);
  (0..points.len())
    .map(|i| {
      let p = points[i];
      if !p.iter().zip(reference).all(|(x, r)| x < r) {
        return 0.0;
      }
      // the exclusive box of `p` is its box minus the boxes of all other
      // points clipped to it
      limited.clear();
      for (j, q) in points.iter().enumerate() {
        if j != i {
          limited.extend(q.iter().zip(p).map(|(x, y)| x.max(*y)));
        }
      }
      let clipped: Vec<&[f64]> = limited.chunks(d).collect();
      let own: f64 = p.iter().zip(reference).map(|(x, r)| r - x).product();
      (own - hypervolume(&non_dominated(&clipped), reference)).max(0.0)
    })
    .collect()
}

/// Two-objective contributions in one pass over the points sorted by the
/// first objective.
///
/// Non-dominated points form a staircase; each of them exclusively covers
/// the rectangle up to its right neighbor's first objective and its left
/// neighbor's second one, less whatever the points it alone dominates cover
/// inside that rectangle.
fn sweep_contributions(points: &[&[f64]], reference: &[f64]) -> Vec<f64> {
  let mut order: Vec<usize> = (0..points.len())
    .filter(|&i| points[i].iter().zip(reference).all(|(x, r)| x < r))
    .collect();
  order.sort_by(|&a, &b| lexicographic(points[a], points[b]));

  let mut staircase: Vec<usize> = Vec::new();
  let mut dominated: Vec<usize> = Vec::new();
  for i in order {
    match staircase.last() {
      Some(&last) if points[i][1] >= points[last][1] => dominated.push(i),
      _ => staircase.push(i),
    }
  }

  // points dominated by a single staircase point, grouped by that point
  let mut covered: Vec<Vec<&[f64]>> = vec![Vec::new(); staircase.len()];
  for &i in &dominated {
    let p = points[i];
    let owner = staircase.partition_point(|&s| points[s][0] <= p[0]) - 1;
    let ceiling = owner
      .checked_sub(1)
      .map_or(reference[1], |prev| points[staircase[prev]][1]);
    if p[1] < ceiling {
      covered[owner].push(p);
    }
  }

  let mut result = vec![0.0; points.len()];
  for (k, &i) in staircase.iter().enumerate() {
    let p = points[i];
    let corner = [
      staircase.get(k + 1).map_or(reference[0], |&s| points[s][0]),
      k.checked_sub(1)
        .map_or(reference[1], |prev| points[staircase[prev]][1]),
    ];
    let own = (corner[0] - p[0]) * (corner[1] - p[1]);
    let lost = if covered[k].is_empty() {
      0.0
    } else {
      sweep(&covered[k], &corner)
    };
    result[i] = (own - lost).max(0.0);
  }
  result
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, Rng, SeedableRng};

  use super::*;

  #[test]
  fn test_hypervolume_single_point() {
    let points: [&[f64]; 1] = [&[1.0, 1.0]];
    assert_eq!(hypervolume(&points, &[3.0, 4.0]), 6.0);
  }

  #[test]
  fn test_hypervolume_2d() {
    let points: [&[f64]; 3] = [&[1.0, 3.0], &[2.0, 2.0], &[3.0, 1.0]];
    // staircase under (4, 4): 3 + 2 + 1
    assert_eq!(hypervolume(&points, &[4.0, 4.0]), 6.0);
  }

  #[test]
  fn test_hypervolume_3d() {
    let points: [&[f64]; 2] = [&[0.0, 0.0, 1.0], &[1.0, 1.0, 0.0]];
    // z in [0, 1): only the second point, area 1; z in [1, 2): both, area 4
    assert_eq!(hypervolume(&points, &[2.0, 2.0, 2.0]), 5.0);
  }

  #[test]
  fn test_points_outside_reference_are_ignored() {
    let points: [&[f64]; 2] = [&[1.0, 1.0], &[5.0, 0.0]];
    assert_eq!(hypervolume(&points, &[2.0, 2.0]), 1.0);
    assert_eq!(hypervolume(&[], &[2.0, 2.0]), 0.0);
  }

  #[test]
  fn test_dominated_points_add_nothing() {
    let points: [&[f64]; 2] = [&[1.0, 1.0], &[1.5, 1.5]];
    assert_eq!(hypervolume(&points, &[2.0, 2.0]), 1.0);
  }

  #[test]
  fn test_contributions() {
    let points: [&[f64]; 3] = [&[1.0, 3.0], &[2.0, 2.0], &[3.0, 1.0]];
    assert_eq!(contributions(&points, &[4.0, 4.0]), vec![1.0, 1.0, 1.0]);

    let points: [&[f64]; 3] = [&[1.0, 3.0], &[1.5, 2.5], &[3.0, 1.0]];
    assert_eq!(contributions(&points, &[4.0, 4.0]), vec![0.5, 0.75, 1.5]);
  }

  #[test]
  fn test_duplicate_points_contribute_nothing() {
    let points: [&[f64]; 2] = [&[1.0, 1.0], &[1.0, 1.0]];
    assert_eq!(contributions(&points, &[2.0, 2.0]), vec![0.0, 0.0]);
  }

  /// Contributions as the difference of two full hypervolumes.
  fn removal_losses(points: &[&[f64]], reference: &[f64]) -> Vec<f64> {
    let total = hypervolume(points, reference);
    (0..points.len())
      .map(|i| {
        let mut rest = points.to_vec();
        rest.remove(i);
        total - hypervolume(&rest, reference)
      })
      .collect()
  }

  #[test]
  fn test_contributions_3d() {
    let points: [&[f64]; 2] = [&[0.0, 0.0, 1.0], &[1.0, 1.0, 0.0]];
    assert_eq!(contributions(&points, &[2.0, 2.0, 2.0]), vec![3.0, 1.0]);

    let points: [&[f64]; 2] = [&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0]];
    assert_eq!(contributions(&points, &[2.0, 2.0, 2.0]), vec![0.0, 0.0]);
  }

  #[test]
  fn test_dominated_point_shrinks_dominator_contribution() {
    let points: [&[f64]; 2] = [&[1.0, 1.0], &[1.5, 1.5]];
    assert_eq!(contributions(&points, &[2.0, 2.0]), vec![0.75, 0.0]);
  }

  #[test]
  fn test_contributions_match_removal_losses() {
    let mut rng = StdRng::seed_from_u64(7);
    for d in [2, 3, 4] {
      for n in [1, 2, 5, 20] {
        // a coarse grid makes duplicates and dominated points likely
        let coordinates: Vec<Vec<f64>> = (0..n)
          .map(|_| {
            (0..d).map(|_| f64::from(rng.gen_range(0..8_i32)) / 4.0).collect()
          })
          .collect();
        let points: Vec<&[f64]> =
          coordinates.iter().map(Vec::as_slice).collect();
        let reference = vec![1.9; d];
        let expected = removal_losses(&points, &reference);
        let actual = contributions(&points, &reference);
        for (a, e) in actual.iter().zip(&expected) {
          assert!((a - e).abs() < 1e-9, "{d}-d, {n} points: {a} != {e}");
        }
      }
    }
  }
}
