//! Pairwise stylometric distance and farthest-sibling selection.
//!
//! Distance between two paragraphs is the mean absolute difference of their
//! z-scores over the vocabulary (Burrows' Delta). Every paragraph is paired
//! with the sibling at maximal distance; ties go to the lowest ordinal.

use crate::models::{OutlierEntry, Paragraph};
use crate::stats::ZScoreVector;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Ordinal -> farthest sibling
pub type OutlierMap = BTreeMap<usize, OutlierEntry>;

/// Mean absolute z-score difference. Zero for an empty vocabulary.
#[must_use]
pub fn delta(a: &ZScoreVector, b: &ZScoreVector) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let total: f64 = a
        .values()
        .iter()
        .zip(b.values())
        .map(|(x, y)| (x - y).abs())
        .sum();
    total / n as f64
}

/// Farthest sibling of paragraph `i`, scanning `j` left to right.
fn farthest(i: usize, z_scores: &[ZScoreVector]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (j, other) in z_scores.iter().enumerate() {
        if j == i {
            continue;
        }
        let d = delta(&z_scores[i], other);
        match best {
            Some((_, best_d)) if d <= best_d => {}
            _ => best = Some((j, d)),
        }
    }
    best
}

/// For every paragraph, its most dissimilar sibling and the distance to it.
///
/// `paragraphs` and `z_scores` are aligned by analyzed ordinal. Rows are
/// independent, so `parallel` only changes scheduling, never the result.
/// Fewer than two paragraphs yield an empty map.
pub fn detect_outliers(
    paragraphs: &[Paragraph],
    z_scores: &[ZScoreVector],
    parallel: bool,
) -> OutlierMap {
    let n = paragraphs.len().min(z_scores.len());
    let z_scores = &z_scores[..n];

    let row = |i: usize| {
        farthest(i, z_scores).map(|(j, d)| {
            (
                i,
                OutlierEntry {
                    farthest_index: j,
                    farthest_key: paragraphs[j].key.clone(),
                    delta: d,
                },
            )
        })
    };

    if parallel {
        (0..n).into_par_iter().filter_map(row).collect()
    } else {
        (0..n).filter_map(row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraphs(n: usize) -> Vec<Paragraph> {
        (0..n)
            .map(|i| Paragraph {
                key: format!("k{i}"),
                index: i,
                text: String::new(),
            })
            .collect()
    }

    fn z(values: &[f64]) -> ZScoreVector {
        ZScoreVector::from(values.to_vec())
    }

    #[test]
    fn test_delta_is_mean_absolute_difference() {
        let a = z(&[1.0, -1.0, 0.0]);
        let b = z(&[0.0, 1.0, 0.0]);
        assert!((delta(&a, &b) - 1.0).abs() < 1e-12);
        assert_eq!(delta(&a, &a), 0.0);
        assert!((delta(&a, &b) - delta(&b, &a)).abs() < 1e-12);
    }

    #[test]
    fn test_delta_empty_vocabulary() {
        assert_eq!(delta(&z(&[]), &z(&[])), 0.0);
    }

    #[test]
    fn test_picks_farthest() {
        let scores = vec![z(&[0.0, 0.0]), z(&[0.1, 0.1]), z(&[2.0, -2.0])];
        let outliers = detect_outliers(&paragraphs(3), &scores, false);
        assert_eq!(outliers[&0].farthest_index, 2);
        assert_eq!(outliers[&1].farthest_index, 2);
        assert_eq!(outliers[&2].farthest_index, 0);
        assert_eq!(outliers[&2].farthest_key, "k0");
    }

    #[test]
    fn test_ties_go_to_lowest_ordinal() {
        let scores = vec![z(&[0.0]), z(&[1.0]), z(&[-1.0]), z(&[1.0])];
        let outliers = detect_outliers(&paragraphs(4), &scores, false);
        // 0 is equally far from 1, 2 and 3
        assert_eq!(outliers[&0].farthest_index, 1);
        // 1 and 3 are identical; both are farthest from 2
        assert_eq!(outliers[&1].farthest_index, 2);
        assert_eq!(outliers[&3].farthest_index, 2);
    }

    #[test]
    fn test_all_identical_never_maps_to_self() {
        let scores = vec![z(&[0.0, 0.0]); 3];
        let outliers = detect_outliers(&paragraphs(3), &scores, true);
        assert_eq!(outliers.len(), 3);
        assert_eq!(outliers[&0].farthest_index, 1);
        assert_eq!(outliers[&1].farthest_index, 0);
        assert_eq!(outliers[&2].farthest_index, 0);
        for (i, entry) in &outliers {
            assert_ne!(*i, entry.farthest_index);
            assert_eq!(entry.delta, 0.0);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let scores: Vec<ZScoreVector> = (0..25)
            .map(|i| {
                let x = i as f64;
                z(&[(x * 0.37).sin(), (x * 1.3).cos(), (x % 4.0) - 1.5])
            })
            .collect();
        let paras = paragraphs(25);
        assert_eq!(
            detect_outliers(&paras, &scores, true),
            detect_outliers(&paras, &scores, false)
        );
    }

    #[test]
    fn test_single_paragraph_has_no_sibling() {
        let outliers = detect_outliers(&paragraphs(1), &[z(&[1.0])], false);
        assert!(outliers.is_empty());
    }
}
