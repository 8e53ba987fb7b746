//! Combination enumeration.
//!
//! Generates every non-empty subset of an operation set as a list of index
//! combinations into the set. Combinations are index sets, not operation
//! copies: the operation catalog stays shared and immutable while each
//! combination is a handful of `usize`s.
//!
//! # Ordering contract
//!
//! Output is grouped by increasing subset size (all singletons, then all
//! pairs, ...) and within a size group follows lexicographic order of the
//! indices. Downstream artifact numbering depends on this order, so it must
//! stay stable for a fixed set size.

/// An ordered subset of operation indices.
///
/// Indices are strictly increasing, preserving the operation set's relative
/// order — subsets are never internally reordered.
pub type Combination = Vec<usize>;

/// Number of non-empty subsets of a set of size `n`, i.e. `2^n - 1`.
pub fn total_combinations(n: usize) -> usize {
    debug_assert!(n < usize::BITS as usize, "subset count overflows usize");
    (1usize << n) - 1
}

/// All k-element index combinations of `0..n` in lexicographic order.
pub fn combinations_of_size(n: usize, k: usize) -> Vec<Combination> {
    if k > n {
        return Vec::new();
    }
    if k == 0 {
        return vec![Vec::new()];
    }

    let mut result = Vec::new();
    let mut indices: Vec<usize> = (0..k).collect();

    loop {
        result.push(indices.clone());

        // Rightmost index that can still advance
        let mut i = k;
        while i > 0 && indices[i - 1] == n - k + (i - 1) {
            i -= 1;
        }
        if i == 0 {
            break;
        }

        indices[i - 1] += 1;
        for j in i..k {
            indices[j] = indices[j - 1] + 1;
        }
    }

    result
}

/// Every non-empty index combination of `0..n`, grouped by increasing size.
///
/// The output length is exactly `2^n - 1`. The first `n` entries are the
/// singletons in index order.
pub fn enumerate_combinations(n: usize) -> Vec<Combination> {
    let mut all = Vec::with_capacity(total_combinations(n));
    for k in 1..=n {
        all.extend(combinations_of_size(n, k));
    }
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_total_combinations() {
        assert_eq!(total_combinations(0), 0);
        assert_eq!(total_combinations(1), 1);
        assert_eq!(total_combinations(3), 7);
        assert_eq!(total_combinations(13), 8191);
    }

    #[test]
    fn test_enumerate_empty_set() {
        assert!(enumerate_combinations(0).is_empty());
    }

    #[test]
    fn test_enumerate_n3_exact_order() {
        let combos = enumerate_combinations(3);
        let expected: Vec<Combination> = vec![
            vec![0],
            vec![1],
            vec![2],
            vec![0, 1],
            vec![0, 2],
            vec![1, 2],
            vec![0, 1, 2],
        ];
        assert_eq!(combos, expected);
    }

    #[test]
    fn test_enumerate_n13_count() {
        let combos = enumerate_combinations(13);
        assert_eq!(combos.len(), 8191);
    }

    #[test]
    fn test_singletons_come_first_in_set_order() {
        let combos = enumerate_combinations(13);
        for (i, combo) in combos.iter().take(13).enumerate() {
            assert_eq!(combo, &vec![i]);
        }
    }

    #[test]
    fn test_all_combinations_distinct_and_non_empty() {
        let combos = enumerate_combinations(10);
        let mut seen = HashSet::new();
        for combo in &combos {
            assert!(!combo.is_empty());
            assert!(seen.insert(combo.clone()), "duplicate: {:?}", combo);
        }
        assert_eq!(seen.len(), total_combinations(10));
    }

    #[test]
    fn test_sizes_non_decreasing() {
        let combos = enumerate_combinations(8);
        for pair in combos.windows(2) {
            assert!(pair[0].len() <= pair[1].len());
        }
    }

    #[test]
    fn test_indices_strictly_increasing_within_combination() {
        let combos = enumerate_combinations(7);
        for combo in &combos {
            for pair in combo.windows(2) {
                assert!(pair[0] < pair[1], "not increasing: {:?}", combo);
            }
        }
    }

    #[test]
    fn test_combinations_of_size_edge_cases() {
        assert_eq!(combinations_of_size(3, 0), vec![Vec::<usize>::new()]);
        assert!(combinations_of_size(2, 5).is_empty());
        assert_eq!(combinations_of_size(4, 4), vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn test_enumeration_is_reproducible() {
        assert_eq!(enumerate_combinations(9), enumerate_combinations(9));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
