//! Property tests for the statistic and p-value.

use ff_test::{ff_statistic, FfTest, Sample};
use proptest::prelude::*;

/// Integer-valued points, so transforms below stay exact and ties are common.
fn sample(dim: usize) -> impl Strategy<Value = Sample> {
    prop::collection::vec(prop::collection::vec(-20i32..20, dim), 1..15).prop_map(|rows| {
        let rows: Vec<Vec<f64>> = rows
            .into_iter()
            .map(|r| r.into_iter().map(f64::from).collect())
            .collect();
        Sample::from_rows(&rows).unwrap()
    })
}

fn sample_pair() -> impl Strategy<Value = (Sample, Sample)> {
    (1usize..4).prop_flat_map(|dim| (sample(dim), sample(dim)))
}

/// Apply a strictly increasing map to coordinate 0 of every point.
fn warp_first_coordinate(s: &Sample) -> Sample {
    let rows: Vec<Vec<f64>> = s
        .points()
        .map(|p| {
            let mut row = p.to_vec();
            row[0] = row[0] * row[0] * row[0] + 2.0 * row[0] + 5.0;
            row
        })
        .collect();
    Sample::from_rows(&rows).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn statistic_is_symmetric((a, b) in sample_pair()) {
        let ab = ff_statistic(&a, &b).unwrap();
        let ba = ff_statistic(&b, &a).unwrap();
        prop_assert_eq!(ab.dn, ba.dn);
    }

    #[test]
    fn statistic_is_non_negative_and_bounded((a, b) in sample_pair()) {
        let stat = ff_statistic(&a, &b).unwrap();
        prop_assert!(stat.dn >= 0.0);
        prop_assert!(stat.d1 <= 1.0 && stat.d2 <= 1.0);
        let scale = ((a.len() * b.len()) as f64 / (a.len() + b.len()) as f64).sqrt();
        prop_assert!(stat.dn <= scale);
    }

    #[test]
    fn self_comparison_is_zero(a in (1usize..4).prop_flat_map(sample)) {
        prop_assert_eq!(ff_statistic(&a, &a).unwrap().dn, 0.0);
    }

    #[test]
    fn monotone_transform_leaves_statistic_unchanged((a, b) in sample_pair()) {
        let before = ff_statistic(&a, &b).unwrap();
        let after = ff_statistic(&warp_first_coordinate(&a), &warp_first_coordinate(&b)).unwrap();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn p_value_in_unit_interval((a, b) in sample_pair(), seed in any::<u64>()) {
        let result = FfTest::new().permutations(10).seed(seed).run(&a, &b).unwrap();
        let p = result.p_value.unwrap();
        prop_assert!((0.0..=1.0).contains(&p));
    }
}
