//! Property-based tests for the interval algebra and digit-sequence order.
//!
//! These tests verify that:
//! - Intersection is commutative, associative and distributes over union
//! - Normalized sets stay sorted and disjoint
//! - Singletons never merge, over integers and over digit sequences
//! - Digit sequences order like their strings and never numerically

use number_migrator::domain::range_set::Discrete;
use number_migrator::{DigitSequence, Interval, RangeSet};
use proptest::prelude::*;

/// Strategy for small sets so overlaps and adjacency are common.
fn arb_range_set() -> impl Strategy<Value = RangeSet<u32>> {
    prop::collection::vec((0u32..200, 0u32..20), 0..8).prop_map(|pairs| {
        pairs
            .into_iter()
            .filter_map(|(lo, width)| Interval::closed(lo, lo + width))
            .collect()
    })
}

fn arb_digits() -> impl Strategy<Value = DigitSequence> {
    prop::string::string_regex(r"[0-9]{1,19}")
        .unwrap()
        .prop_map(|s| s.parse().unwrap())
}

fn members(set: &RangeSet<u32>) -> Vec<u32> {
    (0u32..240).filter(|v| set.contains(v)).collect()
}

fn is_normalized<T: Ord + Clone>(set: &RangeSet<T>) -> bool {
    set.intervals().windows(2).all(|w| w[0].upper() < w[1].lower())
}

fn is_coalesced(set: &RangeSet<u32>) -> bool {
    set.intervals().windows(2).all(|w| {
        let gap_start = w[0].upper().successor();
        gap_start.is_some_and(|next| next < *w[1].lower())
    })
}

proptest! {
    #[test]
    fn intersection_is_commutative(a in arb_range_set(), b in arb_range_set()) {
        prop_assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn intersection_is_associative(
        a in arb_range_set(),
        b in arb_range_set(),
        c in arb_range_set(),
    ) {
        prop_assert_eq!(
            a.intersection(&b).intersection(&c),
            a.intersection(&b.intersection(&c))
        );
    }

    #[test]
    fn intersection_distributes_over_union(
        a in arb_range_set(),
        b in arb_range_set(),
        c in arb_range_set(),
    ) {
        prop_assert_eq!(
            a.intersection(&b.union(&c)),
            a.intersection(&b).union(&a.intersection(&c))
        );
    }

    #[test]
    fn intersection_matches_membership(a in arb_range_set(), b in arb_range_set()) {
        let both = a.intersection(&b);
        prop_assert!(is_normalized(&both));
        let expected: Vec<u32> = members(&a).into_iter().filter(|v| b.contains(v)).collect();
        prop_assert_eq!(members(&both), expected);
    }

    #[test]
    fn sets_are_normalized(a in arb_range_set(), b in arb_range_set()) {
        prop_assert!(is_normalized(&a));
        prop_assert!(is_normalized(&a.union(&b)));
    }

    #[test]
    fn singleton_meets_range_in_point_or_nothing(a in arb_range_set(), v in 0u32..240) {
        let point = RangeSet::from_intervals([Interval::singleton(v)]);
        let met = a.intersection(&point);
        if a.contains(&v) {
            prop_assert_eq!(met, point);
        } else {
            prop_assert!(met.is_empty());
        }
    }

    #[test]
    fn coalescing_keeps_members(a in arb_range_set()) {
        let coalesced = a.clone().coalesce_adjacent();
        prop_assert!(is_coalesced(&coalesced));
        prop_assert_eq!(members(&coalesced), members(&a));
    }

    #[test]
    fn digit_singletons_stay_one_per_value(
        values in prop::collection::btree_set(arb_digits(), 0..12),
        lo in arb_digits(),
        hi in arb_digits(),
    ) {
        let points: RangeSet<DigitSequence> =
            values.iter().cloned().map(Interval::singleton).collect();
        prop_assert_eq!(points.len(), values.len());
        prop_assert!(is_normalized(&points));

        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let range = RangeSet::from_intervals(Interval::closed(lo.clone(), hi.clone()));
        let met = range.intersection(&points);
        prop_assert!(met.intervals().iter().all(Interval::is_singleton));
        let expected: Vec<&DigitSequence> =
            values.iter().filter(|v| lo <= **v && **v <= hi).collect();
        prop_assert_eq!(met.lower_endpoints().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn digit_neighbours_stay_apart(a in arb_digits()) {
        if let Some(next) = a.successor() {
            let points: RangeSet<DigitSequence> =
                [Interval::singleton(a.clone()), Interval::singleton(next)]
                    .into_iter()
                    .collect();
            prop_assert_eq!(points.len(), 2);
            prop_assert_eq!(points.coalesce_adjacent().len(), 1);
        }
    }

    #[test]
    fn digit_order_is_string_order(a in arb_digits(), b in arb_digits()) {
        prop_assert_eq!(a.cmp(&b), a.as_str().cmp(b.as_str()));
        prop_assert_eq!(a == b, a.as_str() == b.as_str());
    }

    #[test]
    fn digit_successor_is_next_in_order(a in arb_digits(), b in arb_digits()) {
        if let Some(next) = a.successor() {
            prop_assert!(a < next);
            // Nothing sorts strictly between a sequence and its successor.
            prop_assert!(!(a < b && b < next));
        }
    }
}
