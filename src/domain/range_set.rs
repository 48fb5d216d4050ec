//! Closed-interval sets over discrete, totally ordered values.
//!
//! A [`RangeSet`] is always normalized: its intervals are sorted and
//! disjoint, and intervals sharing a value are merged into one. Intervals
//! that only touch (one ends right before the next starts) stay separate, so
//! a set built from singletons keeps one interval per value.
//! [`RangeSet::coalesce_adjacent`] merges those as well when a caller wants
//! the smallest representation.

use std::fmt;

/// Values with an immediate successor in their total order.
pub trait Discrete: Ord + Clone {
    /// The smallest value strictly greater than `self`, if any.
    fn successor(&self) -> Option<Self>;
}

macro_rules! impl_discrete_for_unsigned {
    ($($t:ty),*) => {
        $(
            impl Discrete for $t {
                fn successor(&self) -> Option<Self> {
                    self.checked_add(1)
                }
            }
        )*
    };
}

impl_discrete_for_unsigned!(u8, u16, u32, u64, usize);

/// The closed interval `[lower, upper]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval<T> {
    lower: T,
    upper: T,
}

impl<T: Ord + Clone> Interval<T> {
    /// Returns `None` when `lower > upper`.
    pub fn closed(lower: T, upper: T) -> Option<Self> {
        if lower > upper {
            None
        } else {
            Some(Self { lower, upper })
        }
    }

    pub fn singleton(value: T) -> Self {
        Self {
            lower: value.clone(),
            upper: value,
        }
    }

    pub fn lower(&self) -> &T {
        &self.lower
    }

    pub fn upper(&self) -> &T {
        &self.upper
    }

    pub fn is_singleton(&self) -> bool {
        self.lower == self.upper
    }

    pub fn contains(&self, value: &T) -> bool {
        &self.lower <= value && value <= &self.upper
    }

    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let lower = self.lower.clone().max(other.lower.clone());
        let upper = self.upper.clone().min(other.upper.clone());
        Self::closed(lower, upper)
    }
}

impl<T: fmt::Display + PartialEq> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lower == self.upper {
            write!(f, "{}", self.lower)
        } else {
            write!(f, "{}-{}", self.lower, self.upper)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RangeSet<T> {
    intervals: Vec<Interval<T>>,
}

impl<T> Default for RangeSet<T> {
    fn default() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }
}

impl<T: Ord + Clone> RangeSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_intervals<I>(intervals: I) -> Self
    where
        I: IntoIterator<Item = Interval<T>>,
    {
        let mut intervals: Vec<Interval<T>> = intervals.into_iter().collect();
        intervals.sort_by(|a, b| a.lower.cmp(&b.lower));
        Self {
            intervals: Self::merge_sorted(intervals, |last, next| next.lower <= last.upper),
        }
    }

    /// Folds each interval into its predecessor while `joins` says they belong together.
    fn merge_sorted<F>(sorted: Vec<Interval<T>>, joins: F) -> Vec<Interval<T>>
    where
        F: Fn(&Interval<T>, &Interval<T>) -> bool,
    {
        let mut merged: Vec<Interval<T>> = Vec::with_capacity(sorted.len());
        for next in sorted {
            if let Some(last) = merged.last_mut() {
                if joins(&*last, &next) {
                    if next.upper > last.upper {
                        last.upper = next.upper;
                    }
                    continue;
                }
            }
            merged.push(next);
        }
        merged
    }

    pub fn intervals(&self) -> &[Interval<T>] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Number of disjoint intervals, not of values.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn contains(&self, value: &T) -> bool {
        // Intervals are sorted by lower bound and disjoint.
        let idx = self.intervals.partition_point(|i| &i.lower <= value);
        idx > 0 && self.intervals[idx - 1].contains(value)
    }

    pub fn union(&self, other: &Self) -> Self {
        Self::from_intervals(
            self.intervals
                .iter()
                .chain(other.intervals.iter())
                .cloned(),
        )
    }

    pub fn intersection(&self, other: &Self) -> Self {
        let (mut i, mut j) = (0, 0);
        let mut out = Vec::new();
        while i < self.intervals.len() && j < other.intervals.len() {
            let a = &self.intervals[i];
            let b = &other.intervals[j];
            if let Some(overlap) = a.intersection(b) {
                out.push(overlap);
            }
            if a.upper < b.upper {
                i += 1;
            } else {
                j += 1;
            }
        }
        // Each piece lies inside one interval of each input, so pieces stay
        // sorted and disjoint.
        Self { intervals: out }
    }

    /// Lower endpoint of every interval, in ascending order.
    pub fn lower_endpoints(&self) -> impl Iterator<Item = &T> + '_ {
        self.intervals.iter().map(Interval::lower)
    }
}

impl<T: Discrete> RangeSet<T> {
    /// The same values with touching intervals merged, e.g. `1-3;4-6` becomes `1-6`.
    pub fn coalesce_adjacent(self) -> Self {
        Self {
            intervals: Self::merge_sorted(self.intervals, |last, next| {
                last.upper.successor().is_some_and(|s| s == next.lower)
            }),
        }
    }
}

impl<T: Ord + Clone> FromIterator<Interval<T>> for RangeSet<T> {
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        Self::from_intervals(iter)
    }
}

impl<T> IntoIterator for RangeSet<T> {
    type Item = Interval<T>;
    type IntoIter = std::vec::IntoIter<Interval<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.into_iter()
    }
}

impl<T: fmt::Display + PartialEq> fmt::Display for RangeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, interval) in self.intervals.iter().enumerate() {
            if idx > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}", interval)?;
        }
        Ok(())
    }
}
