//! The four classical set operations.

use std::cmp::Ordering;

use super::{MergeRules, SetOperation, apply_with, count_with};

macro_rules! set_operation {
    ($(#[$meta:meta])* $name:ident => $rules:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name;

        impl $name {
            const RULES: MergeRules = $rules;
        }

        impl SetOperation for $name {
            #[inline]
            fn count<T, F>(&self, left: &[T], right: &[T], compare: &F) -> usize
            where
                F: Fn(&T, &T) -> Ordering,
            {
                count_with(Self::RULES, left, right, compare)
            }

            #[inline]
            fn apply<T, F>(&self, left: &[T], right: &[T], output: &mut [T], compare: &F) -> usize
            where
                T: Clone,
                F: Fn(&T, &T) -> Ordering,
            {
                apply_with(Self::RULES, left, right, output, compare)
            }
        }
    };
}

set_operation! {
    /// Elements present in both inputs, once per matching pair.
    Intersection => MergeRules { left_only: false, right_only: false, matched: true }
}

set_operation! {
    /// Elements present in either input. Matching pairs are written once,
    /// using the left element.
    Union => MergeRules { left_only: true, right_only: true, matched: true }
}

set_operation! {
    /// Elements of the left input without a matching element in the right.
    Difference => MergeRules { left_only: true, right_only: false, matched: false }
}

set_operation! {
    /// Elements of either input without a matching element in the other.
    SymmetricDifference => MergeRules { left_only: true, right_only: true, matched: false }
}
