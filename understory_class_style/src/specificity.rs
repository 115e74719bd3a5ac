// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The specificity relation between style rules.
//!
//! Specificity is a partial order: a rule on a supertype is less specific
//! than a rule on one of its subtypes, and for the same target an unmarked
//! rule is less specific than a marked one, which in turn is less specific
//! than a rule whose marker refines it. Rules on unrelated types, or with
//! unrelated markers on the same type, are incomparable.
//!
//! Every predicate here answers "is `a` strictly less specific than `b`?"
//! and returns `false` for incomparable pairs.

use crate::oracle::TypeOracle;
use crate::style::Style;

/// Returns `true` if `a` targets a strict supertype of `b`'s target.
///
/// A rule on the universal base type is less specific than a rule on any
/// other type.
#[must_use]
pub fn compare_target<E: ?Sized, O: TypeOracle + ?Sized>(
    oracle: &O,
    a: &Style<E>,
    b: &Style<E>,
) -> bool {
    let (a, b) = (a.target(), b.target());
    if a == b {
        return false;
    }
    if oracle.is_root(a) && !oracle.is_root(b) {
        return true;
    }
    oracle.is_subtype(b, a)
}

/// Returns `true` if `a`'s marker is strictly wider than `b`'s.
///
/// Targets are not consulted. No marker is wider than any marker.
#[must_use]
pub fn compare_marker<E: ?Sized, O: TypeOracle + ?Sized>(
    oracle: &O,
    a: &Style<E>,
    b: &Style<E>,
) -> bool {
    match (a.marker(), b.marker()) {
        (None, Some(_)) => true,
        (Some(wider), Some(narrower)) => {
            wider != narrower && oracle.marker_conforms_to(narrower, wider)
        }
        _ => false,
    }
}

/// Returns `true` if `a` is strictly less specific than `b`.
///
/// Targets decide first; markers only break ties between rules on the same
/// target.
#[must_use]
pub fn is_less_specific<E: ?Sized, O: TypeOracle + ?Sized>(
    oracle: &O,
    a: &Style<E>,
    b: &Style<E>,
) -> bool {
    if a.target() == b.target() {
        compare_marker(oracle, a, b)
    } else {
        compare_target(oracle, a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeRegistry;
    use crate::tag::TypeTag;

    type Rule = Style<()>;

    fn rule(target: TypeTag) -> Rule {
        Style::new(target, |_| {})
    }

    #[test]
    fn supertype_rules_are_less_specific() {
        let mut registry = TypeRegistry::new();
        let a = registry.register_type("A", TypeTag::ROOT);
        let b = registry.register_type("B", a);
        let c = registry.register_type("C", b);

        assert!(is_less_specific(&registry, &rule(a), &rule(c)));
        assert!(is_less_specific(&registry, &rule(TypeTag::ROOT), &rule(a)));
        assert!(!is_less_specific(&registry, &rule(c), &rule(a)));
        assert!(!is_less_specific(&registry, &rule(b), &rule(b)));
    }

    #[test]
    fn root_is_least_specific_even_for_unknown_types() {
        let registry = TypeRegistry::new();
        let stranger = TypeTag::new(77);
        assert!(compare_target(&registry, &rule(TypeTag::ROOT), &rule(stranger)));
        assert!(!compare_target(&registry, &rule(stranger), &rule(TypeTag::ROOT)));
    }

    #[test]
    fn unrelated_targets_are_incomparable() {
        let mut registry = TypeRegistry::new();
        let left = registry.register_type("Left", TypeTag::ROOT);
        let right = registry.register_type("Right", TypeTag::ROOT);
        assert!(!is_less_specific(&registry, &rule(left), &rule(right)));
        assert!(!is_less_specific(&registry, &rule(right), &rule(left)));
    }

    #[test]
    fn markers_break_ties_on_the_same_target() {
        let mut registry = TypeRegistry::new();
        let a = registry.register_type("A", TypeTag::ROOT);
        let p1 = registry.register_marker("P1", &[]);
        let p2 = registry.register_marker("P2", &[p1]);
        let q = registry.register_marker("Q", &[]);

        let plain = rule(a);
        let wide: Rule = Style::with_marker(a, p1, |_| {});
        let narrow: Rule = Style::with_marker(a, p2, |_| {});
        let other: Rule = Style::with_marker(a, q, |_| {});

        assert!(is_less_specific(&registry, &plain, &wide));
        assert!(is_less_specific(&registry, &wide, &narrow));
        assert!(!is_less_specific(&registry, &narrow, &wide));
        assert!(!is_less_specific(&registry, &wide, &plain));
        assert!(!is_less_specific(&registry, &wide, &wide.clone()));

        // Unrelated markers: neither direction.
        assert!(!is_less_specific(&registry, &wide, &other));
        assert!(!is_less_specific(&registry, &other, &wide));
    }

    #[test]
    fn targets_outrank_markers() {
        let mut registry = TypeRegistry::new();
        let a = registry.register_type("A", TypeTag::ROOT);
        let b = registry.register_type("B", a);
        let p1 = registry.register_marker("P1", &[]);

        let marked_super: Rule = Style::with_marker(a, p1, |_| {});
        let plain_sub = rule(b);
        assert!(is_less_specific(&registry, &marked_super, &plain_sub));
        assert!(!is_less_specific(&registry, &plain_sub, &marked_super));
    }

    #[test]
    fn compare_marker_ignores_targets() {
        let mut registry = TypeRegistry::new();
        let p1 = registry.register_marker("P1", &[]);
        let p2 = registry.register_marker("P2", &[p1]);

        let wide: Rule = Style::with_marker(TypeTag::ROOT, p1, |_| {});
        let narrow: Rule = Style::with_marker(TypeTag::new(9), p2, |_| {});
        assert!(compare_marker(&registry, &wide, &narrow));
        assert!(!compare_marker(&registry, &narrow, &wide));
    }
}
