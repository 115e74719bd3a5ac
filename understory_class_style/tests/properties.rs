// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for style sheet ordering and application.
//!
//! Hierarchies are generated as parent picks: type `i` chooses its parent
//! among the root and the types registered before it, so every generated
//! hierarchy is a valid tree.

use std::collections::HashSet;

use proptest::prelude::*;
use proptest::sample::Index;
use understory_class_style::{
    MarkerId, Style, StyleKey, StyleSheet, Styled, TypeOracle, TypeRegistry, TypeTag,
    is_less_specific,
};

const TYPE_NAMES: [&str; 8] = ["T0", "T1", "T2", "T3", "T4", "T5", "T6", "T7"];

struct World {
    registry: TypeRegistry,
    /// `types[0]` is the root.
    types: Vec<TypeTag>,
    /// `M1` refines `M0`; `M2` is unrelated.
    markers: [MarkerId; 3],
}

/// Picks a parent for each type among the root and earlier types.
fn parent_indices(parents: &[Index]) -> Vec<usize> {
    parents
        .iter()
        .enumerate()
        .map(|(i, parent)| parent.index(i + 1))
        .collect()
}

/// `parents[i]` is the position in `types` of type `i`'s parent (0 = root).
fn world(parents: &[usize], conformances: &[(Index, u8)]) -> World {
    let mut registry = TypeRegistry::new();
    let mut types = vec![TypeTag::ROOT];
    for (i, &parent) in parents.iter().enumerate() {
        let parent = types[parent];
        types.push(registry.register_type(TYPE_NAMES[i], parent));
    }
    let m0 = registry.register_marker("M0", &[]);
    let m1 = registry.register_marker("M1", &[m0]);
    let m2 = registry.register_marker("M2", &[]);
    let markers = [m0, m1, m2];
    for (ty, marker) in conformances {
        registry.declare_conformance(types[ty.index(types.len())], markers[usize::from(*marker)]);
    }
    World {
        registry,
        types,
        markers,
    }
}

struct Probe {
    ty: TypeTag,
    fired: Vec<usize>,
}

impl Styled for Probe {
    fn type_tag(&self) -> TypeTag {
        self.ty
    }
}

/// Builds rules from `(target, marker)` picks, dropping repeated identities.
///
/// Each rule records its input position when it fires.
fn rules(world: &World, picks: &[(Index, Option<u8>)]) -> Vec<Style<Probe>> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for (target, marker) in picks {
        let target = world.types[target.index(world.types.len())];
        let marker = marker.map(|m| world.markers[usize::from(m)]);
        if !seen.insert(StyleKey { target, marker }) {
            continue;
        }
        let position = out.len();
        let body = move |p: &mut Probe| p.fired.push(position);
        out.push(match marker {
            Some(marker) => Style::with_marker(target, marker, body),
            None => Style::new(target, body),
        });
    }
    out
}

fn hierarchy() -> impl Strategy<Value = Vec<Index>> {
    prop::collection::vec(any::<Index>(), 1..TYPE_NAMES.len())
}

fn conformances() -> impl Strategy<Value = Vec<(Index, u8)>> {
    prop::collection::vec((any::<Index>(), 0_u8..3), 0..6)
}

fn picks() -> impl Strategy<Value = Vec<(Index, Option<u8>)>> {
    prop::collection::vec((any::<Index>(), prop::option::of(0_u8..3)), 0..12)
}

proptest! {
    #[test]
    fn build_is_deterministic(parents in hierarchy(), conf in conformances(), picks in picks()) {
        let world = world(&parent_indices(&parents), &conf);
        let first = StyleSheet::build(&world.registry, rules(&world, &picks)).unwrap();
        let second = StyleSheet::build(&world.registry, rules(&world, &picks)).unwrap();
        let first: Vec<_> = first.keys().collect();
        let second: Vec<_> = second.keys().collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn no_rule_precedes_a_less_specific_one(
        parents in hierarchy(),
        conf in conformances(),
        picks in picks(),
    ) {
        let world = world(&parent_indices(&parents), &conf);
        let input = rules(&world, &picks);
        let count = input.len();
        let sheet = StyleSheet::build(&world.registry, input).unwrap();
        prop_assert_eq!(sheet.len(), count);

        let styles = sheet.styles();
        for (i, earlier) in styles.iter().enumerate() {
            for later in &styles[i + 1..] {
                prop_assert!(!is_less_specific(&world.registry, later, earlier));
            }
        }
    }

    #[test]
    fn supertype_rules_apply_first(
        parents in hierarchy(),
        conf in conformances(),
        picks in picks(),
    ) {
        let world = world(&parent_indices(&parents), &conf);
        let sheet = StyleSheet::build(&world.registry, rules(&world, &picks)).unwrap();
        let keys: Vec<_> = sheet.keys().collect();
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                prop_assert!(!world.registry.is_subtype(a.target, b.target));
            }
        }
    }

    #[test]
    fn flat_hierarchy_keeps_input_order(
        conf in conformances(),
        order in Just((0..TYPE_NAMES.len()).collect::<Vec<_>>()).prop_shuffle(),
    ) {
        // Every type hangs off the root, so distinct targets are unrelated.
        let flat = vec![0; TYPE_NAMES.len()];
        let world = world(&flat, &conf);
        let targets: Vec<TypeTag> = order.iter().map(|&i| world.types[i + 1]).collect();
        let styles = targets.iter().map(|&t| Style::new(t, |_: &mut Probe| {}));
        let sheet = StyleSheet::build(&world.registry, styles).unwrap();
        let sorted: Vec<_> = sheet.keys().map(|k| k.target).collect();
        prop_assert_eq!(sorted, targets);
    }

    #[test]
    fn apply_runs_exactly_the_matching_rules_in_sheet_order(
        parents in hierarchy(),
        conf in conformances(),
        picks in picks(),
        subject in any::<Index>(),
    ) {
        let world = world(&parent_indices(&parents), &conf);
        let input = rules(&world, &picks);
        let keys: Vec<_> = input.iter().map(Style::key).collect();
        let sheet = StyleSheet::build(&world.registry, input).unwrap();

        let ty = world.types[subject.index(world.types.len())];
        let mut probe = Probe { ty, fired: Vec::new() };
        sheet.apply(&mut probe);

        let expected: Vec<usize> = sheet
            .styles()
            .iter()
            .filter(|s| s.matches(&world.registry, ty, None))
            .map(|s| keys.iter().position(|k| *k == s.key()).unwrap())
            .collect();
        prop_assert_eq!(probe.fired, expected);
    }
}
