// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Class Style: specificity-ordered style rules over a runtime
//! type hierarchy.
//!
//! A [`Style`] mutates instances of a target type, optionally only those
//! whose type conforms to a capability marker. A [`StyleSheet`] orders its
//! rules so that more specific rules apply later and therefore win, without
//! any manual priority numbers. This is cascading-stylesheet specificity,
//! with type subtyping and marker refinement in place of selectors.
//!
//! ## Core Concepts
//!
//! ### Types and markers
//!
//! [`TypeTag`]s form a single-inheritance hierarchy rooted at
//! [`TypeTag::ROOT`]. [`MarkerId`]s are capabilities a type may conform to;
//! a marker may refine wider markers. Both relations are answered by a
//! [`TypeOracle`], usually a [`TypeRegistry`] populated at startup.
//!
//! ### Specificity
//!
//! For two rules `a` and `b`:
//!
//! 1. If the targets differ, the rule on the supertype is less specific. A
//!    rule on the root is less specific than any other. Rules on unrelated
//!    types are incomparable.
//! 2. If the targets are equal, an unmarked rule is less specific than a
//!    marked one, and a wider marker is less specific than a marker that
//!    refines it. Unrelated markers are incomparable.
//!
//! [`StyleSheet::build`] turns this partial order into a fixed application
//! order, keeping the input order of incomparable rules where possible, and
//! rejects rules sharing a target and marker with [`DuplicateStyleError`].
//!
//! ### Applying
//!
//! ```rust
//! use understory_class_style::{StyleSheetBuilder, Styled, TypeRegistry, TypeTag};
//!
//! struct Widget {
//!     ty: TypeTag,
//!     corner_radius: f64,
//!     tint: u32,
//! }
//!
//! impl Styled for Widget {
//!     fn type_tag(&self) -> TypeTag {
//!         self.ty
//!     }
//! }
//!
//! let mut registry = TypeRegistry::new();
//! let control = registry.register_type("Control", TypeTag::ROOT);
//! let button = registry.register_type("Button", control);
//! let destructive = registry.register_marker("Destructive", &[]);
//! let delete_button = registry.register_type("DeleteButton", button);
//! registry.declare_conformance(delete_button, destructive);
//!
//! let sheet = StyleSheetBuilder::new()
//!     .marked_rule(button, destructive, |w: &mut Widget| w.tint = 0xFF0000)
//!     .rule(button, |w: &mut Widget| w.corner_radius = 6.0)
//!     .rule(control, |w: &mut Widget| {
//!         w.corner_radius = 0.0;
//!         w.tint = 0x0078D4;
//!     })
//!     .build(&registry)
//!     .unwrap();
//!
//! let mut delete = Widget { ty: delete_button, corner_radius: -1.0, tint: 0 };
//! sheet.apply(&mut delete);
//! assert_eq!(delete.corner_radius, 6.0);
//! assert_eq!(delete.tint, 0xFF0000);
//!
//! // A marker override runs only the rules tagged with exactly that marker.
//! let mut plain = Widget { ty: button, corner_radius: -1.0, tint: 0 };
//! sheet.apply_with_marker(&mut plain, destructive);
//! assert_eq!(plain.corner_radius, -1.0);
//! assert_eq!(plain.tint, 0xFF0000);
//! ```
//!
//! ### Hosting
//!
//! [`StyleHost`] holds a root style and applies it at most once per object,
//! driven by the embedder's lifecycle events.
//!
//! ## Concurrency
//!
//! Rules and sheets are immutable after construction and hold their bodies
//! behind `Arc<dyn Fn + Send + Sync>`, so a sheet can be shared read-only
//! across threads when its oracle handle allows it. Styling the same
//! instance from two threads at once is the caller's responsibility.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.
//! Diagnostics go through the [`log`] facade.

#![no_std]

extern crate alloc;

mod host;
mod oracle;
mod order;
mod registry;
mod specificity;
mod style;
mod stylesheet;
mod tag;

pub use host::{HostError, StyleHost};
pub use oracle::TypeOracle;
pub use order::specificity_order;
pub use registry::{ROOT_TYPE_NAME, TypeRegistry};
pub use specificity::{compare_marker, compare_target, is_less_specific};
pub use style::{Style, StyleApplicator, StyleKey, Styled};
pub use stylesheet::{DuplicateStyleError, StyleSheet, StyleSheetBuilder};
pub use tag::{MarkerId, TypeTag};
