// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Specificity-ordered collections of style rules.
//!
//! A [`StyleSheet`] owns its rules in application order: less specific rules
//! first. Applying a sheet runs every matching rule in that order, so when
//! two rules assign the same field the more specific one is observed last
//! and wins. There is no "stop after first match".

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashSet;

use crate::oracle::TypeOracle;
use crate::order::specificity_order;
use crate::style::{Style, StyleApplicator, StyleKey, Styled};
use crate::tag::{MarkerId, TypeTag};

/// Error returned when two rules in a sheet share a [`StyleKey`].
///
/// No sheet is produced; the rule set has to be fixed by the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DuplicateStyleError {
    /// The target shared by the duplicate rules.
    pub target: TypeTag,
    /// The marker shared by the duplicate rules, if any.
    pub marker: Option<MarkerId>,
}

impl DuplicateStyleError {
    /// Returns the offending identity.
    #[must_use]
    pub fn key(&self) -> StyleKey {
        StyleKey {
            target: self.target,
            marker: self.marker,
        }
    }
}

impl fmt::Display for DuplicateStyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duplicate style for {}", self.key())
    }
}

impl core::error::Error for DuplicateStyleError {}

struct StyleSheetData<E: ?Sized> {
    /// Sorted least specific first.
    styles: Vec<Style<E>>,
}

/// An immutable, specificity-ordered, duplicate-free collection of rules.
///
/// The sheet carries the [`TypeOracle`] it was sorted with and uses it again
/// when matching, so the same oracle answers both questions. Cloning is
/// cheap (`Arc`) when the oracle handle is.
///
/// # Example
///
/// ```rust
/// use understory_class_style::{Style, StyleSheet, Styled, TypeRegistry, TypeTag};
///
/// struct Node {
///     ty: TypeTag,
///     tag: &'static str,
/// }
///
/// impl Styled for Node {
///     fn type_tag(&self) -> TypeTag {
///         self.ty
///     }
/// }
///
/// let mut registry = TypeRegistry::new();
/// let base = registry.register_type("Base", TypeTag::ROOT);
/// let derived = registry.register_type("Derived", base);
///
/// // Listed most specific first; the sheet reorders them.
/// let sheet = StyleSheet::build(
///     &registry,
///     [
///         Style::new(derived, |n: &mut Node| n.tag = "Derived"),
///         Style::new(base, |n: &mut Node| n.tag = "Base"),
///     ],
/// )
/// .unwrap();
///
/// let mut node = Node { ty: derived, tag: "" };
/// sheet.apply(&mut node);
/// assert_eq!(node.tag, "Derived");
///
/// let mut node = Node { ty: base, tag: "" };
/// sheet.apply(&mut node);
/// assert_eq!(node.tag, "Base");
/// ```
pub struct StyleSheet<E: ?Sized, O> {
    inner: Arc<StyleSheetData<E>>,
    oracle: O,
}

impl<E: ?Sized, O: Clone> Clone for StyleSheet<E, O> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            oracle: self.oracle.clone(),
        }
    }
}

impl<E: ?Sized, O: fmt::Debug> fmt::Debug for StyleSheet<E, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleSheet")
            .field("styles", &self.inner.styles)
            .field("oracle", &self.oracle)
            .finish()
    }
}

impl<E: ?Sized, O: TypeOracle> StyleSheet<E, O> {
    /// Sorts `styles` by specificity and rejects duplicate identities.
    ///
    /// Rules that are incomparable keep their input order whenever the
    /// specificity constraints allow it. If several identities repeat, the
    /// first repeat in sorted order is reported.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateStyleError`] if two rules share a target and a
    /// marker (or both have no marker).
    pub fn build(
        oracle: O,
        styles: impl IntoIterator<Item = Style<E>>,
    ) -> Result<Self, DuplicateStyleError> {
        let styles: Vec<Style<E>> = styles.into_iter().collect();
        let order = specificity_order(&oracle, &styles);

        let mut slots: Vec<Option<Style<E>>> = styles.into_iter().map(Some).collect();
        let sorted: Vec<Style<E>> = order.iter().filter_map(|&i| slots[i].take()).collect();

        let mut seen = HashSet::with_capacity(sorted.len());
        for style in &sorted {
            let key = style.key();
            if !seen.insert(key) {
                log::debug!("rejecting style sheet: duplicate style for {key}");
                return Err(DuplicateStyleError {
                    target: key.target,
                    marker: key.marker,
                });
            }
        }

        log::debug!("built style sheet with {} style(s)", sorted.len());
        Ok(Self {
            inner: Arc::new(StyleSheetData { styles: sorted }),
            oracle,
        })
    }
}

impl<E: ?Sized, O> StyleSheet<E, O> {
    /// Returns the number of rules in this sheet.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.styles.len()
    }

    /// Returns `true` if this sheet has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.styles.is_empty()
    }

    /// Returns the rules in application order.
    #[must_use]
    pub fn styles(&self) -> &[Style<E>] {
        &self.inner.styles
    }

    /// Returns the identities of the rules in application order.
    pub fn keys(&self) -> impl Iterator<Item = StyleKey> + '_ {
        self.inner.styles.iter().map(Style::key)
    }

    /// Returns the oracle this sheet was built with.
    #[must_use]
    pub fn oracle(&self) -> &O {
        &self.oracle
    }
}

impl<E: Styled + ?Sized, O: TypeOracle> StyleSheet<E, O> {
    /// Runs every matching rule on `instance`, least specific first.
    ///
    /// An instance matching no rule is left untouched.
    pub fn apply(&self, instance: &mut E) {
        self.apply_filtered(instance, None);
    }

    /// Runs only the rules whose own marker is exactly `marker`.
    ///
    /// The instance's real capabilities are ignored, but it must still be
    /// usable as each rule's target.
    pub fn apply_with_marker(&self, instance: &mut E, marker: MarkerId) {
        self.apply_filtered(instance, Some(marker));
    }

    fn apply_filtered(&self, instance: &mut E, marker_override: Option<MarkerId>) {
        for style in &self.inner.styles {
            if style.try_apply(&self.oracle, instance, marker_override) {
                log::trace!("applied style for {}", style.key());
            }
        }
    }
}

impl<E: Styled + ?Sized, O: TypeOracle> StyleApplicator<E> for StyleSheet<E, O> {
    fn apply(&self, instance: &mut E) {
        self.apply_filtered(instance, None);
    }

    fn apply_with_marker(&self, instance: &mut E, marker: MarkerId) {
        self.apply_filtered(instance, Some(marker));
    }
}

/// Builder for constructing [`StyleSheet`] instances.
pub struct StyleSheetBuilder<E: ?Sized> {
    styles: Vec<Style<E>>,
}

impl<E: ?Sized> Default for StyleSheetBuilder<E> {
    fn default() -> Self {
        Self { styles: Vec::new() }
    }
}

impl<E: ?Sized> fmt::Debug for StyleSheetBuilder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleSheetBuilder")
            .field("styles", &self.styles)
            .finish()
    }
}

impl<E: ?Sized> StyleSheetBuilder<E> {
    /// Creates a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule.
    #[must_use]
    pub fn style(mut self, style: Style<E>) -> Self {
        self.styles.push(style);
        self
    }

    /// Adds a rule for `target` with no marker.
    #[must_use]
    pub fn rule(self, target: TypeTag, body: impl Fn(&mut E) + Send + Sync + 'static) -> Self {
        self.style(Style::new(target, body))
    }

    /// Adds a rule for `target` gated by `marker`.
    #[must_use]
    pub fn marked_rule(
        self,
        target: TypeTag,
        marker: MarkerId,
        body: impl Fn(&mut E) + Send + Sync + 'static,
    ) -> Self {
        self.style(Style::with_marker(target, marker, body))
    }

    /// Sorts and validates the collected rules.
    ///
    /// # Errors
    ///
    /// See [`StyleSheet::build`].
    pub fn build<O: TypeOracle>(
        self,
        oracle: O,
    ) -> Result<StyleSheet<E, O>, DuplicateStyleError> {
        StyleSheet::build(oracle, self.styles)
    }
}
