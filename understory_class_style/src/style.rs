// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style rules.
//!
//! This module provides [`Style`], a single rule that mutates instances of a
//! target type, optionally gated by a capability marker.

use alloc::sync::Arc;
use core::fmt;

use crate::oracle::TypeOracle;
use crate::tag::{MarkerId, TypeTag};

/// An instance that can be styled.
///
/// The instance reports its runtime type so rules can decide whether it is
/// usable as their target.
pub trait Styled {
    /// Returns the runtime type of this instance.
    fn type_tag(&self) -> TypeTag;
}

/// Something that applies styling to instances of `E`.
///
/// [`StyleSheet`](crate::StyleSheet) is the usual implementation; hosts hold
/// applicators as `Box<dyn StyleApplicator<E>>`.
pub trait StyleApplicator<E: ?Sized> {
    /// Applies every matching rule to `instance`.
    fn apply(&self, instance: &mut E);

    /// Applies only the rules whose own marker is exactly `marker`,
    /// regardless of the capabilities `instance` actually has.
    fn apply_with_marker(&self, instance: &mut E, marker: MarkerId);
}

/// The identity of a style rule: its target and optional marker.
///
/// Two rules with equal keys are duplicates regardless of their bodies.
/// "No marker" and "marker M" are distinct keys for the same target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StyleKey {
    /// The target type.
    pub target: TypeTag,
    /// The marker, if any.
    pub marker: Option<MarkerId>,
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.marker {
            Some(marker) => write!(f, "{} with {}", self.target, marker),
            None => write!(f, "{} without marker", self.target),
        }
    }
}

/// A single style rule: a target type, an optional marker, and a body.
///
/// Rules are immutable once constructed. Cloning is cheap (`Arc`).
///
/// # Example
///
/// ```rust
/// use understory_class_style::{Style, Styled, TypeRegistry, TypeTag};
///
/// struct Label {
///     ty: TypeTag,
///     text_size: f32,
/// }
///
/// impl Styled for Label {
///     fn type_tag(&self) -> TypeTag {
///         self.ty
///     }
/// }
///
/// let mut registry = TypeRegistry::new();
/// let label = registry.register_type("Label", TypeTag::ROOT);
///
/// let style = Style::new(label, |l: &mut Label| l.text_size = 14.0);
///
/// let mut instance = Label { ty: label, text_size: 0.0 };
/// assert!(style.try_apply(&registry, &mut instance, None));
/// assert_eq!(instance.text_size, 14.0);
/// ```
pub struct Style<E: ?Sized> {
    target: TypeTag,
    marker: Option<MarkerId>,
    body: Arc<dyn Fn(&mut E) + Send + Sync>,
}

impl<E: ?Sized> Clone for Style<E> {
    fn clone(&self) -> Self {
        Self {
            target: self.target,
            marker: self.marker,
            body: Arc::clone(&self.body),
        }
    }
}

impl<E: ?Sized> fmt::Debug for Style<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Style")
            .field("target", &self.target)
            .field("marker", &self.marker)
            .finish_non_exhaustive()
    }
}

impl<E: ?Sized> Style<E> {
    /// Creates a rule for `target` with no marker.
    #[must_use]
    pub fn new(target: TypeTag, body: impl Fn(&mut E) + Send + Sync + 'static) -> Self {
        Self {
            target,
            marker: None,
            body: Arc::new(body),
        }
    }

    /// Creates a rule for `target` that only applies to instances conforming
    /// to `marker`.
    #[must_use]
    pub fn with_marker(
        target: TypeTag,
        marker: MarkerId,
        body: impl Fn(&mut E) + Send + Sync + 'static,
    ) -> Self {
        Self {
            target,
            marker: Some(marker),
            body: Arc::new(body),
        }
    }

    /// Returns the target type.
    #[must_use]
    #[inline]
    pub fn target(&self) -> TypeTag {
        self.target
    }

    /// Returns the marker, if any.
    #[must_use]
    #[inline]
    pub fn marker(&self) -> Option<MarkerId> {
        self.marker
    }

    /// Returns the identity used for duplicate detection.
    #[must_use]
    #[inline]
    pub fn key(&self) -> StyleKey {
        StyleKey {
            target: self.target,
            marker: self.marker,
        }
    }

    /// Returns `true` if this rule would fire for an instance of type `ty`.
    ///
    /// - The instance must be usable as the target (same type or a subtype).
    /// - With `marker_override`, only a rule whose own marker is exactly the
    ///   override fires; the instance's real capabilities are ignored.
    /// - Otherwise a marked rule fires only if `ty` conforms to the marker,
    ///   and an unmarked rule always fires.
    #[must_use]
    pub fn matches<O: TypeOracle + ?Sized>(
        &self,
        oracle: &O,
        ty: TypeTag,
        marker_override: Option<MarkerId>,
    ) -> bool {
        if !oracle.is_a(ty, self.target) {
            return false;
        }
        match (marker_override, self.marker) {
            (Some(forced), own) => own == Some(forced),
            (None, Some(own)) => oracle.conforms(ty, own),
            (None, None) => true,
        }
    }

    /// Runs the body on `instance` if this rule matches it.
    ///
    /// Mismatches are silent. Returns whether the body ran.
    pub fn try_apply<O: TypeOracle + ?Sized>(
        &self,
        oracle: &O,
        instance: &mut E,
        marker_override: Option<MarkerId>,
    ) -> bool
    where
        E: Styled,
    {
        if !self.matches(oracle, instance.type_tag(), marker_override) {
            return false;
        }
        (self.body)(instance);
        true
    }
}
