// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle boundary for automatic styling.
//!
//! Style resolution is stateless with respect to instances. Applying a root
//! style at most once per object is bookkeeping that belongs to whoever
//! drives the object's lifecycle. [`StyleHost`] is that bookkeeping: the
//! embedder calls [`StyleHost::on_ready`] from its own "became visible" or
//! "finished loading" hook, keyed by whatever identifies objects in that
//! embedder (node ids, slot keys, pointers).

use alloc::boxed::Box;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashSet;

use crate::style::StyleApplicator;
use crate::tag::MarkerId;

/// Errors reported by [`StyleHost`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HostError {
    /// A root style has already been installed.
    AlreadyInitialized,
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInitialized => f.write_str("a root style is already installed"),
        }
    }
}

impl core::error::Error for HostError {}

/// Holds the root style and applies it at most once per object.
///
/// `K` is the embedder's identity key for styled objects.
///
/// # Example
///
/// ```rust
/// use understory_class_style::{StyleHost, StyleSheetBuilder, Styled, TypeRegistry, TypeTag};
///
/// struct View {
///     id: u32,
///     ty: TypeTag,
///     applied: u32,
/// }
///
/// impl Styled for View {
///     fn type_tag(&self) -> TypeTag {
///         self.ty
///     }
/// }
///
/// let mut registry = TypeRegistry::new();
/// let view = registry.register_type("View", TypeTag::ROOT);
/// let sheet = StyleSheetBuilder::new()
///     .rule(view, |v: &mut View| v.applied += 1)
///     .build(&registry)
///     .unwrap();
///
/// let mut host = StyleHost::new();
/// host.set_style(sheet).unwrap();
///
/// let mut v = View { id: 7, ty: view, applied: 0 };
/// assert!(host.on_ready(v.id, &mut v));
/// // Later lifecycle events for the same object do nothing.
/// assert!(!host.on_ready(v.id, &mut v));
/// assert_eq!(v.applied, 1);
/// ```
pub struct StyleHost<'a, E: ?Sized, K> {
    style: Option<Box<dyn StyleApplicator<E> + 'a>>,
    applied: HashSet<K>,
}

impl<E: ?Sized, K> Default for StyleHost<'_, E, K> {
    fn default() -> Self {
        Self {
            style: None,
            applied: HashSet::new(),
        }
    }
}

impl<E: ?Sized, K> fmt::Debug for StyleHost<'_, E, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleHost")
            .field("has_style", &self.style.is_some())
            .field("applied", &self.applied.len())
            .finish()
    }
}

impl<'a, E: ?Sized, K: Eq + Hash> StyleHost<'a, E, K> {
    /// Creates a host with no root style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the root style.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::AlreadyInitialized`] if a root style is already
    /// installed; the existing one is kept.
    pub fn set_style(&mut self, style: impl StyleApplicator<E> + 'a) -> Result<(), HostError> {
        if self.style.is_some() {
            return Err(HostError::AlreadyInitialized);
        }
        self.style = Some(Box::new(style));
        Ok(())
    }

    /// Returns the installed root style, if any.
    #[must_use]
    pub fn style(&self) -> Option<&(dyn StyleApplicator<E> + 'a)> {
        self.style.as_deref()
    }

    /// Lifecycle hook: applies the root style to `instance` once per `key`.
    ///
    /// Returns `true` if styling ran. Calls for a key that was already
    /// styled return `false`. Without a root style nothing runs and the key
    /// is not recorded, so a style installed later still applies.
    pub fn on_ready(&mut self, key: K, instance: &mut E) -> bool {
        let Some(style) = &self.style else {
            return false;
        };
        if !self.applied.insert(key) {
            log::trace!("skipping already styled object");
            return false;
        }
        style.apply(instance);
        true
    }

    /// Explicitly styles `instance` with only the rules tagged `marker`.
    ///
    /// This ignores the applied-once bookkeeping. Returns `false` if no root
    /// style is installed.
    pub fn styled(&self, instance: &mut E, marker: MarkerId) -> bool {
        let Some(style) = &self.style else {
            return false;
        };
        style.apply_with_marker(instance, marker);
        true
    }

    /// Returns `true` if the object identified by `key` has been styled.
    #[must_use]
    pub fn is_applied(&self, key: &K) -> bool {
        self.applied.contains(key)
    }

    /// Forgets that `key` was styled, e.g. when the object is destroyed and
    /// its key may be reused.
    ///
    /// Returns `true` if the key was recorded.
    pub fn forget(&mut self, key: &K) -> bool {
        self.applied.remove(key)
    }

    /// Returns the number of objects styled so far.
    #[must_use]
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }
}
