// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime type and capability identifiers.
//!
//! Both identifiers are lightweight `u32` handles. They are usually handed
//! out by a [`TypeRegistry`](crate::TypeRegistry), but any
//! [`TypeOracle`](crate::TypeOracle) may define its own vocabulary.

use core::fmt;

/// A runtime type identity used as a style target.
///
/// Type tags form a single-inheritance hierarchy rooted at [`TypeTag::ROOT`],
/// the universal base type every other type descends from.
///
/// # Example
///
/// ```rust
/// use understory_class_style::TypeTag;
///
/// let tag = TypeTag::new(7);
/// assert_eq!(tag.index(), 7);
/// assert!(TypeTag::ROOT.is_root());
/// assert!(!tag.is_root());
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeTag(u32);

impl TypeTag {
    /// The universal base type.
    pub const ROOT: Self = Self(0);

    /// Creates a type tag from a raw index.
    #[must_use]
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the underlying index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Returns `true` if this is [`TypeTag::ROOT`].
    #[must_use]
    #[inline]
    pub const fn is_root(self) -> bool {
        self.0 == Self::ROOT.0
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeTag").field(&self.0).finish()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.0)
    }
}

/// A capability ("marker") a runtime type may conform to.
///
/// Markers narrow which instances of a target type a style applies to. A
/// marker may refine other markers, in which case conforming to the narrower
/// marker implies conforming to the wider ones.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(u32);

impl MarkerId {
    /// Creates a marker from a raw index.
    #[must_use]
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the underlying index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MarkerId").field(&self.0).finish()
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MarkerId({})", self.0)
    }
}
