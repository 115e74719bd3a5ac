// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The type and capability queries style resolution is built on.

use alloc::rc::Rc;
use alloc::sync::Arc;

use crate::tag::{MarkerId, TypeTag};

/// Answers subtype and capability-conformance queries for style resolution.
///
/// Implementations must be consistent: [`is_subtype`](Self::is_subtype) is a
/// strict, acyclic relation, and
/// [`marker_conforms_to`](Self::marker_conforms_to) is reflexive and
/// transitive. Ordering and matching are unspecified otherwise.
///
/// [`TypeRegistry`](crate::TypeRegistry) is the provided implementation.
pub trait TypeOracle {
    /// Returns `true` if `sub` is a strict subtype of `sup`.
    fn is_subtype(&self, sub: TypeTag, sup: TypeTag) -> bool;

    /// Returns `true` if instances of `ty` conform to `marker`.
    fn conforms(&self, ty: TypeTag, marker: MarkerId) -> bool;

    /// Returns `true` if conforming to `narrower` implies conforming to `wider`.
    ///
    /// Every marker conforms to itself.
    fn marker_conforms_to(&self, narrower: MarkerId, wider: MarkerId) -> bool;

    /// Returns `true` if `ty` is the universal base type.
    fn is_root(&self, ty: TypeTag) -> bool {
        ty.is_root()
    }

    /// Returns `true` if `ty` is `target` or one of its subtypes.
    fn is_a(&self, ty: TypeTag, target: TypeTag) -> bool {
        ty == target || self.is_root(target) || self.is_subtype(ty, target)
    }
}

impl<O: TypeOracle + ?Sized> TypeOracle for &O {
    fn is_subtype(&self, sub: TypeTag, sup: TypeTag) -> bool {
        (**self).is_subtype(sub, sup)
    }

    fn conforms(&self, ty: TypeTag, marker: MarkerId) -> bool {
        (**self).conforms(ty, marker)
    }

    fn marker_conforms_to(&self, narrower: MarkerId, wider: MarkerId) -> bool {
        (**self).marker_conforms_to(narrower, wider)
    }

    fn is_root(&self, ty: TypeTag) -> bool {
        (**self).is_root(ty)
    }
}

impl<O: TypeOracle + ?Sized> TypeOracle for Rc<O> {
    fn is_subtype(&self, sub: TypeTag, sup: TypeTag) -> bool {
        (**self).is_subtype(sub, sup)
    }

    fn conforms(&self, ty: TypeTag, marker: MarkerId) -> bool {
        (**self).conforms(ty, marker)
    }

    fn marker_conforms_to(&self, narrower: MarkerId, wider: MarkerId) -> bool {
        (**self).marker_conforms_to(narrower, wider)
    }

    fn is_root(&self, ty: TypeTag) -> bool {
        (**self).is_root(ty)
    }
}

impl<O: TypeOracle + ?Sized> TypeOracle for Arc<O> {
    fn is_subtype(&self, sub: TypeTag, sup: TypeTag) -> bool {
        (**self).is_subtype(sub, sup)
    }

    fn conforms(&self, ty: TypeTag, marker: MarkerId) -> bool {
        (**self).conforms(ty, marker)
    }

    fn marker_conforms_to(&self, narrower: MarkerId, wider: MarkerId) -> bool {
        (**self).marker_conforms_to(narrower, wider)
    }

    fn is_root(&self, ty: TypeTag) -> bool {
        (**self).is_root(ty)
    }
}
