// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explicit type hierarchy and capability registry.
//!
//! This module provides [`TypeRegistry`], a [`TypeOracle`] populated at
//! startup instead of relying on a dynamic runtime-type system.

use alloc::vec::Vec;
use core::iter;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::oracle::TypeOracle;
use crate::tag::{MarkerId, TypeTag};

/// Name given to [`TypeTag::ROOT`] by [`TypeRegistry::new`].
pub const ROOT_TYPE_NAME: &str = "Object";

#[derive(Debug)]
struct TypeEntry {
    name: &'static str,
    /// `None` only for the root.
    parent: Option<TypeTag>,
    /// Markers declared directly on this type (not inherited ones).
    markers: SmallVec<[MarkerId; 4]>,
}

#[derive(Debug)]
struct MarkerEntry {
    name: &'static str,
    /// Wider markers directly implied by this one.
    refines: SmallVec<[MarkerId; 2]>,
}

/// A registry of runtime types and capability markers.
///
/// Each registered type records its direct supertype; every chain ends at
/// [`TypeTag::ROOT`]. Each type may declare markers it conforms to, and
/// subtypes inherit those declarations. Markers may refine other markers.
///
/// Parents and refined markers must be registered first, so both relations
/// are acyclic by construction.
///
/// # Example
///
/// ```rust
/// use understory_class_style::{TypeOracle, TypeRegistry, TypeTag};
///
/// let mut registry = TypeRegistry::new();
/// let view = registry.register_type("View", TypeTag::ROOT);
/// let button = registry.register_type("Button", view);
///
/// let themed = registry.register_marker("Themed", &[]);
/// let accent = registry.register_marker("Accent", &[themed]);
/// registry.declare_conformance(view, accent);
///
/// assert!(registry.is_subtype(button, view));
/// assert!(!registry.is_subtype(view, button));
/// // Inherited from `View`, and `Accent` implies `Themed`.
/// assert!(registry.conforms(button, themed));
/// ```
#[derive(Debug)]
pub struct TypeRegistry {
    types: Vec<TypeEntry>,
    markers: Vec<MarkerEntry>,
    types_by_name: HashMap<&'static str, TypeTag>,
    markers_by_name: HashMap<&'static str, MarkerId>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a registry containing only the root type.
    #[must_use]
    pub fn new() -> Self {
        let mut types_by_name = HashMap::new();
        types_by_name.insert(ROOT_TYPE_NAME, TypeTag::ROOT);
        Self {
            types: alloc::vec![TypeEntry {
                name: ROOT_TYPE_NAME,
                parent: None,
                markers: SmallVec::new(),
            }],
            markers: Vec::new(),
            types_by_name,
            markers_by_name: HashMap::new(),
        }
    }

    /// Registers a type whose direct supertype is `parent`.
    ///
    /// Pass [`TypeTag::ROOT`] for types with no other supertype.
    ///
    /// # Panics
    ///
    /// Panics if the name is already registered, if `parent` is unknown, or
    /// if the registry runs out of type indices.
    pub fn register_type(&mut self, name: &'static str, parent: TypeTag) -> TypeTag {
        assert!(
            !self.types_by_name.contains_key(name),
            "Type '{name}' is already registered"
        );
        assert!(
            self.entry(parent).is_some(),
            "Parent {parent} of type '{name}' is not registered"
        );
        let Ok(index) = u32::try_from(self.types.len()) else {
            panic!("Too many types registered");
        };

        let tag = TypeTag::new(index);
        self.types.push(TypeEntry {
            name,
            parent: Some(parent),
            markers: SmallVec::new(),
        });
        self.types_by_name.insert(name, tag);
        tag
    }

    /// Registers a marker that refines (implies) each marker in `refines`.
    ///
    /// # Panics
    ///
    /// Panics if the name is already registered, if any refined marker is
    /// unknown, or if the registry runs out of marker indices.
    pub fn register_marker(&mut self, name: &'static str, refines: &[MarkerId]) -> MarkerId {
        assert!(
            !self.markers_by_name.contains_key(name),
            "Marker '{name}' is already registered"
        );
        for &wider in refines {
            assert!(
                self.marker_entry(wider).is_some(),
                "Marker {wider} refined by '{name}' is not registered"
            );
        }
        let Ok(index) = u32::try_from(self.markers.len()) else {
            panic!("Too many markers registered");
        };

        let marker = MarkerId::new(index);
        let mut direct: SmallVec<[MarkerId; 2]> = SmallVec::new();
        for &wider in refines {
            if !direct.contains(&wider) {
                direct.push(wider);
            }
        }
        self.markers.push(MarkerEntry {
            name,
            refines: direct,
        });
        self.markers_by_name.insert(name, marker);
        marker
    }

    /// Declares that instances of `ty` (and of its subtypes) conform to `marker`.
    ///
    /// Declaring the same conformance twice has no further effect.
    ///
    /// # Panics
    ///
    /// Panics if `ty` or `marker` is not registered.
    pub fn declare_conformance(&mut self, ty: TypeTag, marker: MarkerId) {
        assert!(
            self.marker_entry(marker).is_some(),
            "Marker {marker} is not registered"
        );
        let Some(entry) = self.types.get_mut(ty.index() as usize) else {
            panic!("Type {ty} is not registered");
        };
        if !entry.markers.contains(&marker) {
            entry.markers.push(marker);
        }
    }

    /// Returns the number of registered types, including the root.
    #[must_use]
    #[inline]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Returns the number of registered markers.
    #[must_use]
    #[inline]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Looks up a type by name.
    #[must_use]
    pub fn type_by_name(&self, name: &str) -> Option<TypeTag> {
        self.types_by_name.get(name).copied()
    }

    /// Looks up a marker by name.
    #[must_use]
    pub fn marker_by_name(&self, name: &str) -> Option<MarkerId> {
        self.markers_by_name.get(name).copied()
    }

    /// Returns the name of a type.
    #[must_use]
    pub fn type_name(&self, ty: TypeTag) -> Option<&'static str> {
        self.entry(ty).map(|e| e.name)
    }

    /// Returns the name of a marker.
    #[must_use]
    pub fn marker_name(&self, marker: MarkerId) -> Option<&'static str> {
        self.marker_entry(marker).map(|e| e.name)
    }

    /// Returns the direct supertype of `ty`.
    ///
    /// Returns `None` for the root and for unknown types.
    #[must_use]
    pub fn parent(&self, ty: TypeTag) -> Option<TypeTag> {
        self.entry(ty).and_then(|e| e.parent)
    }

    /// Returns all strict supertypes of `ty`, nearest first.
    ///
    /// The last item is always [`TypeTag::ROOT`] unless `ty` is the root or
    /// unknown, in which case the iterator is empty.
    pub fn supertypes(&self, ty: TypeTag) -> impl Iterator<Item = TypeTag> + '_ {
        iter::successors(self.parent(ty), |&t| self.parent(t))
    }

    /// Returns the markers declared directly on `ty`.
    #[must_use]
    pub fn declared_markers(&self, ty: TypeTag) -> &[MarkerId] {
        self.entry(ty)
            .map(|e| e.markers.as_slice())
            .unwrap_or_default()
    }

    fn entry(&self, ty: TypeTag) -> Option<&TypeEntry> {
        self.types.get(ty.index() as usize)
    }

    fn marker_entry(&self, marker: MarkerId) -> Option<&MarkerEntry> {
        self.markers.get(marker.index() as usize)
    }
}

impl TypeOracle for TypeRegistry {
    fn is_subtype(&self, sub: TypeTag, sup: TypeTag) -> bool {
        self.supertypes(sub).any(|t| t == sup)
    }

    fn conforms(&self, ty: TypeTag, marker: MarkerId) -> bool {
        if self.entry(ty).is_none() {
            return false;
        }
        iter::once(ty)
            .chain(self.supertypes(ty))
            .flat_map(|t| self.declared_markers(t))
            .any(|&declared| self.marker_conforms_to(declared, marker))
    }

    fn marker_conforms_to(&self, narrower: MarkerId, wider: MarkerId) -> bool {
        if narrower == wider {
            return self.marker_entry(narrower).is_some();
        }
        let mut stack: SmallVec<[MarkerId; 8]> = SmallVec::new();
        stack.push(narrower);
        while let Some(current) = stack.pop() {
            let Some(entry) = self.marker_entry(current) else {
                continue;
            };
            for &next in &entry.refines {
                if next == wider {
                    return true;
                }
                stack.push(next);
            }
        }
        false
    }
}
