// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element registry: the draggable and droppable collections.
//!
//! Both collections keep insertion order. For draggables the order carries no
//! meaning; for droppables it decides ties during hit testing (the earliest
//! registered droppable wins, see [`hit_test::resolve`](crate::hit_test::resolve)).
//!
//! Elements are compared by identity (`PartialEq` on the host's handle type).
//! Registering an element that is already present is a no-op, so a draggable
//! never gets a second set of press listeners.
//!
//! The registry never prunes itself. Handles to elements that left the
//! document stay registered; the host reports them as stale and they simply
//! never match a hit test.

use alloc::vec::Vec;

use crate::host::Host;
use crate::selector::{Selector, SelectorError, Target};

/// Which collection a registration targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Elements that start a drag when pressed.
    Draggable,
    /// Elements that can receive a drop.
    Droppable,
}

/// Outcome of a registration call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registration {
    /// Elements newly added to the collection.
    pub added: usize,
    /// Elements skipped because they were already registered.
    pub duplicates: usize,
    /// Selector entries that could not be parsed. Their entries were skipped;
    /// the remaining entries were still processed.
    pub errors: Vec<SelectorError>,
}

impl Registration {
    /// Returns `true` if at least one element was added.
    #[must_use]
    pub fn any_added(&self) -> bool {
        self.added > 0
    }

    /// Returns `true` if no selector failed to parse.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The two element collections of a drag/drop controller.
#[derive(Clone, Debug)]
pub struct Registry<E> {
    draggables: Vec<E>,
    droppables: Vec<E>,
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Registry<E> {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            draggables: Vec::new(),
            droppables: Vec::new(),
        }
    }

    /// Registered draggable elements, in registration order.
    #[must_use]
    pub fn draggables(&self) -> &[E] {
        &self.draggables
    }

    /// Registered droppable elements, in registration order.
    #[must_use]
    pub fn droppables(&self) -> &[E] {
        &self.droppables
    }

    /// Returns the given collection.
    #[must_use]
    pub fn collection(&self, kind: Collection) -> &[E] {
        match kind {
            Collection::Draggable => &self.draggables,
            Collection::Droppable => &self.droppables,
        }
    }

    /// Returns `true` once at least one draggable is registered.
    #[must_use]
    pub fn has_draggables(&self) -> bool {
        !self.draggables.is_empty()
    }

    /// Returns `true` once at least one droppable is registered.
    #[must_use]
    pub fn has_droppables(&self) -> bool {
        !self.droppables.is_empty()
    }
}

impl<E: PartialEq> Registry<E> {
    /// Returns `true` if `element` is registered as draggable.
    #[must_use]
    pub fn is_draggable(&self, element: &E) -> bool {
        self.draggables.contains(element)
    }

    /// Returns `true` if `element` is registered as droppable.
    #[must_use]
    pub fn is_droppable(&self, element: &E) -> bool {
        self.droppables.contains(element)
    }

    /// Adds one element, returning `false` if it was already present.
    pub fn insert(&mut self, kind: Collection, element: E) -> bool {
        let list = match kind {
            Collection::Draggable => &mut self.draggables,
            Collection::Droppable => &mut self.droppables,
        };
        if list.contains(&element) {
            return false;
        }
        list.push(element);
        true
    }

    /// Removes one element, returning `true` if it was present.
    ///
    /// Listeners the host attached to a removed draggable are left in place;
    /// presses on it are then rejected by the controller.
    pub fn remove(&mut self, kind: Collection, element: &E) -> bool {
        let list = match kind {
            Collection::Draggable => &mut self.draggables,
            Collection::Droppable => &mut self.droppables,
        };
        let Some(idx) = list.iter().position(|e| e == element) else {
            return false;
        };
        list.remove(idx);
        true
    }
}

/// Resolves `targets` through `host` and appends new elements to `kind`.
///
/// Entries are processed in order: selectors expand to their matches in
/// document order, element handles are taken as-is. Newly added draggables get
/// press listeners through [`Host::listen_for_press`].
pub fn register<'a, H, I>(
    registry: &mut Registry<H::Element>,
    host: &mut H,
    kind: Collection,
    targets: I,
) -> Registration
where
    H: Host,
    I: IntoIterator<Item = Target<'a, H::Element>>,
{
    let mut summary = Registration::default();
    for target in targets {
        let elements = match target {
            Target::Element(element) => alloc::vec![element],
            Target::Selector(text) => match Selector::parse(text) {
                Ok(selector) => host.find(&selector),
                Err(err) => {
                    log::warn!("skipping {kind:?} registration: {err}");
                    summary.errors.push(err);
                    continue;
                }
            },
        };
        for element in elements {
            if !registry.insert(kind, element.clone()) {
                summary.duplicates += 1;
                continue;
            }
            if kind == Collection::Draggable {
                host.listen_for_press(&element);
            }
            summary.added += 1;
        }
    }
    log::debug!(
        "registered {} {kind:?} element(s), {} duplicate(s), {} selector error(s)",
        summary.added,
        summary.duplicates,
        summary.errors.len()
    );
    summary
}
