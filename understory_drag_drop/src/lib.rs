// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drag_drop --heading-base-level=0

//! Understory Drag Drop: headless pointer-driven drag and drop.
//!
//! This crate lets users press on a registered **draggable** element, drag a
//! floating copy of it (the **proxy**) across the page, and release it over one
//! of a set of registered **droppable** elements. It owns the interaction state
//! machine and the geometry; everything document-specific goes through the
//! [`Host`] trait.
//!
//! - [`DragDrop`] is the controller. Hosts forward press, move, and release
//!   events to it and it fires the lifecycle callbacks.
//! - [`Registry`] keeps the draggable and droppable collections in registration
//!   order, without duplicates.
//! - [`hit_test`] resolves which droppable is under the pointer. Edges count as
//!   inside, and the earliest registered droppable wins when several overlap.
//! - [`proxy`] builds the proxy overlay: a deep clone of the source with a
//!   fixed set of computed styles copied over.
//! - Long-press recognition for touch input is built on
//!   [`understory_timing::TimerQueue`].
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Rect};
//! use understory_drag_drop::memory::MemoryHost;
//! use understory_drag_drop::{DragDrop, PointerEvent, Target};
//!
//! let mut host = MemoryHost::new();
//! let card = host.add_element(Rect::new(0.0, 0.0, 50.0, 50.0));
//! let zone = host.add_element(Rect::new(40.0, 40.0, 100.0, 100.0));
//!
//! let mut dd = DragDrop::new(host);
//! dd.set_draggable([Target::element(card)]);
//! dd.set_droppable([Target::element(zone)]);
//!
//! let dropped = Rc::new(RefCell::new(None));
//! let sink = dropped.clone();
//! dd.on_drop(move |_, _, resolution| *sink.borrow_mut() = resolution.target().copied());
//!
//! dd.pointer_down(&card, PointerEvent::mouse(Point::new(10.0, 10.0), 0)).unwrap();
//! dd.pointer_move(PointerEvent::mouse(Point::new(60.0, 60.0), 16)).unwrap();
//!
//! // The proxy keeps the grab offset: the source sat at (0, 0) and the pointer
//! // moved by (50, 50).
//! assert_eq!(dd.session().unwrap().proxy_origin(), Point::new(50.0, 50.0));
//!
//! dd.pointer_up(PointerEvent::mouse(Point::new(60.0, 60.0), 32)).unwrap();
//! assert_eq!(*dropped.borrow(), Some(zone));
//! assert!(!dd.is_dragging());
//! ```
//!
//! ## Hosts
//!
//! The controller is generic over a [`Host`], which resolves selectors,
//! measures elements, reads and writes styles, and manages listeners. This crate
//! ships [`memory::MemoryHost`], an in-memory document for tests and headless
//! use. The browser binding lives in `understory_drag_drop_web`.
//!
//! Hosts drive the controller with three entry points:
//!
//! - [`DragDrop::pointer_down`] from each draggable's press listener.
//! - [`DragDrop::pointer_move`] and [`DragDrop::pointer_up`] from the
//!   document-level listeners installed by [`Host::subscribe`].
//!
//! Events that do not apply (a second press during a drag, a right-click, a
//! move with no drag in progress) are reported as [`Ignored`] and change
//! nothing.
//!
//! ## Feedback
//!
//! While a hit test runs, the hovered droppable gets
//! [`DragDropConfig::hover_effect`] as its border and every other droppable
//! gets [`DragDropConfig::idle_effect`]. With
//! [`DragDropConfig::monitor_during_drag`] off (the default) the hit test only
//! runs on release; with it on, it runs on every move.
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: `no_std` float math for Kurbo.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod callbacks;
mod config;
mod controller;
mod host;
mod input;
mod registry;
mod selector;
mod session;

pub mod hit_test;
pub mod memory;
pub mod proxy;

pub use callbacks::{Callbacks, DragFn, DragStartFn, LongPressFn};
pub use config::{
    BorderEffect, BorderLine, DEFAULT_LONG_PRESS_DELAY, DEFAULT_PROXY_ID, DEFAULT_PROXY_OPACITY,
    DragDropConfig, Rgb,
};
pub use controller::{DragDrop, Ignored};
pub use host::{ChildNode, Host, PropertyCase};
pub use input::{InputSource, MouseButton, PointerEvent, PointerKind};
pub use registry::{Collection, Registration, Registry, register};
pub use selector::{Selector, SelectorError, Target};
pub use session::{DragSession, DropResolution, Phase};
