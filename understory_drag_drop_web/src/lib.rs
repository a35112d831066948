// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drag_drop_web --heading-base-level=0

//! Browser DOM binding for `understory_drag_drop`.
//!
//! When targeting `wasm32`, this crate provides `WebHost`, a
//! [`Host`](understory_drag_drop::Host) over `web_sys` elements, and
//! `WebDragDrop`, which owns a controller and wires DOM input into it:
//!
//! - Each registered draggable gets `mousedown` and `touchstart` listeners.
//! - An accepted press subscribes the document to `mousemove`/`mouseup`, or to
//!   `touchmove`/`touchend`/`touchcancel` for touch. The subscription is
//!   dropped when the drag ends.
//! - Dropping the last `WebDragDrop` handle removes all of these listeners.
//! - Positions are client coordinates; timestamps come from
//!   `performance.now()`.
//! - Accepted input has its default action and propagation stopped.
//! - Pending long-press deadlines are serviced with `setTimeout`.
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn bind() -> Result<understory_drag_drop_web::WebDragDrop, understory_drag_drop_web::WebError> {
//!     let dd = understory_drag_drop_web::WebDragDrop::new()?;
//!     dd.set_draggable(&[".card"]);
//!     dd.set_droppable(&[".lane", "#trash"]);
//!     dd.with(|dd| {
//!         dd.config_mut().monitor_during_drag = true;
//!     });
//!     Ok(dd)
//! }
//! ```
//!
//! The event translation helpers in [`input`] are plain functions and build on
//! every target.
//!
//! This crate installs no logger; applications choose one (for example
//! `console_log`).

#![no_std]

extern crate alloc;

mod error;
pub mod input;

#[cfg(target_arch = "wasm32")]
mod controller;
#[cfg(target_arch = "wasm32")]
mod host;

#[cfg(target_arch = "wasm32")]
pub use controller::WebDragDrop;
pub use error::WebError;
#[cfg(target_arch = "wasm32")]
pub use host::{WebHost, WebSubscription};
