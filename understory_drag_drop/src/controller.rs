// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag/drop controller: one state machine per set of draggables.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle --press--> Armed --move--> Dragging --release--> Resolved --> Idle
//!                   |                                      ^
//!                   +--------------release-----------------+
//! ```
//!
//! - **Press** on a registered draggable (primary button or any touch) records
//!   the pointer and source positions, arms the long-press timer, subscribes to
//!   document-level move/release input, and builds a hidden proxy.
//! - The **first move** cancels the long-press, fires `on_drag_start`, and shows
//!   the proxy. Every move repositions the proxy; with
//!   [`monitor_during_drag`](crate::DragDropConfig::monitor_during_drag) set it
//!   also hit-tests droppables *before* `on_drag_move` runs.
//! - **Release** runs the final hit test (unless monitoring already did),
//!   clears feedback, unsubscribes, removes the proxy, and only then fires
//!   `on_drop` (if a droppable was hit) followed by `on_drag_end`.
//!
//! At most one session exists at a time: a press while a session is active is
//! rejected with [`Ignored::ReentrantDrag`] and leaves the session untouched.
//!
//! ## Long-press
//!
//! The long-press timer lives in an [`understory_timing::TimerQueue`] driven
//! by event timestamps. Hosts call [`DragDrop::advance_time`] when the
//! deadline reported by [`DragDrop::next_deadline`] passes. The callback fires
//! only for touch input that neither moved nor released before the deadline,
//! and at most once per press.

use alloc::boxed::Box;
use core::fmt;
use core::mem;

use kurbo::Point;
use understory_timing::{TimerId, TimerQueue};

use crate::callbacks::Callbacks;
use crate::config::DragDropConfig;
use crate::hit_test;
use crate::host::Host;
use crate::input::PointerEvent;
use crate::proxy;
use crate::registry::{self, Collection, Registration, Registry};
use crate::selector::Target;
use crate::session::{DragSession, DropResolution, Phase};

/// Why an input event was ignored.
///
/// These are ordinary UI races, not failures: the controller state is left
/// unchanged and nothing is torn down.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Ignored {
    /// A mouse button other than the primary one was pressed or released.
    #[error("only the primary mouse button starts or ends a drag")]
    NonPrimaryButton,
    /// A press arrived while another drag was active.
    #[error("a drag is already in progress")]
    ReentrantDrag,
    /// The pressed element is not a registered draggable.
    #[error("element is not registered as draggable")]
    NotDraggable,
    /// The pressed element no longer has a bounding rectangle.
    #[error("element is no longer in the document")]
    StaleElement,
    /// A move or release arrived with no drag in progress.
    #[error("no drag is in progress")]
    NoActiveDrag,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Timer {
    LongPress,
}

/// Pointer-driven drag and drop over a [`Host`] document.
pub struct DragDrop<H: Host> {
    host: H,
    registry: Registry<H::Element>,
    config: DragDropConfig,
    callbacks: Callbacks<H::Element>,
    timers: TimerQueue<Timer>,
    long_press: Option<TimerId>,
    long_press_cancelled: bool,
    session: Option<DragSession<H::Element>>,
    resolution: DropResolution<H::Element>,
    subscription: Option<H::Subscription>,
    phase: Phase,
}

impl<H: Host> DragDrop<H> {
    /// Creates a controller with the default configuration.
    pub fn new(host: H) -> Self {
        Self::with_config(host, DragDropConfig::default())
    }

    /// Creates a controller with `config`.
    pub fn with_config(host: H, config: DragDropConfig) -> Self {
        Self {
            host,
            registry: Registry::new(),
            config,
            callbacks: Callbacks::default(),
            timers: TimerQueue::new(),
            long_press: None,
            long_press_cancelled: false,
            session: None,
            resolution: DropResolution::none(Point::ZERO),
            subscription: None,
            phase: Phase::Idle,
        }
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The configuration.
    pub fn config(&self) -> &DragDropConfig {
        &self.config
    }

    /// The configuration, mutably. Changes apply from the next event on.
    pub fn config_mut(&mut self) -> &mut DragDropConfig {
        &mut self.config
    }

    /// The draggable and droppable collections.
    pub fn registry(&self) -> &Registry<H::Element> {
        &self.registry
    }

    /// The callback slots.
    pub fn callbacks_mut(&mut self) -> &mut Callbacks<H::Element> {
        &mut self.callbacks
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&DragSession<H::Element>> {
        self.session.as_ref()
    }

    /// Returns `true` while a session is active.
    pub fn is_dragging(&self) -> bool {
        self.session.as_ref().is_some_and(DragSession::is_active)
    }

    /// The drop resolution of the active session.
    ///
    /// Reset at every accepted press; meaningful only while a session is active.
    pub fn resolution(&self) -> &DropResolution<H::Element> {
        &self.resolution
    }

    /// Registers draggable elements. Newly added elements get press listeners.
    pub fn set_draggable<'a, I>(&mut self, targets: I) -> Registration
    where
        I: IntoIterator<Item = Target<'a, H::Element>>,
    {
        self.register(Collection::Draggable, targets)
    }

    /// Registers droppable elements.
    pub fn set_droppable<'a, I>(&mut self, targets: I) -> Registration
    where
        I: IntoIterator<Item = Target<'a, H::Element>>,
    {
        self.register(Collection::Droppable, targets)
    }

    /// Registers elements into `kind`. See [`registry::register`].
    pub fn register<'a, I>(&mut self, kind: Collection, targets: I) -> Registration
    where
        I: IntoIterator<Item = Target<'a, H::Element>>,
    {
        registry::register(&mut self.registry, &mut self.host, kind, targets)
    }

    /// Sets the callback fired on the first move of each session.
    pub fn on_drag_start(
        &mut self,
        f: impl FnMut(&PointerEvent, &DragSession<H::Element>) + 'static,
    ) -> &mut Self {
        self.callbacks.drag_start = Some(Box::new(f));
        self
    }

    /// Sets the callback fired on every move, after any hit test.
    pub fn on_drag_move(
        &mut self,
        f: impl FnMut(&PointerEvent, &DragSession<H::Element>, &DropResolution<H::Element>)
        + 'static,
    ) -> &mut Self {
        self.callbacks.drag_move = Some(Box::new(f));
        self
    }

    /// Sets the callback fired at the end of every session.
    pub fn on_drag_end(
        &mut self,
        f: impl FnMut(&PointerEvent, &DragSession<H::Element>, &DropResolution<H::Element>)
        + 'static,
    ) -> &mut Self {
        self.callbacks.drag_end = Some(Box::new(f));
        self
    }

    /// Sets the callback fired when a release lands on a droppable.
    pub fn on_drop(
        &mut self,
        f: impl FnMut(&PointerEvent, &DragSession<H::Element>, &DropResolution<H::Element>)
        + 'static,
    ) -> &mut Self {
        self.callbacks.drop = Some(Box::new(f));
        self
    }

    /// Sets the callback fired when a touch is held still past the long-press delay.
    pub fn on_long_press(&mut self, f: impl FnMut(&PointerEvent, bool) + 'static) -> &mut Self {
        self.callbacks.long_press = Some(Box::new(f));
        self
    }

    /// Handles a press on `element`.
    pub fn pointer_down(&mut self, element: &H::Element, event: PointerEvent) -> Result<(), Ignored> {
        if self.session.is_some() {
            log::debug!("press on {element:?} rejected: drag already active");
            return Err(Ignored::ReentrantDrag);
        }
        if !event.is_primary() {
            return Err(Ignored::NonPrimaryButton);
        }
        if !self.registry.is_draggable(element) {
            return Err(Ignored::NotDraggable);
        }
        let Some(bounds) = self.host.bounding_rect(element) else {
            log::debug!("press on stale element {element:?} ignored");
            return Err(Ignored::StaleElement);
        };

        self.long_press_cancelled = false;
        if let Some(stale) = self.long_press.take() {
            self.timers.cancel(stale);
        }
        self.long_press = Some(self.timers.schedule_after(
            event.time,
            self.config.long_press_delay,
            Timer::LongPress,
        ));

        self.subscription = Some(self.host.subscribe(event.source()));
        let proxy = proxy::create(&mut self.host, element, &self.config);
        self.session = Some(DragSession::new(
            element.clone(),
            bounds.origin(),
            event,
            proxy,
        ));
        self.resolution = DropResolution::none(event.position);
        self.phase = Phase::Armed;
        log::debug!("armed drag of {element:?} at {:?}", event.position);
        Ok(())
    }

    /// Handles a document-level move.
    pub fn pointer_move(&mut self, event: PointerEvent) -> Result<(), Ignored> {
        if self.session.is_none() {
            return Err(Ignored::NoActiveDrag);
        }
        self.cancel_long_press();

        let Self {
            host,
            registry,
            config,
            callbacks,
            session,
            resolution,
            phase,
            ..
        } = self;
        let Some(session) = session.as_mut() else {
            return Err(Ignored::NoActiveDrag);
        };

        if !session.moved {
            session.moved = true;
            *phase = Phase::Dragging;
            log::debug!("drag of {:?} started", session.source);
            callbacks.drag_start(&event, session);
        }

        let delta = session.track(event.position);
        proxy::show_at(host, &session.proxy, session.proxy_origin);
        log::trace!("proxy moved by {delta:?} to {:?}", session.proxy_origin);

        if config.monitor_during_drag && registry.has_droppables() {
            hit_test::resolve_into(host, registry.droppables(), config, resolution, event.position);
        }

        callbacks.drag_move(&event, session, resolution);
        Ok(())
    }

    /// Handles a document-level release.
    pub fn pointer_up(&mut self, event: PointerEvent) -> Result<(), Ignored> {
        if self.session.is_none() {
            return Err(Ignored::NoActiveDrag);
        }
        if !event.is_primary() {
            return Err(Ignored::NonPrimaryButton);
        }
        self.cancel_long_press();

        if !self.config.monitor_during_drag {
            hit_test::resolve_into(
                &mut self.host,
                self.registry.droppables(),
                &self.config,
                &mut self.resolution,
                event.position,
            );
        }
        self.resolution.point = event.position;
        hit_test::apply_feedback(&mut self.host, self.registry.droppables(), None, &self.config);

        let Some((session, resolution)) = self.teardown() else {
            return Err(Ignored::NoActiveDrag);
        };
        log::debug!(
            "drag of {:?} released at {:?} over {:?}",
            session.source,
            event.position,
            resolution.target
        );
        let Self {
            callbacks,
            phase,
            long_press_cancelled,
            ..
        } = self;
        let _settle = Settle {
            phase,
            long_press_cancelled,
        };
        if resolution.is_hit() {
            callbacks.dropped(&event, &session, &resolution);
        }
        callbacks.drag_end(&event, &session, &resolution);
        Ok(())
    }

    /// Abandons the active session without a drop.
    ///
    /// Tears down like a release but performs no hit test; only `on_drag_end`
    /// fires. Hosts call this for pointer-cancel, focus loss, or Escape.
    pub fn cancel(&mut self, event: PointerEvent) -> Result<(), Ignored> {
        if self.session.is_none() {
            return Err(Ignored::NoActiveDrag);
        }
        self.cancel_long_press();
        self.resolution = DropResolution::none(event.position);
        hit_test::apply_feedback(&mut self.host, self.registry.droppables(), None, &self.config);

        let Some((session, resolution)) = self.teardown() else {
            return Err(Ignored::NoActiveDrag);
        };
        log::debug!("drag of {:?} cancelled", session.source);
        let Self {
            callbacks,
            phase,
            long_press_cancelled,
            ..
        } = self;
        let _settle = Settle {
            phase,
            long_press_cancelled,
        };
        callbacks.drag_end(&event, &session, &resolution);
        Ok(())
    }

    /// Earliest pending timer deadline. Hosts should call
    /// [`advance_time`](Self::advance_time) once it passes.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Fires timers due at `now`. Returns `true` if a long-press was recognized.
    pub fn advance_time(&mut self, now: u64) -> bool {
        let mut recognized = false;
        while let Some((id, Timer::LongPress)) = self.timers.pop_expired(now) {
            if self.long_press != Some(id) {
                continue;
            }
            self.long_press = None;
            if self.long_press_cancelled || self.phase != Phase::Armed {
                continue;
            }
            let Some(session) = self.session.as_ref() else {
                continue;
            };
            if !session.press.is_touch() {
                continue;
            }
            log::debug!("long-press on {:?}", session.source);
            recognized = true;
            let press = session.press;
            self.callbacks.long_press(&press, self.long_press_cancelled);
        }
        recognized
    }

    fn cancel_long_press(&mut self) {
        self.long_press_cancelled = true;
        if let Some(id) = self.long_press.take() {
            self.timers.cancel(id);
        }
    }

    /// Unsubscribes, removes the proxy, and moves the session and resolution
    /// out so callbacks run against owned records.
    fn teardown(&mut self) -> Option<(DragSession<H::Element>, DropResolution<H::Element>)> {
        let mut session = self.session.take()?;
        if let Some(subscription) = self.subscription.take() {
            self.host.unsubscribe(subscription);
        }
        self.host.remove(&session.proxy);
        session.active = false;
        self.phase = Phase::Resolved;
        let point = self.resolution.point;
        let resolution = mem::replace(&mut self.resolution, DropResolution::none(point));
        Some((session, resolution))
    }
}

/// Returns the controller to [`Phase::Idle`] once the end-of-session
/// callbacks are done, including when one of them panics.
struct Settle<'a> {
    phase: &'a mut Phase,
    long_press_cancelled: &'a mut bool,
}

impl Drop for Settle<'_> {
    fn drop(&mut self) {
        *self.phase = Phase::Idle;
        *self.long_press_cancelled = false;
    }
}

impl<H> fmt::Debug for DragDrop<H>
where
    H: Host + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragDrop")
            .field("host", &self.host)
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("callbacks", &self.callbacks)
            .field("timers", &self.timers)
            .field("long_press", &self.long_press)
            .field("long_press_cancelled", &self.long_press_cancelled)
            .field("session", &self.session)
            .field("resolution", &self.resolution)
            .field("subscription", &self.subscription)
            .field("phase", &self.phase)
            .finish()
    }
}
