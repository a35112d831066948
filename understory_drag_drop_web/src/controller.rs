// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use core::cell::RefCell;

use understory_drag_drop::{Collection, DragDrop, DragDropConfig, Registration, Target};
use web_sys::Element;

use crate::WebError;
use crate::host::WebHost;

/// A drag/drop controller wired to the browser document.
///
/// The controller is shared with the DOM listeners it installs. Lifecycle
/// callbacks run while the controller is borrowed, so a callback must not call
/// back into this handle; queue the work instead.
///
/// Dropping the last handle removes every DOM listener the binding installed.
/// A drag in progress is abandoned without callbacks and its proxy removed.
#[derive(Clone, Debug)]
pub struct WebDragDrop {
    inner: Rc<RefCell<DragDrop<WebHost>>>,
}

impl WebDragDrop {
    /// Binds a controller with the default configuration to the global document.
    pub fn new() -> Result<Self, WebError> {
        Self::with_config(DragDropConfig::default())
    }

    /// Binds a controller with `config` to the global document.
    pub fn with_config(config: DragDropConfig) -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let document = window.document().ok_or(WebError::NoDocument)?;
        let placeholder = document.create_element("div")?;
        let inner = Rc::new_cyclic(|weak| {
            RefCell::new(DragDrop::with_config(
                WebHost::new(window, document, placeholder, weak.clone()),
                config,
            ))
        });
        log::debug!("drag/drop bound to the document");
        Ok(Self { inner })
    }

    /// Registers draggables by `.class` / `#id` selector.
    pub fn set_draggable(&self, selectors: &[&str]) -> Registration {
        self.register(
            Collection::Draggable,
            selectors.iter().copied().map(Target::selector),
        )
    }

    /// Registers droppables by `.class` / `#id` selector.
    pub fn set_droppable(&self, selectors: &[&str]) -> Registration {
        self.register(
            Collection::Droppable,
            selectors.iter().copied().map(Target::selector),
        )
    }

    /// Registers draggable elements directly.
    pub fn set_draggable_elements(
        &self,
        elements: impl IntoIterator<Item = Element>,
    ) -> Registration {
        self.register(Collection::Draggable, elements.into_iter().map(Target::element))
    }

    /// Registers droppable elements directly.
    pub fn set_droppable_elements(
        &self,
        elements: impl IntoIterator<Item = Element>,
    ) -> Registration {
        self.register(Collection::Droppable, elements.into_iter().map(Target::element))
    }

    /// Registers any mix of selectors and elements into `kind`.
    pub fn register<'a>(
        &self,
        kind: Collection,
        targets: impl IntoIterator<Item = Target<'a, Element>>,
    ) -> Registration {
        self.inner.borrow_mut().register(kind, targets)
    }

    /// Runs `f` with exclusive access to the controller, for installing
    /// callbacks or changing configuration.
    ///
    /// ```no_run
    /// # #[cfg(target_arch = "wasm32")]
    /// # fn demo(dd: &understory_drag_drop_web::WebDragDrop) {
    /// dd.with(|dd| {
    ///     dd.on_drop(|_, session, resolution| {
    ///         log::info!("{:?} dropped on {:?}", session.source(), resolution.target());
    ///     });
    /// });
    /// # }
    /// ```
    pub fn with<R>(&self, f: impl FnOnce(&mut DragDrop<WebHost>) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    /// The shared controller.
    pub fn shared(&self) -> &Rc<RefCell<DragDrop<WebHost>>> {
        &self.inner
    }
}
