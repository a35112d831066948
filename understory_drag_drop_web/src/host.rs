// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Host`] over the browser DOM.

use alloc::rc::Weak;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use kurbo::{Point, Rect};
use understory_drag_drop::{
    ChildNode, DragDrop, Host, Ignored, InputSource, PointerEvent, PropertyCase, Selector,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, HtmlElement, MouseEvent, Node, TouchEvent, TouchList, Window};

use crate::input::{delay_until, listener_names, mouse_kind, select_touch_point, timestamp};

type Controller = RefCell<DragDrop<WebHost>>;
type Action = fn(&mut DragDrop<WebHost>, PointerEvent) -> Result<(), Ignored>;

/// Document-level listeners of one drag session.
///
/// Dropping a subscription removes its listeners from the document.
pub struct WebSubscription {
    source: InputSource,
    document: Document,
    listeners: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

impl WebSubscription {
    /// Listener family of this subscription.
    pub fn source(&self) -> InputSource {
        self.source
    }

    /// Removes the listeners from the document and hands back their closures.
    fn detach(&mut self) -> Vec<Closure<dyn FnMut(Event)>> {
        self.listeners
            .drain(..)
            .map(|(name, callback)| {
                if let Err(err) = self
                    .document
                    .remove_event_listener_with_callback(name, callback.as_ref().unchecked_ref())
                {
                    log::debug!("removing document {name} listener failed: {err:?}");
                }
                callback
            })
            .collect()
    }
}

impl Drop for WebSubscription {
    fn drop(&mut self) {
        drop(self.detach());
    }
}

impl fmt::Debug for WebSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.listeners.iter().map(|(name, _)| *name).collect();
        f.debug_struct("WebSubscription")
            .field("source", &self.source)
            .field("listeners", &names)
            .finish()
    }
}

struct PressListener {
    element: Element,
    mouse: Closure<dyn FnMut(MouseEvent)>,
    touch: Closure<dyn FnMut(TouchEvent)>,
}

impl Drop for PressListener {
    fn drop(&mut self) {
        for (name, callback) in [
            ("mousedown", self.mouse.as_ref()),
            ("touchstart", self.touch.as_ref()),
        ] {
            if let Err(err) = self
                .element
                .remove_event_listener_with_callback(name, callback.unchecked_ref())
            {
                log::debug!("removing {name} listener from {:?} failed: {err:?}", self.element);
            }
        }
    }
}

/// The browser document as seen by a [`DragDrop`] controller.
///
/// Created by [`WebDragDrop`](crate::WebDragDrop), which ties the host's
/// listeners back to the shared controller. Dropping the host removes the
/// press listeners it installed, any pending wake-up, and a proxy left over
/// from an abandoned drag.
pub struct WebHost {
    window: Window,
    document: Document,
    controller: Weak<Controller>,
    placeholder: Element,
    press_listeners: Vec<PressListener>,
    // Closures detached from the document during the event that is still
    // running them. Dropped at the next subscription.
    retired: Vec<Closure<dyn FnMut(Event)>>,
    // The proxy currently attached to the body.
    overlay: Option<Element>,
    wake: Option<i32>,
}

impl fmt::Debug for WebHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pressable: Vec<&Element> = self.press_listeners.iter().map(|p| &p.element).collect();
        f.debug_struct("WebHost")
            .field("window", &self.window)
            .field("document", &self.document)
            .field("controller", &self.controller.strong_count())
            .field("placeholder", &self.placeholder)
            .field("press_listeners", &pressable)
            .field("retired", &self.retired.len())
            .field("overlay", &self.overlay)
            .field("wake", &self.wake)
            .finish()
    }
}

impl Drop for WebHost {
    fn drop(&mut self) {
        if let Some(handle) = self.wake.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        if let Some(overlay) = self.overlay.take() {
            overlay.remove();
        }
        log::debug!(
            "releasing {} press listener pairs",
            self.press_listeners.len()
        );
    }
}

impl WebHost {
    pub(crate) fn new(
        window: Window,
        document: Document,
        placeholder: Element,
        controller: Weak<Controller>,
    ) -> Self {
        Self {
            window,
            document,
            controller,
            placeholder,
            press_listeners: Vec::new(),
            retired: Vec::new(),
            overlay: None,
            wake: None,
        }
    }

    /// The window the host listens on.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The document the host operates on.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Current time in whole milliseconds from `performance.now()`.
    pub fn now(&self) -> u64 {
        now(&self.window)
    }

    /// Replaces the pending wake-up with one at `deadline`, if any.
    pub(crate) fn arm_wake(&mut self, deadline: Option<u64>) {
        if let Some(handle) = self.wake.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        let Some(deadline) = deadline else {
            return;
        };
        let delay = delay_until(deadline, self.now());
        let weak = self.controller.clone();
        let callback = Closure::once_into_js(move || {
            let Some(cell) = weak.upgrade() else {
                return;
            };
            let Ok(mut dd) = cell.try_borrow_mut() else {
                log::warn!("timer fired while the controller was busy");
                return;
            };
            dd.host_mut().wake = None;
            let now = dd.host().now();
            dd.advance_time(now);
            let next = dd.next_deadline();
            dd.host_mut().arm_wake(next);
        });
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        {
            Ok(handle) => self.wake = Some(handle),
            Err(err) => log::warn!("failed to schedule timer wake-up: {err:?}"),
        }
    }

    fn document_listener(&self, source: InputSource, action: Action) -> Closure<dyn FnMut(Event)> {
        let weak = self.controller.clone();
        let window = self.window.clone();
        Closure::new(move |event: Event| {
            let pointer = match source {
                InputSource::Mouse => event.dyn_ref::<MouseEvent>().map(|e| mouse_event(&window, e)),
                InputSource::Touch => event
                    .dyn_ref::<TouchEvent>()
                    .and_then(|e| touch_event(&window, e)),
            };
            if let Some(pointer) = pointer {
                dispatch(&weak, &event, |dd| action(dd, pointer));
            }
        })
    }
}

fn now(window: &Window) -> u64 {
    window.performance().map_or(0, |p| timestamp(p.now()))
}

fn mouse_event(window: &Window, event: &MouseEvent) -> PointerEvent {
    PointerEvent {
        kind: mouse_kind(event.button()),
        position: Point::new(f64::from(event.client_x()), f64::from(event.client_y())),
        time: now(window),
    }
}

fn first_touch(list: &TouchList) -> Option<Point> {
    list.get(0)
        .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())))
}

fn touch_event(window: &Window, event: &TouchEvent) -> Option<PointerEvent> {
    let position = select_touch_point(
        first_touch(&event.target_touches()),
        first_touch(&event.changed_touches()),
    )?;
    Some(PointerEvent::touch(position, now(window)))
}

/// Runs `action` against the controller and rearms the wake-up timer.
///
/// Accepted input is consumed: default handling and propagation stop.
fn dispatch(
    weak: &Weak<Controller>,
    event: &Event,
    action: impl FnOnce(&mut DragDrop<WebHost>) -> Result<(), Ignored>,
) {
    let Some(cell) = weak.upgrade() else {
        return;
    };
    let Ok(mut dd) = cell.try_borrow_mut() else {
        log::warn!("{} arrived while a drag/drop callback was running", event.type_());
        return;
    };
    match action(&mut dd) {
        Ok(()) => {
            event.prevent_default();
            event.stop_propagation();
        }
        Err(reason) => log::trace!("{} ignored: {reason}", event.type_()),
    }
    let next = dd.next_deadline();
    dd.host_mut().arm_wake(next);
}

impl Host for WebHost {
    type Element = Element;
    type Subscription = WebSubscription;

    const PROPERTY_CASE: PropertyCase = PropertyCase::Kebab;

    fn find(&self, selector: &Selector<'_>) -> Vec<Element> {
        match selector {
            Selector::Class(name) => {
                let found = self.document.get_elements_by_class_name(name);
                (0..found.length()).filter_map(|i| found.item(i)).collect()
            }
            Selector::Id(name) => self.document.get_element_by_id(name).into_iter().collect(),
        }
    }

    fn bounding_rect(&self, element: &Element) -> Option<Rect> {
        if !element.is_connected() {
            return None;
        }
        let r = element.get_bounding_client_rect();
        Some(Rect::from_origin_size((r.x(), r.y()), (r.width(), r.height())))
    }

    fn computed_style(&self, element: &Element, property: &str) -> String {
        match self.window.get_computed_style(element) {
            Ok(Some(style)) => style.get_property_value(property).unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn set_style(&mut self, element: &Element, property: &str, value: &str) {
        let Some(html) = element.dyn_ref::<HtmlElement>() else {
            log::trace!("cannot style non-HTML element {element:?}");
            return;
        };
        if let Err(err) = html.style().set_property(property, value) {
            log::debug!("setting {property}: {value} failed: {err:?}");
        }
    }

    fn deep_clone(&mut self, element: &Element) -> Element {
        match element
            .clone_node_with_deep(true)
            .map(|node| node.dyn_into::<Element>())
        {
            Ok(Ok(clone)) => clone,
            _ => {
                log::warn!("cloning {element:?} failed; using an empty proxy");
                self.create_overlay()
            }
        }
    }

    fn child_nodes(&self, element: &Element) -> Vec<ChildNode<Element>> {
        let nodes = element.child_nodes();
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .map(|node| {
                if node.node_type() == Node::ELEMENT_NODE {
                    node.dyn_into::<Element>().map_or(ChildNode::Text, ChildNode::Element)
                } else {
                    ChildNode::Text
                }
            })
            .collect()
    }

    fn create_overlay(&mut self) -> Element {
        self.document.create_element("div").unwrap_or_else(|err| {
            log::warn!("creating the proxy overlay failed: {err:?}");
            self.placeholder.clone()
        })
    }

    fn set_id(&mut self, element: &Element, id: &str) {
        element.set_id(id);
    }

    fn append_child(&mut self, parent: &Element, child: &Element) {
        if let Err(err) = parent.append_child(child) {
            log::warn!("appending {child:?} to {parent:?} failed: {err:?}");
        }
    }

    fn attach_to_body(&mut self, element: &Element) {
        let Some(body) = self.document.body() else {
            log::warn!("document has no body; proxy stays detached");
            return;
        };
        match body.append_child(element) {
            Ok(_) => self.overlay = Some(element.clone()),
            Err(err) => log::warn!("attaching {element:?} to the body failed: {err:?}"),
        }
    }

    fn remove(&mut self, element: &Element) {
        if self.overlay.as_ref() == Some(element) {
            self.overlay = None;
        }
        element.remove();
    }

    fn listen_for_press(&mut self, element: &Element) {
        let (weak, window, target) = (
            self.controller.clone(),
            self.window.clone(),
            element.clone(),
        );
        let mouse = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let pointer = mouse_event(&window, &event);
            dispatch(&weak, &event, |dd| dd.pointer_down(&target, pointer));
        });

        let (weak, window, target) = (
            self.controller.clone(),
            self.window.clone(),
            element.clone(),
        );
        let touch = Closure::<dyn FnMut(TouchEvent)>::new(move |event: TouchEvent| {
            if let Some(pointer) = touch_event(&window, &event) {
                dispatch(&weak, &event, |dd| dd.pointer_down(&target, pointer));
            }
        });

        for (name, callback) in [
            ("mousedown", mouse.as_ref()),
            ("touchstart", touch.as_ref()),
        ] {
            if let Err(err) = element.add_event_listener_with_callback(name, callback.unchecked_ref()) {
                log::warn!("adding {name} listener to {element:?} failed: {err:?}");
            }
        }
        self.press_listeners.push(PressListener {
            element: element.clone(),
            mouse,
            touch,
        });
    }

    fn subscribe(&mut self, source: InputSource) -> WebSubscription {
        self.retired.clear();
        let names = listener_names(source);
        let mut listeners = Vec::with_capacity(3);
        listeners.push((names.moved, self.document_listener(source, DragDrop::pointer_move)));
        listeners.push((names.released, self.document_listener(source, DragDrop::pointer_up)));
        if let Some(cancelled) = names.cancelled {
            listeners.push((cancelled, self.document_listener(source, DragDrop::cancel)));
        }
        for (name, callback) in &listeners {
            if let Err(err) = self
                .document
                .add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())
            {
                log::warn!("adding document {name} listener failed: {err:?}");
            }
        }
        WebSubscription {
            source,
            document: self.document.clone(),
            listeners,
        }
    }

    fn unsubscribe(&mut self, mut subscription: WebSubscription) {
        self.retired.extend(subscription.detach());
    }
}
