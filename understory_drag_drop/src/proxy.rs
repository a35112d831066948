// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Proxy factory: the floating copy of a dragged element.
//!
//! The proxy is a deep clone of the source wrapped in a fixed-position overlay.
//! Because a detached clone loses whatever styling it inherited from its place
//! in the document, a fixed set of computed properties
//! ([`PROXY_STYLE_PROPERTIES`]) is copied from the source onto the clone and
//! onto each of the clone's direct element children. Deeper descendants are
//! not reconciled.
//!
//! The overlay starts hidden; the controller shows and positions it on the
//! first pointer move.

use alloc::format;
use alloc::string::String;

use kurbo::Point;

use crate::config::DragDropConfig;
use crate::host::{ChildNode, Host};

/// Computed properties copied from the source onto the proxy, in CSS naming.
pub const PROXY_STYLE_PROPERTIES: [&str; 12] = [
    "width",
    "height",
    "border",
    "font-size",
    "color",
    "border-color",
    "padding",
    "vertical-align",
    "margin",
    "white-space",
    "list-style",
    "line-height",
];

/// Formats a CSS pixel length.
#[must_use]
pub fn format_px(value: f64) -> String {
    format!("{value}px")
}

/// Builds a hidden proxy overlay for `source` and attaches it to the body.
///
/// Ownership of the returned overlay passes to the caller, which must
/// [`Host::remove`] it when the drag ends.
pub fn create<H: Host>(host: &mut H, source: &H::Element, config: &DragDropConfig) -> H::Element {
    let clone = host.deep_clone(source);

    let source_children = host.child_nodes(source);
    let clone_children = host.child_nodes(&clone);
    for (from, to) in source_children.iter().zip(&clone_children) {
        if let (ChildNode::Element(from), ChildNode::Element(to)) = (from, to) {
            copy_styles(host, from, to);
        }
    }
    copy_styles(host, source, &clone);

    let overlay = host.create_overlay();
    let opacity = format!("{}", config.proxy_opacity);
    for (property, value) in [
        ("position", "fixed"),
        ("opacity", opacity.as_str()),
        ("pointer-events", "none"),
        ("display", "none"),
    ] {
        host.set_style(&overlay, &H::PROPERTY_CASE.apply(property), value);
    }
    if let Some(id) = &config.proxy_id {
        host.set_id(&overlay, id);
    }
    host.append_child(&overlay, &clone);
    host.attach_to_body(&overlay);
    overlay
}

/// Copies [`PROXY_STYLE_PROPERTIES`] from `from`'s computed style onto `to`.
///
/// Empty computed values are written as `none`.
pub fn copy_styles<H: Host>(host: &mut H, from: &H::Element, to: &H::Element) {
    for property in PROXY_STYLE_PROPERTIES {
        let mut value = host.computed_style(from, property);
        if value.is_empty() {
            value.push_str("none");
        }
        host.set_style(to, &H::PROPERTY_CASE.apply(property), &value);
    }
}

/// Makes the proxy visible with its top-left corner at `origin`.
pub fn show_at<H: Host>(host: &mut H, proxy: &H::Element, origin: Point) {
    host.set_style(proxy, "display", "block");
    host.set_style(proxy, "top", &format_px(origin.y));
    host.set_style(proxy, "left", &format_px(origin.x));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_formatting() {
        assert_eq!(format_px(50.0), "50px");
        assert_eq!(format_px(-12.5), "-12.5px");
        assert_eq!(format_px(0.0), "0px");
    }

    #[test]
    fn whitelist_is_kebab_case() {
        for property in PROXY_STYLE_PROPERTIES {
            assert!(
                property.chars().all(|c| c.is_ascii_lowercase() || c == '-'),
                "{property} is not a CSS property name"
            );
        }
    }
}
