// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller configuration and drop-target feedback styles.

use alloc::borrow::Cow;
use core::fmt;

/// An sRGB color written as a CSS hex literal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// CSS border line style.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BorderLine {
    /// `none`
    None,
    /// `solid`
    #[default]
    Solid,
    /// `dashed`
    Dashed,
    /// `dotted`
    Dotted,
    /// `double`
    Double,
}

impl fmt::Display for BorderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Double => "double",
        })
    }
}

/// A border applied to droppable elements as hover feedback.
///
/// Displays as a CSS `border` shorthand:
///
/// ```
/// use understory_drag_drop::BorderEffect;
///
/// assert_eq!(BorderEffect::HOVER.to_string(), "1px solid #1DACDA");
/// assert_eq!(BorderEffect::IDLE.to_string(), "1px solid #CCCCCC");
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BorderEffect {
    /// Border width in CSS pixels.
    pub width: f64,
    /// Line style.
    pub line: BorderLine,
    /// Line color.
    pub color: Rgb,
}

impl BorderEffect {
    /// Default border for the droppable currently under the pointer.
    pub const HOVER: Self = Self::solid(1.0, Rgb(0x1D, 0xAC, 0xDA));
    /// Default border for droppables not under the pointer.
    pub const IDLE: Self = Self::solid(1.0, Rgb(0xCC, 0xCC, 0xCC));

    /// A solid border.
    #[must_use]
    pub const fn solid(width: f64, color: Rgb) -> Self {
        Self {
            width,
            line: BorderLine::Solid,
            color,
        }
    }
}

impl fmt::Display for BorderEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {} {}", self.width, self.line, self.color)
    }
}

/// Default delay before a stationary touch counts as a long-press, in milliseconds.
pub const DEFAULT_LONG_PRESS_DELAY: u64 = 500;

/// Default proxy opacity.
pub const DEFAULT_PROXY_OPACITY: f64 = 0.75;

/// Default id given to the proxy overlay element.
pub const DEFAULT_PROXY_ID: &str = "drag-proxy";

/// Tunables for a [`DragDrop`](crate::DragDrop) controller.
///
/// ```
/// use understory_drag_drop::{BorderEffect, DragDropConfig, Rgb};
///
/// let config = DragDropConfig::default()
///     .with_monitor_during_drag(true)
///     .with_long_press_delay(800)
///     .with_hover_effect(BorderEffect::solid(2.0, Rgb(0xFF, 0x88, 0x00)));
///
/// assert!(config.monitor_during_drag);
/// assert_eq!(config.long_press_delay, 800);
/// assert_eq!(config.idle_effect, BorderEffect::IDLE);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DragDropConfig {
    /// Hit-test droppables on every move (`true`) or only at release (`false`).
    ///
    /// Monitoring enables live hover feedback and gives
    /// [`on_drag_move`](crate::DragDrop::on_drag_move) an up-to-date drop
    /// target, at the cost of one rectangle query per droppable per move.
    pub monitor_during_drag: bool,
    /// Time a touch must stay still and pressed before the long-press fires.
    pub long_press_delay: u64,
    /// Border applied to the droppable under the pointer.
    pub hover_effect: BorderEffect,
    /// Border applied to every other droppable, and to all of them once a drag ends.
    pub idle_effect: BorderEffect,
    /// Opacity of the floating proxy.
    pub proxy_opacity: f64,
    /// Id given to the proxy overlay element, if any.
    pub proxy_id: Option<Cow<'static, str>>,
}

impl Default for DragDropConfig {
    fn default() -> Self {
        Self {
            monitor_during_drag: false,
            long_press_delay: DEFAULT_LONG_PRESS_DELAY,
            hover_effect: BorderEffect::HOVER,
            idle_effect: BorderEffect::IDLE,
            proxy_opacity: DEFAULT_PROXY_OPACITY,
            proxy_id: Some(Cow::Borrowed(DEFAULT_PROXY_ID)),
        }
    }
}

impl DragDropConfig {
    /// Sets [`monitor_during_drag`](Self::monitor_during_drag).
    #[must_use]
    pub fn with_monitor_during_drag(mut self, monitor: bool) -> Self {
        self.monitor_during_drag = monitor;
        self
    }

    /// Sets [`long_press_delay`](Self::long_press_delay).
    #[must_use]
    pub fn with_long_press_delay(mut self, delay: u64) -> Self {
        self.long_press_delay = delay;
        self
    }

    /// Sets [`hover_effect`](Self::hover_effect).
    #[must_use]
    pub fn with_hover_effect(mut self, effect: BorderEffect) -> Self {
        self.hover_effect = effect;
        self
    }

    /// Sets [`idle_effect`](Self::idle_effect).
    #[must_use]
    pub fn with_idle_effect(mut self, effect: BorderEffect) -> Self {
        self.idle_effect = effect;
        self
    }

    /// Sets [`proxy_opacity`](Self::proxy_opacity).
    #[must_use]
    pub fn with_proxy_opacity(mut self, opacity: f64) -> Self {
        self.proxy_opacity = opacity;
        self
    }

    /// Sets [`proxy_id`](Self::proxy_id).
    #[must_use]
    pub fn with_proxy_id(mut self, id: Option<Cow<'static, str>>) -> Self {
        self.proxy_id = id;
        self
    }
}
