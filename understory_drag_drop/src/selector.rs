// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registration targets: element handles or simple `.class` / `#id` selectors.
//!
//! Only the two single-token selector forms are understood. Anything else is
//! rejected with a [`SelectorError`] so that a typo never silently registers
//! nothing.

use alloc::string::{String, ToString};
use core::fmt;

/// A parsed selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selector<'a> {
    /// `.name`: every element carrying the class `name`.
    Class(&'a str),
    /// `#name`: the element whose id is `name`.
    Id(&'a str),
}

impl<'a> Selector<'a> {
    /// Parses `.class` or `#id`.
    ///
    /// ```
    /// use understory_drag_drop::{Selector, SelectorError};
    ///
    /// assert_eq!(Selector::parse(".card"), Ok(Selector::Class("card")));
    /// assert_eq!(Selector::parse("#bin"), Ok(Selector::Id("bin")));
    /// assert!(matches!(Selector::parse("div"), Err(SelectorError::UnrecognizedPrefix(_))));
    /// ```
    pub fn parse(input: &'a str) -> Result<Self, SelectorError> {
        let selector = if let Some(name) = input.strip_prefix('.') {
            Self::Class(name)
        } else if let Some(name) = input.strip_prefix('#') {
            Self::Id(name)
        } else if input.is_empty() {
            return Err(SelectorError::Empty(String::new()));
        } else {
            return Err(SelectorError::UnrecognizedPrefix(input.to_string()));
        };
        if selector.name().is_empty() {
            return Err(SelectorError::Empty(input.to_string()));
        }
        Ok(selector)
    }

    /// Returns the class or id name without its prefix.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        match self {
            Self::Class(name) | Self::Id(name) => name,
        }
    }
}

impl fmt::Display for Selector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(name) => write!(f, ".{name}"),
            Self::Id(name) => write!(f, "#{name}"),
        }
    }
}

/// Error returned for a selector that cannot be resolved.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// The selector starts with neither `.` nor `#`.
    #[error("unrecognized selector {0:?}: expected `.class` or `#id`")]
    UnrecognizedPrefix(String),
    /// The selector is empty or consists of a bare prefix.
    #[error("selector {0:?} names no class or id")]
    Empty(String),
}

/// One entry of a registration call.
///
/// ```
/// use understory_drag_drop::Target;
///
/// let targets: [Target<'_, u32>; 2] = [Target::selector(".card"), Target::element(7)];
/// assert_eq!(targets[1], Target::Element(7));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target<'a, E> {
    /// A selector string, resolved through [`Host::find`](crate::Host::find).
    Selector(&'a str),
    /// A direct element handle.
    Element(E),
}

impl<'a, E> Target<'a, E> {
    /// A selector target.
    #[must_use]
    pub const fn selector(selector: &'a str) -> Self {
        Self::Selector(selector)
    }

    /// An element target.
    #[must_use]
    pub const fn element(element: E) -> Self {
        Self::Element(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_class_and_id() {
        assert_eq!(Selector::parse(".item"), Ok(Selector::Class("item")));
        assert_eq!(Selector::parse("#zone"), Ok(Selector::Id("zone")));
        assert_eq!(Selector::Class("item").name(), "item");
    }

    #[test]
    fn rejects_unknown_prefix() {
        assert_eq!(
            Selector::parse("li"),
            Err(SelectorError::UnrecognizedPrefix("li".to_string()))
        );
        assert_eq!(
            Selector::parse("[data-x]"),
            Err(SelectorError::UnrecognizedPrefix("[data-x]".to_string()))
        );
    }

    #[test]
    fn rejects_empty_names() {
        assert_eq!(Selector::parse(""), Err(SelectorError::Empty(String::new())));
        assert_eq!(Selector::parse("."), Err(SelectorError::Empty(".".to_string())));
        assert_eq!(Selector::parse("#"), Err(SelectorError::Empty("#".to_string())));
    }

    #[test]
    fn display_round_trips_prefix() {
        assert_eq!(Selector::Class("a").to_string(), ".a");
        assert_eq!(Selector::Id("b").to_string(), "#b");
    }
}
