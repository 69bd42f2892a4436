#![forbid(unsafe_code)]

//! Accordion disclosure: at most one panel of a fixed set is open.
//!
//! ```text
//! closed-all --toggle(i)--> open(i)
//! open(i)    --toggle(i)--> closed-all
//! open(i)    --toggle(j)--> open(j)        (i != j)
//! ```
//!
//! Toggling an index outside the set is a caller bug. [`DisclosureSet::toggle`]
//! panics on it; [`DisclosureSet::try_toggle`] reports it instead.

use std::fmt;

/// Error returned by [`DisclosureSet::try_toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisclosureError {
    /// The index does not name a panel.
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of panels.
        len: usize,
    },
}

impl fmt::Display for DisclosureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "disclosure index {index} out of range for {len} panels")
            }
        }
    }
}

impl std::error::Error for DisclosureError {}

/// Panels affected by one toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisclosureTransition {
    /// Panel that became open, if any.
    pub opened: Option<usize>,
    /// Panel that became closed, if any.
    pub closed: Option<usize>,
}

/// A fixed-size accordion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisclosureSet {
    len: usize,
    open: Option<usize>,
}

impl DisclosureSet {
    /// Create a set of `len` panels, all closed.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    /// Toggle panel `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn toggle(&mut self, index: usize) -> DisclosureTransition {
        assert!(
            index < self.len,
            "disclosure index {index} out of range for {} panels",
            self.len
        );
        self.apply(index)
    }

    /// Toggle panel `index`, rejecting out-of-range indices.
    pub fn try_toggle(&mut self, index: usize) -> Result<DisclosureTransition, DisclosureError> {
        if index >= self.len {
            return Err(DisclosureError::OutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(self.apply(index))
    }

    fn apply(&mut self, index: usize) -> DisclosureTransition {
        let previous = self.open;
        let transition = if previous == Some(index) {
            self.open = None;
            DisclosureTransition {
                opened: None,
                closed: Some(index),
            }
        } else {
            self.open = Some(index);
            DisclosureTransition {
                opened: Some(index),
                closed: previous,
            }
        };
        crate::debug!(
            index,
            open = ?self.open,
            "disclosure toggled"
        );
        transition
    }

    /// Close whatever is open.
    pub fn close_all(&mut self) -> Option<usize> {
        self.open.take()
    }

    /// The open panel, if any.
    #[must_use]
    pub const fn open_index(&self) -> Option<usize> {
        self.open
    }

    /// Whether panel `index` is open.
    #[must_use]
    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// Number of panels.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the set has no panels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}
