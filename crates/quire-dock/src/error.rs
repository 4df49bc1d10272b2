//! Error types for the docking engine.
//!
//! Both enums describe programmer errors: malformed descriptions and actions
//! that point at nodes or tabs that do not exist. Geometric misses and
//! degenerate resizes are not errors and never show up here.

use crate::address::Address;
use crate::node::{Orientation, TabId};

/// Errors returned by the reducer and the resize calculator.
#[derive(Debug, Clone, PartialEq)]
pub enum DockError {
    /// An index in the address does not exist in the snapshot.
    ///
    /// `depth` is the position inside `address` of the first bad index.
    AddressOutOfRange { address: Address, depth: usize },
    /// The address resolves to a window where a panel was required.
    NotAPanel(Address),
    /// The address resolves to a panel where a window was required.
    NotAWindow(Address),
    /// Split target must be a window or the root.
    NotWindowOrRoot(Address),
    /// The tab is not present anywhere in the tree.
    UnknownTab(TabId),
    /// The tab exists but not in the window the action named.
    TabNotInWindow { tab: TabId, window: Address },
    /// The tab id is already used elsewhere in the tree or registry.
    DuplicateTab(TabId),
    /// A weight vector does not have one entry per child.
    WeightCountMismatch { expected: usize, found: usize },
    /// Weights must be finite and positive, or all zero.
    InvalidWeight { index: usize, value: f64 },
    /// `InsertPanel` splices at `index + 1`, which must be at most `len`.
    InsertIndexOutOfRange { index: usize, len: usize },
    /// The orientation supplied with a split does not match the snapshot.
    ///
    /// `expected` is the enclosing panel's orientation, `found` the action's.
    OrientationMismatch {
        expected: Orientation,
        found: Orientation,
    },
    /// A resize handle sits between sibling `handle` and `handle + 1`.
    HandleOutOfRange { handle: usize, len: usize },
}

impl std::fmt::Display for DockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DockError::AddressOutOfRange { address, depth } => {
                write!(f, "Address {} is out of range at depth {}", address, depth)
            }
            DockError::NotAPanel(address) => write!(f, "Node at {} is not a panel", address),
            DockError::NotAWindow(address) => write!(f, "Node at {} is not a window", address),
            DockError::NotWindowOrRoot(address) => {
                write!(f, "Node at {} is neither a window nor the root", address)
            }
            DockError::UnknownTab(tab) => write!(f, "Tab '{}' not found", tab),
            DockError::TabNotInWindow { tab, window } => {
                write!(f, "Tab '{}' is not in the window at {}", tab, window)
            }
            DockError::DuplicateTab(tab) => write!(f, "Tab '{}' already exists", tab),
            DockError::WeightCountMismatch { expected, found } => {
                write!(f, "Expected {} weights, found {}", expected, found)
            }
            DockError::InvalidWeight { index, value } => {
                write!(f, "Weight {} at index {} is not a finite positive number", value, index)
            }
            DockError::InsertIndexOutOfRange { index, len } => {
                write!(f, "Cannot insert after index {} in a panel with {} children", index, len)
            }
            DockError::OrientationMismatch { expected, found } => {
                write!(f, "Enclosing panel is {:?}, action assumed {:?}", expected, found)
            }
            DockError::HandleOutOfRange { handle, len } => {
                write!(f, "Resize handle {} does not exist between {} panes", handle, len)
            }
        }
    }
}

impl std::error::Error for DockError {}

/// Result type for dock operations.
pub type DockResult<T> = Result<T, DockError>;

/// Errors returned while turning a declarative description into a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SerializeError {
    /// An element appeared where its kind is not allowed.
    UnexpectedChild {
        parent: &'static str,
        found: &'static str,
    },
    /// A tab was declared with an empty id.
    MissingTabId,
    /// The same tab id was declared twice.
    DuplicateTabId(TabId),
    /// A window's `selected` index does not name one of its tabs.
    SelectedOutOfRange { selected: usize, len: usize },
    /// A window was declared without tabs.
    EmptyWindow,
    /// Sizes must be finite and strictly positive.
    InvalidSize(f64),
}

impl std::fmt::Display for SerializeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerializeError::UnexpectedChild { parent, found } => {
                write!(f, "A {} cannot contain a {}", parent, found)
            }
            SerializeError::MissingTabId => write!(f, "Tab id must not be empty"),
            SerializeError::DuplicateTabId(tab) => write!(f, "Tab id '{}' is declared twice", tab),
            SerializeError::SelectedOutOfRange { selected, len } => {
                write!(f, "Selected index {} is out of range for {} tabs", selected, len)
            }
            SerializeError::EmptyWindow => write!(f, "Window has no tabs"),
            SerializeError::InvalidSize(size) => write!(f, "Size {} must be positive", size),
        }
    }
}

impl std::error::Error for SerializeError {}
