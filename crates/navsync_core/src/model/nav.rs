//! Navigation item and state records.
//!
//! # Responsibility
//! - Define the configured navigation list and its validation rules.
//! - Define the observation snapshot and the externally visible state.
//!
//! # Invariants
//! - `NavItems` is never empty and never holds blank or duplicate ids.
//! - List order is display order and the tie-break order for activation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One navigation target (a page section plus its button label).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Stable section id; also the DOM id of the section in a browser host.
    pub id: String,
    /// Button label shown by the presentation layer.
    pub label: String,
}

impl NavItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Validated, ordered navigation list.
///
/// Serialized as a plain array of items; deserialization runs the same
/// validation as [`NavItems::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<NavItem>", into = "Vec<NavItem>")]
pub struct NavItems {
    items: Vec<NavItem>,
}

impl NavItems {
    /// Builds a navigation list.
    ///
    /// # Errors
    /// - `Empty` when no items are given.
    /// - `BlankId` when an id is empty or whitespace-only.
    /// - `DuplicateId` when two items share an id.
    pub fn new(items: Vec<NavItem>) -> Result<Self, NavItemsError> {
        if items.is_empty() {
            return Err(NavItemsError::Empty);
        }

        let mut seen = BTreeSet::<&str>::new();
        for (index, item) in items.iter().enumerate() {
            if item.id.trim().is_empty() {
                return Err(NavItemsError::BlankId { index });
            }
            if !seen.insert(item.id.as_str()) {
                return Err(NavItemsError::DuplicateId(item.id.clone()));
            }
        }

        Ok(Self { items })
    }

    /// The portfolio's stock section list.
    pub fn portfolio_default() -> Self {
        Self {
            items: vec![
                NavItem::new("home", "Home"),
                NavItem::new("featured", "Feature"),
                NavItem::new("skills", "Skills"),
                NavItem::new("experience", "Experience"),
                NavItem::new("projects", "Projects"),
            ],
        }
    }

    /// Id of the first item, the initial active id.
    pub fn first_id(&self) -> &str {
        // Non-empty by construction.
        self.items[0].id.as_str()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Display-order index of `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&NavItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NavItem> {
        self.items.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for NavItems {
    fn default() -> Self {
        Self::portfolio_default()
    }
}

impl TryFrom<Vec<NavItem>> for NavItems {
    type Error = NavItemsError;

    fn try_from(value: Vec<NavItem>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NavItems> for Vec<NavItem> {
    fn from(value: NavItems) -> Self {
        value.items
    }
}

/// Navigation list validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavItemsError {
    Empty,
    BlankId { index: usize },
    DuplicateId(String),
}

impl Display for NavItemsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "navigation list must contain at least one item"),
            Self::BlankId { index } => write!(f, "navigation item #{index} has a blank id"),
            Self::DuplicateId(value) => write!(f, "navigation id is duplicated: {value}"),
        }
    }
}

impl Error for NavItemsError {}

/// One tracked region's visibility against the focus band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionObservation {
    /// Region id (matches a `NavItem::id`).
    pub id: String,
    /// Whether the region currently crosses the focus band.
    pub intersecting: bool,
    /// Region top edge relative to the focus band's top boundary.
    /// Negative values lie above the boundary.
    pub top_offset: f64,
}

impl SectionObservation {
    pub fn new(id: impl Into<String>, intersecting: bool, top_offset: f64) -> Self {
        Self {
            id: id.into(),
            intersecting,
            top_offset,
        }
    }
}

/// Externally observable navigation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveState {
    /// Highlighted nav item id; always a configured id.
    pub active_id: String,
    /// Page scroll progress in `[0, 100]`.
    pub scroll_progress: f64,
}
