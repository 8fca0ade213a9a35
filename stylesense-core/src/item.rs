//! Catalogue items presented to users for swiping and ranking.

use std::fmt;

use crate::tag::Tag;

/// Opaque identifier of a catalogue item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ItemId(String);

impl ItemId {
    /// Wrap an opaque item identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Presentation metadata carried alongside an item.
///
/// None of these fields participate in scoring; they exist so ranked
/// results can be rendered without a second catalogue round trip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemMetadata {
    /// Display title.
    pub title: String,
    /// Brand or source attribution.
    pub brand: String,
    /// Location of the presentation image.
    pub image_url: String,
    /// Display price, already formatted by the catalogue.
    pub price: String,
    /// Outbound purchase link, empty for inspiration-only items.
    pub buy_url: String,
}

/// An immutable catalogue record: identity, tags, and display metadata.
///
/// Items are read-only to the engine; creation and deletion belong to the
/// external catalogue. Tags ideally come from the vocabulary, but
/// unrecognised tags are tolerated and score as neutral.
///
/// # Examples
/// ```
/// use stylesense_core::{Item, ItemId, Tag};
///
/// let item = Item::tagged(ItemId::new("i-1"), vec![Tag::new("denim")?]);
/// assert_eq!(item.id.as_str(), "i-1");
/// assert_eq!(item.tags.len(), 1);
/// # Ok::<(), stylesense_core::InvalidTagError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Unique identifier.
    pub id: ItemId,
    /// Taxonomy tags captured by the catalogue.
    pub tags: Vec<Tag>,
    /// Presentation fields, irrelevant to scoring.
    pub metadata: ItemMetadata,
}

impl Item {
    /// Construct an item with tags and metadata.
    pub fn new(id: ItemId, tags: Vec<Tag>, metadata: ItemMetadata) -> Self {
        Self { id, tags, metadata }
    }

    /// Construct an item with tags and default metadata.
    pub fn tagged(id: ItemId, tags: Vec<Tag>) -> Self {
        Self::new(id, tags, ItemMetadata::default())
    }

    /// Construct an item without tags.
    pub fn untagged(id: ItemId) -> Self {
        Self::tagged(id, Vec::new())
    }
}
