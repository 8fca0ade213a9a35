//! The closed, versioned tag vocabulary.
//!
//! The vocabulary exists for validation and initialisation at the system
//! boundary: normalising raw catalogue strings into canonical [`Tag`]s and
//! seeding onboarding selections. Scoring never consults it: an unknown
//! tag simply reads as neutral.

use std::collections::BTreeMap;

use crate::tag::{Dimension, Tag};

/// Version of the built-in taxonomy. Bump when the tag lists change.
pub const VOCABULARY_VERSION: u16 = 1;

const STYLE: &[&str] = &[
    "minimalist",
    "bohemian",
    "streetwear",
    "classic",
    "romantic",
    "edgy",
    "preppy",
    "sporty",
    "vintage",
    "modern",
    "casual",
    "formal",
    "artsy",
    "glam",
    "scandinavian",
    "japanese",
    "french",
    "american",
];

const COLOR: &[&str] = &[
    "black",
    "white",
    "navy",
    "gray",
    "beige",
    "brown",
    "red",
    "pink",
    "blue",
    "green",
    "yellow",
    "orange",
    "purple",
    "multicolor",
    "neutral",
    "pastel",
    "earth",
];

const MATERIAL: &[&str] = &[
    "cotton", "denim", "leather", "silk", "wool", "linen", "polyester", "velvet", "knit", "fleece",
    "satin", "corduroy",
];

const OCCASION: &[&str] = &[
    "casual", "formal", "workout", "party", "office", "weekend", "travel", "date", "beach",
    "outdoor",
];

const CATEGORY: &[&str] = &[
    "tops",
    "bottoms",
    "dresses",
    "outerwear",
    "shoes",
    "accessories",
    "bags",
    "activewear",
    "swimwear",
    "loungewear",
];

const FIT: &[&str] = &[
    "slim",
    "oversized",
    "relaxed",
    "fitted",
    "high-waist",
    "low-rise",
    "cropped",
    "long",
    "short",
];

const PATTERN: &[&str] = &[
    "solid",
    "striped",
    "floral",
    "graphic",
    "plaid",
    "animal",
    "abstract",
    "geometric",
    "tie-dye",
];

/// Common catalogue spellings mapped onto their canonical tag.
const ALIASES: &[(&str, &str)] = &[
    ("grey", "gray"),
    ("dark", "black"),
    ("light", "white"),
    ("cream", "beige"),
    ("navy blue", "navy"),
    ("minimal", "minimalist"),
    ("street", "streetwear"),
    ("boho", "bohemian"),
    ("prep", "preppy"),
    ("sport", "sporty"),
    ("romance", "romantic"),
    ("top", "tops"),
    ("dress", "dresses"),
    ("bottom", "bottoms"),
    ("pant", "bottoms"),
    ("pants", "bottoms"),
    ("skirt", "bottoms"),
    ("coat", "outerwear"),
    ("jacket", "outerwear"),
    ("shoe", "shoes"),
    ("boot", "shoes"),
    ("sneaker", "shoes"),
    ("accessory", "accessories"),
    ("active", "activewear"),
    ("gym", "activewear"),
];

/// The closed set of valid taxonomy tags, grouped into dimensions.
///
/// # Examples
/// ```
/// use stylesense_core::{Dimension, TagVocabulary};
///
/// let vocabulary = TagVocabulary::builtin();
/// let tag = vocabulary.normalise("Jacket").expect("alias resolves");
/// assert_eq!(tag.as_str(), "outerwear");
/// assert_eq!(vocabulary.dimension_of(&tag), Some(Dimension::Category));
/// ```
#[derive(Debug, Clone)]
pub struct TagVocabulary {
    dimensions: BTreeMap<Tag, Dimension>,
    aliases: BTreeMap<String, Tag>,
}

impl TagVocabulary {
    /// Construct the built-in taxonomy.
    pub fn builtin() -> Self {
        let mut dimensions = BTreeMap::new();
        let groups: &[(Dimension, &[&str])] = &[
            (Dimension::Style, STYLE),
            (Dimension::Color, COLOR),
            (Dimension::Material, MATERIAL),
            (Dimension::Occasion, OCCASION),
            (Dimension::Category, CATEGORY),
            (Dimension::Fit, FIT),
            (Dimension::Pattern, PATTERN),
        ];
        for (dimension, values) in groups {
            for tag in values.iter().filter_map(|value| Tag::new(value).ok()) {
                // A value listed under several dimensions keeps the first.
                dimensions.entry(tag).or_insert(*dimension);
            }
        }

        let aliases = ALIASES
            .iter()
            .filter_map(|(raw, canonical)| {
                let tag = Tag::new(canonical).ok()?;
                dimensions
                    .contains_key(&tag)
                    .then(|| ((*raw).to_owned(), tag))
            })
            .collect();

        Self {
            dimensions,
            aliases,
        }
    }

    /// Version of this vocabulary.
    pub fn version(&self) -> u16 {
        VOCABULARY_VERSION
    }

    /// Report whether `tag` is a member of the closed vocabulary.
    pub fn contains(&self, tag: &Tag) -> bool {
        self.dimensions.contains_key(tag)
    }

    /// Return the dimension a vocabulary tag belongs to, if any.
    pub fn dimension_of(&self, tag: &Tag) -> Option<Dimension> {
        self.dimensions.get(tag).copied()
    }

    /// Normalise a raw catalogue string into a canonical vocabulary tag.
    ///
    /// Trims and lowercases, then resolves known aliases (`"jacket"` →
    /// `outerwear`). Strings outside the vocabulary yield `None`.
    pub fn normalise(&self, raw: &str) -> Option<Tag> {
        let tag = Tag::new(raw).ok()?;
        if self.dimensions.contains_key(&tag) {
            return Some(tag);
        }
        self.aliases.get(tag.as_str()).cloned()
    }

    /// Normalise a batch of raw strings, dropping unknowns and duplicates
    /// while preserving first-seen order.
    pub fn normalise_all<'a, I>(&self, raws: I) -> Vec<Tag>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = Vec::new();
        for raw in raws {
            if let Some(tag) = self.normalise(raw) {
                if !seen.contains(&tag) {
                    seen.push(tag);
                }
            }
        }
        seen
    }

    /// Number of canonical tags in the vocabulary.
    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    /// Report whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Iterate over the canonical tags of one dimension.
    pub fn tags_in(&self, dimension: Dimension) -> impl Iterator<Item = &Tag> {
        self.dimensions
            .iter()
            .filter(move |(_, d)| **d == dimension)
            .map(|(tag, _)| tag)
    }
}

impl Default for TagVocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn builtin_contains_canonical_tags() {
        let vocabulary = TagVocabulary::builtin();
        let tag = Tag::new("minimalist").unwrap();
        assert!(vocabulary.contains(&tag));
        assert_eq!(vocabulary.dimension_of(&tag), Some(Dimension::Style));
    }

    #[rstest]
    #[case("Jacket", "outerwear")]
    #[case("grey", "gray")]
    #[case("BOHO", "bohemian")]
    #[case("pants", "bottoms")]
    #[case("black", "black")]
    fn normalise_resolves_aliases_and_case(#[case] raw: &str, #[case] expected: &str) {
        let vocabulary = TagVocabulary::builtin();
        let tag = vocabulary.normalise(raw).unwrap();
        assert_eq!(tag.as_str(), expected);
    }

    #[rstest]
    #[case("spacesuit")]
    #[case("")]
    fn normalise_rejects_unknown(#[case] raw: &str) {
        let vocabulary = TagVocabulary::builtin();
        assert!(vocabulary.normalise(raw).is_none());
    }

    #[test]
    fn normalise_all_drops_unknowns_and_duplicates() {
        let vocabulary = TagVocabulary::builtin();
        let tags = vocabulary.normalise_all(["Jacket", "coat", "spacesuit", "black"]);
        let names: Vec<&str> = tags.iter().map(Tag::as_str).collect();
        assert_eq!(names, ["outerwear", "black"]);
    }

    #[test]
    fn ambiguous_value_keeps_first_dimension() {
        // `casual` is listed under both style and occasion.
        let vocabulary = TagVocabulary::builtin();
        let tag = Tag::new("casual").unwrap();
        assert_eq!(vocabulary.dimension_of(&tag), Some(Dimension::Style));
    }

    #[test]
    fn dimension_iteration_only_yields_members() {
        let vocabulary = TagVocabulary::builtin();
        assert!(
            vocabulary
                .tags_in(Dimension::Pattern)
                .all(|tag| vocabulary.dimension_of(tag) == Some(Dimension::Pattern))
        );
    }

    #[test]
    fn version_is_reported() {
        assert_eq!(TagVocabulary::builtin().version(), VOCABULARY_VERSION);
    }
}
