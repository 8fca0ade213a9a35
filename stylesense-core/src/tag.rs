//! Taxonomy tags and the dimensions that group them.
//!
//! A [`Tag`] is an atomic label such as `minimalist` or `black`. Tags are
//! stored lowercased and trimmed so lookups are case-insensitive at the
//! boundary. Construction only enforces shape; membership of the closed
//! vocabulary is checked by [`TagVocabulary`](crate::TagVocabulary), and
//! scoring deliberately tolerates tags outside it.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// An atomic taxonomy label attachable to items and affinity profiles.
///
/// # Examples
/// ```
/// use stylesense_core::Tag;
///
/// let tag: Tag = " Minimalist ".parse()?;
/// assert_eq!(tag.as_str(), "minimalist");
/// # Ok::<(), stylesense_core::InvalidTagError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Tag(String);

/// Error returned when a tag string is empty after normalisation.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("tag must contain at least one non-whitespace character")]
pub struct InvalidTagError;

impl Tag {
    /// Normalise and construct a tag.
    ///
    /// Input is trimmed and lowercased. Only emptiness is rejected here;
    /// vocabulary membership is a separate, boundary-level concern.
    ///
    /// # Errors
    /// Returns [`InvalidTagError`] when the input is empty or whitespace.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, InvalidTagError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(InvalidTagError);
        }
        Ok(Self(normalised))
    }

    /// Return the tag as a lowercase `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Tag {
    type Err = InvalidTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Dimensions grouping the taxonomy into broad facets.
///
/// The enum offers compile-time safety for vocabulary lookups.
///
/// # Examples
/// ```
/// use stylesense_core::Dimension;
///
/// assert_eq!(Dimension::Style.as_str(), "style");
/// assert_eq!(Dimension::Color.to_string(), "color");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Overall aesthetic, e.g. `minimalist` or `streetwear`.
    Style,
    /// Dominant colours.
    Color,
    /// Fabric or construction material.
    Material,
    /// Wearing occasion.
    Occasion,
    /// Garment category, e.g. `tops` or `outerwear`.
    Category,
    /// Cut and silhouette.
    Fit,
    /// Surface pattern.
    Pattern,
}

impl Dimension {
    /// Return the dimension as a lowercase `&str`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Style => "style",
            Self::Color => "color",
            Self::Material => "material",
            Self::Occasion => "occasion",
            Self::Category => "category",
            Self::Fit => "fit",
            Self::Pattern => "pattern",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "style" => Ok(Self::Style),
            "color" => Ok(Self::Color),
            "material" => Ok(Self::Material),
            "occasion" => Ok(Self::Occasion),
            "category" => Ok(Self::Category),
            "fit" => Ok(Self::Fit),
            "pattern" => Ok(Self::Pattern),
            _ => Err(format!("unknown dimension '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("minimalist", "minimalist")]
    #[case(" Black ", "black")]
    #[case("TIE-DYE", "tie-dye")]
    fn tag_normalises_case_and_whitespace(#[case] raw: &str, #[case] expected: &str) {
        let tag = Tag::new(raw).unwrap();
        assert_eq!(tag.as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn tag_rejects_empty_input(#[case] raw: &str) {
        assert_eq!(Tag::new(raw), Err(InvalidTagError));
    }

    #[test]
    fn display_matches_as_str() {
        let tag = Tag::new("denim").unwrap();
        assert_eq!(tag.to_string(), tag.as_str());
        assert_eq!(Dimension::Fit.to_string(), Dimension::Fit.as_str());
    }

    #[test]
    fn dimension_parsing_rejects_unknown() {
        let err = Dimension::from_str("era").unwrap_err();
        assert!(err.contains("unknown dimension"));
    }

    #[test]
    fn tags_order_lexicographically() {
        let abc = Tag::new("abc").unwrap();
        let xyz = Tag::new("xyz").unwrap();
        assert!(abc < xyz);
    }
}
