//! URL slugs identifying projects and forum posts.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, hyphens, and underscores.

use std::fmt;

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Maximum accepted slug length.
pub const SLUG_MAX: usize = 200;
/// Maximum length of a slug derived from a display name, before any suffix.
pub const DERIVED_SLUG_MAX: usize = 50;
/// Length of the random suffix appended to colliding derived slugs.
pub const SLUG_SUFFIX_LEN: usize = 6;

/// Validation errors returned by [`Slug::parse`] and [`Slug::derive`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugValidationError {
    #[error("slug must not be empty")]
    Empty,
    #[error("slug must be at most {max} characters")]
    TooLong { max: usize },
    #[error("slug may only contain lowercase letters, digits, '-' or '_'")]
    InvalidCharacters,
}

/// Validated slug.
///
/// # Examples
/// ```
/// use devhunt::domain::Slug;
///
/// let slug = Slug::parse("code-craft").expect("valid slug");
/// assert_eq!(slug.as_ref(), "code-craft");
/// assert!(Slug::parse("Code Craft").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slug(String);

impl Slug {
    /// Validate an inbound slug such as a path segment.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, SlugValidationError> {
        let value = value.as_ref();
        if value.is_empty() || value.trim() != value {
            return Err(SlugValidationError::Empty);
        }
        if value.chars().count() > SLUG_MAX {
            return Err(SlugValidationError::TooLong { max: SLUG_MAX });
        }
        if !value.chars().all(is_slug_char) {
            return Err(SlugValidationError::InvalidCharacters);
        }
        Ok(Self(value.to_owned()))
    }

    /// Derive a slug from a human-readable name.
    ///
    /// Lowercases the name, drops anything that is not a word character or
    /// whitespace, turns whitespace runs into `-`, and truncates to
    /// [`DERIVED_SLUG_MAX`] characters.
    ///
    /// # Examples
    /// ```
    /// use devhunt::domain::Slug;
    ///
    /// let slug = Slug::derive("Code Craft: v2!").expect("derivable");
    /// assert_eq!(slug.as_ref(), "code-craft-v2");
    /// ```
    pub fn derive(name: &str) -> Result<Self, SlugValidationError> {
        let lowered = name.trim().to_lowercase();
        let mut derived = String::with_capacity(lowered.len());
        let mut pending_dash = false;
        for ch in lowered.chars() {
            if ch.is_whitespace() {
                pending_dash = true;
                continue;
            }
            if !(ch.is_ascii_alphanumeric() || ch == '_') {
                continue;
            }
            if pending_dash && !derived.is_empty() {
                derived.push('-');
            }
            pending_dash = false;
            derived.push(ch);
        }
        let truncated: String = derived.chars().take(DERIVED_SLUG_MAX).collect();
        Self::parse(truncated.trim_end_matches('-'))
    }

    /// Append `-` and a random lowercase alphanumeric suffix.
    #[must_use]
    pub fn with_random_suffix<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let suffix: String = std::iter::repeat_with(|| rng.sample(Alphanumeric))
            .take(SLUG_SUFFIX_LEN)
            .map(|byte| char::from(byte).to_ascii_lowercase())
            .collect();
        Self(format!("{}-{suffix}", self.0))
    }
}

fn is_slug_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_'
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}
