//! Share slug type for public wishlist links.

use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ShareSlug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShareSlugError {
    /// The input is not exactly [`ShareSlug::LENGTH`] characters.
    #[error("share slug must be exactly {expected} characters")]
    WrongLength {
        /// Required length.
        expected: usize,
    },
    /// The input contains a character outside `[a-z0-9]`.
    #[error("share slug may only contain lowercase letters and digits")]
    InvalidCharacter,
}

/// A short random identifier granting read-only access to a wishlist.
///
/// Slugs are 12 characters drawn from `[a-z0-9]`, generated from the OS
/// randomness source. Uniqueness is enforced by the database; callers retry
/// generation on a unique-key conflict. Regenerating a wishlist's slug
/// invalidates any previously shared link.
///
/// ## Examples
///
/// ```
/// use wishbox_core::ShareSlug;
///
/// assert!(ShareSlug::parse("k3qz81mw0f7a").is_ok());
/// assert!(ShareSlug::parse("too-short").is_err());
/// assert!(ShareSlug::parse("HASUPPERCASE").is_err());
///
/// let slug = ShareSlug::generate();
/// assert_eq!(slug.as_str().len(), 12);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ShareSlug(String);

impl ShareSlug {
    /// Length of a share slug in characters.
    pub const LENGTH: usize = 12;

    /// Characters a slug is drawn from.
    const CHARSET: &'static [u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

    /// Generate a new random slug.
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let slug = (0..Self::LENGTH)
            .map(|_| {
                let idx = rng.random_range(0..Self::CHARSET.len());
                // SAFETY: idx is always within bounds since random_range returns 0..CHARSET.len()
                char::from(*Self::CHARSET.get(idx).expect("idx within bounds"))
            })
            .collect();
        Self(slug)
    }

    /// Parse a `ShareSlug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is not exactly 12 characters
    /// - Contains anything other than ASCII lowercase letters or digits
    pub fn parse(s: &str) -> Result<Self, ShareSlugError> {
        if s.len() != Self::LENGTH {
            return Err(ShareSlugError::WrongLength {
                expected: Self::LENGTH,
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        {
            return Err(ShareSlugError::InvalidCharacter);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ShareSlug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ShareSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ShareSlug {
    type Err = ShareSlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ShareSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for ShareSlug {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for ShareSlug {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for ShareSlug {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_length_and_charset() {
        for _ in 0..50 {
            let slug = ShareSlug::generate();
            assert_eq!(slug.as_str().len(), ShareSlug::LENGTH);
            assert!(
                slug.as_str()
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
            );
        }
    }

    #[test]
    fn test_generate_parses_back() {
        let slug = ShareSlug::generate();
        assert_eq!(ShareSlug::parse(slug.as_str()).unwrap(), slug);
    }

    #[test]
    fn test_parse_valid() {
        assert!(ShareSlug::parse("abc123def456").is_ok());
        assert!(ShareSlug::parse("000000000000").is_ok());
        assert!(ShareSlug::parse("zzzzzzzzzzzz").is_ok());
    }

    #[test]
    fn test_parse_wrong_length() {
        assert!(matches!(
            ShareSlug::parse(""),
            Err(ShareSlugError::WrongLength { expected: 12 })
        ));
        assert!(matches!(
            ShareSlug::parse("abc"),
            Err(ShareSlugError::WrongLength { expected: 12 })
        ));
        assert!(matches!(
            ShareSlug::parse("abc123def4567"),
            Err(ShareSlugError::WrongLength { expected: 12 })
        ));
    }

    #[test]
    fn test_parse_invalid_characters() {
        assert!(matches!(
            ShareSlug::parse("ABC123DEF456"),
            Err(ShareSlugError::InvalidCharacter)
        ));
        assert!(matches!(
            ShareSlug::parse("abc123-ef456"),
            Err(ShareSlugError::InvalidCharacter)
        ));
        assert!(matches!(
            ShareSlug::parse("abc123 ef456"),
            Err(ShareSlugError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let slug = ShareSlug::parse("abc123def456").unwrap();
        let json = serde_json::to_string(&slug).unwrap();
        assert_eq!(json, "\"abc123def456\"");

        let parsed: ShareSlug = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, slug);
    }

    #[test]
    fn test_from_str() {
        let slug: ShareSlug = "abc123def456".parse().unwrap();
        assert_eq!(slug.as_str(), "abc123def456");
    }
}
