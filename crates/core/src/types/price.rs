//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price must be a number like 19.99")]
    Invalid,
    /// The value is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The value exceeds what the price column can hold.
    #[error("price must be at most 9999999999.99")]
    TooLarge,
}

/// A non-negative price stored with exactly two decimal places.
///
/// Prices are plain decimal amounts without a currency dimension; the
/// original application never attached one and rendering is left to the
/// frontend. The backing column is `NUMERIC(12, 2)`, so values are rounded
/// to cents on the way in and capped at `9999999999.99`.
///
/// ## Examples
///
/// ```
/// use wishbox_core::Price;
///
/// let price = Price::parse("199.99")?;
/// assert_eq!(price.to_string(), "199.99");
///
/// // Whole amounts gain the canonical two decimal places
/// assert_eq!(Price::parse("20")?.to_string(), "20.00");
///
/// assert!(Price::parse("-5").is_err());
/// assert!(Price::parse("free").is_err());
/// # Ok::<(), wishbox_core::PriceError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Number of decimal places a price is stored with.
    pub const SCALE: u32 = 2;

    /// Create a price from a decimal amount.
    ///
    /// The amount is rounded half-away-from-zero to two decimal places,
    /// matching what `NUMERIC(12, 2)` would do on insert.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for amounts below zero and
    /// [`PriceError::TooLarge`] for amounts over `9999999999.99`.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }

        let canonical = Self::canonicalize(amount);
        if canonical > Decimal::new(999_999_999_999, Self::SCALE) {
            return Err(PriceError::TooLarge);
        }

        Ok(Self(canonical))
    }

    /// Parse a `Price` from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not a decimal number,
    /// negative, or too large for the price column.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount: Decimal = trimmed.parse().map_err(|_| PriceError::Invalid)?;
        Self::new(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Round to cents and force exactly two decimal places.
    ///
    /// `round_dp` alone never widens the scale, so whole amounts would
    /// otherwise display as `"20"` rather than `"20.00"`.
    fn canonicalize(amount: Decimal) -> Decimal {
        let mut amount = if amount.is_zero() { Decimal::ZERO } else { amount };
        amount = amount.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(Self::SCALE);
        amount
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid; normalize the scale anyway
        Ok(Self(Self::canonicalize(amount)))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
