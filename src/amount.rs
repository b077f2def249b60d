use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{PromptPayError, Result};
use crate::protocol::fields::{AMOUNT_MAX_LEN, AMOUNT_TAG};

/// Fraction digits carried by every EMV amount.
const AMOUNT_SCALE: u32 = 2;

/// A validated transaction amount, rounded half-to-even to two places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(PromptPayError::InvalidAmount);
        }
        let mut rounded =
            value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(AMOUNT_SCALE);
        // -0.00 would otherwise print with a sign
        rounded.set_sign_positive(true);

        let amount = Self(rounded);
        if amount.to_string().len() > AMOUNT_MAX_LEN {
            return Err(PromptPayError::InvalidAmount);
        }
        Ok(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Tag 54 block: tag, 2-digit length, then the formatted value.
    pub fn to_field(&self) -> String {
        let value = self.to_string();
        format!("{}{:02}{}", AMOUNT_TAG, value.len(), value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PromptPayError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}
