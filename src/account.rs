use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{PromptPayError, Result};
use crate::protocol::fields::{ACCOUNT_PREFIX_NATIONAL_ID, ACCOUNT_PREFIX_PHONE};

/// Length of a Thai national ID.
const NATIONAL_ID_LEN: usize = 13;

/// Leading sequences removed from phone numbers, tried once each in this order.
/// A rule only sees the output of the rules before it.
const PHONE_STRIP_RULES: [&str; 5] = ["+66", "66", "+660", "660", "0"];

/// Which PromptPay proxy the account identifier is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountKind {
    #[serde(rename = "phone")]
    Phone,
    #[serde(rename = "id")]
    NationalId,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Phone => "phone",
            AccountKind::NationalId => "id",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = PromptPayError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "phone" => Ok(AccountKind::Phone),
            "id" => Ok(AccountKind::NationalId),
            _ => Err(PromptPayError::InvalidAccountType),
        }
    }
}

impl TryFrom<&str> for AccountKind {
    type Error = PromptPayError;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl TryFrom<&String> for AccountKind {
    type Error = PromptPayError;

    fn try_from(s: &String) -> Result<Self> {
        s.parse()
    }
}

/// Merchant account sub-field ready to embed under tag 29.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedField(String);

impl NormalizedField {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate `raw` for the given kind and build its account sub-field.
pub fn normalize(kind: AccountKind, raw: &str) -> Result<NormalizedField> {
    let field = match kind {
        AccountKind::Phone => format!("{}{}", ACCOUNT_PREFIX_PHONE, normalize_phone(raw)),
        AccountKind::NationalId => {
            format!("{}{}", ACCOUNT_PREFIX_NATIONAL_ID, validate_national_id(raw)?)
        }
    };
    trace!("Normalized {} account to {}", kind, field);
    Ok(NormalizedField(field))
}

/// Strip country code and trunk prefixes. Content is not validated.
fn normalize_phone(phone: &str) -> &str {
    PHONE_STRIP_RULES
        .iter()
        .fold(phone, |rest, prefix| rest.strip_prefix(prefix).unwrap_or(rest))
}

fn validate_national_id(id: &str) -> Result<&str> {
    if id.chars().count() != NATIONAL_ID_LEN {
        return Err(PromptPayError::InvalidIDLength);
    }
    if id.starts_with('0') {
        return Err(PromptPayError::InvalidIDStart);
    }
    if !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PromptPayError::InvalidIDFormat);
    }
    Ok(id)
}
