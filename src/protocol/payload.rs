use std::fmt;

use anyhow::{bail, ensure, Result};
use tracing::debug;

use super::crc::crc16_xmodem;
use super::fields::{
    CHECKSUM, CHECKSUM_LEN, COUNTRY, CURRENCY, MERCHANT_ACCOUNT_INFO, MERCHANT_ACCOUNT_INFO_AID,
    QR_TYPE, TAG_CHECKSUM, VERSION,
};
use crate::account::{normalize, AccountKind};
use crate::amount::Amount;

/// Width of the tag and of the length prefix in every top-level field.
const TAG_LEN: usize = 2;
const LENGTH_LEN: usize = 2;

/// A PromptPay EMV QR payload.
///
/// Layout:
/// ```text
/// 000201 010211 2937 0016A000000677010111 [account] 5802TH 5303764 [54LLamount] 6304 [CRC]
/// ```
///
/// Every block is `tag (2 digits) + length (2 digits) + value`. The CRC is four
/// uppercase hex digits computed over everything before it, `6304` included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload(String);

/// One top-level TLV block recovered from a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<'a> {
    pub tag: &'a str,
    pub value: &'a str,
}

impl Payload {
    /// Normalize the account and assemble the payload, with an amount when given.
    pub fn build(
        kind: AccountKind,
        account: &str,
        amount: Option<Amount>,
    ) -> crate::Result<Self> {
        let account_field = normalize(kind, account)?;

        let mut raw = String::with_capacity(96);
        raw.push_str(VERSION);
        raw.push_str(QR_TYPE);
        raw.push_str(MERCHANT_ACCOUNT_INFO);
        raw.push_str(MERCHANT_ACCOUNT_INFO_AID);
        raw.push_str(account_field.as_str());
        raw.push_str(COUNTRY);
        raw.push_str(CURRENCY);
        if let Some(amount) = amount {
            raw.push_str(&amount.to_field());
        }
        raw.push_str(CHECKSUM);

        let crc = crc16_xmodem(&raw);
        raw.push_str(&crc);

        debug!(
            "Built {} payload ({} chars, amount={}, crc={})",
            kind,
            raw.len(),
            amount.map(|a| a.to_string()).unwrap_or_else(|| "static".into()),
            crc
        );
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Split the payload into top-level TLV blocks.
    pub fn fields(&self) -> Result<Vec<Field<'_>>> {
        split_fields(&self.0)
    }

    /// Parse a payload string, verifying the trailing checksum and that every
    /// declared length lines up with the data.
    pub fn from_str_checked(data: &str) -> Result<Self> {
        ensure!(
            data.len() >= CHECKSUM.len() + CHECKSUM_LEN,
            "Payload too short for CRC check: {} chars",
            data.len()
        );

        let fields = split_fields(data)?;
        let (body, crc_value) = data.split_at(data.len() - CHECKSUM_LEN);
        let computed = crc16_xmodem(body);
        ensure!(
            computed == crc_value,
            "CRC mismatch: computed {}, expected {}",
            computed,
            crc_value
        );

        match fields.last() {
            Some(last) if last.tag == TAG_CHECKSUM && last.value == crc_value => {}
            _ => bail!("Payload does not end with a CRC field"),
        }

        Ok(Self(data.to_string()))
    }
}

fn split_fields(data: &str) -> Result<Vec<Field<'_>>> {
    ensure!(data.is_ascii(), "Payload contains non-ASCII characters");
    let mut fields = Vec::new();
    let mut pos = 0;
    while pos < data.len() {
        let header_end = pos + TAG_LEN + LENGTH_LEN;
        ensure!(
            header_end <= data.len(),
            "Truncated field header at offset {}",
            pos
        );
        let tag = &data[pos..pos + TAG_LEN];
        let len_text = &data[pos + TAG_LEN..header_end];
        ensure!(
            len_text.bytes().all(|b| b.is_ascii_digit()),
            "Non-numeric length {:?} for tag {} at offset {}",
            len_text,
            tag,
            pos
        );
        let len: usize = len_text.parse()?;
        let value_end = header_end + len;
        if value_end > data.len() {
            bail!(
                "Field overflows payload: tag={}, len={}, pos={}",
                tag,
                len,
                pos
            );
        }
        fields.push(Field {
            tag,
            value: &data[header_end..value_end],
        });
        pos = value_end;
    }
    Ok(fields)
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Payload> for String {
    fn from(payload: Payload) -> Self {
        payload.0
    }
}
