//! PromptPay EMV QR payload generation.
//!
//! Builds the single-line text payload a PromptPay-capable banking app expects
//! to find in a QR code, for a phone number or Thai national ID with an
//! optional amount. Rendering the QR image is left to other tools.

pub mod account;
pub mod amount;
pub mod config;
pub mod error;
pub mod protocol;

use rust_decimal::Decimal;

pub use account::{normalize, AccountKind, NormalizedField};
pub use amount::Amount;
pub use error::{PromptPayError, Result};
pub use protocol::{crc16_xmodem, Payload};

/// Static payload (no amount) for `account`.
///
/// `kind` is an [`AccountKind`] or its text form, `"phone"` or `"id"`.
pub fn generate_payload<K>(kind: K, account: &str) -> Result<String>
where
    K: TryInto<AccountKind>,
    PromptPayError: From<K::Error>,
{
    let kind = kind.try_into()?;
    Payload::build(kind, account, None).map(Payload::into_string)
}

/// Payload with `amount` embedded under tag 54.
pub fn generate_payload_with_amount<K>(kind: K, account: &str, amount: Decimal) -> Result<String>
where
    K: TryInto<AccountKind>,
    PromptPayError: From<K::Error>,
{
    let kind = kind.try_into()?;
    let amount = Amount::new(amount)?;
    Payload::build(kind, account, Some(amount)).map(Payload::into_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_crc(payload: &str) -> (&str, &str) {
        payload.split_at(payload.len() - 4)
    }

    #[test]
    fn test_valid_ids_carry_their_checksum() {
        for id in ["1234567890123", "1101700230708", "9999999999999", "3100600093542"] {
            let payload = generate_payload(AccountKind::NationalId, id).unwrap();
            let (body, crc) = split_crc(&payload);
            assert_eq!(crc16_xmodem(body), crc);
            assert!(body.contains(id));
        }
    }

    #[test]
    fn test_id_errors() {
        assert_eq!(
            generate_payload(AccountKind::NationalId, ""),
            Err(PromptPayError::InvalidIDLength)
        );
        assert_eq!(
            generate_payload(AccountKind::NationalId, "0123456789123"),
            Err(PromptPayError::InvalidIDStart)
        );
        assert_eq!(
            generate_payload(AccountKind::NationalId, "12345678901ab"),
            Err(PromptPayError::InvalidIDFormat)
        );
    }

    #[test]
    fn test_phone_forms_are_equivalent() {
        let local = generate_payload(AccountKind::Phone, "0990844901").unwrap();
        let plus = generate_payload(AccountKind::Phone, "+66990844901").unwrap();
        let bare = generate_payload(AccountKind::Phone, "66990844901").unwrap();
        assert_eq!(local, plus);
        assert_eq!(local, bare);
        assert!(local.contains("01130066990844901"));
    }

    #[test]
    fn test_amount_fields() {
        let payload =
            generate_payload_with_amount(AccountKind::Phone, "990844901", Decimal::new(10000, 2))
                .unwrap();
        assert!(payload.contains("5406100.00"));

        let payload =
            generate_payload_with_amount(AccountKind::Phone, "990844901", Decimal::new(512, 2))
                .unwrap();
        assert!(payload.contains("54045.12"));
        let (body, crc) = split_crc(&payload);
        assert_eq!(crc16_xmodem(body), crc);
    }

    #[test]
    fn test_text_kind() {
        assert_eq!(
            generate_payload("phone", "990844901").unwrap(),
            generate_payload(AccountKind::Phone, "990844901").unwrap()
        );
        assert_eq!(
            generate_payload("id", "1234567890123").unwrap(),
            "00020101021129370016A000000677010111021312345678901235802TH53037646304EC40"
        );
    }

    #[test]
    fn test_invalid_kind_on_both_entry_points() {
        assert_eq!(
            generate_payload("email", "990844901"),
            Err(PromptPayError::InvalidAccountType)
        );
        assert_eq!(
            generate_payload_with_amount("", "990844901", Decimal::ONE),
            Err(PromptPayError::InvalidAccountType)
        );
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert_eq!(
            generate_payload_with_amount(AccountKind::Phone, "990844901", Decimal::NEGATIVE_ONE),
            Err(PromptPayError::InvalidAmount)
        );
    }

    #[test]
    fn test_generated_payloads_are_structurally_consistent() {
        let payloads = [
            generate_payload(AccountKind::Phone, "0812345678").unwrap(),
            generate_payload(AccountKind::NationalId, "1234567890123").unwrap(),
            generate_payload_with_amount(AccountKind::Phone, "0812345678", Decimal::new(99999, 1))
                .unwrap(),
            generate_payload_with_amount(AccountKind::NationalId, "1234567890123", Decimal::ZERO)
                .unwrap(),
        ];
        for text in &payloads {
            let payload = Payload::from_str_checked(text).unwrap();
            let rebuilt: String = payload
                .fields()
                .unwrap()
                .iter()
                .map(|f| format!("{}{:02}{}", f.tag, f.value.len(), f.value))
                .collect();
            assert_eq!(&rebuilt, text);
        }
    }

    #[test]
    fn test_concurrent_calls_agree() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| generate_payload("phone", "0990844901").unwrap()))
            .collect();
        let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }
}
