/// Fixed EMV field literals for PromptPay payloads.
/// Each value is `tag (2) + length (2) + value`, except where noted.

// Payload format indicator, version 01
pub const VERSION: &str = "000201";

// Point of initiation: 11 = static
pub const QR_TYPE: &str = "010211";

// Merchant account information, tag 29 with a fixed 37-char body
pub const MERCHANT_ACCOUNT_INFO: &str = "2937";

// PromptPay application ID
pub const MERCHANT_ACCOUNT_INFO_AID: &str = "0016A000000677010111";

// Sub-tag 01, length 13, Thai country code 0066. Residual digits follow.
pub const ACCOUNT_PREFIX_PHONE: &str = "01130066";

// Sub-tag 02, length 13. The national ID follows.
pub const ACCOUNT_PREFIX_NATIONAL_ID: &str = "0213";

// Country code TH
pub const COUNTRY: &str = "5802TH";

// Currency 764 (THB)
pub const CURRENCY: &str = "5303764";

/// Tag only; length and value are computed.
pub const AMOUNT_TAG: &str = "54";

/// EMV caps the transaction amount value at 13 characters.
pub const AMOUNT_MAX_LEN: usize = 13;

// CRC tag 63, length 4. The checksum covers this marker too.
pub const CHECKSUM: &str = "6304";

pub const TAG_CHECKSUM: &str = "63";
pub const TAG_MERCHANT_ACCOUNT: &str = "29";

/// Number of hex digits in the trailing checksum.
pub const CHECKSUM_LEN: usize = 4;
