pub mod crc;
pub mod fields;
pub mod payload;

pub use crc::crc16_xmodem;
pub use payload::{Field, Payload};
