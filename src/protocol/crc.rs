use crc::{Crc, CRC_16_IBM_3740};

// poly 0x1021, init 0xFFFF, no reflection, no final XOR
const CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

/// Raw 16-bit checksum of `data`.
pub fn checksum(data: &[u8]) -> u16 {
    CRC.checksum(data)
}

/// Checksum of `data` rendered as 4 uppercase hex digits, as embedded in tag 63.
pub fn crc16_xmodem(data: &str) -> String {
    format!("{:04X}", checksum(data.as_bytes()))
}
