//! CRC-16/CCITT-FALSE checksum used as the payload trailer

const POLYNOMIAL: u16 = 0x1021;
const INITIAL: u16 = 0xFFFF;

/// Compute CRC-16/CCITT-FALSE (poly 0x1021, init 0xFFFF, no reflection,
/// no final XOR) over `bytes`
pub fn crc16_ccitt_false(bytes: &[u8]) -> u16 {
    bytes.iter().fold(INITIAL, |mut crc, &byte| {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
        }
        crc
    })
}

/// Checksum of `payload` as four uppercase hex digits
pub fn checksum_hex(payload: &str) -> String {
    format!("{:04X}", crc16_ccitt_false(payload.as_bytes()))
}
