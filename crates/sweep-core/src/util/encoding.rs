use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::{alphabet, Engine};

/// Standard alphabet with padding, tolerant of non-zero trailing bits.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Standard base64 of `data`, unless `data` already decodes as standard
/// base64, in which case it is returned unchanged (no double encoding).
pub fn base64_encode(data: &[u8]) -> String {
    if is_base64_encoded(data) {
        return String::from_utf8_lossy(data).into_owned();
    }
    STANDARD.encode(data)
}

/// True if `data` decodes as standard base64. Line breaks (`\r`, `\n`) are
/// ignored, so wrapped payloads count as encoded.
pub fn is_base64_encoded(data: &[u8]) -> bool {
    let unwrapped: Vec<u8> = data
        .iter()
        .copied()
        .filter(|b| !matches!(b, b'\r' | b'\n'))
        .collect();
    LENIENT.decode(unwrapped).is_ok()
}
