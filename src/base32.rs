/// Maps a character to its 5-bit Base32 value, or `None` when it is not part
/// of the alphabet.
fn symbol_value(c: char) -> Option<u8> {
    match c.to_ascii_uppercase() {
        c @ 'A'..='Z' => Some(c as u8 - b'A'),
        c @ '2'..='7' => Some(c as u8 - b'2' + 26),
        _ => None,
    }
}

/// Decodes a Base32 secret into raw key bytes.
///
/// Case is ignored, and anything outside `A-Z2-7` (padding, spaces, dashes)
/// is skipped rather than rejected.
///
/// The symbols are packed into one bit stream and cut into bytes from the
/// start; a trailing group shorter than 8 bits is dropped. Empty or entirely
/// invalid input decodes to an empty key.
pub fn decode_base32(secret: &str) -> Vec<u8> {
    let mut decoded = Vec::with_capacity(secret.len() * 5 / 8);

    // Never holds more than 12 bits: at most 7 pending plus one 5-bit symbol
    let mut buffer: u16 = 0;
    let mut pending_bits = 0;

    for value in secret.chars().filter_map(symbol_value) {
        buffer = (buffer << 5) | u16::from(value);
        pending_bits += 5;

        if pending_bits >= 8 {
            pending_bits -= 8;
            decoded.push((buffer >> pending_bits) as u8);
            buffer &= (1 << pending_bits) - 1;
        }
    }

    decoded
}

/// Counts the characters [`decode_base32`] would silently skip, not counting
/// `=` padding and whitespace.
pub fn ignored_chars(secret: &str) -> usize {
    secret
        .chars()
        .filter(|c| *c != '=' && !c.is_whitespace() && symbol_value(*c).is_none())
        .count()
}
