//! Incremental UTF-8 decoding.

/// Replacement for bytes that can never form a character.
const REPLACEMENT: char = '\u{FFFD}';

/// Decodes a byte stream into text without splitting characters.
///
/// A multi-byte sequence cut across two chunks is held back until its
/// remaining bytes arrive. Invalid bytes become U+FFFD.
///
/// # Examples
///
/// ```
/// use scrivener_client::Utf8StreamDecoder;
///
/// let bytes = "é".as_bytes();
/// let mut decoder = Utf8StreamDecoder::default();
/// assert_eq!(decoder.push(&bytes[..1]), "");
/// assert_eq!(decoder.push(&bytes[1..]), "é");
/// ```
#[derive(Debug, Default, Clone)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    /// Feed bytes, returning every complete character decoded so far.
    pub fn push(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);

        let mut text = String::new();
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(valid) => {
                    text.push_str(valid);
                    self.pending.clear();
                    break;
                }
                Err(e) => {
                    let valid_up_to = e.valid_up_to();
                    // Bytes before valid_up_to always decode
                    if let Ok(prefix) = std::str::from_utf8(&self.pending[..valid_up_to]) {
                        text.push_str(prefix);
                    }
                    match e.error_len() {
                        Some(invalid) => {
                            text.push(REPLACEMENT);
                            self.pending.drain(..valid_up_to + invalid);
                        }
                        None => {
                            self.pending.drain(..valid_up_to);
                            break;
                        }
                    }
                }
            }
        }
        text
    }

    /// Flush at end of stream; a dangling partial sequence becomes U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            return String::new();
        }
        self.pending.clear();
        REPLACEMENT.to_string()
    }

    /// Whether bytes are held back waiting for the rest of a character.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
