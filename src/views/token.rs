// src/views/token.rs
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;

pub const VIEW_ID_BYTES: usize = 16;

/// Opaque id of one listing view, carried in the page and every htmx call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewId(String);

impl ViewId {
    /// A fresh id from the OS RNG.
    pub fn generate() -> Self {
        let mut rng = OsRng;
        Self::generate_with(&mut rng)
    }

    pub fn generate_with<R: RngCore>(rng: &mut R) -> Self {
        let mut buf = [0u8; VIEW_ID_BYTES];
        rng.fill_bytes(&mut buf);
        // URL_SAFE_NO_PAD keeps ids usable in query strings without encoding
        ViewId(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf))
    }

    /// Accept an id coming back from the client. Only shape is checked.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let well_formed = !raw.is_empty()
            && raw.len() <= 64
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        well_formed.then(|| ViewId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
