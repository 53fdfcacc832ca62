use sha2::{Digest, Sha256};

pub mod backends;

pub use backends::*;

/// Extension of every artifact the synthesizer produces.
pub const AUDIO_EXTENSION: &str = "mp3";

/// Stem used when the narration is not tied to a company.
pub const DEFAULT_STEM: &str = "output";

/// Lowercase alphanumeric runs joined by `-`; empty input yields [`DEFAULT_STEM`].
pub fn slugify(label: &str) -> String {
    let slug = label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        DEFAULT_STEM.to_string()
    } else {
        slug
    }
}

/// Content-addressed file name: `{slug}_{first 12 hex digits of sha256}.mp3`.
/// Two requests only share a file when they produced identical audio.
pub fn artifact_name(label: Option<&str>, audio: &[u8]) -> String {
    let digest = Sha256::digest(audio);
    let hash: String = digest.iter().take(6).map(|b| format!("{:02x}", b)).collect();
    let stem = label.map(slugify).unwrap_or_else(|| DEFAULT_STEM.to_string());
    format!("{}_{}.{}", stem, hash, AUDIO_EXTENSION)
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{artifact_name, slugify};
}
