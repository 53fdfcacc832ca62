use std::sync::Arc;
use ns_core::{Config, SpeechSynthesizer, Translator};

pub mod dummy;
pub mod google_translate;
pub mod google_tts;

pub use dummy::{EchoTranslator, SilentSynthesizer};
pub use google_translate::GoogleTranslator;
pub use google_tts::GoogleTts;

pub fn create_translator(config: &Config) -> Arc<dyn Translator> {
    if config.offline {
        Arc::new(EchoTranslator)
    } else {
        Arc::new(GoogleTranslator::new())
    }
}

pub fn create_synthesizer(config: &Config) -> Arc<dyn SpeechSynthesizer> {
    if config.offline {
        Arc::new(SilentSynthesizer)
    } else {
        Arc::new(GoogleTts::new())
    }
}

/// Splits text on whitespace into chunks of at most `max_chars` characters.
/// Words longer than the limit are cut at character boundaries.
pub(crate) fn split_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { word_len + 1 };
        if current_len + needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
