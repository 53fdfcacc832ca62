use async_trait::async_trait;
use ns_core::{Result, SpeechSynthesizer, Translator};

/// Returns its input untouched. Used in offline mode.
#[derive(Debug, Default, Clone)]
pub struct EchoTranslator;

#[async_trait]
impl Translator for EchoTranslator {
    fn name(&self) -> &str {
        "Echo"
    }

    async fn translate(&self, text: &str, _target: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

/// Produces a deterministic placeholder payload instead of real audio.
#[derive(Debug, Default, Clone)]
pub struct SilentSynthesizer;

#[async_trait]
impl SpeechSynthesizer for SilentSynthesizer {
    fn name(&self) -> &str {
        "Silent"
    }

    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>> {
        Ok(format!("ID3 offline:{}:{}", lang, text).into_bytes())
    }
}
