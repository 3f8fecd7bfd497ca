//! Voice Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::SpeechSynthesizerPort;
use crate::application::queries::ListVoices;
use crate::domain::VoiceDescriptor;

/// ListVoices Handler
///
/// 直接透传合成器目录，不缓存；结果按名称升序
pub struct ListVoicesHandler {
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
}

impl ListVoicesHandler {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizerPort>) -> Self {
        Self { synthesizer }
    }

    pub async fn handle(&self, query: ListVoices) -> Result<Vec<VoiceDescriptor>, ApplicationError> {
        let mut voices = self
            .synthesizer
            .list_voices(query.language_code.as_deref())
            .await?;
        voices.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(voices)
    }
}
