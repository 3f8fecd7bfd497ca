//! TTS Adapter - 合成器实现（Google Cloud TTS / 离线 Fake）

mod fake_tts_client;
mod google_tts_client;

pub use fake_tts_client::{FakeTtsClient, FakeTtsClientConfig};
pub use google_tts_client::*;
