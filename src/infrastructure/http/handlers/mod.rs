//! HTTP Handlers

mod cache;
mod ping;
mod synthesis;
mod voice;

pub use cache::*;
pub use ping::*;
pub use synthesis::*;
pub use voice::*;
