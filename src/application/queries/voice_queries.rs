//! Voice Queries

/// 列出合成器音色查询
#[derive(Debug, Clone, Default)]
pub struct ListVoices {
    /// 语言过滤，如 "en-US"
    pub language_code: Option<String>,
}
