//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：合成（可能写缓存）与清空缓存

mod synthesis_commands;

pub mod handlers;

pub use synthesis_commands::*;
