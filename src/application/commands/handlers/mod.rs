//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod server_handlers;
mod speaker_handlers;

pub use server_handlers::*;
pub use speaker_handlers::*;
