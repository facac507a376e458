//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod library_handlers;
mod speaker_handlers;

pub use library_handlers::*;
pub use speaker_handlers::*;
