//! Handlers 模块
//!
//! HTTP 请求处理程序。

pub mod analysis_handler;
pub mod entry_handler;
pub mod recommendation_handler;

pub use analysis_handler::*;
pub use entry_handler::*;
pub use recommendation_handler::*;
