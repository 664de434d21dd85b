//! Routes 模块
//!
//! 定义 API 路由。

pub mod analysis_routes;
pub mod entry_routes;
pub mod recommendation_routes;
