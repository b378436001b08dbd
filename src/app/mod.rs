// ==========================================
// Pentwheel 跟踪服务 - 应用层
// ==========================================
// 职责: HTTP 集成, 连接路由与 API 层
// ==========================================

pub mod handlers;
pub mod routes;
pub mod state;

// 重导出
pub use routes::build_router;
pub use state::AppState;
