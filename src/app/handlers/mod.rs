// ==========================================
// Pentwheel 跟踪服务 - HTTP 处理器
// ==========================================
// 每个处理器: 提取参数 -> 阻塞线程池调用 API -> JSON 响应
// ==========================================

pub mod analytics;
pub mod budget;
pub mod common;
pub mod companies;
pub mod inventory;
pub mod repairs;
pub mod returns;
pub mod shipments;

pub use common::{ErrorBody, HttpError, MessageResponse};
