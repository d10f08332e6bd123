//! 请求提取器：JSON 校验、路径/查询参数解析、访问控制

pub mod auth;
pub mod params;
pub mod validated;

pub use auth::{BotAuth, DashboardSession, DashboardUser};
pub use params::{GuildIdPath, WindowQuery};
pub use validated::ValidatedJson;
