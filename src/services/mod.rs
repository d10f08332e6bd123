pub mod database;
pub mod server_config;
pub mod session_store;
pub mod stats;

// 重新导出常用类型
pub use server_config::ServerConfigService;
pub use session_store::SeaOrmSessionStore;
pub use stats::StatsService;
