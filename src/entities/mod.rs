pub mod bot_stats;
pub mod server_config;
pub mod session;

// BotStats entities
pub use bot_stats::{
    ActiveModel as BotStatsActiveModel, Column as BotStatsColumn, Entity as BotStatsEntity,
    Model as BotStatsModel,
};

// ServerConfig entities
pub use server_config::{
    ActiveModel as ServerConfigActiveModel, Column as ServerConfigColumn,
    Entity as ServerConfigEntity, Model as ServerConfigModel,
};

// Session entities
pub use session::{
    ActiveModel as SessionActiveModel, Column as SessionColumn, Entity as SessionEntity,
    Model as SessionModel,
};
