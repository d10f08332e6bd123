use anyhow::{Context, Result};
use serde::Deserialize;
use std::{ops::RangeInclusive, str::FromStr};

/// 开发模式下未配置 SESSION_SECRET 时使用的密钥
const DEV_SESSION_SECRET: &str = "ultrabot-development-session-secret";

const CONNECTION_LIMIT: RangeInclusive<u64> = 1..=1000;
const SESSION_MAX_AGE_LIMIT: RangeInclusive<u64> = 1..=3650;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub auth: AuthConfig,
    pub environment: Environment,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub connect_timeout: u64,
    pub acquire_timeout: u64,
    pub idle_timeout: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub max_age_days: i64,
    /// 过期会话清理间隔（秒）
    pub sweep_interval: u64,
}

/// 访问令牌，未配置时对应接口一律拒绝
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// 机器人进程上报统计、写入配置使用的令牌
    pub bot_api_token: Option<String>,
    /// 控制台登录令牌
    pub dashboard_token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        self == Environment::Development
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = std::convert::Infallible;

    /// 只有明确声明为开发环境时才返回 Development
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            _ => Ok(Environment::Production),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed_or = |key: &str, default: u64| -> Result<u64> {
            match lookup(key) {
                Some(value) => value
                    .trim()
                    .parse()
                    .with_context(|| format!("{key} 不是有效的数字: {value}")),
                None => Ok(default),
            }
        };

        let bounded_or = |key: &str, default: u64, range: RangeInclusive<u64>| -> Result<u64> {
            let value = parsed_or(key, default)?;
            if !range.contains(&value) {
                anyhow::bail!(
                    "{key} 超出允许范围 {}~{}: {value}",
                    range.start(),
                    range.end()
                );
            }
            Ok(value)
        };

        let environment = lookup("APP_ENV")
            .or_else(|| lookup("NODE_ENV"))
            .map(|value| value.parse().unwrap_or(Environment::Production))
            .unwrap_or(Environment::Production);

        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").context("缺少环境变量 DATABASE_URL")?,
            min_connections: u32::try_from(bounded_or("DB_MIN_CONNECTIONS", 5, CONNECTION_LIMIT)?)?,
            max_connections: u32::try_from(bounded_or("DB_MAX_CONNECTIONS", 20, CONNECTION_LIMIT)?)?,
            connect_timeout: parsed_or("DB_CONNECT_TIMEOUT", 10)?,
            acquire_timeout: parsed_or("DB_ACQUIRE_TIMEOUT", 10)?,
            idle_timeout: parsed_or("DB_IDLE_TIMEOUT", 600)?,
        };

        if database.min_connections > database.max_connections {
            anyhow::bail!(
                "DB_MIN_CONNECTIONS ({}) 不能大于 DB_MAX_CONNECTIONS ({})",
                database.min_connections,
                database.max_connections
            );
        }

        let server = ServerConfig {
            host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "5000".to_string())
                .trim()
                .parse()
                .context("PORT 不是有效的端口号")?,
        };

        let secret = match (lookup("SESSION_SECRET"), environment) {
            (Some(secret), _) if !secret.is_empty() => secret,
            (_, Environment::Development) => DEV_SESSION_SECRET.to_string(),
            (_, Environment::Production) => {
                anyhow::bail!("生产环境必须配置 SESSION_SECRET")
            }
        };

        let session = SessionConfig {
            secret,
            max_age_days: i64::try_from(bounded_or(
                "SESSION_MAX_AGE_DAYS",
                30,
                SESSION_MAX_AGE_LIMIT,
            )?)?,
            sweep_interval: parsed_or("SESSION_SWEEP_INTERVAL", 3600)?,
        };

        let auth = AuthConfig {
            bot_api_token: lookup("BOT_API_TOKEN").filter(|t| !t.is_empty()),
            dashboard_token: lookup("DASHBOARD_TOKEN").filter(|t| !t.is_empty()),
        };

        Ok(Config {
            database,
            server,
            session,
            auth,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://bot:pw@localhost/ultrabot"),
            ("SESSION_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.session.max_age_days, 30);
        assert_eq!(config.environment, Environment::Production);
        assert!(config.auth.bot_api_token.is_none());
    }

    #[test]
    fn production_requires_session_secret() {
        let result = Config::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/ultrabot",
        )]));
        assert!(result.is_err());
    }

    #[test]
    fn development_falls_back_to_builtin_secret() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("NODE_ENV", "development"),
        ]))
        .unwrap();
        assert!(config.environment.is_development());
        assert_eq!(config.session.secret, DEV_SESSION_SECRET);
    }

    #[test]
    fn rejects_malformed_port() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("APP_ENV", "development"),
            ("PORT", "eighty"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        for (key, value) in [
            ("SESSION_MAX_AGE_DAYS", "200000000000000"),
            ("SESSION_MAX_AGE_DAYS", "0"),
            ("DB_MAX_CONNECTIONS", "4294967297"),
            ("DB_MIN_CONNECTIONS", "0"),
        ] {
            let result = Config::from_lookup(lookup_from(&[
                ("DATABASE_URL", "sqlite::memory:"),
                ("APP_ENV", "development"),
                (key, value),
            ]));
            let err = result.expect_err(key);
            assert!(err.to_string().contains(key), "{err}");
        }
    }

    #[test]
    fn rejects_min_connections_above_max() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("APP_ENV", "development"),
            ("DB_MIN_CONNECTIONS", "30"),
            ("DB_MAX_CONNECTIONS", "10"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn accepts_session_age_at_upper_bound() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("APP_ENV", "development"),
            ("SESSION_MAX_AGE_DAYS", "3650"),
        ]))
        .unwrap();
        assert_eq!(config.session.max_age_days, 3650);
    }

    #[test]
    fn unknown_environment_is_production() {
        assert_eq!(
            "staging".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!(
            " Development ".parse::<Environment>().unwrap(),
            Environment::Development
        );
    }
}
