// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含数据库、Redis、服务器、上游处理器、缓存、认证等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// Redis配置
    pub redis: RedisSettings,
    /// 服务器配置
    pub server: ServerSettings,
    /// 上游处理器配置
    pub upstream: UpstreamSettings,
    /// 抓取结果缓存配置
    pub cache: CacheSettings,
    /// 认证配置
    pub auth: AuthSettings,
    /// 透传代理配置
    pub proxy: ProxySettings,
    /// 指标导出配置
    pub metrics: MetricsSettings,
    /// 日志配置
    pub logging: LoggingSettings,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// Redis配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    /// Redis连接URL
    pub url: String,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 上游处理器配置设置
///
/// 在构造转发器时注入，转发器不读取任何全局状态
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSettings {
    /// 上游服务基础URL
    pub base_url: String,
    /// 连接超时时间（秒）
    pub connect_timeout_secs: u64,
    /// 读取超时时间（秒）
    pub read_timeout_secs: u64,
    /// 评论抓取接口路径
    pub scrape_path: String,
    /// 情感分类接口路径
    pub classify_path: String,
}

impl UpstreamSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

/// 缓存后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackendKind {
    Redis,
    Database,
    Memory,
}

/// 抓取结果缓存配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// 缓存后端 (redis, database, memory)
    pub backend: CacheBackendKind,
    /// 缓存有效期（秒）
    pub ttl_seconds: u64,
    /// 缓存键前缀
    pub key_prefix: String,
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

/// 认证配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// HS256 签名密钥
    pub jwt_secret: String,
    /// 令牌签发方
    pub issuer: String,
    /// 令牌受众，未配置时不校验
    pub audience: Option<String>,
}

/// 透传代理配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ProxySettings {
    /// 透传路由前缀，转发时去掉该前缀
    pub prefix: String,
}

/// 指标导出配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen_addr: String,
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// 是否输出 JSON 格式日志
    pub json: bool,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}`
    /// 以及 `SCRAPEGATE__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SCRAPEGATE").separator("__"));

        builder.build()?.try_deserialize()
    }

    fn defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            // Default DB pool settings
            .set_default("database.url", "sqlite::memory:")?
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            .set_default("redis.url", "redis://127.0.0.1:6379")?
            // External processor
            .set_default("upstream.base_url", "http://localhost:8000")?
            .set_default("upstream.connect_timeout_secs", 10)?
            .set_default("upstream.read_timeout_secs", 30)?
            .set_default("upstream.scrape_path", "/scrape-comments")?
            .set_default("upstream.classify_path", "/classify")?
            // Scrape cache
            .set_default("cache.backend", "redis")?
            .set_default("cache.ttl_seconds", 3600)?
            .set_default("cache.key_prefix", "scraping")?
            .set_default("auth.jwt_secret", "change-me")?
            .set_default("auth.issuer", "scrapegate")?
            .set_default("proxy.prefix", "/proxy")?
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")?
            .set_default("logging.json", false)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
