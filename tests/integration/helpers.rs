// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use migration::{Migrator, MigratorTrait};
use scrapegate::config::settings::{
    AuthSettings, CacheBackendKind, CacheSettings, DatabaseSettings, LoggingSettings,
    MetricsSettings, ProxySettings, RedisSettings, ServerSettings, Settings, UpstreamSettings,
};
use scrapegate::domain::models::user::{User, UserProfile};
use scrapegate::domain::repositories::user_repository::UserRepository;
use scrapegate::infrastructure::auth::jwt::JwtVerifier;
use scrapegate::infrastructure::cache::memory_backend::MemoryCacheBackend;
use scrapegate::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
use scrapegate::presentation::routes::{self, AppState};
use sea_orm::{Database, DatabaseConnection};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const JWT_SECRET: &str = "integration-test-secret";
pub const ISSUER: &str = "https://idp.test/realms/scrapegate";

/// 测试用配置，上游指向给定地址
pub fn test_settings(upstream_url: &str) -> Settings {
    Settings {
        database: DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            max_connections: None,
            min_connections: None,
            connect_timeout: None,
            idle_timeout: None,
        },
        redis: RedisSettings {
            url: "redis://127.0.0.1:6379".to_string(),
        },
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        upstream: UpstreamSettings {
            base_url: upstream_url.to_string(),
            connect_timeout_secs: 1,
            read_timeout_secs: 1,
            scrape_path: "/scrape-comments".to_string(),
            classify_path: "/classify".to_string(),
        },
        cache: CacheSettings {
            backend: CacheBackendKind::Memory,
            ttl_seconds: 3600,
            key_prefix: "scraping".to_string(),
        },
        auth: AuthSettings {
            jwt_secret: JWT_SECRET.to_string(),
            issuer: ISSUER.to_string(),
            audience: None,
        },
        proxy: ProxySettings {
            prefix: "/proxy".to_string(),
        },
        metrics: MetricsSettings {
            enabled: false,
            listen_addr: "127.0.0.1:0".to_string(),
        },
        logging: LoggingSettings { json: false },
    }
}

/// 建立已迁移的 SQLite 内存数据库
pub async fn test_db() -> Arc<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to open sqlite memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    Arc::new(db)
}

/// 直接在数据库中创建用户，用于绕过 HTTP 的测试
pub async fn create_user(db: &Arc<DatabaseConnection>, subject: &str) -> User {
    UserRepositoryImpl::new(db.clone())
        .find_or_create(&profile(subject))
        .await
        .expect("Failed to create user")
}

fn profile(subject: &str) -> UserProfile {
    UserProfile {
        subject: subject.to_string(),
        username: Some(format!("{}-name", subject)),
        email: Some(format!("{}@example.com", subject)),
        first_name: None,
        last_name: None,
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub upstream: MockServer,
    pub db: Arc<DatabaseConnection>,
    pub state: AppState,
    verifier: JwtVerifier,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// 启动应用，允许在组装前修改配置
    pub async fn spawn_with(configure: impl FnOnce(&mut Settings)) -> Self {
        let upstream = MockServer::start().await;
        let mut settings = test_settings(&upstream.uri());
        configure(&mut settings);
        let settings = Arc::new(settings);

        let db = test_db().await;
        let state = AppState::new(
            settings.clone(),
            db.clone(),
            Arc::new(MemoryCacheBackend::new()),
        )
        .expect("Failed to assemble application");

        let server = TestServer::new(routes::routes(state.clone())).unwrap();

        TestApp {
            server,
            upstream,
            db,
            state,
            verifier: JwtVerifier::from_settings(&settings.auth),
        }
    }

    /// 为指定 subject 生成 `Authorization` 头的值
    pub fn bearer(&self, subject: &str) -> String {
        let token = self
            .verifier
            .issue(&profile(subject), chrono::Duration::minutes(5))
            .expect("Failed to issue token");
        format!("Bearer {}", token)
    }

    /// 通过 HTTP 发起一次抓取
    pub async fn scrape(&self, subject: &str, url: &str) -> axum_test::TestResponse {
        self.server
            .post("/scrape")
            .add_header("Authorization", self.bearer(subject))
            .json(&json!({ "url": url, "title": "Example article" }))
            .await
    }
}

/// 上游 `/scrape-comments` 返回给定评论，且只应被调用 `times` 次
pub async fn mock_scrape_comments(
    upstream: &MockServer,
    comments: &[&str],
    total: u32,
    times: u64,
) {
    Mock::given(method("POST"))
        .and(path("/scrape-comments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "comments": comments, "total_comments": total })),
        )
        .expect(times)
        .mount(upstream)
        .await;
}
