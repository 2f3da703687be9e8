// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::usecases::classify_comment::ClassifyCommentUseCase;
use crate::application::usecases::scrape_comments::ScrapeCommentsUseCase;
use crate::config::settings::Settings;
use crate::domain::services::job_tracker::JobTracker;
use crate::infrastructure::auth::jwt::JwtVerifier;
use crate::infrastructure::cache::cache_backend::CacheBackend;
use crate::infrastructure::cache::scrape_cache::ScrapeCache;
use crate::infrastructure::repositories::article_repo_impl::ArticleRepositoryImpl;
use crate::infrastructure::repositories::comment_repo_impl::CommentRepositoryImpl;
use crate::infrastructure::repositories::scraping_job_repo_impl::ScrapingJobRepositoryImpl;
use crate::infrastructure::repositories::sentiment_result_repo_impl::SentimentResultRepositoryImpl;
use crate::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
use crate::infrastructure::upstream::forwarder::{ForwardingError, ProxyForwarder};
use crate::presentation::handlers::{
    cache_handler, classify_handler, job_handler, proxy_handler, scrape_handler, user_handler,
};
use crate::presentation::middleware::auth_middleware::{auth_middleware, AuthState};
use axum::{
    routing::{any, get, post, put},
    Extension, Json, Router,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 应用组件
///
/// 路由所需的全部共享组件，启动时组装一次
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub jobs: JobTracker,
    pub cache: ScrapeCache,
    pub forwarder: Arc<ProxyForwarder>,
    pub scrape: Arc<ScrapeCommentsUseCase>,
    pub classify: Arc<ClassifyCommentUseCase>,
    pub auth: AuthState,
}

impl AppState {
    /// 组装应用组件
    ///
    /// # 参数
    ///
    /// * `settings` - 应用配置
    /// * `db` - 数据库连接（已迁移）
    /// * `cache_backend` - 缓存存储后端
    ///
    /// # 返回值
    ///
    /// * `Ok(AppState)` - 组装好的组件
    /// * `Err(ForwardingError)` - HTTP 客户端构建失败
    pub fn new(
        settings: Arc<Settings>,
        db: Arc<DatabaseConnection>,
        cache_backend: Arc<dyn CacheBackend>,
    ) -> Result<Self, ForwardingError> {
        let jobs = JobTracker::new(Arc::new(ScrapingJobRepositoryImpl::new(db.clone())));
        let articles = Arc::new(ArticleRepositoryImpl::new(db.clone()));
        let comments = Arc::new(CommentRepositoryImpl::new(db.clone()));
        let results = Arc::new(SentimentResultRepositoryImpl::new(db.clone()));
        let users = Arc::new(UserRepositoryImpl::new(db));

        let cache = ScrapeCache::from_settings(cache_backend, &settings.cache);
        let forwarder = Arc::new(ProxyForwarder::from_settings(&settings.upstream)?);

        let scrape = Arc::new(ScrapeCommentsUseCase::new(
            jobs.clone(),
            articles,
            comments.clone(),
            cache.clone(),
            forwarder.clone(),
            &settings.upstream.scrape_path,
        ));
        let classify = Arc::new(ClassifyCommentUseCase::new(
            comments,
            results,
            forwarder.clone(),
            &settings.upstream.classify_path,
        ));

        let auth = AuthState {
            verifier: Arc::new(JwtVerifier::from_settings(&settings.auth)),
            users,
        };

        Ok(Self {
            settings,
            jobs,
            cache,
            forwarder,
            scrape,
            classify,
            auth,
        })
    }
}

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/status", get(status));

    let proxy_path = format!("{}/{{*path}}", state.settings.proxy.prefix.trim_end_matches('/'));

    let protected_routes = Router::new()
        .route("/users/me", get(user_handler::current_user))
        .route("/scrape", post(scrape_handler::scrape_comments))
        .route("/jobs", get(job_handler::list_jobs))
        .route("/jobs/{id}", get(job_handler::get_job))
        .route("/jobs/{id}/cancel", put(job_handler::cancel_job))
        .route("/comments/classify", post(classify_handler::classify_comment))
        .route(
            "/cache",
            get(cache_handler::cache_status).delete(cache_handler::clear_cache),
        )
        .route(&proxy_path, any(proxy_handler::passthrough))
        .route_layer(axum::middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(Extension(state.scrape))
        .layer(Extension(state.classify))
        .layer(Extension(state.jobs))
        .layer(Extension(state.cache))
        .layer(Extension(state.forwarder))
        .layer(Extension(state.settings))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 服务状态端点
pub async fn status() -> Json<Value> {
    Json(json!({
        "application": env!("CARGO_PKG_NAME"),
        "status": "UP",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
