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

use scrapegate::config::settings::Settings;
use scrapegate::infrastructure::cache;
use scrapegate::infrastructure::database::connection;
use scrapegate::presentation::routes::{self, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use scrapegate::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    dotenvy::dotenv().ok();
    let settings = Arc::new(Settings::new()?);

    // 2. Initialize logging
    telemetry::init_telemetry(&settings.logging);
    info!("Starting scrapegate...");

    // Initialize Prometheus Metrics
    scrapegate::infrastructure::metrics::init_metrics(&settings.metrics);

    // 3. Connect to database and apply migrations
    let db = Arc::new(connection::connect_and_migrate(&settings.database).await?);
    info!("Database connection established");

    // 4. Select cache backend
    let cache_backend = cache::backend_from_settings(&settings, db.clone())?;
    info!(backend = ?settings.cache.backend, "Cache backend initialized");

    // 5. Assemble components
    let state = AppState::new(settings.clone(), db, cache_backend)?;
    info!(
        upstream = %settings.upstream.base_url,
        "Proxy forwarder initialized"
    );

    // 6. Start HTTP server
    let app = routes::routes(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
