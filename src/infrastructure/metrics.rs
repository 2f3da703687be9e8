// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use metrics::describe_counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 初始化指标系统
///
/// 启动 Prometheus 导出器并注册网关的各类计数器。
/// 未启用时不安装记录器，所有计数器调用成为空操作。
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address '{}': {}", settings.listen_addr, e);
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_counter!("scrape_cache_hits_total", "Scrape cache lookups served from cache");
    describe_counter!("scrape_cache_misses_total", "Scrape cache lookups that missed");
    describe_counter!(
        "upstream_requests_total",
        "Requests sent to the external processor, by outcome"
    );
    describe_counter!(
        "scraping_jobs_transitions_total",
        "Scraping job state transitions, by resulting status"
    );

    info!("Metrics exporter listening on {}", addr);
}
