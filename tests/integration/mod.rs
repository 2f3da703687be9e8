// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod auth_test;
pub mod cache_test;
pub mod classify_test;
pub mod helpers;
pub mod job_api_test;
pub mod job_concurrency_test;
pub mod proxy_test;
pub mod repository_test;
pub mod scrape_flow_test;
