// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::application::dto::scrape_request::ScrapeCommentsRequestDto;
use crate::domain::models::article::Article;
use crate::domain::models::comment::Comment;
use crate::domain::models::scraped_comments::{ScrapeResult, ScrapedComments};
use crate::domain::models::scraping_job::ScrapingJob;
use crate::domain::repositories::article_repository::ArticleRepository;
use crate::domain::repositories::comment_repository::CommentRepository;
use crate::domain::repositories::scraping_job_repository::RepositoryError;
use crate::domain::services::job_tracker::{JobError, JobTracker};
use crate::infrastructure::cache::scrape_cache::ScrapeCache;
use crate::infrastructure::upstream::forwarder::{ForwardingError, ProxyForwarder};
use crate::infrastructure::upstream::responses::{parse_scrape_response, UpstreamParseError};

/// 写入任务配置的 User-Agent
const SCRAPER_USER_AGENT: &str = "scrapegate-bot";

/// 评论抓取流程错误
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error(transparent)]
    Forwarding(#[from] ForwardingError),

    #[error(transparent)]
    UpstreamParse(#[from] UpstreamParseError),

    #[error(transparent)]
    Job(#[from] JobError),

    #[error("Persistence error: {0}")]
    Repository(#[from] RepositoryError),
}

/// 评论抓取结果
#[derive(Debug, Clone)]
pub struct ScrapeCommentsOutcome {
    pub article: Article,
    pub comments: Vec<Comment>,
    /// 上游报告的评论总数
    pub total_comments: u32,
    pub job: ScrapingJob,
    /// 是否由缓存提供
    pub from_cache: bool,
}

// === Section: Use Case Definition ===

/// "抓取某个URL的评论"用例
///
/// 组合缓存、上游转发器和任务追踪器完成整个流程。
/// 流程中任何一步失败都会尽力把任务标记为失败，然后把原始错误返回给调用方；
/// 标记失败本身出错只记录日志，不会覆盖原始错误。
pub struct ScrapeCommentsUseCase {
    jobs: JobTracker,
    articles: Arc<dyn ArticleRepository>,
    comments: Arc<dyn CommentRepository>,
    cache: ScrapeCache,
    forwarder: Arc<ProxyForwarder>,
    scrape_path: String,
}

// === Section: Implementation ===

impl ScrapeCommentsUseCase {
    pub fn new(
        jobs: JobTracker,
        articles: Arc<dyn ArticleRepository>,
        comments: Arc<dyn CommentRepository>,
        cache: ScrapeCache,
        forwarder: Arc<ProxyForwarder>,
        scrape_path: &str,
    ) -> Self {
        Self {
            jobs,
            articles,
            comments,
            cache,
            forwarder,
            scrape_path: scrape_path.to_string(),
        }
    }

    /// 执行抓取流程
    ///
    /// # 参数
    ///
    /// * `user_id` - 发起请求的用户
    /// * `request` - 已校验并去除空白的请求
    ///
    /// # 返回值
    ///
    /// * `Ok(ScrapeCommentsOutcome)` - 抓取结果和已完成的任务
    /// * `Err(ScrapeError)` - 流程中的原始错误
    pub async fn execute(
        &self,
        user_id: Uuid,
        request: ScrapeCommentsRequestDto,
    ) -> Result<ScrapeCommentsOutcome, ScrapeError> {
        let url = request.url.as_str();

        let article = self
            .articles
            .find_or_create(url, &request.title, user_id)
            .await?;

        let configuration = json!({
            "title": request.title,
            "userAgent": SCRAPER_USER_AGENT,
            "maxPages": 1,
            "timeout": self.forwarder_timeout_ms(),
        });
        let job = self.jobs.create(user_id, url, configuration).await?;
        let job_id = job.id;

        match self.run(article, url, job_id).await {
            Ok(outcome) => {
                info!(
                    job_id = %job_id,
                    url,
                    comments = outcome.comments.len(),
                    from_cache = outcome.from_cache,
                    "Scrape completed"
                );
                Ok(outcome)
            }
            Err(e) => Err(self.record_failure(job_id, e).await),
        }
    }

    /// 失败时需要补偿的部分：启动任务直到完成任务
    async fn run(
        &self,
        article: Article,
        url: &str,
        job_id: Uuid,
    ) -> Result<ScrapeCommentsOutcome, ScrapeError> {
        self.jobs.start(job_id).await?;

        let (comments, total_comments, from_cache) = match self.cache.get(url).await {
            Some(cached) => {
                let total = cached.total_comments;
                let comments = self.comments_from_cache(article.id, cached.comments).await?;
                (comments, total, true)
            }
            None => {
                let result = self.fetch(url).await?;
                let comments = self
                    .comments
                    .create_many(article.id, &result.comments)
                    .await?;
                self.cache
                    .put(
                        url,
                        &ScrapedComments::new(url, &result),
                        self.cache.default_ttl(),
                    )
                    .await;
                (comments, result.total_comments, false)
            }
        };

        let article = self
            .articles
            .update_total_comments(article.id, total_comments)
            .await?;
        let job = self
            .jobs
            .complete(job_id, 1, comments.len() as u32)
            .await?;

        Ok(ScrapeCommentsOutcome {
            article,
            comments,
            total_comments,
            job,
            from_cache,
        })
    }

    async fn fetch(&self, url: &str) -> Result<ScrapeResult, ScrapeError> {
        let response = self
            .forwarder
            .forward_json(&self.scrape_path, &json!({ "url": url }))
            .await?;
        Ok(parse_scrape_response(&response)?)
    }

    /// 缓存命中时的评论
    ///
    /// 文章最近保存的评论与缓存文本逐条一致（顺序相同）时直接复用，
    /// 否则把缓存文本保存为新评论。
    async fn comments_from_cache(
        &self,
        article_id: Uuid,
        cached: Vec<String>,
    ) -> Result<Vec<Comment>, ScrapeError> {
        let mut existing = self.comments.find_by_article(article_id).await?;
        if existing.len() >= cached.len() {
            let latest = existing.split_off(existing.len() - cached.len());
            if matches_cached(&latest, &cached) {
                return Ok(latest);
            }
        }
        Ok(self.comments.create_many(article_id, &cached).await?)
    }

    async fn record_failure(&self, job_id: Uuid, error: ScrapeError) -> ScrapeError {
        error!(job_id = %job_id, "Scrape failed: {}", error);
        if let Err(fail_error) = self.jobs.fail(job_id, &error.to_string()).await {
            warn!(job_id = %job_id, "Could not mark job as failed: {}", fail_error);
        }
        error
    }

    fn forwarder_timeout_ms(&self) -> u64 {
        self.forwarder.read_timeout().as_millis() as u64
    }
}

fn matches_cached(stored: &[Comment], cached: &[String]) -> bool {
    stored.len() == cached.len()
        && stored
            .iter()
            .zip(cached)
            .all(|(comment, text)| &comment.content == text)
}
