// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::comment::Sentiment;
use crate::domain::models::scraped_comments::ScrapeResult;
use crate::domain::models::sentiment_result::SentimentScores;
use serde::Deserialize;
use thiserror::Error;

use super::forwarder::UpstreamResponse;

/// 上游响应解析错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpstreamParseError {
    /// 上游返回了非 2xx 状态码
    #[error("External processor returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// 响应体缺少预期字段或格式不正确
    #[error("Unexpected response from external processor: {0}")]
    Malformed(String),
}

/// 评论抓取接口的响应
#[derive(Debug, Deserialize)]
struct ScrapeCommentsPayload {
    comments: Vec<String>,
    total_comments: u32,
}

/// 单个标签的分数
#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// 情感分类接口的两种响应格式
///
/// 按顺序尝试：先匹配带 `results` 列表的格式，再匹配平铺分数的格式
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SentimentPayload {
    Labelled {
        sentiment: Option<String>,
        results: Vec<LabelScore>,
    },
    Flat {
        sentiment: String,
        confidence_score: Option<f64>,
        positive_score: f64,
        negative_score: f64,
        neutral_score: f64,
    },
}

fn ensure_success(response: &UpstreamResponse) -> Result<(), UpstreamParseError> {
    if response.status.is_success() {
        return Ok(());
    }
    Err(UpstreamParseError::Status {
        status: response.status.as_u16(),
        body: response.body.chars().take(512).collect(),
    })
}

/// 解析评论抓取响应 `{comments: string[], total_comments: int}`
pub fn parse_scrape_response(response: &UpstreamResponse) -> Result<ScrapeResult, UpstreamParseError> {
    ensure_success(response)?;
    let payload: ScrapeCommentsPayload = serde_json::from_str(&response.body)
        .map_err(|e| UpstreamParseError::Malformed(format!("scrape response: {}", e)))?;

    Ok(ScrapeResult {
        comments: payload.comments,
        total_comments: payload.total_comments,
    })
}

/// 解析情感分类响应
///
/// 支持两种格式，并统一推导三个类别分数和置信度（预测标签的分数）：
/// - `{sentiment, results: [{label, score}, ...]}`
/// - `{sentiment, confidence_score, positive_score, negative_score, neutral_score}`
pub fn parse_sentiment_response(
    response: &UpstreamResponse,
) -> Result<SentimentScores, UpstreamParseError> {
    ensure_success(response)?;
    let payload: SentimentPayload = serde_json::from_str(&response.body)
        .map_err(|e| UpstreamParseError::Malformed(format!("classify response: {}", e)))?;

    match payload {
        SentimentPayload::Labelled { sentiment, results } => scores_from_results(sentiment, results),
        SentimentPayload::Flat {
            sentiment,
            confidence_score,
            positive_score,
            negative_score,
            neutral_score,
        } => {
            let sentiment = parse_label(&sentiment)?;
            let predicted = match sentiment {
                Sentiment::Positive => positive_score,
                Sentiment::Negative => negative_score,
                Sentiment::Neutral => neutral_score,
            };
            Ok(SentimentScores {
                sentiment,
                confidence_score: confidence_score.unwrap_or(predicted),
                positive_score,
                negative_score,
                neutral_score,
            })
        }
    }
}

fn parse_label(label: &str) -> Result<Sentiment, UpstreamParseError> {
    label
        .parse()
        .map_err(|_| UpstreamParseError::Malformed(format!("unknown sentiment label '{}'", label)))
}

fn scores_from_results(
    sentiment: Option<String>,
    results: Vec<LabelScore>,
) -> Result<SentimentScores, UpstreamParseError> {
    let mut positive_score = 0.0;
    let mut negative_score = 0.0;
    let mut neutral_score = 0.0;
    let mut best: Option<(Sentiment, f64)> = None;

    for result in &results {
        // Labels outside the three categories are ignored
        let Ok(label) = result.label.parse::<Sentiment>() else {
            continue;
        };
        match label {
            Sentiment::Positive => positive_score = result.score,
            Sentiment::Negative => negative_score = result.score,
            Sentiment::Neutral => neutral_score = result.score,
        }
        if best.map_or(true, |(_, score)| result.score > score) {
            best = Some((label, result.score));
        }
    }

    let sentiment = match sentiment {
        Some(label) => parse_label(&label)?,
        None => best
            .map(|(label, _)| label)
            .ok_or_else(|| UpstreamParseError::Malformed("no sentiment scores".to_string()))?,
    };
    let confidence_score = match sentiment {
        Sentiment::Positive => positive_score,
        Sentiment::Negative => negative_score,
        Sentiment::Neutral => neutral_score,
    };

    Ok(SentimentScores {
        sentiment,
        confidence_score,
        positive_score,
        negative_score,
        neutral_score,
    })
}

#[cfg(test)]
#[path = "responses_test.rs"]
mod tests;
