// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// 抓取任务实体
///
/// 记录一次"抓取某个URL评论"的工作单元。任务由编排器创建，
/// 之后只能通过任务追踪器按照状态机进行变更。进入终态
/// （Completed/Failed/Cancelled）后记录被冻结，任何字段都不再改变。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapingJob {
    /// 任务唯一标识符
    pub id: Uuid,
    /// 发起请求的用户ID（仅表示归属关系，删除任务不会影响用户）
    pub user_id: Uuid,
    /// 当前状态
    pub status: JobStatus,
    /// 进入 Running 的时间
    pub start_time: Option<DateTime<FixedOffset>>,
    /// 进入任一终态的时间
    pub end_time: Option<DateTime<FixedOffset>>,
    /// 抓取目标URL，创建后不可变
    pub target_url: String,
    /// 已抓取页数
    pub pages_scraped: u32,
    /// 已发现评论数
    pub comments_found: u32,
    /// 诊断信息，仅在 Failed/Cancelled 时填写
    pub errors: Option<String>,
    /// 运行参数（标题、User-Agent、超时、页数上限等），原样保存，追踪器不做解释
    pub configuration: serde_json::Value,
    /// 乐观锁版本号，每次成功写入递增
    pub version: i32,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 最后更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 任务状态枚举
///
/// 状态转换遵循以下流程：
/// Pending → Running → Completed/Failed/Cancelled
///
/// Pending 也可以直接进入 Failed 或 Cancelled。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// 已创建，尚未开始
    #[default]
    Pending,
    /// 执行中
    Running,
    /// 成功完成
    Completed,
    /// 执行失败
    Failed,
    /// 已取消
    Cancelled,
}

impl JobStatus {
    /// 是否为终态
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "PENDING",
            JobStatus::Running => "RUNNING",
            JobStatus::Completed => "COMPLETED",
            JobStatus::Failed => "FAILED",
            JobStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(JobStatus::Pending),
            "RUNNING" => Ok(JobStatus::Running),
            "COMPLETED" => Ok(JobStatus::Completed),
            "FAILED" => Ok(JobStatus::Failed),
            "CANCELLED" => Ok(JobStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// 任务上的变更动作，用于错误信息和日志
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobAction {
    Start,
    UpdateProgress,
    Complete,
    Fail,
    Cancel,
}

impl fmt::Display for JobAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JobAction::Start => write!(f, "start"),
            JobAction::UpdateProgress => write!(f, "update progress of"),
            JobAction::Complete => write!(f, "complete"),
            JobAction::Fail => write!(f, "fail"),
            JobAction::Cancel => write!(f, "cancel"),
        }
    }
}

/// 状态转换错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// 当前状态不允许该动作
    #[error("Cannot {action} job in {from} state")]
    InvalidTransition { from: JobStatus, action: JobAction },

    /// 进度计数只能单调不减
    #[error(
        "Progress cannot go backwards: pages {current_pages} -> {pages}, comments {current_comments} -> {comments}"
    )]
    ProgressRegression {
        current_pages: u32,
        current_comments: u32,
        pages: u32,
        comments: u32,
    },
}

/// 取消任务时未提供原因的默认值
pub const DEFAULT_CANCEL_REASON: &str = "Cancelled by user";

impl ScrapingJob {
    /// 创建一个 Pending 状态的新任务
    ///
    /// # 参数
    ///
    /// * `user_id` - 任务归属用户
    /// * `target_url` - 抓取目标
    /// * `configuration` - 运行参数
    pub fn new(user_id: Uuid, target_url: String, configuration: serde_json::Value) -> Self {
        let now: DateTime<FixedOffset> = Utc::now().into();
        Self {
            id: Uuid::new_v4(),
            user_id,
            status: JobStatus::Pending,
            start_time: None,
            end_time: None,
            target_url,
            pages_scraped: 0,
            comments_found: 0,
            errors: None,
            configuration,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn reject(&self, action: JobAction) -> TransitionError {
        TransitionError::InvalidTransition {
            from: self.status,
            action,
        }
    }

    /// 启动任务
    ///
    /// Pending → Running，并记录开始时间。对已经处于 Running 的任务
    /// 再次调用视为幂等操作，开始时间保持不变。
    pub fn start(mut self) -> Result<Self, TransitionError> {
        match self.status {
            JobStatus::Pending => {
                self.status = JobStatus::Running;
                self.start_time = Some(Utc::now().into());
                Ok(self)
            }
            JobStatus::Running => Ok(self),
            _ => Err(self.reject(JobAction::Start)),
        }
    }

    /// 更新进度
    ///
    /// 仅在 Running 时有效。参数是新的累计值而不是增量。
    pub fn update_progress(
        mut self,
        pages_scraped: u32,
        comments_found: u32,
    ) -> Result<Self, TransitionError> {
        if self.status != JobStatus::Running {
            return Err(self.reject(JobAction::UpdateProgress));
        }
        if pages_scraped < self.pages_scraped || comments_found < self.comments_found {
            return Err(TransitionError::ProgressRegression {
                current_pages: self.pages_scraped,
                current_comments: self.comments_found,
                pages: pages_scraped,
                comments: comments_found,
            });
        }
        self.pages_scraped = pages_scraped;
        self.comments_found = comments_found;
        Ok(self)
    }

    /// 完成任务
    ///
    /// Running → Completed，计数冻结为传入的最终值
    pub fn complete(
        mut self,
        pages_scraped: u32,
        comments_found: u32,
    ) -> Result<Self, TransitionError> {
        match self.status {
            JobStatus::Running => {
                self.status = JobStatus::Completed;
                self.end_time = Some(Utc::now().into());
                self.pages_scraped = pages_scraped;
                self.comments_found = comments_found;
                Ok(self)
            }
            _ => Err(self.reject(JobAction::Complete)),
        }
    }

    /// 标记任务失败
    ///
    /// Pending/Running → Failed
    pub fn fail(mut self, error_message: &str) -> Result<Self, TransitionError> {
        match self.status {
            JobStatus::Pending | JobStatus::Running => {
                self.status = JobStatus::Failed;
                self.end_time = Some(Utc::now().into());
                self.errors = Some(error_message.to_string());
                Ok(self)
            }
            _ => Err(self.reject(JobAction::Fail)),
        }
    }

    /// 取消任务
    ///
    /// Pending/Running → Cancelled。取消只修改记录本身，
    /// 不会中断已经发出的上游请求。
    pub fn cancel(mut self, reason: Option<&str>) -> Result<Self, TransitionError> {
        match self.status {
            JobStatus::Pending | JobStatus::Running => {
                self.status = JobStatus::Cancelled;
                self.end_time = Some(Utc::now().into());
                self.errors = Some(reason.unwrap_or(DEFAULT_CANCEL_REASON).to_string());
                Ok(self)
            }
            _ => Err(self.reject(JobAction::Cancel)),
        }
    }

    /// 判断任务是否属于指定用户
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

#[cfg(test)]
#[path = "scraping_job_test.rs"]
mod tests;
