// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::NotifierSettings;
use crate::domain::services::chat_transport::{ChatTransport, ParseMode};
use crate::domain::services::message_formatter::{self, Notification};
use crate::domain::services::record_store::RecordStore;
use crate::engines::traits::FetchError;
use crate::utils::errors::{TransportError, WorkerError};
use crate::utils::retry_policy::RetryPolicy;
use crate::workers::worker::Worker;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, MissedTickBehavior};
use tracing::{error, info, warn};

/// 启动问候
pub const GREETING: &str = "Waxfetcher started";
/// 退出告别
pub const FAREWELL: &str = "Bye";

/// 通知工作器
///
/// 按固定间隔刷新记录仓库，把每条新记录以图片加文本的形式发送到聊天。
/// 同一轮中的记录依次处理，处理完才会进入下一轮。
pub struct NotifierWorker {
    store: Arc<RecordStore>,
    transport: Arc<dyn ChatTransport>,
    chat_id: String,
    interval: Duration,
    first_delay: Duration,
    retry_policy: RetryPolicy,
}

impl NotifierWorker {
    /// 创建新的通知工作器实例
    ///
    /// # 参数
    ///
    /// * `store` - 记录仓库
    /// * `transport` - 聊天通道
    /// * `chat_id` - 目标聊天
    /// * `settings` - 通知循环配置
    pub fn new(
        store: Arc<RecordStore>,
        transport: Arc<dyn ChatTransport>,
        chat_id: String,
        settings: &NotifierSettings,
    ) -> Self {
        Self {
            store,
            transport,
            chat_id,
            interval: settings.fetch_interval(),
            first_delay: settings.first_delay(),
            retry_policy: RetryPolicy::for_interval(
                settings.fetch_interval(),
                settings.max_backoff(),
            ),
        }
    }

    /// 执行一轮刷新与通知
    ///
    /// # 返回值
    ///
    /// * `Ok(usize)` - 本轮发现的新记录数量
    /// * `Err(FetchError)` - 目录页抓取失败，本轮被跳过
    pub async fn tick(&self) -> Result<usize, FetchError> {
        let new_records = self.store.refresh().await?;
        let total = new_records.len();

        for record in new_records {
            let record = self.store.enrich(record).await;
            let notification = message_formatter::format(&record);

            if let Err(e) = self.deliver(&notification).await {
                error!(link = %record.link, error = %e, "Failed to deliver record update");
            }
        }

        Ok(total)
    }

    /// 发送一条通知：先发图片，再发文本
    ///
    /// 图片失败不阻止文本发送。
    async fn deliver(&self, notification: &Notification) -> Result<(), TransportError> {
        if let Err(e) = self
            .transport
            .send_photo(&self.chat_id, &notification.photo_url)
            .await
        {
            warn!(photo = %notification.photo_url, error = %e, "Failed to send record photo");
        }

        self.transport
            .send_message(
                &self.chat_id,
                &notification.text,
                Some(ParseMode::MarkdownV2),
                true,
            )
            .await
    }

    /// 发送启动问候
    pub async fn greet(&self) -> Result<(), TransportError> {
        self.transport
            .send_message(&self.chat_id, GREETING, None, false)
            .await
    }

    /// 发送退出告别
    pub async fn farewell(&self) -> Result<(), TransportError> {
        self.transport
            .send_message(&self.chat_id, FAREWELL, None, false)
            .await
    }

    /// 刷新失败后额外等待的时间
    ///
    /// 超时、连接失败和 5xx/429 按连续失败次数指数退避；
    /// 404 之类的错误重试也不会更快恢复，只等下一个 tick。
    pub fn backoff_after(&self, error: &FetchError, failures: u32) -> Duration {
        if error.is_retryable() {
            self.retry_policy.calculate_backoff(failures)
        } else {
            Duration::ZERO
        }
    }
}

#[async_trait]
impl Worker for NotifierWorker {
    async fn run(&self) -> Result<(), WorkerError> {
        info!(
            interval_secs = self.interval.as_secs(),
            first_delay_secs = self.first_delay.as_secs(),
            "Notifier worker started"
        );

        sleep(self.first_delay).await;

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut failures = 0u32;

        loop {
            interval.tick().await;

            match self.tick().await {
                Ok(count) => {
                    if failures > 0 {
                        info!(failures, "Catalog reachable again");
                    }
                    failures = 0;
                    if count > 0 {
                        info!(count, "Sent record updates");
                    }
                }
                Err(e) => {
                    failures = failures.saturating_add(1);
                    let backoff = self.backoff_after(&e, failures);
                    error!(
                        error = %e,
                        failures,
                        retryable = e.is_retryable(),
                        backoff_secs = backoff.as_secs(),
                        "Record refresh failed, skipping tick"
                    );
                    // 退避期间错过的 tick 会在睡眠结束后立即触发一次
                    sleep(backoff).await;
                }
            }
        }
    }

    fn name(&self) -> &str {
        "notifier"
    }
}

#[cfg(test)]
#[path = "notifier_worker_test.rs"]
mod tests;
