// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::chat_transport::ChatTransport;
use crate::domain::services::record_store::RecordStore;
use crate::infrastructure::services::telegram_client::TelegramClient;
use crate::utils::errors::{TransportError, WorkerError};
use crate::workers::worker::Worker;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// 轮询失败后的等待时间
const POLL_ERROR_DELAY: Duration = Duration::from_secs(5);

/// 聊天命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `/start`
    Start,
    /// `/count`
    Count,
}

impl Command {
    /// 解析消息文本中的命令，支持 `/count@botname` 形式
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        let name = word.split('@').next()?;
        match name {
            "/start" => Some(Command::Start),
            "/count" => Some(Command::Count),
            _ => None,
        }
    }
}

/// 命令工作器
///
/// 长轮询 Telegram 更新并响应配置聊天中的命令。
/// `/count` 只调用 `RecordStore::count`，不会影响通知循环使用的记录池。
pub struct CommandWorker {
    store: Arc<RecordStore>,
    client: Arc<TelegramClient>,
    transport: Arc<dyn ChatTransport>,
    chat_id: String,
    store_host: String,
}

impl CommandWorker {
    /// 创建新的命令工作器实例
    ///
    /// # 参数
    ///
    /// * `store` - 记录仓库
    /// * `client` - 用于拉取更新的Telegram客户端
    /// * `transport` - 用于回复的聊天通道
    /// * `chat_id` - 接受命令的聊天
    /// * `store_host` - 回复中显示的站点名称
    pub fn new(
        store: Arc<RecordStore>,
        client: Arc<TelegramClient>,
        transport: Arc<dyn ChatTransport>,
        chat_id: String,
        store_host: String,
    ) -> Self {
        Self {
            store,
            client,
            transport,
            chat_id,
            store_host,
        }
    }

    /// 执行命令并回复
    pub async fn handle(&self, command: Command) -> Result<(), TransportError> {
        match command {
            Command::Start => self.reply("Hi!").await,
            Command::Count => {
                self.reply("Counting LPs, hang on...").await?;
                let text = match self.store.count().await {
                    Ok(count) => format!(
                        "{} has {} records in the store for the moment",
                        self.store_host, count
                    ),
                    Err(e) => {
                        warn!(error = %e, "Failed to count records");
                        "Could not reach the store right now".to_string()
                    }
                };
                self.reply(&text).await
            }
        }
    }

    /// 拉取一批更新并处理其中的命令
    ///
    /// # 返回值
    ///
    /// * `Ok(Option<i64>)` - 下一次轮询使用的 offset
    /// * `Err(TransportError)` - 拉取更新失败
    pub async fn poll_once(&self, offset: Option<i64>) -> Result<Option<i64>, TransportError> {
        let updates = self.client.get_updates(offset).await?;
        let mut next_offset = offset;

        for update in updates {
            next_offset = Some(update.update_id + 1);

            let Some(message) = update.message else {
                continue;
            };
            let Some(command) = message.text.as_deref().and_then(Command::parse) else {
                continue;
            };
            if !message.chat.matches(&self.chat_id) {
                debug!(chat = message.chat.id, "Ignoring command from another chat");
                continue;
            }

            info!(?command, "Handling command");
            if let Err(e) = self.handle(command).await {
                error!(?command, error = %e, "Failed to reply to command");
            }
        }

        Ok(next_offset)
    }

    async fn reply(&self, text: &str) -> Result<(), TransportError> {
        self.transport
            .send_message(&self.chat_id, text, None, false)
            .await
    }
}

#[async_trait]
impl Worker for CommandWorker {
    async fn run(&self) -> Result<(), WorkerError> {
        info!("Command worker started");
        let mut offset = None;

        loop {
            match self.poll_once(offset).await {
                Ok(next) => offset = next,
                Err(e) if e.is_fatal() => {
                    error!(error = %e, "Bot token rejected, stopping command worker");
                    return Err(e.into());
                }
                Err(e) => {
                    error!(error = %e, "Error polling updates");
                    sleep(POLL_ERROR_DELAY).await;
                }
            }
        }
    }

    fn name(&self) -> &str {
        "commands"
    }
}
