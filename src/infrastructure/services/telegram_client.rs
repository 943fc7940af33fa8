// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{HttpSettings, TelegramSettings};
use crate::domain::services::chat_transport::{ChatTransport, ParseMode};
use crate::infrastructure::services::telegram_types::{
    ApiResponse, GetUpdatesRequest, SendMessageRequest, SendPhotoRequest, Update,
};
use crate::utils::errors::TransportError;
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Telegram Bot API 客户端
///
/// 所有方法都以 JSON 形式 POST 到 `{api_base_url}/bot{token}/{method}`。
/// 请求错误在返回前去掉URL，避免令牌出现在日志中。
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    api_url: String,
    request_timeout: Duration,
    poll_timeout_secs: u64,
}

impl TelegramClient {
    /// 创建新的Telegram客户端
    ///
    /// # 参数
    ///
    /// * `telegram` - Telegram配置
    /// * `http` - HTTP配置（超时）
    ///
    /// # 返回值
    ///
    /// * `Ok(TelegramClient)` - 客户端
    /// * `Err(TransportError)` - 客户端构建失败
    pub fn new(telegram: &TelegramSettings, http: &HttpSettings) -> Result<Self, TransportError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("Waxfetcher/0.1.0"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(http.timeout_secs))
            .build()
            .map_err(|e| TransportError::Request(e.without_url()))?;

        Ok(Self {
            client,
            api_url: format!(
                "{}/bot{}",
                telegram.api_base_url.trim_end_matches('/'),
                telegram.bot_token
            ),
            request_timeout: Duration::from_secs(http.timeout_secs),
            poll_timeout_secs: telegram.poll_timeout_secs,
        })
    }

    /// 长轮询获取更新
    ///
    /// # 参数
    ///
    /// * `offset` - 第一个未确认更新的ID
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, TransportError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: self.poll_timeout_secs,
            allowed_updates: vec!["message"],
        };
        // 长轮询本身会占用 poll_timeout，再加上普通请求的超时
        let timeout = Duration::from_secs(self.poll_timeout_secs) + self.request_timeout;
        self.call("getUpdates", &request, timeout).await
    }

    async fn call<B, T>(&self, method: &str, body: &B, timeout: Duration) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(method, "Calling Telegram API");

        let response = self
            .client
            .post(format!("{}/{}", self.api_url, method))
            .json(body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.without_url()))?;

        let status = response.status();
        let api: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| TransportError::Request(e.without_url()))?;

        if !api.ok {
            let code = api.error_code.unwrap_or(status.as_u16());
            let message = format!(
                "{} ({}): {}",
                method,
                code,
                api.description.unwrap_or_else(|| "no description".to_string())
            );
            // 未知令牌时 Telegram 返回 404
            return Err(match code {
                401 | 404 => TransportError::Unauthorized(message),
                _ => TransportError::Api(message),
            });
        }

        api.result
            .ok_or_else(|| TransportError::Api(format!("{}: response without result", method)))
    }
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn send_photo(&self, chat_id: &str, photo_url: &str) -> Result<(), TransportError> {
        let request = SendPhotoRequest {
            chat_id,
            photo: photo_url,
        };
        self.call::<_, serde_json::Value>("sendPhoto", &request, self.request_timeout)
            .await
            .map(|_| ())
    }

    async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        parse_mode: Option<ParseMode>,
        disable_link_preview: bool,
    ) -> Result<(), TransportError> {
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode,
            disable_web_page_preview: disable_link_preview,
        };
        self.call::<_, serde_json::Value>("sendMessage", &request, self.request_timeout)
            .await
            .map(|_| ())
    }
}
