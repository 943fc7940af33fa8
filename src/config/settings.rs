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

use crate::utils::errors::ConfigError;
use crate::utils::url_utils;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含目录页、HTTP、通知循环和Telegram等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 目录页配置
    pub catalog: CatalogSettings,
    /// HTTP客户端配置
    pub http: HttpSettings,
    /// 通知循环配置
    pub notifier: NotifierSettings,
    /// Telegram配置
    pub telegram: TelegramSettings,
}

/// 目录页配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    /// 站点根地址，用于拼接相对链接和图片地址
    pub base_url: String,
    /// 目录页地址
    pub fetch_url: String,
    /// 列表项选择器
    pub item_selector: String,
    /// 详情页信息块选择器
    pub detail_selector: String,
    /// 是否抓取详情页补充风格信息
    pub fetch_details: bool,
}

/// HTTP客户端配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// User-Agent
    pub user_agent: String,
}

/// 通知循环配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct NotifierSettings {
    /// 轮询间隔（秒）
    pub fetch_interval_secs: u64,
    /// 首次轮询前的等待时间（秒）
    pub first_delay_secs: u64,
    /// 连续失败时的最大退避时间（秒）
    pub max_backoff_secs: u64,
}

/// Telegram配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramSettings {
    /// 机器人令牌
    pub bot_token: String,
    /// 目标聊天ID（数字ID或 @频道名）
    pub chat_id: String,
    /// Bot API 根地址
    pub api_base_url: String,
    /// getUpdates 长轮询超时时间（秒）
    pub poll_timeout_secs: u64,
}

impl NotifierSettings {
    pub fn fetch_interval(&self) -> Duration {
        Duration::from_secs(self.fetch_interval_secs)
    }

    pub fn first_delay(&self) -> Duration {
        Duration::from_secs(self.first_delay_secs)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_secs(self.max_backoff_secs)
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `WAXFETCHER__` 前缀的环境变量，后者覆盖前者
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载并校验的配置
    /// * `Err(ConfigError)` - 配置加载或校验失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::load(
            "config",
            &env,
            Environment::with_prefix("WAXFETCHER").separator("__"),
        )
    }

    /// 从指定目录和环境变量源加载配置
    pub fn load(
        config_dir: &str,
        env: &str,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            // Start with default settings
            .set_default("catalog.base_url", "http://long-play.ru")?
            .set_default("catalog.item_selector", ".item")?
            .set_default("catalog.detail_selector", ".product-info-item")?
            .set_default("catalog.fetch_details", true)?
            .set_default("http.timeout_secs", 15)?
            .set_default("http.user_agent", "Mozilla/5.0 (compatible; waxfetcher/0.1)")?
            .set_default("notifier.first_delay_secs", 30)?
            .set_default("notifier.max_backoff_secs", 600)?
            .set_default("telegram.api_base_url", "https://api.telegram.org")?
            .set_default("telegram.poll_timeout_secs", 30)?
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            .add_source(File::with_name(&format!("{}/{}", config_dir, env)).required(false))
            .add_source(environment);

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// 校验必填项和取值范围
    pub fn validate(&self) -> Result<(), ConfigError> {
        url_utils::validate_http_url(&self.catalog.base_url)
            .map_err(|e| ConfigError::Invalid(format!("catalog.base_url: {}", e)))?;
        url_utils::validate_http_url(&self.catalog.fetch_url)
            .map_err(|e| ConfigError::Invalid(format!("catalog.fetch_url: {}", e)))?;
        url_utils::validate_http_url(&self.telegram.api_base_url)
            .map_err(|e| ConfigError::Invalid(format!("telegram.api_base_url: {}", e)))?;

        if self.telegram.bot_token.trim().is_empty() {
            return Err(ConfigError::Invalid("telegram.bot_token is empty".to_string()));
        }
        if self.telegram.chat_id.trim().is_empty() {
            return Err(ConfigError::Invalid("telegram.chat_id is empty".to_string()));
        }
        if self.notifier.fetch_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "notifier.fetch_interval_secs must be positive".to_string(),
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "http.timeout_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// 目录站点的主机名，用于 /count 回复
    pub fn store_host(&self) -> String {
        url::Url::parse(&self.catalog.base_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| self.catalog.base_url.clone())
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
