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

use crate::config::settings::HttpSettings;
use crate::engines::traits::{FetchError, PageFetcher};
use crate::utils::url_utils;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;

/// 抓取引擎
///
/// 基于reqwest实现的基本HTTP抓取引擎，所有请求共用一个带超时的客户端
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// 创建新的抓取引擎
    ///
    /// # 参数
    ///
    /// * `settings` - HTTP配置（超时、User-Agent）
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestFetcher)` - 抓取引擎
    /// * `Err(FetchError)` - 客户端构建失败
    pub fn new(settings: &HttpSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for ReqwestFetcher {
    /// 执行HTTP抓取
    ///
    /// # 参数
    ///
    /// * `url` - 页面地址
    ///
    /// # 返回值
    ///
    /// * `Ok(String)` - 响应内容
    /// * `Err(FetchError)` - 抓取过程中出现的错误
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let url = url_utils::validate_http_url(url).map_err(FetchError::InvalidUrl)?;

        let start = Instant::now();
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content = response.text().await?;
        debug!(
            url = %url,
            bytes = content.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Page fetched"
        );

        Ok(content)
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
