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

use async_trait::async_trait;
use thiserror::Error;

/// 抓取错误类型
#[derive(Error, Debug)]
pub enum FetchError {
    /// 地址无效
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// 请求失败（连接、超时、读取响应体）
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 非2xx状态码
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },
}

impl FetchError {
    /// 判断错误是否可重试
    ///
    /// # 返回值
    ///
    /// 如果错误是可重试的则返回true，否则返回false
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::RequestFailed(e) => {
                e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
            }
            FetchError::Status { status, .. } => *status >= 500 || *status == 429,
            FetchError::InvalidUrl(_) => false,
        }
    }
}

/// 页面抓取特质
///
/// 目录页和详情页都通过它获取HTML
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 获取页面内容
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;

    /// 抓取器名称
    fn name(&self) -> &'static str;
}
