// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::CatalogSettings;
use crate::domain::models::{Record, RecordPool};
use crate::domain::services::extraction_service::ExtractionService;
use crate::engines::traits::{FetchError, PageFetcher};
use crate::utils::errors::StoreError;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// 记录仓库
///
/// 持有上一次抓取得到的记录池，并通过集合差找出新上架的记录。
/// `refresh` 在整个抓取-比较-替换过程中持有锁，因此多个调用方也不会并发刷新。
pub struct RecordStore {
    fetcher: Arc<dyn PageFetcher>,
    extractor: ExtractionService,
    fetch_url: String,
    fetch_details: bool,
    previous: Mutex<RecordPool>,
}

impl RecordStore {
    /// 创建记录仓库并抓取初始记录池作为基线
    ///
    /// # 参数
    ///
    /// * `fetcher` - 页面抓取器
    /// * `extractor` - 提取服务
    /// * `catalog` - 目录页配置
    ///
    /// # 返回值
    ///
    /// * `Ok(RecordStore)` - 已载入基线的仓库
    /// * `Err(FetchError)` - 初始抓取失败
    pub async fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: ExtractionService,
        catalog: &CatalogSettings,
    ) -> Result<Self, FetchError> {
        let baseline = load_pool(fetcher.as_ref(), &extractor, &catalog.fetch_url).await?;
        info!(
            records = baseline.len(),
            fetcher = fetcher.name(),
            "Initial record pool loaded"
        );

        Ok(Self {
            fetcher,
            extractor,
            fetch_url: catalog.fetch_url.clone(),
            fetch_details: catalog.fetch_details,
            previous: Mutex::new(baseline),
        })
    }

    /// 刷新记录池并返回新上架的记录
    ///
    /// 抓取失败时旧记录池保持不变。
    pub async fn refresh(&self) -> Result<Vec<Record>, FetchError> {
        let mut previous = self.previous.lock().await;

        let current = self.fetch_pool().await?;
        let new_records = current.difference(&previous);

        debug!(
            previous = previous.len(),
            current = current.len(),
            new = new_records.len(),
            "Record pool refreshed"
        );

        *previous = current;
        Ok(new_records)
    }

    /// 重新抓取目录页并返回当前记录数量，不修改已保存的记录池
    pub async fn count(&self) -> Result<usize, FetchError> {
        Ok(self.fetch_pool().await?.len())
    }

    /// 已保存记录池的大小
    pub async fn known_count(&self) -> usize {
        self.previous.lock().await.len()
    }

    /// 抓取详情页中的风格信息
    pub async fn fetch_style(&self, link: &str) -> Result<String, StoreError> {
        let html = self.fetcher.fetch(link).await?;
        Ok(self.extractor.extract_style(&html)?)
    }

    /// 为记录补充详情页信息
    ///
    /// 详情页失败时返回原记录，通知照常发送，只是缺少风格一行。
    pub async fn enrich(&self, record: Record) -> Record {
        if !self.fetch_details {
            return record;
        }

        match self.fetch_style(&record.link).await {
            Ok(style) => record.with_style(style),
            Err(e) => {
                warn!(link = %record.link, error = %e, "Detail enrichment failed, sending without style");
                record
            }
        }
    }

    async fn fetch_pool(&self) -> Result<RecordPool, FetchError> {
        load_pool(self.fetcher.as_ref(), &self.extractor, &self.fetch_url).await
    }
}

async fn load_pool(
    fetcher: &dyn PageFetcher,
    extractor: &ExtractionService,
    url: &str,
) -> Result<RecordPool, FetchError> {
    let html = fetcher.fetch(url).await?;
    Ok(extractor.extract_pool(&html))
}

#[cfg(test)]
#[path = "record_store_test.rs"]
mod tests;
