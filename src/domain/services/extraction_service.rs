// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::CatalogSettings;
use crate::domain::models::{Record, RecordPool};
use crate::utils::errors::ExtractionError;
use crate::utils::url_utils;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// 提取服务
///
/// 负责从目录页和详情页 HTML 中提取结构化数据。
/// 列表节点的结构是固定的：
///
/// ```html
/// <a class="item" href="/item/123">
///   <div><img src="/img/a.jpg"></div>
///   <h3>Artist</h3>
///   <p>Title</p>
///   <div>1200 ₽</div>
/// </a>
/// ```
pub struct ExtractionService {
    base_url: Url,
    item_selector: String,
    item: Selector,
    detail: Selector,
    heading: Selector,
    paragraph: Selector,
    container: Selector,
    image: Selector,
    span: Selector,
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector)
        .map_err(|e| ExtractionError::InvalidSelector(format!("{}: {}", selector, e)))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

impl ExtractionService {
    /// 创建提取服务
    ///
    /// # 参数
    ///
    /// * `catalog` - 目录页配置（根地址与选择器）
    ///
    /// # 返回值
    ///
    /// * `Ok(ExtractionService)` - 提取服务
    /// * `Err(ExtractionError)` - 根地址或选择器无效
    pub fn new(catalog: &CatalogSettings) -> Result<Self, ExtractionError> {
        let base_url = Url::parse(&catalog.base_url).map_err(|_| ExtractionError::InvalidUrl {
            field: "base_url",
            value: catalog.base_url.clone(),
        })?;

        Ok(Self {
            base_url,
            item_selector: catalog.item_selector.clone(),
            item: parse_selector(&catalog.item_selector)?,
            detail: parse_selector(&catalog.detail_selector)?,
            heading: parse_selector("h3")?,
            paragraph: parse_selector("p")?,
            container: parse_selector("div")?,
            image: parse_selector("img")?,
            span: parse_selector("span")?,
        })
    }

    /// 解析目录页，返回其中所有可提取的记录
    ///
    /// 单条记录结构异常只会被记录并跳过，不影响其他记录。
    /// 没有任何匹配节点时返回空池。
    pub fn extract_pool(&self, html: &str) -> RecordPool {
        let document = Html::parse_document(html);
        let mut pool = RecordPool::new();
        let mut matched = 0usize;

        for node in document.select(&self.item) {
            matched += 1;
            match self.extract_record(node) {
                Ok(record) => {
                    let link = record.link.clone();
                    if !pool.insert(record) {
                        debug!(link = %link, "Duplicate listing on catalog page");
                    }
                }
                Err(e) => {
                    warn!(position = matched, error = %e, "Skipping malformed listing");
                }
            }
        }

        if matched == 0 {
            warn!(selector = %self.item_selector, "No listings matched on catalog page");
        }

        pool
    }

    /// 将单个列表节点转换为记录
    pub fn extract_record(&self, node: ElementRef<'_>) -> Result<Record, ExtractionError> {
        let artist = node
            .select(&self.heading)
            .next()
            .map(text_of)
            .ok_or(ExtractionError::MissingElement { field: "artist" })?;

        let title = node
            .select(&self.paragraph)
            .next()
            .map(text_of)
            .ok_or(ExtractionError::MissingElement { field: "title" })?;

        let mut containers = node.select(&self.container);

        let picture_src = containers
            .next()
            .and_then(|container| container.select(&self.image).next())
            .ok_or(ExtractionError::MissingElement { field: "picture" })?
            .value()
            .attr("src")
            .filter(|src| !src.trim().is_empty())
            .ok_or(ExtractionError::MissingAttribute {
                field: "picture",
                attr: "src",
            })?;

        let price = containers
            .next()
            .map(text_of)
            .ok_or(ExtractionError::MissingElement { field: "price" })?;

        let href = node
            .value()
            .attr("href")
            .filter(|href| !href.trim().is_empty())
            .ok_or(ExtractionError::MissingAttribute {
                field: "link",
                attr: "href",
            })?;

        Ok(Record {
            artist,
            title,
            picture_url: self.resolve("picture", picture_src)?,
            price,
            link: self.resolve("link", href)?,
            style: None,
        })
    }

    /// 从详情页提取风格：第二个信息块中的第一个 span
    pub fn extract_style(&self, html: &str) -> Result<String, ExtractionError> {
        let document = Html::parse_document(html);

        let style = document
            .select(&self.detail)
            .nth(1)
            .and_then(|block| block.select(&self.span).next())
            .map(text_of)
            .ok_or(ExtractionError::MissingElement { field: "style" })?;

        if style.is_empty() {
            return Err(ExtractionError::MissingElement { field: "style" });
        }

        Ok(style)
    }

    fn resolve(&self, field: &'static str, path: &str) -> Result<String, ExtractionError> {
        url_utils::resolve_url(&self.base_url, path)
            .map(String::from)
            .map_err(|_| ExtractionError::InvalidUrl {
                field,
                value: path.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
