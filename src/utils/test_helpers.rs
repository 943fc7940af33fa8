// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 单元测试共用的假实现与页面构造函数

use crate::config::settings::CatalogSettings;
use crate::domain::services::chat_transport::{ChatTransport, ParseMode};
use crate::engines::traits::{FetchError, PageFetcher};
use crate::utils::errors::TransportError;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const CATALOG_URL: &str = "http://long-play.ru/catalog/edm";

/// 内存中的页面抓取器，按URL返回预设页面或状态码错误
#[derive(Default)]
pub struct FakeFetcher {
    pages: Mutex<HashMap<String, Result<String, u16>>>,
    calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn set_page(&self, url: &str, html: String) {
        self.pages.lock().unwrap().insert(url.to_string(), Ok(html));
    }

    pub fn fail(&self, url: &str, status: u16) {
        self.pages.lock().unwrap().insert(url.to_string(), Err(status));
    }

    pub fn set_catalog(&self, ids: &[u32]) {
        self.set_page(CATALOG_URL, catalog_page(ids));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let page = self.pages.lock().unwrap().get(url).cloned();
        match page {
            Some(Ok(html)) => Ok(html),
            Some(Err(status)) => Err(FetchError::Status {
                status,
                url: url.to_string(),
            }),
            None => Err(FetchError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// 已发送的聊天消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Photo {
        chat_id: String,
        photo_url: String,
    },
    Message {
        chat_id: String,
        text: String,
        parse_mode: Option<ParseMode>,
        disable_link_preview: bool,
    },
}

/// 记录所有发送请求的聊天通道，可让指定图片发送失败
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
    failing_photos: Mutex<HashSet<String>>,
}

impl RecordingTransport {
    pub fn fail_photo(&self, photo_url: &str) {
        self.failing_photos
            .lock()
            .unwrap()
            .insert(photo_url.to_string());
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Message { text, .. } => Some(text),
                Sent::Photo { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_photo(&self, chat_id: &str, photo_url: &str) -> Result<(), TransportError> {
        if self.failing_photos.lock().unwrap().contains(photo_url) {
            return Err(TransportError::Api("wrong file identifier".to_string()));
        }
        self.sent.lock().unwrap().push(Sent::Photo {
            chat_id: chat_id.to_string(),
            photo_url: photo_url.to_string(),
        });
        Ok(())
    }

    async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        parse_mode: Option<ParseMode>,
        disable_link_preview: bool,
    ) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(Sent::Message {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
            parse_mode,
            disable_link_preview,
        });
        Ok(())
    }
}

pub fn listing(id: u32) -> String {
    format!(
        r#"<a class="item" href="/item/{id}">
            <div><img src="/img/{id}.jpg"></div>
            <h3>Artist {id}</h3>
            <p>Title {id}</p>
            <div>{id}00 ₽</div>
        </a>"#
    )
}

pub fn catalog_page(ids: &[u32]) -> String {
    let items: String = ids.iter().map(|&id| listing(id)).collect();
    format!("<html><body>{}</body></html>", items)
}

pub fn detail_page(style: &str) -> String {
    format!(
        r#"<div class="product-info-item"><span>LP</span></div>
           <div class="product-info-item"><span>{}</span></div>"#,
        style
    )
}

pub fn catalog_settings(fetch_details: bool) -> CatalogSettings {
    CatalogSettings {
        base_url: "http://long-play.ru".to_string(),
        fetch_url: CATALOG_URL.to_string(),
        item_selector: ".item".to_string(),
        detail_selector: ".product-info-item".to_string(),
        fetch_details,
    }
}

pub fn item_link(id: u32) -> String {
    format!("http://long-play.ru/item/{}", id)
}
