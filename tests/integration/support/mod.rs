// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::{json, Value};
use waxfetcher::config::settings::{CatalogSettings, HttpSettings, NotifierSettings, TelegramSettings};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "123456:secret-token";
pub const CHAT_ID: &str = "-100500";

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
    format!("<html><body><div class=\"catalog\">{}</div></body></html>", items)
}

pub fn detail_page(style: &str) -> String {
    format!(
        r#"<html><body><div class="product-info">
            <div class="product-info-item"><span>LP</span></div>
            <div class="product-info-item"><span>{}</span></div>
        </div></body></html>"#,
        style
    )
}

/// 在模拟站点上挂载目录页，替换之前的所有页面
pub async fn serve_catalog(server: &MockServer, ids: &[u32]) {
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/catalog"))
        .respond_with(ResponseTemplate::new(200).set_body_string(catalog_page(ids)))
        .mount(server)
        .await;
}

pub async fn serve_detail(server: &MockServer, id: u32, style: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/item/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_page(style)))
        .mount(server)
        .await;
}

/// 模拟 Telegram 的发送接口，返回成功
pub async fn mock_telegram_sends(server: &MockServer) {
    for api_method in ["sendMessage", "sendPhoto"] {
        Mock::given(method("POST"))
            .and(path(format!("/bot{}/{}", TOKEN, api_method)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": {"message_id": 1, "date": 0, "chat": {"id": -100500, "type": "group"}}
            })))
            .mount(server)
            .await;
    }
}

/// 收到的 Telegram 请求：(方法名, JSON请求体)
pub async fn telegram_calls(server: &MockServer) -> Vec<(String, Value)> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.to_string() == "POST")
        .map(|r| {
            let api_method = r.url.path().rsplit('/').next().unwrap_or_default().to_string();
            let body: Value = serde_json::from_slice(&r.body).unwrap_or(Value::Null);
            (api_method, body)
        })
        .collect()
}

pub fn catalog_settings(site: &MockServer, fetch_details: bool) -> CatalogSettings {
    CatalogSettings {
        base_url: site.uri(),
        fetch_url: format!("{}/catalog", site.uri()),
        item_selector: ".item".to_string(),
        detail_selector: ".product-info-item".to_string(),
        fetch_details,
    }
}

pub fn http_settings() -> HttpSettings {
    HttpSettings {
        timeout_secs: 5,
        user_agent: "waxfetcher-tests".to_string(),
    }
}

pub fn notifier_settings() -> NotifierSettings {
    NotifierSettings {
        fetch_interval_secs: 60,
        first_delay_secs: 0,
        max_backoff_secs: 600,
    }
}

pub fn telegram_settings(api: &MockServer) -> TelegramSettings {
    TelegramSettings {
        bot_token: TOKEN.to_string(),
        chat_id: CHAT_ID.to_string(),
        api_base_url: api.uri(),
        poll_timeout_secs: 0,
    }
}
