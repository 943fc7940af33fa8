// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::support::*;
use serde_json::json;
use std::sync::Arc;
use waxfetcher::domain::services::extraction_service::ExtractionService;
use waxfetcher::domain::services::record_store::RecordStore;
use waxfetcher::engines::reqwest_engine::ReqwestFetcher;
use waxfetcher::engines::traits::FetchError;
use waxfetcher::infrastructure::services::telegram_client::TelegramClient;
use waxfetcher::workers::notifier_worker::NotifierWorker;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn store_for(site: &MockServer, fetch_details: bool) -> RecordStore {
    let catalog = catalog_settings(site, fetch_details);
    let fetcher = Arc::new(ReqwestFetcher::new(&http_settings()).unwrap());
    let extractor = ExtractionService::new(&catalog).unwrap();
    RecordStore::new(fetcher, extractor, &catalog).await.unwrap()
}

#[tokio::test]
async fn test_refresh_over_http_reports_only_new_listings() {
    let site = MockServer::start().await;
    serve_catalog(&site, &[1, 2, 3]).await;
    let store = store_for(&site, false).await;

    assert!(store.refresh().await.unwrap().is_empty());

    serve_catalog(&site, &[2, 3, 4]).await;
    let new = store.refresh().await.unwrap();

    assert_eq!(new.len(), 1);
    assert_eq!(new[0].artist, "Artist 4");
    assert_eq!(new[0].title, "Title 4");
    assert_eq!(new[0].price, "400 ₽");
    assert_eq!(new[0].link, format!("{}/item/4", site.uri()));
    assert_eq!(new[0].picture_url, format!("{}/img/4.jpg", site.uri()));

    assert!(store.refresh().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_count_over_http_is_independent_of_refresh() {
    let site = MockServer::start().await;
    serve_catalog(&site, &[1]).await;
    let store = store_for(&site, false).await;

    serve_catalog(&site, &[1, 2, 3]).await;
    assert_eq!(store.count().await.unwrap(), 3);
    assert_eq!(store.refresh().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_server_error_keeps_previous_pool() {
    let site = MockServer::start().await;
    serve_catalog(&site, &[1, 2]).await;
    let store = store_for(&site, false).await;

    site.reset().await;
    Mock::given(method("GET"))
        .and(path("/catalog"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&site)
        .await;

    match store.refresh().await {
        Err(FetchError::Status { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected 503, got {:?}", other.map(|r| r.len())),
    }

    serve_catalog(&site, &[1, 2, 5]).await;
    let new = store.refresh().await.unwrap();
    assert_eq!(new.len(), 1);
    assert_eq!(new[0].artist, "Artist 5");
}

#[tokio::test]
async fn test_tick_delivers_enriched_record_to_telegram() {
    let site = MockServer::start().await;
    let telegram = MockServer::start().await;
    serve_catalog(&site, &[1]).await;
    mock_telegram_sends(&telegram).await;

    let store = Arc::new(store_for(&site, true).await);
    let client = Arc::new(TelegramClient::new(&telegram_settings(&telegram), &http_settings()).unwrap());
    let worker = NotifierWorker::new(store, client, CHAT_ID.to_string(), &notifier_settings());

    serve_catalog(&site, &[1, 2]).await;
    serve_detail(&site, 2, "Acid House").await;

    assert_eq!(worker.tick().await.unwrap(), 1);

    let calls = telegram_calls(&telegram).await;
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, "sendPhoto");
    assert_eq!(
        calls[0].1,
        json!({"chat_id": CHAT_ID, "photo": format!("{}/img/2.jpg", site.uri())})
    );
    assert_eq!(calls[1].0, "sendMessage");
    assert_eq!(
        calls[1].1,
        json!({
            "chat_id": CHAT_ID,
            "text": format!("[Artist 2 — Title 2]({}/item/2)\n\nStyle: Acid House\n200 ₽", site.uri()),
            "parse_mode": "MarkdownV2",
            "disable_web_page_preview": true
        })
    );
}

#[tokio::test]
async fn test_missing_detail_page_sends_message_without_style() {
    let site = MockServer::start().await;
    let telegram = MockServer::start().await;
    serve_catalog(&site, &[]).await;
    mock_telegram_sends(&telegram).await;

    let store = Arc::new(store_for(&site, true).await);
    let client = Arc::new(TelegramClient::new(&telegram_settings(&telegram), &http_settings()).unwrap());
    let worker = NotifierWorker::new(store, client, CHAT_ID.to_string(), &notifier_settings());

    // 详情页未挂载，模拟服务器返回 404
    serve_catalog(&site, &[9]).await;
    assert_eq!(worker.tick().await.unwrap(), 1);

    let calls = telegram_calls(&telegram).await;
    let text = calls
        .iter()
        .find(|(m, _)| m == "sendMessage")
        .map(|(_, body)| body["text"].as_str().unwrap().to_string())
        .unwrap();
    assert_eq!(
        text,
        format!("[Artist 9 — Title 9]({}/item/9)\n\n900 ₽", site.uri())
    );
}
