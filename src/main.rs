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

use std::sync::Arc;
use tracing::{error, info};
use waxfetcher::config::settings::Settings;
use waxfetcher::domain::services::chat_transport::ChatTransport;
use waxfetcher::domain::services::extraction_service::ExtractionService;
use waxfetcher::domain::services::record_store::RecordStore;
use waxfetcher::engines::reqwest_engine::ReqwestFetcher;
use waxfetcher::engines::traits::PageFetcher;
use waxfetcher::infrastructure::services::telegram_client::TelegramClient;
use waxfetcher::utils::telemetry;
use waxfetcher::workers::command_worker::CommandWorker;
use waxfetcher::workers::manager::WorkerManager;
use waxfetcher::workers::notifier_worker::NotifierWorker;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动工作器
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting waxfetcher...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!(
        fetch_url = %settings.catalog.fetch_url,
        interval_secs = settings.notifier.fetch_interval_secs,
        "Configuration loaded"
    );

    // 3. Build the record store and load the baseline pool
    let fetcher: Arc<dyn PageFetcher> = Arc::new(ReqwestFetcher::new(&settings.http)?);
    let extractor = ExtractionService::new(&settings.catalog)?;
    let store = Arc::new(RecordStore::new(fetcher, extractor, &settings.catalog).await?);

    // 4. Initialize the chat transport
    let telegram = Arc::new(TelegramClient::new(&settings.telegram, &settings.http)?);
    let transport: Arc<dyn ChatTransport> = telegram.clone();

    // 5. Start workers
    let notifier = Arc::new(NotifierWorker::new(
        store.clone(),
        transport.clone(),
        settings.telegram.chat_id.clone(),
        &settings.notifier,
    ));
    if let Err(e) = notifier.greet().await {
        error!(error = %e, "Failed to send greeting");
    }

    let commands = Arc::new(CommandWorker::new(
        store,
        telegram,
        transport,
        settings.telegram.chat_id.clone(),
        settings.store_host(),
    ));

    let mut manager = WorkerManager::new();
    manager.spawn(notifier.clone());
    manager.spawn(commands);

    manager.wait_for_shutdown().await;

    if let Err(e) = notifier.farewell().await {
        error!(error = %e, "Failed to send farewell");
    }

    Ok(())
}
