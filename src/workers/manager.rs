// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::workers::worker::Worker;
use std::sync::Arc;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// 工作管理器
///
/// 负责启动后台工作器并在收到关闭信号时终止它们
#[derive(Default)]
pub struct WorkerManager {
    handles: Vec<(String, JoinHandle<()>)>,
}

impl WorkerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 启动工作器
    ///
    /// # 参数
    ///
    /// * `worker` - 要启动的工作器
    pub fn spawn(&mut self, worker: Arc<dyn Worker>) {
        let name = worker.name().to_string();
        let task_name = name.clone();

        let handle = tokio::spawn(async move {
            match worker.run().await {
                Ok(()) => info!(worker = %task_name, "Worker finished"),
                Err(e) => error!(worker = %task_name, error = %e, "Worker failed"),
            }
        });

        info!(worker = %name, "Worker spawned");
        self.handles.push((name, handle));
    }

    #[cfg(test)]
    fn running(&self) -> usize {
        self.handles
            .iter()
            .filter(|(_, handle)| !handle.is_finished())
            .count()
    }

    /// 终止所有工作器
    pub fn shutdown(&mut self) {
        info!("Shutting down workers...");
        for (name, handle) in self.handles.drain(..) {
            handle.abort();
            info!(worker = %name, "Worker stopped");
        }
    }

    /// 等待关闭信号并关闭工作进程
    pub async fn wait_for_shutdown(&mut self) {
        match signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(err) => error!("Unable to listen for shutdown signal: {}", err),
        }

        self.shutdown();
        info!("Workers shut down successfully");
    }
}
