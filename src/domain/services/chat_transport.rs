// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::TransportError;
use async_trait::async_trait;
use serde::Serialize;

/// 文本解析模式
///
/// 旧版 Markdown 无法在链接文字中转义，只支持 MarkdownV2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    MarkdownV2,
}

/// 聊天通道接口
///
/// 通知循环只通过该接口发送消息，不关心具体的聊天平台
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// 发送图片
    async fn send_photo(&self, chat_id: &str, photo_url: &str) -> Result<(), TransportError>;

    /// 发送文本消息
    async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        parse_mode: Option<ParseMode>,
        disable_link_preview: bool,
    ) -> Result<(), TransportError>;
}
