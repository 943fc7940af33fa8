// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::Record;
use crate::utils::markdown::{escape_link, escape_text};

/// 通知内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// 封面图片地址
    pub photo_url: String,
    /// MarkdownV2 文本
    pub text: String,
}

/// 将记录格式化为通知
///
/// 文本格式：
///
/// ```text
/// [Artist — Title](link)
///
/// Style: House
/// 1200 ₽
/// ```
///
/// 没有风格信息时省略 `Style` 一行。
pub fn format(record: &Record) -> Notification {
    let mut text = format!(
        "[{} — {}]({})\n\n",
        escape_text(&record.artist),
        escape_text(&record.title),
        escape_link(&record.link)
    );

    if let Some(style) = &record.style {
        text.push_str(&format!("Style: {}\n", escape_text(style)));
    }

    text.push_str(&escape_text(&record.price));

    Notification {
        photo_url: record.picture_url.clone(),
        text,
    }
}
