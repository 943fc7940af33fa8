// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Telegram `MarkdownV2` 解析模式的转义工具
//!
//! 旧版 Markdown 无法在链接文字内部转义，标题里的 `]` 会提前结束链接，
//! 所以通知使用 MarkdownV2：
//! - 普通文本中的所有保留字符前加反斜杠；
//! - 链接地址（`(...)` 内）只需转义 `)` 和 `\`。

const TEXT_SPECIALS: [char; 19] = [
    '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.',
    '!',
];

/// 转义普通文本
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if TEXT_SPECIALS.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// 转义链接地址（`[text](url)` 中的 url 部分）
pub fn escape_link(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for ch in url.chars() {
        if ch == ')' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
