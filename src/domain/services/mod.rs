// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 聊天通道（chat_transport）：通知发送接口
/// - 提取服务（extraction_service）：从目录页和详情页中提取记录
/// - 记录仓库（record_store）：保存上次抓取结果并计算新上架记录
/// - 消息格式化（message_formatter）：把记录转换为聊天通知
pub mod chat_transport;
pub mod extraction_service;
pub mod message_formatter;
pub mod record_store;
