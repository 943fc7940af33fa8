// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：唱片记录和记录池
/// - 服务（services）：提取、比较和格式化
///
/// 领域层只依赖页面抓取特质，不依赖具体的HTTP实现或聊天通道。
pub mod models;
pub mod services;
