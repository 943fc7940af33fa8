// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体：
/// - 唱片记录（record）：目录页上的一条商品及其身份规则
/// - 记录池（record）：某次抓取得到的全部记录
pub mod record;

pub use record::{Record, RecordPool};
