// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::FetchError;
use thiserror::Error;

/// 字段提取错误
///
/// 列表节点的结构与预期不符时返回，只影响单条记录
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("缺少元素: {field}")]
    MissingElement { field: &'static str },

    #[error("缺少属性: {field} ({attr})")]
    MissingAttribute {
        field: &'static str,
        attr: &'static str,
    },

    #[error("无效地址: {field} ({value})")]
    InvalidUrl { field: &'static str, value: String },

    #[error("无效选择器: {0}")]
    InvalidSelector(String),
}

/// 配置错误
///
/// 启动阶段的致命错误，进程不应继续运行
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置加载失败: {0}")]
    Load(#[from] config::ConfigError),

    #[error("无效配置: {0}")]
    Invalid(String),
}

/// 聊天通道错误
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("接口错误: {0}")]
    Api(String),

    /// 令牌无效或被吊销，重试没有意义
    #[error("令牌被拒绝: {0}")]
    Unauthorized(String),
}

impl TransportError {
    /// 判断错误是否需要停止工作器
    pub fn is_fatal(&self) -> bool {
        matches!(self, TransportError::Unauthorized(_))
    }
}

/// 记录仓库错误
///
/// 详情页抓取同时可能遇到网络错误和结构错误
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Worker错误类型
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("通道错误: {0}")]
    Transport(#[from] TransportError),
}
