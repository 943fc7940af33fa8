// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// 唱片记录实体
///
/// 目录页上的一条商品。记录的身份只由 `link` 决定：
/// 两次抓取得到的同一商品即使其他字段（价格、空白）变化，也视为同一条记录。
#[derive(Debug, Clone)]
pub struct Record {
    /// 艺术家
    pub artist: String,
    /// 专辑标题
    pub title: String,
    /// 封面图片的绝对地址
    pub picture_url: String,
    /// 价格（保留站点原始格式）
    pub price: String,
    /// 商品详情页的绝对地址，同时作为身份键
    pub link: String,
    /// 风格，仅在抓取详情页后填充
    pub style: Option<String>,
}

impl Record {
    /// 身份键
    pub fn key(&self) -> &str {
        &self.link
    }

    /// 附加详情页中的风格信息
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.link == other.link
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.link.hash(state);
    }
}

/// 记录池
///
/// 某次抓取时目录页上的全部记录，按身份去重；迭代顺序与页面顺序一致
#[derive(Debug, Clone, Default)]
pub struct RecordPool {
    records: Vec<Record>,
    keys: HashSet<String>,
}

impl RecordPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入记录，身份已存在时忽略并返回 false
    pub fn insert(&mut self, record: Record) -> bool {
        if !self.keys.insert(record.link.clone()) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn contains(&self, record: &Record) -> bool {
        self.keys.contains(record.key())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// 集合差 `self \ previous`
    ///
    /// 返回本池中存在、而 `previous` 中不存在的记录。
    /// `previous` 的每一条记录都参与比较。
    pub fn difference(&self, previous: &RecordPool) -> Vec<Record> {
        self.records
            .iter()
            .filter(|record| !previous.contains(record))
            .cloned()
            .collect()
    }
}

impl FromIterator<Record> for RecordPool {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut pool = RecordPool::new();
        for record in iter {
            pool.insert(record);
        }
        pool
    }
}

impl IntoIterator for RecordPool {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
