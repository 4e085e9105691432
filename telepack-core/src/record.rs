//! 解码记录
//!
//! 字段名到无符号整数值的映射，每次解码新建，归调用方所有

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::HashMap;
use std::ops::Index;

/// 解码记录
///
/// 条目顺序与模式顺序一致，但使用方应按名称查找。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedRecord {
    entries: Vec<(String, u32)>,
}

impl DecodedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// 追加一个字段值
    ///
    /// 名称唯一性由模式保证，这里不再检查。
    pub fn push(&mut self, name: impl Into<String>, value: u32) {
        self.entries.push((name.into(), value));
    }

    /// 按名称获取字段值
    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(field_name, _)| field_name == name)
            .map(|&(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按模式顺序遍历 `(名称, 值)`
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
    }

    /// 获取所有字段名称
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// 转换为 `HashMap`，丢弃顺序
    pub fn into_map(self) -> HashMap<String, u32> {
        self.entries.into_iter().collect()
    }
}

impl Index<&str> for DecodedRecord {
    type Output = u32;

    fn index(&self, name: &str) -> &u32 {
        match self.entries.iter().find(|(field_name, _)| field_name == name) {
            Some((_, value)) => value,
            None => panic!("no field named '{name}' in decoded record"),
        }
    }
}

impl Serialize for DecodedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
