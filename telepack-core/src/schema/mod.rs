//! 字段模式模块
//!
//! 定义二进制记录布局：有序的字段描述符序列。字段偏移量完全由
//! 累计宽度推导，字段之间既无间隙也无重叠。

use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::SchemaError;

/// 字段宽度（字节数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldWidth {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
}

impl FieldWidth {
    /// 由字节数构造，超出 1..=4 返回 `None`
    pub fn from_bytes(width: usize) -> Option<Self> {
        match width {
            1 => Some(FieldWidth::One),
            2 => Some(FieldWidth::Two),
            3 => Some(FieldWidth::Three),
            4 => Some(FieldWidth::Four),
            _ => None,
        }
    }

    /// 字节数
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// 该宽度可表示的最大无符号值
    pub const fn max_value(self) -> u32 {
        match self {
            FieldWidth::One => 0xFF,
            FieldWidth::Two => 0xFFFF,
            FieldWidth::Three => 0xFF_FFFF,
            FieldWidth::Four => u32::MAX,
        }
    }
}

/// 字段描述符
///
/// 模式定义中的一项声明。宽度在构建 [`Schema`] 时才校验，
/// 以便报告具体是哪个字段不合法。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(alias = "size")]
    pub width: usize, // 以字节为单位
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, width: usize) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }
}

/// 已校验的字段布局
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    name: String,
    width: FieldWidth,
    offset: usize,
}

impl FieldLayout {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> FieldWidth {
        self.width
    }

    /// 字段起始字节偏移
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 字段结束字节偏移（不含）
    pub fn end(&self) -> usize {
        self.offset + self.width.bytes()
    }
}

/// 字段模式
///
/// 构建后不可变，可在任意多个线程间只读共享。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// 模式名称（可选，仅用于诊断）
    name: Option<String>,
    /// 按声明顺序排列的字段布局
    fields: Vec<FieldLayout>,
    /// 字段名到索引的映射
    field_index: HashMap<String, usize>,
    /// 所有字段宽度之和，即最小缓冲区长度
    total_width: usize,
}

impl Schema {
    /// 由字段描述符构建模式
    ///
    /// # 参数
    /// - `descriptors`: 有序的字段描述符，顺序决定偏移量
    ///
    /// # 返回
    /// - `Ok(Schema)`: 校验通过的模式
    /// - `Err(SchemaError)`: 字段名为空、重复，或宽度不在 1..=4 之内
    pub fn new(descriptors: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        Self::build(descriptors.into_iter().map(|descriptor| {
            let width = i64::try_from(descriptor.width).unwrap_or(i64::MAX);
            (descriptor.name, width)
        }))
    }

    /// 校验 `(名称, 宽度)` 序列并计算偏移
    ///
    /// 宽度以有符号数传入，模式定义文件中的负数宽度同样报告为 `InvalidWidth`
    fn build(declarations: impl ExactSizeIterator<Item = (String, i64)>) -> Result<Self, SchemaError> {
        let mut fields = Vec::with_capacity(declarations.len());
        let mut field_index = HashMap::with_capacity(declarations.len());
        let mut offset = 0usize;

        for (index, (name, raw_width)) in declarations.enumerate() {
            if name.is_empty() {
                return Err(SchemaError::EmptyFieldName { index });
            }

            let Some(width) = usize::try_from(raw_width)
                .ok()
                .and_then(FieldWidth::from_bytes)
            else {
                return Err(SchemaError::InvalidWidth {
                    name,
                    width: raw_width,
                });
            };

            if field_index.contains_key(&name) {
                return Err(SchemaError::DuplicateFieldName { name });
            }

            field_index.insert(name.clone(), index);
            fields.push(FieldLayout {
                name,
                width,
                offset,
            });
            offset += width.bytes();
        }

        debug!(
            fields = fields.len(),
            total_width = offset,
            "schema constructed"
        );

        Ok(Self {
            name: None,
            fields,
            field_index,
            total_width: offset,
        })
    }

    /// 由 `(名称, 宽度)` 静态表构建模式
    pub fn from_pairs(pairs: &[(&str, usize)]) -> Result<Self, SchemaError> {
        Self::new(
            pairs
                .iter()
                .map(|&(name, width)| FieldDescriptor::new(name, width))
                .collect(),
        )
    }

    /// 解析JSON格式的模式定义
    ///
    /// 接受 `{"name": "...", "fields": [{"name": "id", "width": 1}, ...]}`
    /// 或直接的字段数组；`size` 可作为 `width` 的别名。
    pub fn from_json_str(json_str: &str) -> Result<Self, SchemaError> {
        let definition: SchemaDefinition =
            serde_json::from_str(json_str).map_err(|e| SchemaError::Parse(e.to_string()))?;
        definition.into_schema()
    }

    /// 从文件加载JSON格式的模式定义
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let json_str = fs::read_to_string(&path).map_err(|e| {
            SchemaError::Io(format!("'{}': {}", path.as_ref().display(), e))
        })?;
        Self::from_json_str(&json_str)
    }

    /// 设置模式名称
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// 按声明顺序返回所有字段布局
    pub fn fields(&self) -> &[FieldLayout] {
        &self.fields
    }

    /// 获取所有字段名称
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name()).collect()
    }

    /// 按名称查找字段
    pub fn field(&self, name: &str) -> Option<&FieldLayout> {
        self.field_index
            .get(name)
            .and_then(|&index| self.fields.get(index))
    }

    /// 获取字段的字节位置 `(offset, width)`
    pub fn field_position(&self, name: &str) -> Option<(usize, usize)> {
        self.field(name)
            .map(|field| (field.offset(), field.width().bytes()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 解码所需的最小缓冲区长度
    pub fn total_width(&self) -> usize {
        self.total_width
    }

    /// 还原为字段描述符序列
    pub fn descriptors(&self) -> Vec<FieldDescriptor> {
        self.fields
            .iter()
            .map(|field| FieldDescriptor::new(field.name.clone(), field.width.bytes()))
            .collect()
    }
}

/// 模式定义文件中的一项字段声明
///
/// 宽度按有符号整数读取，交由 [`Schema::build`] 统一校验
#[derive(Deserialize)]
struct RawField {
    name: String,
    #[serde(alias = "size")]
    width: i64,
}

/// 模式定义文件格式：带名称的对象或直接的字段数组
struct SchemaDefinition {
    name: Option<String>,
    fields: Vec<RawField>,
}

impl SchemaDefinition {
    fn into_schema(self) -> Result<Schema, SchemaError> {
        let schema = Schema::build(self.fields.into_iter().map(|field| (field.name, field.width)))?;
        Ok(match self.name {
            Some(name) => schema.with_name(name),
            None => schema,
        })
    }
}

impl<'de> Deserialize<'de> for SchemaDefinition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DefinitionVisitor)
    }
}

struct DefinitionVisitor;

impl<'de> Visitor<'de> for DefinitionVisitor {
    type Value = SchemaDefinition;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an array of fields or an object with a `fields` array")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        let fields = Vec::<RawField>::deserialize(SeqAccessDeserializer::new(seq))?;
        Ok(SchemaDefinition { name: None, fields })
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        #[derive(Deserialize)]
        struct Named {
            #[serde(default)]
            name: Option<String>,
            fields: Vec<RawField>,
        }

        let named = Named::deserialize(MapAccessDeserializer::new(map))?;
        Ok(SchemaDefinition {
            name: named.name,
            fields: named.fields,
        })
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Definition<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<&'a str>,
            fields: Vec<FieldDescriptor>,
        }

        Definition {
            name: self.name(),
            fields: self.descriptors(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SchemaDefinition::deserialize(deserializer)?
            .into_schema()
            .map_err(de::Error::custom)
    }
}
