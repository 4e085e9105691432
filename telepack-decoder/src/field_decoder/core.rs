//! SchemaDecoder核心实现
//!
//! 按模式顺序单遍遍历缓冲区，逐字段提取小端无符号整数

use telepack_core::{DecodeError, DecodedRecord, Schema};

use super::le_extractor::extract_uint_le;

/// 缓冲区长度策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthPolicy {
    /// 只消费前 `total_width` 字节，忽略多余字节
    #[default]
    AllowTrailing,
    /// 缓冲区长度必须与模式总宽度完全一致
    Exact,
}

/// 模式驱动解码器
///
/// 只持有模式的只读引用，本身无状态，可在多个线程间共享。
#[derive(Debug, Clone, Copy)]
pub struct SchemaDecoder<'s> {
    schema: &'s Schema,
    length_policy: LengthPolicy,
}

impl<'s> SchemaDecoder<'s> {
    /// 创建解码器
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            length_policy: LengthPolicy::default(),
        }
    }

    /// 设置长度策略
    pub fn with_length_policy(mut self, length_policy: LengthPolicy) -> Self {
        self.length_policy = length_policy;
        self
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    pub fn length_policy(&self) -> LengthPolicy {
        self.length_policy
    }

    /// 解码缓冲区，提取所有字段
    ///
    /// # 参数
    /// - `buffer`: 原始数据，不会被修改
    ///
    /// # 返回
    /// - `Ok(DecodedRecord)`: 每个字段一项
    /// - `Err(DecodeError)`: 缓冲区过短（或严格策略下过长），不返回部分记录
    pub fn decode(&self, buffer: &[u8]) -> Result<DecodedRecord, DecodeError> {
        if self.length_policy == LengthPolicy::Exact && buffer.len() > self.schema.total_width() {
            return Err(DecodeError::TrailingBytes {
                expected: self.schema.total_width(),
                len: buffer.len(),
            });
        }

        let mut record = DecodedRecord::with_capacity(self.schema.len());
        let mut offset = 0usize; // 当前字节偏移

        for field in self.schema.fields() {
            debug_assert_eq!(offset, field.offset());

            let width = field.width();
            let value = extract_uint_le(buffer, offset, width).map_err(|_| {
                DecodeError::BufferTooShort {
                    field: field.name().to_string(),
                    offset,
                    width: width.bytes(),
                    len: buffer.len(),
                }
            })?;

            record.push(field.name(), value);
            offset += width.bytes();
        }

        Ok(record)
    }

    /// 提取单个字段值
    ///
    /// 直接按预先计算的偏移读取，不构建完整记录。
    ///
    /// # 参数
    /// - `buffer`: 原始数据
    /// - `field_name`: 字段名
    ///
    /// # 返回
    /// - `Ok(u32)`: 字段值
    /// - `Err(DecodeError)`: 字段不存在或超出缓冲区
    pub fn decode_field(&self, buffer: &[u8], field_name: &str) -> Result<u32, DecodeError> {
        let Some(field) = self.schema.field(field_name) else {
            return Err(DecodeError::FieldNotFound(field_name.to_string()));
        };

        extract_uint_le(buffer, field.offset(), field.width()).map_err(|_| {
            DecodeError::BufferTooShort {
                field: field.name().to_string(),
                offset: field.offset(),
                width: field.width().bytes(),
                len: buffer.len(),
            }
        })
    }
}

/// 按模式解码缓冲区
///
/// 等价于 `SchemaDecoder::new(schema).decode(buffer)`，多余字节被忽略。
///
/// # 示例
/// ```
/// use telepack_core::Schema;
/// use telepack_decoder::decode;
///
/// let schema = Schema::from_pairs(&[("id", 1), ("bar_press", 2)]).unwrap();
/// let record = decode(&schema, &[0x66, 0xC2, 0x03]).unwrap();
/// assert_eq!(record.get("id"), Some(102));
/// assert_eq!(record.get("bar_press"), Some(962));
/// ```
pub fn decode(schema: &Schema, buffer: &[u8]) -> Result<DecodedRecord, DecodeError> {
    SchemaDecoder::new(schema).decode(buffer)
}
