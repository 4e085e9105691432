//! 错误定义
//!
//! 模式构建、解码、输入源与输出端各自拥有独立的错误类型

use thiserror::Error;

/// 模式错误
///
/// 在模式构建（或加载模式定义）时检测，对该模式实例是致命的
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// 字段名为空
    #[error("Invalid schema: field #{index} has an empty name")]
    EmptyFieldName { index: usize },
    /// 字段名重复
    #[error("Invalid schema: duplicate field name '{name}'")]
    DuplicateFieldName { name: String },
    /// 字段宽度不在 {1, 2, 3, 4} 之内
    #[error("Invalid schema: field '{name}' has unsupported width {width} (expected 1..=4)")]
    InvalidWidth { name: String, width: i64 },
    /// 模式定义解析失败
    #[error("Failed to parse schema definition: {0}")]
    Parse(String),
    /// 模式定义文件读取失败
    #[error("Failed to read schema definition: {0}")]
    Io(String),
}

/// 解码错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// 缓冲区在读完所有字段之前耗尽
    #[error(
        "Buffer too short: field '{field}' needs bytes {offset}..{end} but buffer has {len}",
        end = .offset + .width
    )]
    BufferTooShort {
        field: String,
        offset: usize,
        width: usize,
        len: usize,
    },
    /// 原始读取越界（不带字段上下文）
    #[error("Byte range exceeds buffer boundary: offset={offset}, width={width}, buffer_size={len}")]
    OutOfBounds {
        offset: usize,
        width: usize,
        len: usize,
    },
    /// 严格长度策略下缓冲区存在多余字节
    #[error("Trailing bytes: schema consumes {expected} bytes but buffer has {len}")]
    TrailingBytes { expected: usize, len: usize },
    /// 字段未找到
    #[error("Field not found: {0}")]
    FieldNotFound(String),
    /// 字段值超出目标类型范围
    #[error("Field '{field}' value {value} does not fit in {target}")]
    ValueOverflow {
        field: String,
        value: u32,
        target: &'static str,
    },
}

/// 输入源错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// 输入源已无更多数据
    #[error("Source exhausted")]
    Exhausted,
    /// 文件读取错误
    #[error("File error: {0}")]
    File(String),
    /// 格式解析错误
    #[error("Parse error: {0}")]
    Parse(String),
}

/// 输出端错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// 写入错误
    #[error("Write error: {0}")]
    Io(String),
    /// 序列化错误
    #[error("Serialize error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for SinkError {
    fn from(e: std::io::Error) -> Self {
        SinkError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for SinkError {
    fn from(e: serde_json::Error) -> Self {
        SinkError::Serialize(e.to_string())
    }
}

/// 处理流水线错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_too_short_message() {
        let err = DecodeError::BufferTooShort {
            field: "iaq".to_string(),
            offset: 11,
            width: 2,
            len: 12,
        };
        assert_eq!(
            err.to_string(),
            "Buffer too short: field 'iaq' needs bytes 11..13 but buffer has 12"
        );
    }

    #[test]
    fn test_schema_error_message() {
        let err = SchemaError::InvalidWidth {
            name: "bar_press".to_string(),
            width: 5,
        };
        assert!(err.to_string().contains("bar_press"));
        assert!(err.to_string().contains("5"));
    }

    #[test]
    fn test_pipeline_error_from() {
        let err: PipelineError = SourceError::Exhausted.into();
        assert_eq!(err, PipelineError::Source(SourceError::Exhausted));
        assert_eq!(err.to_string(), "Source exhausted");
    }
}
