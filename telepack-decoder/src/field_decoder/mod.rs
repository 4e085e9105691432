//! 字段解码模块
//!
//! 提供模式驱动的定宽字段解码功能，支持：
//! - 1~4 字节小端无符号整数提取
//! - 逐字段边界检查，不返回部分记录
//! - 可选的严格长度策略

pub mod core;
pub mod le_extractor;

pub use self::core::{decode, LengthPolicy, SchemaDecoder};
pub use le_extractor::{extract_byte_range, extract_uint_le};
