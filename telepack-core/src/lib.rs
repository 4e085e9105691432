//! Telepack Core Library
//!
//! This crate provides the core abstractions and data structures for the
//! telepack system: field schemas, decoded records, and the error taxonomy
//! shared by the decoder and its boundary adapters.

pub mod error;
pub mod record;
pub mod schema;
pub mod utils;

// 导出错误类型
pub use error::{DecodeError, PipelineError, SchemaError, SinkError, SourceError};

// 导出数据模型类型，便于其他模块使用
pub use record::DecodedRecord;
pub use schema::*;
