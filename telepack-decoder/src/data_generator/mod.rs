//! 测试数据生成模块
//!
//! 基于字段模式生成数据包，支持多种生成策略

pub mod core;
pub mod strategies;

pub use self::core::PacketGenerator;
pub use strategies::{GenerationStrategy, RandomStrategy, SequentialStrategy};
