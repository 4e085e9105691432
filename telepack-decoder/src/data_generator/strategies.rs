//! 数据生成策略模块
//!
//! 提供多种字节生成策略：随机、顺序、固定模式

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// 无种子实例的区分计数
static SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// 数据生成策略枚举
#[derive(Debug, Clone, Default)]
pub enum GenerationStrategy {
    /// 完全随机生成
    #[default]
    Random,
    /// 顺序递增生成
    Sequential,
    /// 固定模式循环填充
    Fixed(Vec<u8>),
}

/// 随机数据生成策略
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    /// 创建新的随机策略
    ///
    /// 种子由纳秒时间与进程内计数器混合得到，同一时刻创建的实例也互不相同
    pub fn new() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        let instance = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::with_seed(nanos ^ instance.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// 使用指定种子创建（用于可重复测试）
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// 生成指定长度的随机字节
    pub fn generate_bytes(&mut self, length: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; length];
        self.rng.fill_bytes(&mut bytes);
        bytes
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

/// 顺序递增生成策略
pub struct SequentialStrategy {
    counter: u8,
}

impl SequentialStrategy {
    /// 创建新的顺序策略，从0开始
    pub fn new() -> Self {
        Self { counter: 0 }
    }

    /// 生成指定长度的字节序列，跨调用持续递增
    pub fn generate_bytes(&mut self, length: usize) -> Vec<u8> {
        let mut result = Vec::with_capacity(length);
        for _ in 0..length {
            result.push(self.counter);
            self.counter = self.counter.wrapping_add(1);
        }
        result
    }

    /// 重置计数器
    pub fn reset(&mut self) {
        self.counter = 0;
    }
}

impl Default for SequentialStrategy {
    fn default() -> Self {
        Self::new()
    }
}

/// 以固定模式循环填充指定长度
pub fn fill_with_pattern(pattern: &[u8], length: usize) -> Vec<u8> {
    if pattern.is_empty() {
        return vec![0u8; length];
    }
    pattern.iter().copied().cycle().take(length).collect()
}
