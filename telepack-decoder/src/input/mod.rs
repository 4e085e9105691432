//! 输入源模块
//!
//! 解码器只要求输入方提供字节序列；这里给出常见输入源的实现：
//! 内存缓冲、十六进制文本、Base64 文本、二进制文件、逐行十六进制文本

pub mod importers;

use bytes::Bytes;
use telepack_core::SourceError;

pub use importers::{Base64Source, FileSource, HexLinesSource, HexSource};

/// 字节输入源
///
/// 每次调用返回下一个数据包；没有更多数据时返回 `SourceError::Exhausted`。
///
/// 错误约定：
/// - `SourceError::Parse`: 仅当前数据包格式错误，输入源仍可继续读取
/// - `SourceError::File`: 底层读取失败，调用方应停止读取
pub trait ByteSource {
    fn get_bytes(&mut self) -> Result<Bytes, SourceError>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn get_bytes(&mut self) -> Result<Bytes, SourceError> {
        (**self).get_bytes()
    }
}

/// 内存输入源，只产出一次
#[derive(Debug, Clone)]
pub struct StaticSource {
    data: Option<Bytes>,
}

impl StaticSource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }
}

impl ByteSource for StaticSource {
    fn get_bytes(&mut self) -> Result<Bytes, SourceError> {
        self.data.take().ok_or(SourceError::Exhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_source_yields_once() {
        let mut source = StaticSource::new(vec![0x66, 0x6C]);

        assert_eq!(source.get_bytes().unwrap(), Bytes::from_static(&[0x66, 0x6C]));
        assert_eq!(source.get_bytes(), Err(SourceError::Exhausted));
    }

    #[test]
    fn test_mut_reference_is_a_source() {
        fn drain(mut source: impl ByteSource) -> usize {
            let mut count = 0;
            while source.get_bytes().is_ok() {
                count += 1;
            }
            count
        }

        let mut source = StaticSource::new(Bytes::from_static(b"\x01"));
        assert_eq!(drain(&mut source), 1);
        assert_eq!(source.get_bytes(), Err(SourceError::Exhausted));
    }
}
