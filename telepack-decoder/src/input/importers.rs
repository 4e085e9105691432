//! 数据导入模块
//!
//! 支持从多种格式导入实际数据包：十六进制字符串、Base64、二进制文件

use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use telepack_core::utils::hex_to_bytes;
use telepack_core::SourceError;

use super::ByteSource;

/// 十六进制文本输入源
///
/// 支持空格分隔、`0x` 前缀、`:`/`,`/`-` 分隔和无分隔符写法，只产出一次。
///
/// # 示例
/// ```
/// use telepack_decoder::input::{ByteSource, HexSource};
///
/// let mut source = HexSource::new("66 6c 16 0e");
/// assert_eq!(&source.get_bytes().unwrap()[..], &[0x66, 0x6C, 0x16, 0x0E]);
/// ```
#[derive(Debug, Clone)]
pub struct HexSource {
    text: Option<String>,
}

impl HexSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

impl ByteSource for HexSource {
    fn get_bytes(&mut self) -> Result<Bytes, SourceError> {
        let text = self.text.take().ok_or(SourceError::Exhausted)?;
        parse_hex(&text)
    }
}

/// Base64 文本输入源
///
/// LoRaWAN 网络服务器通常以 Base64 转发上行负载，只产出一次。
#[derive(Debug, Clone)]
pub struct Base64Source {
    text: Option<String>,
}

impl Base64Source {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

impl ByteSource for Base64Source {
    fn get_bytes(&mut self) -> Result<Bytes, SourceError> {
        let text = self.text.take().ok_or(SourceError::Exhausted)?;
        STANDARD
            .decode(text.trim())
            .map(Bytes::from)
            .map_err(|e| SourceError::Parse(format!("Base64解码失败: {e}")))
    }
}

/// 二进制文件输入源
///
/// 首次调用时读取整个文件，只产出一次。
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    consumed: bool,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            consumed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSource for FileSource {
    fn get_bytes(&mut self) -> Result<Bytes, SourceError> {
        if self.consumed {
            return Err(SourceError::Exhausted);
        }
        self.consumed = true;

        fs::read(&self.path)
            .map(Bytes::from)
            .map_err(|e| SourceError::File(format!("无法读取文件 '{}': {}", self.path.display(), e)))
    }
}

/// 逐行十六进制输入源
///
/// 每个非空行是一个数据包；以 `#` 开头的行视为注释。
#[derive(Debug, Clone)]
pub struct HexLinesSource {
    lines: VecDeque<(usize, String)>,
}

impl HexLinesSource {
    pub fn new(text: &str) -> Self {
        let lines = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
            .map(|(line_no, line)| (line_no, line.to_string()))
            .collect();
        Self { lines }
    }

    /// 从文本文件构建
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let text = fs::read_to_string(&path).map_err(|e| {
            SourceError::File(format!("无法读取文件 '{}': {}", path.as_ref().display(), e))
        })?;
        Ok(Self::new(&text))
    }

    /// 剩余数据包数
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl ByteSource for HexLinesSource {
    fn get_bytes(&mut self) -> Result<Bytes, SourceError> {
        let (line_no, line) = self.lines.pop_front().ok_or(SourceError::Exhausted)?;
        parse_hex(&line).map_err(|e| match e {
            SourceError::Parse(msg) => SourceError::Parse(format!("第{line_no}行: {msg}")),
            other => other,
        })
    }
}

fn parse_hex(text: &str) -> Result<Bytes, SourceError> {
    hex_to_bytes(text)
        .map(Bytes::from)
        .map_err(|e| SourceError::Parse(format!("十六进制解码失败: {e}")))
}
