//! 工具模块
//!
//! 提供十六进制文本与字节之间的转换

/// 将字节数组转换为十六进制字符串（大写、空格分隔）
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// 规范化十六进制文本
///
/// 去除空白、`0x`/`0X` 前缀以及 `:`、`,`、`-` 分隔符
pub fn normalize_hex(hex_str: &str) -> String {
    hex_str
        .split(|c: char| c.is_whitespace() || c == ':' || c == ',' || c == '-')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token)
        })
        .collect()
}

/// 将十六进制字符串转换为字节数组
///
/// 接受 [`normalize_hex`] 支持的所有书写形式
pub fn hex_to_bytes(hex_str: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(normalize_hex(hex_str))
}
