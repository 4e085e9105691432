//! 小端字段提取器
//!
//! 以显式的 256 幂次加权求和读取 1~4 字节无符号整数

use telepack_core::{DecodeError, FieldWidth};

/// 从缓冲区中提取小端无符号整数
///
/// 对偏移 `offset`、宽度 `w` 的字段，值为 `Σ buffer[offset+k] * 256^k`，`k ∈ [0, w)`
///
/// # 参数
/// - `buffer`: 原始数据
/// - `offset`: 字节偏移量
/// - `width`: 字段宽度
///
/// # 返回
/// - `Ok(u32)`: 提取的字段值
/// - `Err(DecodeError::OutOfBounds)`: 字段超出缓冲区边界
///
/// # 示例
/// ```
/// use telepack_core::FieldWidth;
/// use telepack_decoder::field_decoder::extract_uint_le;
///
/// let data = [0x34, 0x12];
/// let value = extract_uint_le(&data, 0, FieldWidth::Two).unwrap();
/// assert_eq!(value, 0x1234);
/// ```
pub fn extract_uint_le(buffer: &[u8], offset: usize, width: FieldWidth) -> Result<u32, DecodeError> {
    let bytes = extract_byte_range(buffer, offset, width.bytes())?;

    let mut value = 0u32;
    let mut weight = 1u32;
    for (k, &byte) in bytes.iter().enumerate() {
        value += u32::from(byte) * weight;
        // 最后一个字节之后不再推进权重，避免 256^4 溢出
        if k + 1 < bytes.len() {
            weight *= 256;
        }
    }

    Ok(value)
}

/// 从缓冲区中提取指定字节范围
///
/// # 参数
/// - `buffer`: 原始数据
/// - `offset`: 字节偏移量
/// - `length`: 字节长度
///
/// # 返回
/// - `Ok(&[u8])`: 提取的字节切片
/// - `Err(DecodeError::OutOfBounds)`: 提取失败（超出边界）
pub fn extract_byte_range(buffer: &[u8], offset: usize, length: usize) -> Result<&[u8], DecodeError> {
    match offset.checked_add(length) {
        Some(end) if end <= buffer.len() => Ok(&buffer[offset..end]),
        _ => Err(DecodeError::OutOfBounds {
            offset,
            width: length,
            len: buffer.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_byte() {
        let data = [0xFF, 0x00, 0xAB];

        assert_eq!(extract_uint_le(&data, 0, FieldWidth::One).unwrap(), 0xFF);
        assert_eq!(extract_uint_le(&data, 1, FieldWidth::One).unwrap(), 0x00);
        assert_eq!(extract_uint_le(&data, 2, FieldWidth::One).unwrap(), 0xAB);
    }

    #[test]
    fn test_extract_least_significant_byte_first() {
        let data = [0x34, 0x12, 0xCD, 0xAB];

        assert_eq!(extract_uint_le(&data, 0, FieldWidth::Two).unwrap(), 0x1234);
        assert_eq!(extract_uint_le(&data, 0, FieldWidth::Three).unwrap(), 0xCD1234);
        assert_eq!(extract_uint_le(&data, 0, FieldWidth::Four).unwrap(), 0xABCD1234);
        assert_eq!(extract_uint_le(&data, 1, FieldWidth::Two).unwrap(), 0xCD12);
    }

    #[test]
    fn test_extract_maximum_values() {
        let data = [0xFF; 4];

        assert_eq!(extract_uint_le(&data, 0, FieldWidth::Two).unwrap(), 0xFFFF);
        assert_eq!(extract_uint_le(&data, 0, FieldWidth::Three).unwrap(), 0xFF_FFFF);
        assert_eq!(extract_uint_le(&data, 0, FieldWidth::Four).unwrap(), u32::MAX);
    }

    #[test]
    fn test_extract_reference_pressure() {
        // 参考数据包中的气压字段：c2 03 → 962 hPa
        let data = [0xC2, 0x03];
        assert_eq!(extract_uint_le(&data, 0, FieldWidth::Two).unwrap(), 962);
    }

    #[test]
    fn test_extract_error_cases() {
        let data = [0x01, 0x02, 0x03];

        // 恰好到达末尾
        assert!(extract_uint_le(&data, 1, FieldWidth::Two).is_ok());

        // 超出边界
        assert_eq!(
            extract_uint_le(&data, 2, FieldWidth::Two),
            Err(DecodeError::OutOfBounds {
                offset: 2,
                width: 2,
                len: 3
            })
        );
        assert!(extract_uint_le(&[], 0, FieldWidth::One).is_err());

        // 偏移量溢出
        assert!(extract_byte_range(&data, usize::MAX, 2).is_err());
    }

    #[test]
    fn test_extract_byte_range() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05];

        assert_eq!(extract_byte_range(&data, 0, 3).unwrap(), &[0x01, 0x02, 0x03]);
        assert_eq!(extract_byte_range(&data, 2, 2).unwrap(), &[0x03, 0x04]);
        assert_eq!(extract_byte_range(&data, 5, 0).unwrap(), &[] as &[u8]);
        assert!(extract_byte_range(&data, 3, 5).is_err());
    }
}
