//! 遥测数据包模块
//!
//! 传感器节点上行数据包的参考模式（22 字节，小端）以及类型化视图

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use telepack_core::{DecodeError, DecodedRecord, Schema};

use crate::field_decoder::decode;

/// 参考数据包长度（字节）
pub const TELEMETRY_PACKET_LEN: usize = 22;

/// 节点固件默认写入的设备标识
pub const DEFAULT_NODE_ID: u8 = 102;

/// 参考字段表 `(名称, 宽度)`，顺序即线上顺序
pub const TELEMETRY_FIELDS: [(&str, usize); 17] = [
    ("id", 1),
    ("bat_perc", 1),
    ("temp_int", 1),
    ("temp_dec", 1),
    ("humdity_int", 1),
    ("humdity_dec", 1),
    ("bar_press", 2),
    ("inc_x", 1),
    ("inc_y", 1),
    ("inc_z", 1),
    ("iaq", 2),
    ("iaqAccuracy", 1),
    ("co2equivalent", 2),
    ("breathVocEquivalent", 2),
    ("gasPercentage", 1),
    ("sentPackets", 2),
    ("accAlarm", 1),
];

/// 参考遥测模式，进程内只构建一次
pub static TELEMETRY_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::from_pairs(&TELEMETRY_FIELDS)
        .expect("static telemetry field table is valid")
        .with_name("telemetry")
});

/// 遥测数据包
///
/// 与节点固件中的 packed 结构体逐字段对应；序列化时使用线上字段名。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryPacket {
    pub id: u8,        // 设备标识
    pub bat_perc: u8,  // 电池电量百分比
    pub temp_int: u8,  // 温度整数部分
    pub temp_dec: u8,  // 温度小数部分
    #[serde(rename = "humdity_int")]
    pub humidity_int: u8, // 湿度整数部分
    #[serde(rename = "humdity_dec")]
    pub humidity_dec: u8, // 湿度小数部分
    pub bar_press: u16, // 气压 (hPa)
    pub inc_x: u8,
    pub inc_y: u8,
    pub inc_z: u8,
    pub iaq: u16, // 室内空气质量指数
    #[serde(rename = "iaqAccuracy")]
    pub iaq_accuracy: u8, // IAQ 精度状态 (0-1-2)
    #[serde(rename = "co2equivalent")]
    pub co2_equivalent: u16, // CO2 估计值 (ppm)
    #[serde(rename = "breathVocEquivalent")]
    pub breath_voc_equivalent: u16,
    #[serde(rename = "gasPercentage")]
    pub gas_percentage: u8,
    #[serde(rename = "sentPackets")]
    pub sent_packets: u16, // 自启动以来已发送的包数
    #[serde(rename = "accAlarm")]
    pub acc_alarm: u8, // 加速度计报警标志
}

impl TelemetryPacket {
    /// 按参考模式解码缓冲区
    pub fn decode(buffer: &[u8]) -> Result<Self, DecodeError> {
        let record = decode(&TELEMETRY_SCHEMA, buffer)?;
        Self::from_record(&record)
    }

    /// 由解码记录构建类型化视图
    ///
    /// # 返回
    /// - `Err(DecodeError::FieldNotFound)`: 记录缺少参考字段
    /// - `Err(DecodeError::ValueOverflow)`: 字段值超出目标类型
    pub fn from_record(record: &DecodedRecord) -> Result<Self, DecodeError> {
        Ok(Self {
            id: field_u8(record, "id")?,
            bat_perc: field_u8(record, "bat_perc")?,
            temp_int: field_u8(record, "temp_int")?,
            temp_dec: field_u8(record, "temp_dec")?,
            humidity_int: field_u8(record, "humdity_int")?,
            humidity_dec: field_u8(record, "humdity_dec")?,
            bar_press: field_u16(record, "bar_press")?,
            inc_x: field_u8(record, "inc_x")?,
            inc_y: field_u8(record, "inc_y")?,
            inc_z: field_u8(record, "inc_z")?,
            iaq: field_u16(record, "iaq")?,
            iaq_accuracy: field_u8(record, "iaqAccuracy")?,
            co2_equivalent: field_u16(record, "co2equivalent")?,
            breath_voc_equivalent: field_u16(record, "breathVocEquivalent")?,
            gas_percentage: field_u8(record, "gasPercentage")?,
            sent_packets: field_u16(record, "sentPackets")?,
            acc_alarm: field_u8(record, "accAlarm")?,
        })
    }

    /// 加速度计是否触发报警
    pub fn is_alarm(&self) -> bool {
        self.acc_alarm != 0
    }
}

impl TryFrom<&DecodedRecord> for TelemetryPacket {
    type Error = DecodeError;

    fn try_from(record: &DecodedRecord) -> Result<Self, Self::Error> {
        Self::from_record(record)
    }
}

fn field_value(record: &DecodedRecord, name: &str) -> Result<u32, DecodeError> {
    record
        .get(name)
        .ok_or_else(|| DecodeError::FieldNotFound(name.to_string()))
}

fn field_u8(record: &DecodedRecord, name: &str) -> Result<u8, DecodeError> {
    let value = field_value(record, name)?;
    u8::try_from(value).map_err(|_| DecodeError::ValueOverflow {
        field: name.to_string(),
        value,
        target: "u8",
    })
}

fn field_u16(record: &DecodedRecord, name: &str) -> Result<u16, DecodeError> {
    let value = field_value(record, name)?;
    u16::try_from(value).map_err(|_| DecodeError::ValueOverflow {
        field: name.to_string(),
        value,
        target: "u16",
    })
}
