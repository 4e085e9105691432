//! 输出端模块
//!
//! 解码记录的消费方：JSON Lines 写出与内存收集

use std::io::Write;
use telepack_core::{DecodedRecord, SinkError};

/// 解码记录消费方
pub trait RecordSink {
    fn consume(&mut self, record: DecodedRecord) -> Result<(), SinkError>;
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn consume(&mut self, record: DecodedRecord) -> Result<(), SinkError> {
        (**self).consume(record)
    }
}

/// JSON Lines 输出端
///
/// 每条记录写成一行 JSON 对象，键顺序与模式一致。
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// 已写出的记录数
    pub fn written(&self) -> usize {
        self.written
    }

    /// 刷新并取回底层写入器
    pub fn into_inner(mut self) -> Result<W, SinkError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn consume(&mut self, record: DecodedRecord) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }
}

/// 内存收集输出端
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    records: Vec<DecodedRecord>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[DecodedRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<DecodedRecord> {
        self.records
    }
}

impl RecordSink for CollectingSink {
    fn consume(&mut self, record: DecodedRecord) -> Result<(), SinkError> {
        self.records.push(record);
        Ok(())
    }
}
