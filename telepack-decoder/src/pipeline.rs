//! 处理流水线
//!
//! 把输入源、解码器和输出端串起来：取包、解码、交给输出端

use telepack_core::utils::bytes_to_hex;
use telepack_core::{DecodedRecord, PipelineError, SourceError};
use tracing::{debug, error, info, warn};

use crate::field_decoder::SchemaDecoder;
use crate::input::ByteSource;
use crate::output::RecordSink;

/// 流水线统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// 成功解码并交付的数据包数
    pub decoded: usize,
    /// 无法读取或解码而被丢弃的数据包数
    pub rejected: usize,
}

impl PipelineStats {
    pub fn total(&self) -> usize {
        self.decoded + self.rejected
    }
}

/// 解码流水线
pub struct Pipeline<'s, K: RecordSink> {
    decoder: SchemaDecoder<'s>,
    sink: K,
    stats: PipelineStats,
}

impl<'s, K: RecordSink> Pipeline<'s, K> {
    pub fn new(decoder: SchemaDecoder<'s>, sink: K) -> Self {
        Self {
            decoder,
            sink,
            stats: PipelineStats::default(),
        }
    }

    /// 处理一个数据包
    ///
    /// 任何一步失败都原样返回给调用方，不计入统计。
    pub fn process_one(&mut self, source: &mut dyn ByteSource) -> Result<(), PipelineError> {
        let buffer = source.get_bytes()?;
        let record = self.decoder.decode(&buffer)?;
        self.deliver(record)
    }

    /// 持续处理直到输入源耗尽
    ///
    /// 格式错误或解码失败的数据包被丢弃并记为 rejected；
    /// 输入源读取失败（`SourceError::File`）与输出端错误会终止处理。
    pub fn run(&mut self, source: &mut dyn ByteSource) -> Result<PipelineStats, PipelineError> {
        loop {
            let buffer = match source.get_bytes() {
                Ok(buffer) => buffer,
                Err(SourceError::Exhausted) => break,
                Err(e @ SourceError::Parse(_)) => {
                    warn!(error = %e, "dropping malformed packet");
                    self.stats.rejected += 1;
                    continue;
                }
                Err(e) => {
                    error!(
                        error = %e,
                        decoded = self.stats.decoded,
                        rejected = self.stats.rejected,
                        "source failed, stopping"
                    );
                    return Err(e.into());
                }
            };

            match self.decoder.decode(&buffer) {
                Ok(record) => self.deliver(record)?,
                Err(e) => {
                    warn!(
                        error = %e,
                        packet = %bytes_to_hex(&buffer),
                        "dropping undecodable packet"
                    );
                    self.stats.rejected += 1;
                }
            }
        }

        info!(
            decoded = self.stats.decoded,
            rejected = self.stats.rejected,
            "source exhausted"
        );
        Ok(self.stats)
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    fn deliver(&mut self, record: DecodedRecord) -> Result<(), PipelineError> {
        debug!(fields = record.len(), "packet decoded");
        self.sink.consume(record)?;
        self.stats.decoded += 1;
        Ok(())
    }
}
