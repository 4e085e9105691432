//! Telepack Decoder
//!
//! This crate provides the schema-driven field decoder for fixed-layout
//! little-endian telemetry packets, the reference telemetry schema, and the
//! boundary adapters (byte sources, record sinks, pipeline) around it.

pub mod data_generator;
pub mod field_decoder;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod telemetry;

pub use data_generator::PacketGenerator;
pub use field_decoder::{decode, extract_uint_le, LengthPolicy, SchemaDecoder};
pub use input::{ByteSource, StaticSource};
pub use output::{CollectingSink, JsonLinesSink, RecordSink};
pub use pipeline::{Pipeline, PipelineStats};
pub use telemetry::{TelemetryPacket, TELEMETRY_PACKET_LEN, TELEMETRY_SCHEMA};
