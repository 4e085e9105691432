//! 字段解码性能基准测试

use std::time::{Duration, Instant};
use telepack_core::Schema;
use telepack_decoder::input::HexLinesSource;
use telepack_decoder::{
    decode, CollectingSink, PacketGenerator, Pipeline, SchemaDecoder, TELEMETRY_PACKET_LEN,
    TELEMETRY_SCHEMA,
};

/// 创建指定字段数的宽字段模式（全部 4 字节）
fn create_wide_schema(field_count: usize) -> Schema {
    let names: Vec<String> = (0..field_count).map(|i| format!("field_{i}")).collect();
    let pairs: Vec<(&str, usize)> = names.iter().map(|name| (name.as_str(), 4)).collect();
    Schema::from_pairs(&pairs).unwrap()
}

/// 计算平均耗时 (ns) 与吞吐量 (MB/s)
///
/// 以纳秒计时，耗时不足 1 ns 时按 1 ns 计，避免吞吐量为无穷大
fn measure(elapsed: Duration, iterations: usize, bytes_per_iteration: usize) -> (f64, f64) {
    let avg_time = elapsed.as_nanos().max(1) as f64 / iterations.max(1) as f64;
    let throughput = bytes_per_iteration as f64 * 1000.0 / avg_time;
    (avg_time, throughput)
}

#[test]
fn measure_sub_microsecond_runs_are_finite() {
    let (avg_time, throughput) = measure(Duration::from_nanos(300), 1, 5);
    assert_eq!(avg_time, 300.0);
    assert!(throughput.is_finite() && throughput > 0.0);

    let (_, throughput) = measure(Duration::ZERO, 10_000, 16);
    assert!(throughput.is_finite());
}

#[test]
fn benchmark_telemetry_decode() {
    println!("\n=== 遥测数据包解码性能基准测试 ===");

    let mut generator = PacketGenerator::with_seed(1);
    let packets = generator.generate_batch(&TELEMETRY_SCHEMA, 256);
    let iterations = 100_000;

    let start = Instant::now();
    for i in 0..iterations {
        let _ = decode(&TELEMETRY_SCHEMA, &packets[i % packets.len()]).unwrap();
    }
    let elapsed = start.elapsed();

    let (avg_time, throughput) = measure(elapsed, iterations, TELEMETRY_PACKET_LEN);

    println!(
        "包长: {:4} 字节 | 平均时间: {:8.2} ns/包 | 吞吐量: {:6.2} MB/s",
        TELEMETRY_PACKET_LEN, avg_time, throughput
    );
}

#[test]
fn benchmark_schema_width() {
    println!("\n=== 不同字段数解码性能对比 ===");

    let mut generator = PacketGenerator::with_seed(2);
    let iterations = 10_000;

    for field_count in [4, 16, 64, 256] {
        let schema = create_wide_schema(field_count);
        let packet = generator.generate(&schema);

        let start = Instant::now();
        for _ in 0..iterations {
            let _ = decode(&schema, &packet).unwrap();
        }
        let elapsed = start.elapsed();

        let (avg_time, throughput) = measure(elapsed, iterations, packet.len());

        println!(
            "字段数: {:4} | 平均时间: {:8.2} ns | 吞吐量: {:6.2} MB/s",
            field_count, avg_time, throughput
        );
    }
}

#[test]
fn benchmark_pipeline_batch() {
    println!("\n=== 流水线批量处理性能 ===");

    let mut generator = PacketGenerator::with_seed(3);

    for batch_size in [10, 100, 1000] {
        let packets = generator.generate_batch(&TELEMETRY_SCHEMA, batch_size);
        let text = PacketGenerator::to_hex_lines(&packets);

        let start = Instant::now();
        let mut source = HexLinesSource::new(&text);
        let mut pipeline =
            Pipeline::new(SchemaDecoder::new(&TELEMETRY_SCHEMA), CollectingSink::new());
        let stats = pipeline.run(&mut source).unwrap();
        let elapsed = start.elapsed();

        assert_eq!(stats.decoded, batch_size);

        let (avg_time, throughput) = measure(elapsed, batch_size, TELEMETRY_PACKET_LEN);
        println!(
            "批量大小: {:4} | 平均时间: {:8.2} ns/包 | 吞吐量: {:6.2} MB/s (含十六进制解析)",
            batch_size, avg_time, throughput
        );
    }
}
