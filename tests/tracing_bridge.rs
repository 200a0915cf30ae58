//! tracing 桥接集成测试

use logprint::{BroadcastChannel, LogLevel, Logger};
use std::io;
use std::sync::Arc;

#[test]
fn test_tracing_events_reach_logger() {
    let logger = Arc::new(
        Logger::builder()
            .output(Box::new(io::sink()))
            .channel(Arc::new(BroadcastChannel::new(4)))
            .build(),
    );
    logprint::init_tracing_bridge(logger.clone()).unwrap();

    tracing::info!(attempt = 2, "connected");
    tracing::error!("connection lost");
    tracing::trace!("filtered by default level");

    let logs = logger.logs();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].level(), LogLevel::Info);
    assert_eq!(logs[0].content(), "connected attempt=2");
    assert!(logs[0]
        .file_info()
        .unwrap()
        .starts_with("tracing_bridge.rs.tracing_bridge["));
    assert_eq!(logs[1].level(), LogLevel::Error);

    // 第二次安装失败
    let err = logprint::init_tracing_bridge(logger).unwrap_err();
    assert_eq!(err.category(), "tracing");
}
