//! 定义 logprint 日志器的内部诊断与指标。
//!
//! 此模块提供了对日志器运行状况的可观测性。

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// 内部诊断与指标数据结构。
///
/// 使用原子操作确保线程安全，计数器的更新不需要持有日志器的锁。
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// 创建时间
    start_time: Option<Instant>,

    /// 已写入存储的日志总数
    logs_processed: AtomicU64,

    /// 日志器关闭期间被跳过的调用数
    logs_skipped_disabled: AtomicU64,

    /// 输出流写入失败次数
    output_errors: AtomicU64,

    /// 没有订阅者而未送达的通知数
    notifications_undelivered: AtomicU64,

    /// 未被重定向、直接输出的 print 调用数
    prints_passed_through: AtomicU64,
}

/// 诊断数据的快照，用于外部查询。
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticsSnapshot {
    /// 运行时间
    pub uptime: Option<Duration>,

    pub logs_processed: u64,

    pub logs_skipped_disabled: u64,

    pub output_errors: u64,

    pub notifications_undelivered: u64,

    pub prints_passed_through: u64,
}

impl Diagnostics {
    /// 创建新的诊断实例。
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    pub fn increment_logs_processed(&self) {
        self.logs_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_logs_skipped_disabled(&self) {
        self.logs_skipped_disabled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_output_errors(&self) {
        self.output_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_notifications_undelivered(&self) {
        self.notifications_undelivered
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_prints_passed_through(&self) {
        self.prints_passed_through.fetch_add(1, Ordering::Relaxed);
    }

    /// 获取诊断数据的快照。
    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        DiagnosticsSnapshot {
            uptime: self.start_time.map(|start| start.elapsed()),
            logs_processed: self.logs_processed.load(Ordering::Relaxed),
            logs_skipped_disabled: self.logs_skipped_disabled.load(Ordering::Relaxed),
            output_errors: self.output_errors.load(Ordering::Relaxed),
            notifications_undelivered: self.notifications_undelivered.load(Ordering::Relaxed),
            prints_passed_through: self.prints_passed_through.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_diagnostics_creation() {
        let snapshot = Diagnostics::new().snapshot();

        assert!(snapshot.uptime.is_some());
        assert_eq!(snapshot.logs_processed, 0);
        assert_eq!(snapshot.logs_skipped_disabled, 0);
        assert_eq!(snapshot.output_errors, 0);
    }

    #[test]
    fn test_all_counter_types() {
        let diagnostics = Diagnostics::new();

        diagnostics.increment_logs_processed();
        diagnostics.increment_logs_skipped_disabled();
        diagnostics.increment_output_errors();
        diagnostics.increment_notifications_undelivered();
        diagnostics.increment_prints_passed_through();

        let snapshot = diagnostics.snapshot();
        assert_eq!(snapshot.logs_processed, 1);
        assert_eq!(snapshot.logs_skipped_disabled, 1);
        assert_eq!(snapshot.output_errors, 1);
        assert_eq!(snapshot.notifications_undelivered, 1);
        assert_eq!(snapshot.prints_passed_through, 1);
    }


    #[test]
    fn test_concurrent_access() {
        let diagnostics = Arc::new(Diagnostics::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let diagnostics_clone = diagnostics.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    diagnostics_clone.increment_logs_processed();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(diagnostics.snapshot().logs_processed, 1000);
    }
}
