//! logprint Store Traits
//!
//! 定义了统一的日志存储接口，日志器只依赖此接口。
//!
//! # 使用示例
//!
//! ```rust
//! use logprint::stores::LogStore;
//! use logprint::Log;
//!
//! #[derive(Debug, Default)]
//! struct VecStore {
//!     logs: Vec<Log>,
//! }
//!
//! impl LogStore for VecStore {
//!     fn add(&mut self, log: Log) {
//!         self.logs.push(log);
//!     }
//!
//!     fn logs(&self) -> Vec<Log> {
//!         self.logs.clone()
//!     }
//!
//!     fn clear(&mut self) {
//!         self.logs.clear();
//!     }
//! }
//! ```

use crate::core::log::{Log, LogLevel};
use std::fmt::Debug;

/// 日志存储 trait
///
/// 存储只会在日志器的串行区内被访问，因此方法接收 `&mut self`，
/// 实现无需自行加锁。`add` 不返回错误：持久化失败由实现自行处理。
pub trait LogStore: Send + Debug {
    /// 追加一条日志
    fn add(&mut self, log: Log);

    /// 按插入顺序返回所有日志
    fn logs(&self) -> Vec<Log>;

    /// 清空存储
    fn clear(&mut self);

    /// 按级别过滤
    fn logs_at(&self, level: LogLevel) -> Vec<Log> {
        self.logs()
            .into_iter()
            .filter(|log| log.level() == level)
            .collect()
    }

    /// 当前条数
    fn len(&self) -> usize {
        self.logs().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct VecStore {
        logs: Vec<Log>,
    }

    impl LogStore for VecStore {
        fn add(&mut self, log: Log) {
            self.logs.push(log);
        }

        fn logs(&self) -> Vec<Log> {
            self.logs.clone()
        }

        fn clear(&mut self) {
            self.logs.clear();
        }
    }

    #[test]
    fn test_default_methods() {
        let mut store = VecStore::default();
        assert!(store.is_empty());

        store.add(Log::new("a".into(), None, LogLevel::Info));
        store.add(Log::new("b".into(), None, LogLevel::Error));
        store.add(Log::new("c".into(), None, LogLevel::Info));

        assert_eq!(store.len(), 3);
        let infos = store.logs_at(LogLevel::Info);
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].content(), "a");
        assert_eq!(infos[1].content(), "c");
        assert!(store.logs_at(LogLevel::Warning).is_empty());

        store.clear();
        assert!(store.is_empty());
    }
}
