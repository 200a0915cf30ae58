//! logprint - 进程内日志捕获库
//!
//! logprint 记录带级别的日志条目，附带时间戳与调用位置，
//! 将所有写入串行化到同一临界区，保存到内存或文件存储，并通知观察者（例如调试界面）。
//!
//! # 快速开始
//!
//! ```rust
//! use logprint::{LogLevel, Logger, BroadcastChannel};
//! use std::sync::Arc;
//!
//! let channel = BroadcastChannel::new(16);
//! let mut receiver = channel.subscribe();
//! let logger = Logger::builder().channel(Arc::new(channel)).build();
//!
//! logprint::info!(logger, vec!["user", "signed", "in"]);
//!
//! assert_eq!(logger.logs()[0].content(), "user signed in");
//! assert_eq!(
//!     receiver.try_recv().unwrap(),
//!     logprint::LogNotification::NewLog(LogLevel::Info)
//! );
//! ```
//!
//! # 全局 print 钩子
//!
//! ```rust
//! use logprint::{Logger, LogsSettings};
//! use std::sync::Arc;
//!
//! let logger = Arc::new(
//!     Logger::builder()
//!         .settings(Arc::new(LogsSettings::new(true)))
//!         .build(),
//! );
//! logprint::install_global(logger.clone()).unwrap();
//!
//! logprint::log_print!(vec!["captured", "by", "logger"]);
//! assert_eq!(logger.logs()[0].content(), "captured by logger");
//! ```

pub mod config;
pub mod core;
pub mod diagnostics;
pub mod env_config;
pub mod error;
pub mod macros;
pub mod notifications;
pub mod settings;
pub mod stores;

// 重新导出主要类型
pub use config::{
    load_config_from_file, load_config_from_str, validate_config, FormatConfig, LoggerConfig,
    OutputFormat, StoreConfig, StoreKind,
};
pub use diagnostics::DiagnosticsSnapshot;
pub use env_config::EnvConfig;
pub use error::{LogPrintError, Result};
pub use notifications::{BroadcastChannel, Delivery, LogNotification, NotificationChannel};
pub use settings::LogsSettings;
pub use stores::{JsonFileStore, LogStore, MemoryStore};

// 重新导出核心功能
pub use crate::core::{
    flatten_items, init_tracing_bridge, CallSite, Log, LogFormatter, LogLevel, LogPrintLayer,
    Logger, LoggerBuilder, Payload,
};

use once_cell::sync::OnceCell;
use std::sync::Arc;

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 全局日志器实例，只能安装一次
static GLOBAL_LOGGER: OnceCell<Arc<Logger>> = OnceCell::new();

/// 安装进程级日志器，供 [`print`] 与 [`log_print!`] 使用
///
/// 重复安装返回 `InitializationError`。
pub fn install_global(logger: Arc<Logger>) -> Result<()> {
    GLOBAL_LOGGER
        .set(logger)
        .map_err(|_| LogPrintError::initialization("全局日志器已经安装"))?;
    tracing::debug!("Global logger installed");
    Ok(())
}

/// 已安装的全局日志器
pub fn global() -> Option<Arc<Logger>> {
    GLOBAL_LOGGER.get().cloned()
}

/// 是否已安装全局日志器
pub fn is_installed() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// 通用 print 函数
///
/// 使用全局日志器处理，见 [`Logger::print`]。未安装时直接输出第一个参数到标准输出。
pub fn print(items: &[Payload]) {
    match GLOBAL_LOGGER.get() {
        Some(logger) => logger.print(items),
        None => {
            let text = items.first().map(|item| item.to_string()).unwrap_or_default();
            println!("{}", text);
        }
    }
}

/// 使用指定配置创建并安装全局日志器
///
/// 返回日志器使用的广播通道，调用方可从中订阅通知。
///
/// # 示例
///
/// ```rust,no_run
/// use logprint::LoggerConfig;
///
/// let channel = logprint::init_with_config(&LoggerConfig::default()).unwrap();
/// let mut receiver = channel.subscribe();
/// logprint::log_print!("hello");
/// ```
pub fn init_with_config(config: &LoggerConfig) -> Result<BroadcastChannel> {
    // 通道容量为 0 时 broadcast::channel 会 panic，必须先校验
    validate_config(config)?;
    let channel = BroadcastChannel::from_config(&config.notifications);
    let logger = Logger::from_config(config, Arc::new(channel.clone()))?;
    install_global(Arc::new(logger))?;
    Ok(channel)
}

/// 使用环境变量配置创建并安装全局日志器
///
/// 读取 `LOGPRINT_CONFIG` 指定的配置文件（未设置时使用默认配置），
/// 再应用 `LOGPRINT_ENABLED` 与 `LOGPRINT_OVERRIDE_PRINT`。
pub fn init() -> Result<BroadcastChannel> {
    let config = EnvConfig::load()?;
    init_with_config(&config)
}
