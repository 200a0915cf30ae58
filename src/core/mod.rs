//! logprint 核心模块
//!
//! 日志实体、格式化器、日志器以及 tracing 桥接层。

pub mod formatter;
pub mod layer;
pub mod log;
pub mod logger;

pub use formatter::LogFormatter;
pub use layer::{init_tracing_bridge, LogPrintLayer};
pub use log::{flatten_items, CallSite, Log, LogLevel, Payload};
pub use logger::{Logger, LoggerBuilder};
