//! tracing 桥接层
//!
//! 将 `tracing` 事件转发到 [`Logger`]，使使用 `tracing` 宏的代码也能进入日志存储。

use crate::core::log::{CallSite, LogLevel, Payload};
use crate::core::logger::Logger;
use crate::error::{LogPrintError, Result};
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// 本 crate 自身的事件目标前缀，这些事件不会被转发
const OWN_TARGET: &str = env!("CARGO_PKG_NAME");

/// 转发 tracing 事件的层
#[derive(Debug, Clone)]
pub struct LogPrintLayer {
    logger: Arc<Logger>,
}

impl LogPrintLayer {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }
}

/// 级别映射：TRACE 与 DEBUG 都归为 Verbose
pub fn level_from_tracing(level: &Level) -> LogLevel {
    match *level {
        Level::TRACE | Level::DEBUG => LogLevel::Verbose,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warning,
        _ => LogLevel::Error,
    }
}

fn is_own_target(target: &str) -> bool {
    target == OWN_TARGET
        || target
            .strip_prefix(OWN_TARGET)
            .is_some_and(|rest| rest.starts_with("::"))
}

/// 提取 message 与其余字段，字段渲染为 `key=value`
#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<String>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }
}

impl<S> Layer<S> for LogPrintLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        // 日志器内部的诊断事件在持锁时发出，转发会导致重入死锁
        if is_own_target(metadata.target()) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let mut values = Vec::with_capacity(visitor.fields.len() + 1);
        if !visitor.message.is_empty() {
            values.push(visitor.message);
        }
        values.extend(visitor.fields);

        let call_site = CallSite {
            file: metadata.file().map(str::to_string),
            function: metadata
                .module_path()
                .and_then(|path| path.rsplit("::").next())
                .map(str::to_string),
            line: metadata.line(),
        };

        self.logger
            .log(level_from_tracing(metadata.level()), &[Payload::List(values)], call_site);
    }
}

/// 安装全局 tracing 订阅器，将事件转发给指定日志器
///
/// 过滤规则读取 `RUST_LOG`，未设置时为 `info`。
pub fn init_tracing_bridge(logger: Arc<Logger>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(LogPrintLayer::new(logger))
        .try_init()
        .map_err(|e| LogPrintError::tracing(format!("Failed to install tracing bridge: {}", e)))
}
