//! logprint 核心日志器
//!
//! `Logger` 协调格式化器、存储与通知通道。所有日志调用都经过同一把互斥锁：
//! 开关检查、构建日志、格式化输出、写入存储、发送通知在一次持锁期间完成，
//! 不同调用之间不会交错。调用线程同步完成全部工作后才返回。

use crate::config::{validate_config, LoggerConfig};
use crate::core::formatter::LogFormatter;
use crate::core::log::{flatten_items, CallSite, Log, LogLevel, Payload};
use crate::diagnostics::{Diagnostics, DiagnosticsSnapshot};
use crate::error::Result;
use crate::notifications::{BroadcastChannel, Delivery, LogNotification, NotificationChannel};
use crate::settings::LogsSettings;
use crate::stores::{store_from_config, LogStore, MemoryStore};
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// 串行区内的共享状态
struct LoggerState {
    /// 总开关
    enabled: bool,
    /// 日志存储
    store: Box<dyn LogStore>,
    /// 输出流
    output: Box<dyn Write + Send>,
    /// 通知通道
    channel: Arc<dyn NotificationChannel>,
}

/// 日志器
///
/// 显式创建并通过引用或 `Arc` 传递给调用方。需要进程级实例时使用
/// [`install_global`](crate::install_global)。
pub struct Logger {
    state: Mutex<LoggerState>,
    formatter: LogFormatter,
    settings: Arc<LogsSettings>,
    diagnostics: Arc<Diagnostics>,
}

/// 日志器构建器
pub struct LoggerBuilder {
    enabled: bool,
    store: Option<Box<dyn LogStore>>,
    channel: Option<Arc<dyn NotificationChannel>>,
    output: Option<Box<dyn Write + Send>>,
    formatter: LogFormatter,
    settings: Option<Arc<LogsSettings>>,
}

impl Logger {
    /// 创建新的日志器构建器
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder {
            enabled: true,
            store: None,
            channel: None,
            output: None,
            formatter: LogFormatter::default(),
            settings: None,
        }
    }

    /// 使用默认配置创建日志器：内存存储、广播通道、标准输出
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// 使用指定配置创建日志器
    ///
    /// 通知通道由调用方创建，以便调用方保留订阅入口。
    pub fn from_config(
        config: &LoggerConfig,
        channel: Arc<dyn NotificationChannel>,
    ) -> Result<Self> {
        validate_config(config)?;
        let store = store_from_config(&config.store)?;

        Ok(Self::builder()
            .enabled(config.enabled)
            .store(store)
            .channel(channel)
            .formatter(LogFormatter::new(config.format.clone()))
            .settings(Arc::new(LogsSettings::new(config.override_print)))
            .build())
    }

    pub fn verbose(&self, items: &[Payload], call_site: CallSite) {
        self.log(LogLevel::Verbose, items, call_site);
    }

    pub fn info(&self, items: &[Payload], call_site: CallSite) {
        self.log(LogLevel::Info, items, call_site);
    }

    pub fn warning(&self, items: &[Payload], call_site: CallSite) {
        self.log(LogLevel::Warning, items, call_site);
    }

    pub fn error(&self, items: &[Payload], call_site: CallSite) {
        self.log(LogLevel::Error, items, call_site);
    }

    /// 以指定级别记录一条日志
    ///
    /// 只有第一个参数会被展开为内容，见 [`flatten_items`]。
    pub fn log(&self, level: LogLevel, items: &[Payload], call_site: CallSite) {
        let mut state = self.lock_state();
        self.handle_log(&mut state, level, items, &call_site);
    }

    /// 通用 print 入口
    ///
    /// 开启 `override_print` 且日志器启用时，作为无调用位置的 verbose 日志处理；
    /// 否则直接输出第一个参数（没有参数时输出空行）。
    pub fn print(&self, items: &[Payload]) {
        let mut state = self.lock_state();
        if self.settings.override_print() && state.enabled {
            self.handle_log(&mut state, LogLevel::Verbose, items, &CallSite::none());
            return;
        }

        let text = items.first().map(|item| item.to_string()).unwrap_or_default();
        self.write_line(&mut state, &text);
        self.diagnostics.increment_prints_passed_through();
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.lock_state().enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.lock_state().enabled
    }

    /// 按插入顺序返回存储中的所有日志
    pub fn logs(&self) -> Vec<Log> {
        self.lock_state().store.logs()
    }

    /// 返回指定级别的日志
    pub fn logs_at(&self, level: LogLevel) -> Vec<Log> {
        self.lock_state().store.logs_at(level)
    }

    /// 清空存储并通知观察者刷新
    pub fn clear_logs(&self) {
        let mut state = self.lock_state();
        state.store.clear();
        self.post(&state, LogNotification::RefreshLogs);
    }

    pub fn settings(&self) -> &Arc<LogsSettings> {
        &self.settings
    }

    pub fn formatter(&self) -> &LogFormatter {
        &self.formatter
    }

    /// 获取诊断数据快照
    pub fn diagnostics(&self) -> DiagnosticsSnapshot {
        self.diagnostics.snapshot()
    }

    /// 刷新输出流
    pub fn flush(&self) -> io::Result<()> {
        self.lock_state().output.flush()
    }

    fn lock_state(&self) -> MutexGuard<'_, LoggerState> {
        // 其他线程在持锁时 panic 不应让日志器永久失效
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 串行区内的完整处理流程，调用方必须持有锁
    fn handle_log(
        &self,
        state: &mut LoggerState,
        level: LogLevel,
        items: &[Payload],
        call_site: &CallSite,
    ) {
        if !state.enabled {
            self.diagnostics.increment_logs_skipped_disabled();
            return;
        }

        let file_info = call_site.file_info();
        let content = flatten_items(items);
        let log = Log::new(content, file_info, level);

        let line = self.formatter.format(&log);
        self.write_line(state, &line);

        state.store.add(log);
        self.diagnostics.increment_logs_processed();

        self.post(state, LogNotification::NewLog(level));
        self.post(state, LogNotification::RefreshLogs);
    }

    fn write_line(&self, state: &mut LoggerState, line: &str) {
        let result = writeln!(state.output, "{}", line).and_then(|_| state.output.flush());
        if let Err(e) = result {
            self.diagnostics.increment_output_errors();
            tracing::warn!("Failed to write log line: {}", e);
        }
    }

    fn post(&self, state: &LoggerState, notification: LogNotification) {
        if state.channel.post(notification) == Delivery::NoListeners {
            self.diagnostics.increment_notifications_undelivered();
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("formatter", &self.formatter)
            .field("settings", &self.settings)
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

impl LoggerBuilder {
    /// 初始开关状态，默认启用
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn store(mut self, store: Box<dyn LogStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn channel(mut self, channel: Arc<dyn NotificationChannel>) -> Self {
        self.channel = Some(channel);
        self
    }

    /// 输出流，默认为标准输出
    pub fn output(mut self, output: Box<dyn Write + Send>) -> Self {
        self.output = Some(output);
        self
    }

    pub fn formatter(mut self, formatter: LogFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn settings(mut self, settings: Arc<LogsSettings>) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn build(self) -> Logger {
        let state = LoggerState {
            enabled: self.enabled,
            store: self
                .store
                .unwrap_or_else(|| Box::new(MemoryStore::default())),
            output: self.output.unwrap_or_else(|| Box::new(io::stdout())),
            channel: self
                .channel
                .unwrap_or_else(|| Arc::new(BroadcastChannel::default())),
        };

        Logger {
            state: Mutex::new(state),
            formatter: self.formatter,
            settings: self.settings.unwrap_or_default(),
            diagnostics: Arc::new(Diagnostics::new()),
        }
    }
}
