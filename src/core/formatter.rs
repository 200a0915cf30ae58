//! 格式化器
//!
//! 将日志记录转换为输出字符串，支持文本与 JSON 两种格式。
//! 格式化器只依赖日志记录本身与不可变配置，同一条日志总是得到相同的结果。

use crate::config::{FormatConfig, OutputFormat};
use crate::core::log::{Log, LogLevel};
use colored::Colorize;
use std::fmt::Write;

/// 日志格式化器
#[derive(Debug, Clone, Default)]
pub struct LogFormatter {
    config: FormatConfig,
}

impl LogFormatter {
    /// 使用指定配置创建格式化器
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    /// 获取配置
    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// 格式化日志记录
    pub fn format(&self, log: &Log) -> String {
        match self.config.output {
            OutputFormat::Text => self.format_as_text(log),
            OutputFormat::Json => self.format_as_json(log),
        }
    }

    /// 格式化为文本格式
    fn format_as_text(&self, log: &Log) -> String {
        let mut timestamp = String::new();
        if write!(timestamp, "{}", log.timestamp().format(&self.config.timestamp_format)).is_err() {
            timestamp = log.timestamp().to_rfc3339();
        }

        let mut result = format!("{} [{}]", timestamp, self.format_level(log.level()));
        if let Some(file_info) = log.file_info() {
            result.push(' ');
            result.push_str(file_info);
        }
        result.push_str(" - ");
        result.push_str(log.content());
        result
    }

    /// 格式化为 JSON 格式
    fn format_as_json(&self, log: &Log) -> String {
        log.to_json()
            .unwrap_or_else(|_| "{\"error\":\"serialization_failed\"}".to_string())
    }

    fn format_level(&self, level: LogLevel) -> String {
        if !self.config.color_enabled {
            return level.label().to_string();
        }
        let label = level.label();
        match level {
            LogLevel::Verbose => label.white().to_string(),
            LogLevel::Info => label.green().to_string(),
            LogLevel::Warning => label.yellow().to_string(),
            LogLevel::Error => label.red().to_string(),
        }
    }
}
