//! 日志实体定义
//!
//! 此模块定义了 logprint 中使用的核心数据结构：日志级别、日志记录、
//! 调用位置以及日志参数。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LogPrintError;

/// 日志级别
///
/// 按严重程度排序：`Verbose < Info < Warning < Error`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Verbose,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// 所有级别，按严重程度升序
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Verbose,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
    ];

    /// 大写标签，用于文本输出
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Verbose => "VERBOSE",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LogLevel {
    type Err = LogPrintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "VERBOSE" => Ok(LogLevel::Verbose),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(LogPrintError::InvalidLogLevel(s.to_string())),
        }
    }
}

/// 单个日志参数
///
/// 只有参数列表中的第一个参数会被展开为日志内容，且仅当它是 `List` 时。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// 单个值
    Scalar(String),
    /// 有序的值序列
    List(Vec<String>),
}

impl Payload {
    /// 从任意可显示的值创建单值参数
    pub fn scalar<T: fmt::Display>(value: T) -> Self {
        Payload::Scalar(value.to_string())
    }

    /// 从任意可显示的值序列创建列表参数
    pub fn list<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        Payload::List(values.into_iter().map(|v| v.to_string()).collect())
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Scalar(value) => f.write_str(value),
            Payload::List(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Scalar(value.to_string())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Scalar(value)
    }
}

impl<T: fmt::Display> From<Vec<T>> for Payload {
    fn from(values: Vec<T>) -> Self {
        Payload::list(values)
    }
}

impl<T: fmt::Display> From<&[T]> for Payload {
    fn from(values: &[T]) -> Self {
        Payload::list(values)
    }
}

impl<T: fmt::Display, const N: usize> From<[T; N]> for Payload {
    fn from(values: [T; N]) -> Self {
        Payload::list(values)
    }
}

/// 调用位置信息
///
/// 三个字段都存在时才会生成 `file_info`。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallSite {
    pub file: Option<String>,
    pub function: Option<String>,
    pub line: Option<u32>,
}

impl CallSite {
    /// 完整的调用位置
    pub fn new(file: impl Into<String>, function: impl Into<String>, line: u32) -> Self {
        Self {
            file: Some(file.into()),
            function: Some(function.into()),
            line: Some(line),
        }
    }

    /// 没有任何调用位置信息
    pub fn none() -> Self {
        Self::default()
    }

    /// 生成 `"<basename>.<function>[<line>]"`，缺少任一字段时返回 None
    pub fn file_info(&self) -> Option<String> {
        let (file, function, line) = match (&self.file, &self.function, self.line) {
            (Some(file), Some(function), Some(line)) => (file, function, line),
            _ => return None,
        };
        let basename = file.rsplit(&['/', '\\'][..]).next().unwrap_or(file.as_str());
        Some(format!("{}.{}[{}]", basename, function, line))
    }
}

/// 将参数列表展开为日志内容
///
/// 仅当第一个参数是 `List` 时才展开；元素之间以单个空格连接，
/// 但只有在已累积内容非空时才插入空格。其余参数被忽略。
pub fn flatten_items(items: &[Payload]) -> String {
    match items.first() {
        Some(Payload::List(values)) => values.iter().fold(String::new(), |mut acc, next| {
            if !acc.is_empty() {
                acc.push(' ');
            }
            acc.push_str(next);
            acc
        }),
        _ => String::new(),
    }
}

/// 日志记录
///
/// 创建后不可修改。写入存储后由存储独占持有。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    content: String,
    file_info: Option<String>,
    level: LogLevel,
    timestamp: DateTime<Utc>,
}

impl Log {
    /// 创建新的日志记录，时间戳为当前时间
    pub fn new(content: String, file_info: Option<String>, level: LogLevel) -> Self {
        Self::with_timestamp(content, file_info, level, Utc::now())
    }

    /// 使用指定时间戳创建日志记录
    pub fn with_timestamp(
        content: String,
        file_info: Option<String>,
        level: LogLevel,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            content,
            file_info,
            level,
            timestamp,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn file_info(&self) -> Option<&str> {
        self.file_info.as_deref()
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// 获取日志的 JSON 表示
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
