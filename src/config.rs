//! 定义 logprint 的所有配置结构体。

use serde::Deserialize;
use std::path::PathBuf;

// --- 辅助函数，用于提供配置项的默认值 ---
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M:%S%.3f".to_string()
}
fn default_output_format() -> OutputFormat {
    OutputFormat::Text
}
fn default_store_kind() -> StoreKind {
    StoreKind::Memory
}
fn default_store_capacity() -> usize {
    1000
}
fn default_notification_capacity() -> usize {
    256
}

/// logprint 的顶层配置结构体。
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    /// 日志器总开关
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// 是否将通用 print 调用重定向到 verbose 日志
    #[serde(default = "default_false")]
    pub override_print: bool,
    #[serde(default)]
    pub format: FormatConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            override_print: default_false(),
            format: FormatConfig::default(),
            store: StoreConfig::default(),
            notifications: NotificationConfig::default(),
        }
    }
}

/// 输出格式
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// 日志格式化相关的配置。
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FormatConfig {
    #[serde(default = "default_output_format")]
    pub output: OutputFormat,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default = "default_false")]
    pub color_enabled: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            output: default_output_format(),
            timestamp_format: default_timestamp_format(),
            color_enabled: default_false(),
        }
    }
}

/// 存储类型。
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// 仅保存在内存中
    Memory,
    /// 以 JSON Lines 格式持久化到文件
    File,
}

/// 日志存储的配置。
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    #[serde(default = "default_store_kind")]
    pub kind: StoreKind,
    /// 最多保留的日志条数，超出后丢弃最旧的
    #[serde(default = "default_store_capacity")]
    pub capacity: usize,
    /// `File` 存储的文件路径
    pub path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: default_store_kind(),
            capacity: default_store_capacity(),
            path: None,
        }
    }
}

/// 通知通道的配置。
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NotificationConfig {
    /// 广播通道容量，慢速订阅者超出后会丢失通知
    #[serde(default = "default_notification_capacity")]
    pub capacity: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            capacity: default_notification_capacity(),
        }
    }
}

/// 用于从 TOML 文件加载 `LoggerConfig` 的辅助函数。
pub fn load_config_from_file(path: &std::path::Path) -> crate::error::Result<LoggerConfig> {
    use crate::error::LogPrintError;
    use std::fs;

    if !path.exists() {
        return Err(LogPrintError::ConfigFileMissing(
            path.to_string_lossy().into_owned(),
        ));
    }

    let config_str = fs::read_to_string(path)?;
    load_config_from_str(&config_str)
}

/// 用于从 TOML 字符串加载 `LoggerConfig` 的辅助函数。
pub fn load_config_from_str(config_str: &str) -> crate::error::Result<LoggerConfig> {
    use crate::error::LogPrintError;

    let config: LoggerConfig = toml::from_str(config_str)
        .map_err(|e| LogPrintError::ConfigError(format!("TOML解析失败: {}", e)))?;

    Ok(config)
}

/// 验证配置的有效性。
pub fn validate_config(config: &LoggerConfig) -> crate::error::Result<()> {
    use crate::error::LogPrintError;

    if config.format.timestamp_format.trim().is_empty() {
        return Err(LogPrintError::ConfigError(
            "时间戳格式不能为空".to_string(),
        ));
    }

    if config.store.capacity == 0 {
        return Err(LogPrintError::ConfigError(
            "存储容量必须大于0".to_string(),
        ));
    }

    if config.store.kind == StoreKind::File {
        match config.store.path {
            None => {
                return Err(LogPrintError::InvalidPath(
                    "File 存储必须指定 path".to_string(),
                ))
            }
            Some(ref path) if !path.is_absolute() => {
                return Err(LogPrintError::InvalidPath(format!(
                    "存储文件路径必须是绝对路径: {:?}",
                    path
                )))
            }
            Some(_) => {}
        }
    }

    if config.notifications.capacity == 0 {
        return Err(LogPrintError::ConfigError(
            "通知通道容量必须大于0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LogPrintError;

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::default();
        assert!(config.enabled);
        assert!(!config.override_print);
        assert_eq!(config.format.output, OutputFormat::Text);
        assert_eq!(config.store.kind, StoreKind::Memory);
        assert_eq!(config.store.capacity, 1000);
        assert_eq!(config.notifications.capacity, 256);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_format_config_defaults() {
        let config = FormatConfig::default();
        assert_eq!(config.timestamp_format, "%Y-%m-%d %H:%M:%S%.3f");
        assert!(!config.color_enabled);
    }

    #[test]
    fn test_load_config_from_str_basic() {
        let toml_str = r#"
            enabled = false
            override_print = true

            [format]
            output = "Json"
            color_enabled = true

            [store]
            kind = "File"
            capacity = 50
            path = "/tmp/logprint/logs.jsonl"

            [notifications]
            capacity = 8
        "#;

        let config = load_config_from_str(toml_str).unwrap();
        assert!(!config.enabled);
        assert!(config.override_print);
        assert_eq!(config.format.output, OutputFormat::Json);
        assert!(config.format.color_enabled);
        assert_eq!(config.store.kind, StoreKind::File);
        assert_eq!(config.store.capacity, 50);
        assert_eq!(
            config.store.path,
            Some(PathBuf::from("/tmp/logprint/logs.jsonl"))
        );
        assert_eq!(config.notifications.capacity, 8);
    }

    #[test]
    fn test_load_config_from_str_empty_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, LoggerConfig::default());
    }

    #[test]
    fn test_load_config_from_str_unknown_field() {
        let result = load_config_from_str("verbosity = 3");
        assert!(matches!(result, Err(LogPrintError::ConfigError(_))));
    }

    #[test]
    fn test_load_config_from_file_missing() {
        let result = load_config_from_file(std::path::Path::new("/nonexistent/logprint.toml"));
        assert!(matches!(result, Err(LogPrintError::ConfigFileMissing(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logprint.toml");
        std::fs::write(&path, "override_print = true\n").unwrap();

        let config = load_config_from_file(&path).unwrap();
        assert!(config.override_print);
        assert!(config.enabled);
    }

    #[test]
    fn test_validate_config_zero_capacity() {
        let mut config = LoggerConfig::default();
        config.store.capacity = 0;
        assert!(matches!(
            validate_config(&config),
            Err(LogPrintError::ConfigError(_))
        ));

        let mut config = LoggerConfig::default();
        config.notifications.capacity = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_file_store_path() {
        let mut config = LoggerConfig::default();
        config.store.kind = StoreKind::File;
        assert!(matches!(
            validate_config(&config),
            Err(LogPrintError::InvalidPath(_))
        ));

        config.store.path = Some(PathBuf::from("relative/logs.jsonl"));
        assert!(matches!(
            validate_config(&config),
            Err(LogPrintError::InvalidPath(_))
        ));

        config.store.path = Some(std::env::temp_dir().join("logs.jsonl"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_empty_timestamp_format() {
        let mut config = LoggerConfig::default();
        config.format.timestamp_format = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }
}
