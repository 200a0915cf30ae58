//! 环境变量配置模块
//!
//! 此模块提供从环境变量读取配置路径与开关覆盖的功能。

use crate::config::{load_config_from_file, LoggerConfig};
use crate::error::Result;
use std::env;
use std::path::PathBuf;

/// 配置文件路径
pub const CONFIG_PATH_VAR: &str = "LOGPRINT_CONFIG";
/// 覆盖 `enabled`
pub const ENABLED_VAR: &str = "LOGPRINT_ENABLED";
/// 覆盖 `override_print`
pub const OVERRIDE_PRINT_VAR: &str = "LOGPRINT_OVERRIDE_PRINT";

/// 环境变量配置管理器
pub struct EnvConfig;

impl EnvConfig {
    /// 从环境变量读取配置文件路径
    pub fn config_path() -> Option<PathBuf> {
        env::var(CONFIG_PATH_VAR)
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    }

    /// 从环境变量读取总开关
    pub fn enabled() -> Option<bool> {
        Self::read_bool(ENABLED_VAR)
    }

    /// 从环境变量读取 print 重定向开关
    pub fn override_print() -> Option<bool> {
        Self::read_bool(OVERRIDE_PRINT_VAR)
    }

    /// 将环境变量中的开关覆盖到配置上
    pub fn apply_overrides(config: &mut LoggerConfig) {
        if let Some(enabled) = Self::enabled() {
            config.enabled = enabled;
        }
        if let Some(override_print) = Self::override_print() {
            config.override_print = override_print;
        }
    }

    /// 加载配置：优先使用 `LOGPRINT_CONFIG` 指向的文件，否则使用默认配置，
    /// 然后应用环境变量覆盖
    pub fn load() -> Result<LoggerConfig> {
        let mut config = match Self::config_path() {
            Some(path) => load_config_from_file(&path)?,
            None => LoggerConfig::default(),
        };
        Self::apply_overrides(&mut config);
        Ok(config)
    }

    fn read_bool(name: &str) -> Option<bool> {
        let value = env::var(name).ok()?;
        match parse_bool(&value) {
            Some(flag) => Some(flag),
            None => {
                tracing::warn!("Ignoring {}={:?}: expected a boolean", name, value);
                None
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
