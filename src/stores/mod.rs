//! logprint Stores 模块
//!
//! 日志存储的接口与实现：内存存储和 JSON Lines 文件存储。

pub mod file;
pub mod memory;
pub mod traits;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::LogStore;

use crate::config::{StoreConfig, StoreKind};
use crate::error::{LogPrintError, Result};

/// 根据配置创建存储
pub fn store_from_config(config: &StoreConfig) -> Result<Box<dyn LogStore>> {
    match config.kind {
        StoreKind::Memory => Ok(Box::new(MemoryStore::new(config.capacity))),
        StoreKind::File => {
            let path = config
                .path
                .as_ref()
                .ok_or_else(|| LogPrintError::InvalidPath("File 存储必须指定 path".to_string()))?;
            Ok(Box::new(JsonFileStore::open(path, config.capacity)?))
        }
    }
}
