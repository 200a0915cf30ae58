//! 文件存储
//!
//! 以 JSON Lines 格式持久化日志，每行一条。内存中保留最近 `capacity` 条的镜像，
//! 读取操作直接使用镜像。

use crate::core::log::Log;
use crate::error::{LogPrintError, Result};
use crate::stores::memory::MemoryStore;
use crate::stores::traits::LogStore;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// JSON Lines 文件存储
#[derive(Debug)]
pub struct JsonFileStore {
    /// 文件路径
    path: PathBuf,
    /// 追加写入器
    writer: BufWriter<File>,
    /// 内存镜像
    mirror: MemoryStore,
    /// 文件中的行数，超过容量两倍时压缩
    lines_on_disk: usize,
}

impl JsonFileStore {
    /// 打开存储文件，不存在时创建，并加载已有日志
    pub fn open(path: impl AsRef<Path>, capacity: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut mirror = MemoryStore::new(capacity);
        let mut lines_on_disk = 0;
        if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            // 按字节切分，非 UTF-8 的行与无法解析的行一样跳过
            for (index, line) in reader.split(b'\n').enumerate() {
                let line = line?;
                if line.iter().all(u8::is_ascii_whitespace) {
                    continue;
                }
                lines_on_disk += 1;
                match serde_json::from_slice::<Log>(&line) {
                    Ok(log) => {
                        mirror.push(log);
                    }
                    Err(e) => {
                        tracing::warn!(
                            "Skipping undecodable line {} in {}: {}",
                            index + 1,
                            path.display(),
                            e
                        );
                    }
                }
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LogPrintError::store(format!("Failed to open {}: {}", path.display(), e))
            })?;

        tracing::debug!(
            "Opened log store {} with {} entries",
            path.display(),
            mirror.len()
        );

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            mirror,
            lines_on_disk,
        })
    }

    /// 存储文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append_line(&mut self, log: &Log) -> Result<()> {
        let line = serde_json::to_string(log)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.lines_on_disk += 1;
        Ok(())
    }

    /// 用内存镜像重写文件，丢弃已被淘汰的行
    fn compact(&mut self) -> Result<()> {
        let tmp_path = self.path.with_extension("compact");
        {
            let mut tmp = BufWriter::new(File::create(&tmp_path)?);
            for log in self.mirror.logs() {
                serde_json::to_writer(&mut tmp, &log)?;
                tmp.write_all(b"\n")?;
            }
            tmp.flush()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        let file = OpenOptions::new().append(true).open(&self.path)?;
        self.writer = BufWriter::new(file);
        self.lines_on_disk = self.mirror.len();
        Ok(())
    }

    fn truncate(&mut self) -> Result<()> {
        self.writer.flush()?;
        File::create(&self.path)?;
        let file = OpenOptions::new().append(true).open(&self.path)?;
        self.writer = BufWriter::new(file);
        self.lines_on_disk = 0;
        Ok(())
    }
}

impl LogStore for JsonFileStore {
    fn add(&mut self, log: Log) {
        if let Err(e) = self.append_line(&log) {
            tracing::warn!("Failed to persist log to {}: {}", self.path.display(), e);
        }
        self.mirror.push(log);

        if self.lines_on_disk > self.mirror.capacity().saturating_mul(2) {
            if let Err(e) = self.compact() {
                tracing::warn!("Failed to compact {}: {}", self.path.display(), e);
            }
        }
    }

    fn logs(&self) -> Vec<Log> {
        self.mirror.logs()
    }

    fn clear(&mut self) {
        self.mirror.clear();
        if let Err(e) = self.truncate() {
            tracing::warn!("Failed to truncate {}: {}", self.path.display(), e);
        }
    }

    fn len(&self) -> usize {
        self.mirror.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log::LogLevel;
    use tempfile::tempdir;

    fn contents(store: &JsonFileStore) -> Vec<String> {
        store
            .logs()
            .iter()
            .map(|l| l.content().to_string())
            .collect()
    }

    #[test]
    fn test_persist_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("logs.jsonl");

        {
            let mut store = JsonFileStore::open(&path, 10).unwrap();
            store.add(Log::new("one".into(), Some("a.rs.f[1]".into()), LogLevel::Info));
            store.add(Log::new("two".into(), None, LogLevel::Error));
        }

        let store = JsonFileStore::open(&path, 10).unwrap();
        assert_eq!(contents(&store), vec!["one", "two"]);
        assert_eq!(store.logs()[0].file_info(), Some("a.rs.f[1]"));
        assert_eq!(store.logs_at(LogLevel::Error).len(), 1);
    }

    #[test]
    fn test_skips_corrupt_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs.jsonl");
        let good = Log::new("good".into(), None, LogLevel::Warning);
        let mut bytes = b"not json\n\xff\xfe garbage\n".to_vec();
        bytes.extend_from_slice(good.to_json().unwrap().as_bytes());
        bytes.extend_from_slice(b"\n\n");
        fs::write(&path, bytes).unwrap();

        let mut store = JsonFileStore::open(&path, 10).unwrap();
        assert_eq!(contents(&store), vec!["good"]);

        store.add(Log::new("after".into(), None, LogLevel::Info));
        assert_eq!(contents(&store), vec!["good", "after"]);
    }

    #[test]
    fn test_reload_keeps_newest_within_capacity() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs.jsonl");
        {
            let mut store = JsonFileStore::open(&path, 100).unwrap();
            for i in 0..5 {
                store.add(Log::new(format!("log {}", i), None, LogLevel::Verbose));
            }
        }

        let store = JsonFileStore::open(&path, 2).unwrap();
        assert_eq!(contents(&store), vec!["log 3", "log 4"]);
    }

    #[test]
    fn test_compaction_bounds_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs.jsonl");
        let mut store = JsonFileStore::open(&path, 2).unwrap();
        for i in 0..10 {
            store.add(Log::new(format!("log {}", i), None, LogLevel::Info));
        }

        let lines = fs::read_to_string(&path).unwrap().lines().count();
        assert!(lines <= 4, "file has {} lines", lines);
        assert_eq!(contents(&store), vec!["log 8", "log 9"]);

        drop(store);
        let reopened = JsonFileStore::open(&path, 2).unwrap();
        assert_eq!(contents(&reopened), vec!["log 8", "log 9"]);
    }

    #[test]
    fn test_clear_truncates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs.jsonl");
        let mut store = JsonFileStore::open(&path, 10).unwrap();
        store.add(Log::new("gone".into(), None, LogLevel::Info));

        store.clear();
        assert!(store.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        store.add(Log::new("after".into(), None, LogLevel::Info));
        drop(store);
        let reopened = JsonFileStore::open(&path, 10).unwrap();
        assert_eq!(contents(&reopened), vec!["after"]);
    }
}
