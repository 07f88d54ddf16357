//! Rolling Logger
//!
//! A `tracing` subscriber that keeps the most recent formatted lines in a
//! circular buffer. On wasm every line is echoed to the browser console;
//! on native builds it can also append to a log file that rolls over at a
//! size limit. `log` records are bridged in through `tracing-log`.

use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

const DEFAULT_CAPACITY: usize = 500;
const DEFAULT_MAX_FILE_BYTES: u64 = 1024 * 1024;

static GLOBAL: OnceLock<RollingBuffer> = OnceLock::new();

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("logger already initialized: {0}")]
    AlreadyInitialized(String),
    #[error("logger not initialized")]
    NotInitialized,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Logger settings
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub app_name: String,
    /// Lines kept in memory
    pub capacity: usize,
    pub level: Level,
    /// Directory for `<app_name>.log`; native only
    pub log_dir: Option<PathBuf>,
    /// Size at which the log file is rolled to `<app_name>.log.1`
    pub max_file_bytes: u64,
}

impl LoggerConfig {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            capacity: DEFAULT_CAPACITY,
            level: Level::INFO,
            log_dir: None,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    pub fn with_max_file_bytes(mut self, bytes: u64) -> Self {
        self.max_file_bytes = bytes;
        self
    }
}

#[derive(Debug)]
struct RollingFile {
    path: PathBuf,
    max_bytes: u64,
    written: u64,
}

impl RollingFile {
    fn open(dir: &std::path::Path, app_name: &str, max_bytes: u64) -> io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{app_name}.log"));
        let written = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            path,
            max_bytes,
            written,
        })
    }

    fn append(&mut self, line: &str) -> io::Result<()> {
        use std::io::Write;

        if self.written > 0 && self.written + line.len() as u64 + 1 > self.max_bytes {
            let rolled = self.path.with_extension("log.1");
            std::fs::rename(&self.path, rolled)?;
            self.written = 0;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        self.written += line.len() as u64 + 1;
        Ok(())
    }
}

#[derive(Debug)]
struct Inner {
    lines: VecDeque<String>,
    capacity: usize,
    file: Option<RollingFile>,
}

/// Shared circular buffer of formatted log lines
#[derive(Debug, Clone)]
pub struct RollingBuffer {
    inner: Arc<Mutex<Inner>>,
}

impl RollingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                lines: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
                capacity: capacity.max(1),
                file: None,
            })),
        }
    }

    /// Buffer that also appends every line to a rolling file
    pub fn with_file(capacity: usize, config: &LoggerConfig) -> Result<Self, LoggerError> {
        let buffer = Self::new(capacity);
        if let Some(dir) = &config.log_dir {
            let file = RollingFile::open(dir, &config.app_name, config.max_file_bytes)?;
            buffer.lock().file = Some(file);
        }
        Ok(buffer)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of the buffered lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lock().lines.iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.lock().lines.clear();
    }

    fn push_line(&self, message: &str) {
        let line = format!("[{}] {}", chrono::Local::now().format("%H:%M:%S%.3f"), message);

        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&line.as_str().into());

        let mut inner = self.lock();
        if let Some(file) = inner.file.as_mut() {
            if let Err(e) = file.append(&line) {
                // the buffer still gets the line; nothing else to report to
                inner.lines.push_back(format!("[rolling-logger] file write failed: {e}"));
            }
        }
        while inner.lines.len() >= inner.capacity {
            inner.lines.pop_front();
        }
        inner.lines.push_back(line);
    }
}

/// Per-event writer handed out by [`RollingBuffer`]; complete lines are
/// pushed as they arrive, any tail on drop
pub struct BufferWriter {
    buffer: RollingBuffer,
    pending: Vec<u8>,
}

impl BufferWriter {
    fn drain_lines(&mut self) {
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&line[..line.len() - 1]);
            if !text.trim().is_empty() {
                self.buffer.push_line(text.trim_end());
            }
        }
    }
}

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.drain_lines();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.drain_lines();
        Ok(())
    }
}

impl Drop for BufferWriter {
    fn drop(&mut self) {
        self.drain_lines();
        if !self.pending.is_empty() {
            let text = String::from_utf8_lossy(&self.pending).trim_end().to_string();
            if !text.is_empty() {
                self.buffer.push_line(&text);
            }
            self.pending.clear();
        }
    }
}

impl<'a> MakeWriter<'a> for RollingBuffer {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter {
            buffer: self.clone(),
            pending: Vec::new(),
        }
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logger(config: LoggerConfig) -> Result<RollingBuffer, LoggerError> {
    let buffer = RollingBuffer::with_file(config.capacity, &config)?;

    tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .without_time()
        .with_max_level(config.level)
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))?;

    let _ = GLOBAL.set(buffer.clone());
    tracing::info!("{} logger initialized", config.app_name);
    Ok(buffer)
}

/// Lines captured by the global logger, oldest first
pub fn recent_lines() -> Vec<String> {
    GLOBAL.get().map(RollingBuffer::lines).unwrap_or_default()
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    GLOBAL.get().ok_or(LoggerError::NotInitialized)?;
    tracing::info!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    GLOBAL.get().ok_or(LoggerError::NotInitialized)?;
    tracing::error!("{}", message);
    Ok(())
}
