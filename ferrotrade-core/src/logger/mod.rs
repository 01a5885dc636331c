//! Asynchronous audit logger (spec §4.4, C5).
//!
//! Grounded on `bog-core::execution::journal::AsyncJournal` for the
//! init/worker/stop lifecycle and drop-on-full behaviour, but rebuilt on
//! [`crate::ring::SpscRing`] instead of `crossbeam::channel`: the spec
//! requires the hot path to route through the same lock-free primitive the
//! rest of the core uses, and fixes the message at a 128-byte stack buffer
//! rather than a heap-boxed enum. This is the *domain* audit trail (one line
//! per `ORDER_SENT`/`RISK_REJECT`); it is distinct from the ambient
//! `tracing` logging the rest of the crate and `ferrotrade-bench` use for
//! operational diagnostics.
//!
//! `log`/`logf` never block: on a full queue the record is dropped, counted
//! in a lock-free diagnostic counter, and the call returns immediately. The
//! worker thread drains with a plain blocking loop (`while running ||
//! !queue.is_empty()`) — there's no condvar wired to the ring, so it parks
//! briefly between empty polls rather than spinning the core.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::core::clock::Timestamp;
use crate::core::errors::IoExportError;
use crate::ring::SpscRing;

/// Capacity of the logger's SPSC queue.
pub const LOG_QUEUE_CAPACITY: usize = 4096;
/// Maximum encoded message length, including truncation marker.
pub const MESSAGE_CAPACITY: usize = 128;
/// How long the worker parks between polls of an empty queue.
const IDLE_PARK: Duration = Duration::from_micros(200);

/// Audit log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Level {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        })
    }
}

/// A single record pushed through the logger's ring. Fixed size, `Copy`, no
/// heap allocation — this is what crosses the SPSC queue.
#[derive(Clone, Copy)]
struct LogEntry {
    ts: Timestamp,
    level: Level,
    message: [u8; MESSAGE_CAPACITY],
    len: u8,
}

impl LogEntry {
    fn text(&self) -> &str {
        std::str::from_utf8(&self.message[..self.len as usize]).unwrap_or("<invalid utf8>")
    }
}

/// Writes a formatted message into a fixed stack buffer, truncating instead
/// of allocating if it overflows.
struct FixedBuf {
    buf: [u8; MESSAGE_CAPACITY],
    len: usize,
}

impl FixedBuf {
    fn new() -> Self {
        Self {
            buf: [0u8; MESSAGE_CAPACITY],
            len: 0,
        }
    }
}

impl fmt::Write for FixedBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let remaining = MESSAGE_CAPACITY - self.len;
        let take = remaining.min(s.len());
        // Only copy up to the last valid UTF-8 boundary within the budget.
        let mut boundary = take;
        while boundary > 0 && !s.is_char_boundary(boundary) {
            boundary -= 1;
        }
        self.buf[self.len..self.len + boundary].copy_from_slice(&s.as_bytes()[..boundary]);
        self.len += boundary;
        Ok(())
    }
}

/// Background-drained audit logger, owned by whoever constructs it (the
/// engine, typically) rather than a process-global singleton — the
/// redesign the spec's §9 calls for.
pub struct AsyncLogger {
    ring: Arc<SpscRing<LogEntry>>,
    running: Arc<AtomicBool>,
    dropped: Arc<AtomicU64>,
    worker: Option<JoinHandle<()>>,
}

impl AsyncLogger {
    /// Open `path` in append mode and spawn the background writer. The file
    /// is opened synchronously so a permissions/missing-directory error
    /// surfaces here rather than silently on the first `log` call.
    pub fn init(path: impl AsRef<Path>) -> Result<Self, IoExportError> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| IoExportError::Open {
                path: path.display().to_string(),
                source,
            })?;

        let ring = Arc::new(
            SpscRing::new(LOG_QUEUE_CAPACITY)
                .expect("LOG_QUEUE_CAPACITY is a fixed power of two"),
        );
        let running = Arc::new(AtomicBool::new(true));

        let worker_ring = ring.clone();
        let worker_running = running.clone();
        let worker = thread::spawn(move || Self::run(file, worker_ring, worker_running));

        Ok(Self {
            ring,
            running,
            dropped: Arc::new(AtomicU64::new(0)),
            worker: Some(worker),
        })
    }

    fn run(file: File, ring: Arc<SpscRing<LogEntry>>, running: Arc<AtomicBool>) {
        let mut writer = BufWriter::new(file);
        loop {
            match ring.pop() {
                Some(entry) => {
                    if let Err(err) = write_line(&mut writer, &entry) {
                        eprintln!("ferrotrade logger: write failed: {err}");
                    }
                }
                None => {
                    // `running == false` is observed via an Acquire load of
                    // the ring's own cursors on the next `pop`, so a record
                    // published just before `stop()` flips the flag is still
                    // drained here before the loop exits.
                    if !running.load(Ordering::Acquire) && ring.is_empty() {
                        break;
                    }
                    thread::sleep(IDLE_PARK);
                }
            }
        }
        let _ = writer.flush();
    }

    /// Push a pre-formatted message. Never blocks; drops and counts the
    /// record if the queue is full.
    #[inline]
    pub fn log(&self, level: Level, msg: &str) {
        let mut buf = FixedBuf::new();
        let _ = fmt::Write::write_str(&mut buf, msg);
        self.push(level, buf);
    }

    /// Push a formatted message built in place on the caller's stack —
    /// no heap allocation even for multi-argument messages.
    #[inline]
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        let mut buf = FixedBuf::new();
        let _ = fmt::Write::write_fmt(&mut buf, args);
        self.push(level, buf);
    }

    fn push(&self, level: Level, buf: FixedBuf) {
        if !self.running.load(Ordering::Acquire) {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return;
        }
        let entry = LogEntry {
            ts: Timestamp::now(),
            level,
            message: buf.buf,
            len: buf.len as u8,
        };
        if !self.ring.push(entry) {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Number of records dropped because the queue was full (or the logger
    /// had already been stopped). Lock-free, readable from any thread —
    /// the optional diagnostic counter the spec's §7 permits.
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Stop accepting new records and join the worker after it has drained
    /// everything already queued. Records pushed after `stop` returns are
    /// discarded per spec §3.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for AsyncLogger {
    fn drop(&mut self) {
        self.stop();
    }
}

/// `[YYYY-MM-DD HH:MM:SS.<ns>] [LEVEL] msg\n`, where `<ns>` is the timestamp
/// modulo 1e9 nanoseconds, not zero-padded — matching spec §6 exactly. The
/// clock is process-monotonic-since-an-unspecified-epoch (see
/// [`crate::core::clock`]), not wall-clock, so the calendar date/time here
/// is anchored to the Unix epoch purely to produce a readable, sortable
/// timestamp string; it does not claim to be the wall-clock time of the
/// event.
fn write_line(writer: &mut impl Write, entry: &LogEntry) -> std::io::Result<()> {
    let secs = entry.ts.nanos().div_euclid(1_000_000_000);
    let nanos = entry.ts.nanos().rem_euclid(1_000_000_000);
    let datetime = chrono::DateTime::from_timestamp(secs, 0).unwrap_or_default();
    writeln!(
        writer,
        "[{}.{}] [{}] {}",
        datetime.format("%Y-%m-%d %H:%M:%S"),
        nanos,
        entry.level,
        entry.text()
    )
}
