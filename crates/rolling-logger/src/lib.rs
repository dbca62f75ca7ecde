//! Rolling Logger
//!
//! Installs a global `tracing` subscriber writing to stderr and, when a log
//! directory is given, to `<dir>/<app>.log`. The file is rotated once it
//! grows past [`MAX_FILE_SIZE`]; up to [`MAX_BACKUPS`] older files are kept
//! as `<app>.log.1` (newest) through `<app>.log.N`.
//!
//! The level comes from `RUST_LOG`, defaulting to `info`.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;
pub const MAX_BACKUPS: usize = 3;

const TIME_FORMAT: &str = "%H:%M:%S%.3f";

/// Install the global subscriber. Fails if one is already installed or the
/// log file cannot be opened.
pub fn init_logger(
    log_dir: Option<&Path>,
    app_name: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
        .with_writer(io::stderr);

    let file_layer = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let writer = RollingFileWriter::new(
                dir.join(format!("{}.log", app_name)),
                MAX_FILE_SIZE,
                MAX_BACKUPS,
            )?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
                    .with_ansi(false)
                    .with_writer(writer),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    if let Some(dir) = log_dir {
        tracing::info!("logging to {}", dir.display());
    }
    Ok(())
}

struct RollingState {
    file: File,
    written: u64,
}

/// Size-rotated log file, shared by every event the subscriber writes
#[derive(Clone)]
pub struct RollingFileWriter {
    path: PathBuf,
    max_size: u64,
    max_backups: usize,
    state: Arc<Mutex<RollingState>>,
}

impl RollingFileWriter {
    /// Append to `path`, counting what is already there toward `max_size`.
    pub fn new(path: impl Into<PathBuf>, max_size: u64, max_backups: usize) -> io::Result<Self> {
        let path = path.into();
        let file = open_append(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            path,
            max_size,
            max_backups,
            state: Arc::new(Mutex::new(RollingState { file, written })),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self, n: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{}", n));
        PathBuf::from(name)
    }

    fn rotate(&self, state: &mut RollingState) -> io::Result<()> {
        state.file.flush()?;
        if self.max_backups == 0 {
            state.file = File::create(&self.path)?;
        } else {
            let oldest = self.backup_path(self.max_backups);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }
            for n in (1..self.max_backups).rev() {
                let from = self.backup_path(n);
                if from.exists() {
                    fs::rename(&from, self.backup_path(n + 1))?;
                }
            }
            fs::rename(&self.path, self.backup_path(1))?;
            state.file = open_append(&self.path)?;
        }
        state.written = 0;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, RollingState> {
        // A panic mid-write leaves the file usable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

impl Write for RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.lock();
        if state.written > 0 && state.written + buf.len() as u64 > self.max_size {
            self.rotate(&mut state)?;
        }
        let n = state.file.write(buf)?;
        state.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingFileWriter {
    type Writer = RollingFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_appends_below_limit() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingFileWriter::new(dir.path().join("app.log"), 100, 2).unwrap();

        writer.write_all(b"first\n").unwrap();
        writer.write_all(b"second\n").unwrap();

        assert_eq!(read(writer.path()), "first\nsecond\n");
        assert!(!dir.path().join("app.log.1").exists());
    }

    #[test]
    fn test_rotates_when_full() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingFileWriter::new(dir.path().join("app.log"), 10, 2).unwrap();

        writer.write_all(b"aaaaaaaa\n").unwrap();
        writer.write_all(b"bbbbbbbb\n").unwrap();

        assert_eq!(read(&dir.path().join("app.log")), "bbbbbbbb\n");
        assert_eq!(read(&dir.path().join("app.log.1")), "aaaaaaaa\n");
    }

    #[test]
    fn test_keeps_at_most_max_backups() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingFileWriter::new(dir.path().join("app.log"), 4, 2).unwrap();

        for line in ["one\n", "two\n", "tri\n", "for\n"] {
            writer.write_all(line.as_bytes()).unwrap();
        }

        assert_eq!(read(&dir.path().join("app.log")), "for\n");
        assert_eq!(read(&dir.path().join("app.log.1")), "tri\n");
        assert_eq!(read(&dir.path().join("app.log.2")), "two\n");
        assert!(!dir.path().join("app.log.3").exists());
    }

    #[test]
    fn test_existing_file_counts_toward_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "old line\n").unwrap();

        let mut writer = RollingFileWriter::new(&path, 12, 1).unwrap();
        writer.write_all(b"new line\n").unwrap();

        assert_eq!(read(&path), "new line\n");
        assert_eq!(read(&dir.path().join("app.log.1")), "old line\n");
    }

    #[test]
    fn test_zero_backups_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut writer = RollingFileWriter::new(&path, 4, 0).unwrap();

        writer.write_all(b"one\n").unwrap();
        writer.write_all(b"two\n").unwrap();

        assert_eq!(read(&path), "two\n");
        assert!(!dir.path().join("app.log.1").exists());
    }

    #[test]
    fn test_clones_share_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RollingFileWriter::new(dir.path().join("app.log"), 100, 1).unwrap();

        let mut a = writer.make_writer();
        let mut b = writer.make_writer();
        a.write_all(b"a\n").unwrap();
        b.write_all(b"b\n").unwrap();

        assert_eq!(read(writer.path()), "a\nb\n");
    }
}
