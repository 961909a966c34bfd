//! Log output for `print-quote`.
//!
//! Stdout carries the quote, so log records go to stderr and, once
//! [`enable_file_logging`] is called, to an append-only file as well.

use anyhow::{Result, anyhow};
use chrono::Local;
use std::{
    fmt,
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    Layer, // .with_filter() on the stderr layer
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

const RESET: &str = "\x1b[0m";

fn level_style(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

/// Writes `value` wrapped in `style` when the writer supports ANSI.
fn styled(
    writer: &mut Writer<'_>,
    style: &str,
    value: impl fmt::Display,
) -> fmt::Result {
    if writer.has_ansi_escapes() {
        write!(writer, "{style}{value}{RESET} ")
    } else {
        write!(writer, "{value} ")
    }
}

/// `<local time> <LEVEL> <target> <fields>`
struct QuoteLogFormat;

impl<S, N> FormatEvent<S, N> for QuoteLogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        styled(
            &mut writer,
            "\x1b[2m",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        )?;
        styled(
            &mut writer,
            level_style(meta.level()),
            format_args!("{:>5}", meta.level()),
        )?;
        styled(&mut writer, "\x1b[36m", meta.target())?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Log file ---

type SharedFile = Arc<Mutex<Option<File>>>;

fn lock_file(file: &SharedFile) -> MutexGuard<'_, Option<File>> {
    file.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writer target that drops records until a file is attached.
#[derive(Clone)]
struct LogFile(SharedFile);

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), |file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(lock_file(&self.0))
    }
}

// --- Runtime controls ---

type Reloader<T> = Box<dyn Fn(T) -> Result<()> + Send + Sync>;

struct LogControls {
    level: Reloader<EnvFilter>,
    stderr: Reloader<EnvFilter>,
    file: SharedFile,
}

static CONTROLS: OnceLock<LogControls> = OnceLock::new();

fn controls() -> Result<&'static LogControls> {
    CONTROLS
        .get()
        .ok_or_else(|| anyhow!("logging not yet initialized"))
}

fn reloader<S>(handle: reload::Handle<EnvFilter, S>) -> Reloader<EnvFilter>
where
    S: Subscriber + Send + Sync + 'static,
{
    Box::new(move |filter| {
        handle
            .reload(filter)
            .map_err(|e| anyhow!("log filter reload failed: {e}"))
    })
}

/// `RUST_LOG` wins over the requested level; an unusable level falls back to `info`.
fn initial_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

// --- Public API ---

/// Installs the global subscriber. Later calls are ignored.
///
/// - Stderr: colored when attached to a terminal.
/// - File: silent until [`enable_file_logging`].
/// - Level: `level` (any EnvFilter directive) unless `RUST_LOG` is set.
pub fn init_logging(level: &str) {
    let file: SharedFile = Arc::new(Mutex::new(None));

    // Global ceiling for both outputs, plus an on/off gate for stderr alone.
    let (level_layer, level_handle) = reload::Layer::new(initial_filter(level));
    let (stderr_gate, stderr_handle) = reload::Layer::new(EnvFilter::new("trace"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(QuoteLogFormat)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_filter(stderr_gate);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(QuoteLogFormat)
        .with_ansi(false)
        .with_writer(LogFile(Arc::clone(&file)));

    let installed = tracing_subscriber::registry()
        .with(level_layer)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        let _ = CONTROLS.set(LogControls {
            level: reloader(level_handle),
            stderr: reloader(stderr_handle),
            file,
        });
    }
}

/// Replaces the active filter, e.g. `"debug"` or `"warn,quote_core=trace"`.
pub fn set_log_level(level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_new(level).map_err(|e| anyhow!("invalid log level '{level}': {e}"))?;
    (controls()?.level)(filter)
}

/// Shows or hides stderr output. File logging is unaffected.
pub fn set_stderr_enabled(enabled: bool) -> Result<()> {
    let filter = EnvFilter::new(if enabled { "trace" } else { "off" });
    (controls()?.stderr)(filter)
}

/// Starts appending records to `path`, replacing any open log file. The
/// parent directory must exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let controls = controls()?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow!("cannot open log file '{}': {e}", path.display()))?;

    *lock_file(&controls.file) = Some(file);
    Ok(())
}

/// Flushes and detaches the log file, if any.
pub fn disable_file_logging() {
    let Some(controls) = CONTROLS.get() else {
        return;
    };
    if let Some(mut file) = lock_file(&controls.file).take() {
        let _ = file.flush();
    }
}

