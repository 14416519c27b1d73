//! `tracing` output for the browser console.
//!
//! The fmt subscriber renders each event into a [`ConsoleWriter`], which
//! forwards the finished line to `console.error`/`warn`/`log` by level when
//! dropped. Native builds (tests) write to stderr instead.

use std::io;

use tracing::level_filters::LevelFilter;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Install the global console subscriber. Repeated calls are ignored.
pub fn init(level: LevelFilter) {
    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(ConsoleMakeWriter)
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .try_init();
    if installed.is_ok() {
        tracing::debug!(%level, "console logging ready");
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event and emits it on drop.
pub struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self { level, buf: Vec::new() }
    }

    fn line(&self) -> String {
        String::from_utf8_lossy(&self.buf).trim_end().to_string()
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        emit(self.level, &self.line());
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let msg = JsValue::from_str(line);
    match level {
        Level::ERROR => console::error_1(&msg),
        Level::WARN => console::warn_1(&msg),
        Level::INFO => console::info_1(&msg),
        _ => console::log_1(&msg),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{line}");
}
