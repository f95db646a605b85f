//! Diagnostic logging
//!
//! A [`Logger`] is built once in `main` from the `--debug` flag and handed to
//! every command through [`crate::commands::CommandContext`]. It owns its own
//! `tracing` dispatcher instead of installing a process-wide subscriber;
//! command futures are run under that dispatcher so events from the client
//! crate land in the same place.

use std::fmt::Display;
use std::io;
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
}

impl Logger {
    /// Logger writing to stderr, at `debug` level when `debug` is set and
    /// `info` otherwise
    pub fn new(debug: bool) -> Self {
        Self::with_writer(debug, io::stderr, true)
    }

    /// Logger writing to an arbitrary sink
    pub fn with_writer<W>(debug: bool, writer: W, ansi: bool) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(Self::filter(debug))
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(false)
            .without_time()
            .finish();

        Self {
            dispatch: Dispatch::new(subscriber),
        }
    }

    /// Logger that discards everything
    pub fn silent() -> Self {
        Self {
            dispatch: Dispatch::none(),
        }
    }

    fn filter(debug: bool) -> EnvFilter {
        let level = if debug { "debug" } else { "info" };
        EnvFilter::new(format!("warn,ghutils={level},ghutils_github={level}"))
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    pub fn debug(&self, message: impl Display) {
        self.emit(|| tracing::debug!("{}", message));
    }

    pub fn info(&self, message: impl Display) {
        self.emit(|| tracing::info!("{}", message));
    }

    pub fn warn(&self, message: impl Display) {
        self.emit(|| tracing::warn!("{}", message));
    }

    fn emit(&self, event: impl FnOnce()) {
        tracing::dispatcher::with_default(&self.dispatch, event);
    }
}
