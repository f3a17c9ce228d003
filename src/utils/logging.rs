//! Logging utilities for the application
//!
//! Diagnostics go to stderr so that stdout only ever carries rendered blocks and
//! operations. The filter comes from `RUST_LOG` when set, otherwise from the level
//! passed on the command line, otherwise `info`.
//!
//! `log` records emitted by the error constructors are bridged into `tracing` by the
//! subscriber's default `tracing-log` integration.
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default filter directive when neither `RUST_LOG` nor a level is given
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Setup logging for the application, writing to stderr
pub fn setup_logging(
	level: Option<&str>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
	setup_logging_with_writer(std::io::stderr, level)?;
	Ok(())
}

/// Builds the filter, preferring `RUST_LOG` over the explicit level
pub fn build_filter(level: Option<&str>) -> EnvFilter {
	EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(level.unwrap_or(DEFAULT_LOG_LEVEL)))
		.unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Builds the subscriber without installing it
///
/// Output is plain text: neither the event format nor the field formatter emit ANSI
/// escapes.
pub fn build_subscriber<W>(
	writer: W,
	level: Option<&str>,
) -> impl tracing::Subscriber + Send + Sync + 'static
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	tracing_subscriber::registry().with(build_filter(level)).with(
		fmt::layer()
			.with_writer(writer)
			.with_ansi(false)
			.event_format(
				fmt::format()
					.with_level(true)
					.with_target(true)
					.with_thread_ids(false)
					.with_thread_names(false)
					.with_ansi(false)
					.compact(),
			)
			.fmt_fields(fmt::format::PrettyFields::new()),
	)
}

/// Setup logging for the application with a custom writer
pub fn setup_logging_with_writer<W>(
	writer: W,
	level: Option<&str>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	build_subscriber(writer, level).try_init()?;
	Ok(())
}
