//! JDBC reader delegating to the host engine

use async_trait::async_trait;

use super::options::{JdbcOptions, OptionsBuilder};
use crate::config::ConnectionConfig;
use crate::error::Result;
use crate::events::EventSink;
use crate::frame::Frame;

/// Default loader format
pub const DEFAULT_FORMAT: &str = "jdbc";

/// The host engine's format loader
///
/// Implementations materialize a relation given a format name and the flat
/// option set, the way `read.format(format).options(options).load()` does in
/// a DataFrame engine. Driver jars and connectivity are the loader's concern.
///
/// # Examples
///
/// ```no_run
/// use async_trait::async_trait;
/// use frame_adapters::jdbc::{FormatLoader, JdbcOptions};
/// use frame_adapters::{Frame, Result};
///
/// struct EchoLoader;
///
/// #[async_trait]
/// impl FormatLoader for EchoLoader {
///     async fn load(&self, _format: &str, options: &JdbcOptions) -> Result<Frame> {
///         let mut frame = Frame::new(["key", "value"]);
///         for (k, v) in options.iter() {
///             frame.push_row(vec![k.into(), v.into()])?;
///         }
///         Ok(frame)
///     }
/// }
/// ```
#[async_trait]
pub trait FormatLoader: Send + Sync {
    /// Load a relation using `options`
    ///
    /// # Errors
    ///
    /// Implementations report their own failures, typically as
    /// [`Error::Loader`](crate::Error::Loader).
    async fn load(&self, format: &str, options: &JdbcOptions) -> Result<Frame>;
}

/// Reader for JDBC tables and queries
///
/// `query` has precedence over `dbtable`; if both are set, `dbtable` is
/// ignored. Extra loader options (e.g. `fetchsize`, or `numPartitions` with
/// `partitionColumn`, `lowerBound` and `upperBound`) go through
/// [`ConnectionConfig::options`].
#[derive(Clone, Debug)]
pub struct JdbcReader {
    config: ConnectionConfig,
    format: String,
    events: EventSink,
}

impl JdbcReader {
    /// Create a reader using the `jdbc` format
    pub fn new(config: ConnectionConfig, events: EventSink) -> Self {
        Self {
            config,
            format: DEFAULT_FORMAT.to_string(),
            events,
        }
    }

    /// Use a driver-specific format name instead of `jdbc`
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Format handed to the loader
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Connection configuration
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Final options for this reader, with secrets revealed
    pub fn options(&self) -> Result<JdbcOptions> {
        OptionsBuilder::new(&self.config).build(&self.events)
    }

    /// Validate, build options and load through `loader`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) before calling the loader
    /// if both `dbtable` and `query` are empty; otherwise whatever the
    /// loader returns.
    pub async fn read<L>(&self, loader: &L) -> Result<Frame>
    where
        L: FormatLoader + ?Sized,
    {
        let options = self.options()?;
        tracing::debug!(format = %self.format, options = ?options, "loading via format loader");
        loader.load(&self.format, &options).await
    }
}
