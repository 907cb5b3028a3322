//! Configuration types for frame-adapters

use crate::error::Result;
use crate::jdbc::options::is_sensitive;
use crate::secret::SecretString;
use crate::types::OutcomeEncoding;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// JDBC connection configuration
///
/// Immutable once built; consumed by [`JdbcReader`](crate::jdbc::JdbcReader).
/// `query` takes precedence over `dbtable` when both are set. `Debug` masks
/// the secrets and any `options` entry under a secret key.
#[derive(Clone, Deserialize)]
pub struct ConnectionConfig {
    /// Driver class name. The driver itself must be available to the host engine.
    pub driver: String,

    /// JDBC URL. Some environments need the IP address instead of the hostname.
    pub url: String,

    /// User to authenticate as
    pub user: String,

    /// Password belonging to the user
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Private key for key-pair authentication
    #[serde(default, alias = "pem_private_key")]
    pub private_key: Option<SecretString>,

    /// Table name, including the schema
    #[serde(default, alias = "table")]
    pub dbtable: Option<String>,

    /// Query text
    #[serde(default)]
    pub query: Option<String>,

    /// Extra options handed to the loader (e.g. `fetchsize`, `numPartitions`)
    #[serde(default)]
    pub options: BTreeMap<String, serde_json::Value>,
}

impl ConnectionConfig {
    /// Create a config with the required fields; everything else unset
    pub fn new(driver: impl Into<String>, url: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            url: url.into(),
            user: user.into(),
            password: None,
            private_key: None,
            dbtable: None,
            query: None,
            options: BTreeMap::new(),
        }
    }

    /// Set the password
    pub fn with_password(mut self, password: impl Into<SecretString>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the private key
    pub fn with_private_key(mut self, key: impl Into<SecretString>) -> Self {
        self.private_key = Some(key.into());
        self
    }

    /// Set the table name
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.dbtable = Some(table.into());
        self
    }

    /// Set the query
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Add one extra loader option
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Non-empty query, if any
    pub fn effective_query(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.is_empty())
    }

    /// Non-empty table name, if any
    pub fn effective_table(&self) -> Option<&str> {
        self.dbtable.as_deref().filter(|t| !t.is_empty())
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("driver", &self.driver)
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &self.password)
            .field("private_key", &self.private_key)
            .field("dbtable", &self.dbtable)
            .field("query", &self.query)
            .field("options", &RedactedOptions(&self.options))
            .finish()
    }
}

struct RedactedOptions<'a>(&'a BTreeMap<String, serde_json::Value>);

impl fmt::Debug for RedactedOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in self.0 {
            if is_sensitive(key) {
                map.entry(key, &"[REDACTED]");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}

/// Column wiring for [`DownloadExternalFile`](crate::download::DownloadExternalFile)
#[derive(Clone, Debug, Deserialize)]
pub struct DownloadColumnConfig {
    /// Column holding the download URL
    pub download_column: String,

    /// Column holding the filename to save as (generated per row if None)
    #[serde(default)]
    pub filename_column: Option<String>,

    /// Column holding the destination directory
    pub upload_location_column: String,

    /// Output column for the download outcome (default: "uploaded_url")
    #[serde(default = "default_output_column")]
    pub output_column: String,

    /// Maximum downloads in flight for one transformation (default: 1)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// How outcomes are written to the output column (default: legacy strings)
    #[serde(default)]
    pub encoding: OutcomeEncoding,
}

impl DownloadColumnConfig {
    /// Create a config with default output column, concurrency and encoding
    pub fn new(download_column: impl Into<String>, upload_location_column: impl Into<String>) -> Self {
        Self {
            download_column: download_column.into(),
            filename_column: None,
            upload_location_column: upload_location_column.into(),
            output_column: default_output_column(),
            concurrency: default_concurrency(),
            encoding: OutcomeEncoding::default(),
        }
    }

    /// Read filenames from this column
    pub fn with_filename_column(mut self, column: impl Into<String>) -> Self {
        self.filename_column = Some(column.into());
        self
    }

    /// Write outcomes to this column
    pub fn with_output_column(mut self, column: impl Into<String>) -> Self {
        self.output_column = column.into();
        self
    }

    /// Allow this many downloads in flight
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Choose the output encoding
    pub fn with_encoding(mut self, encoding: OutcomeEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

/// HTTP client settings for downloads
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DownloadClientConfig {
    /// Request timeout (None = wait indefinitely)
    #[serde(default)]
    pub timeout: Option<Duration>,

    /// User-Agent header (None = reqwest default)
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// Top-level configuration bundle
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// JDBC reader settings
    #[serde(default)]
    pub jdbc: Option<ConnectionConfig>,

    /// Download column transformation settings
    #[serde(default)]
    pub download: Option<DownloadColumnConfig>,

    /// HTTP client settings
    #[serde(default)]
    pub client: DownloadClientConfig,
}

impl Config {
    /// Parse configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

fn default_output_column() -> String {
    "uploaded_url".to_string()
}

fn default_concurrency() -> usize {
    1
}
