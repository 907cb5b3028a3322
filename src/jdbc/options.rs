//! Option assembly for the JDBC loader

use crate::config::ConnectionConfig;
use crate::error::{Error, Result};
use crate::events::EventSink;
use crate::types::Event;
use crate::utils::option_value_to_string;
use std::collections::BTreeMap;
use std::fmt;

/// Keys whose values are masked in `Debug` output
const SENSITIVE_KEYS: &[&str] = &["password", "private_key", "pem_private_key"];

/// True if values under `key` must not be printed
pub(crate) fn is_sensitive(key: &str) -> bool {
    SENSITIVE_KEYS.contains(&key)
}

/// Flat key/value options handed to the loader
///
/// Never holds an empty value. Keys are kept in sorted order so the same
/// config always yields the same option listing.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct JdbcOptions(BTreeMap<String, String>);

impl JdbcOptions {
    /// Look up an option
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// True if the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of options
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no options are set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Move a value to a driver-specific key name (e.g. `url` to `sfUrl`)
    ///
    /// Does nothing if `from` is absent. An existing `to` is replaced.
    pub fn rename(&mut self, from: &str, to: impl Into<String>) {
        if let Some(value) = self.0.remove(from) {
            self.0.insert(to.into(), value);
        }
    }

    /// Consume into the underlying map
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }

    /// Insert a value, dropping the key instead if the value is empty
    fn set(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            self.0.remove(key);
        } else {
            self.0.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }
}

impl fmt::Debug for JdbcOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.0 {
            if is_sensitive(key) {
                map.entry(key, &"[REDACTED]");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}

/// Builds [`JdbcOptions`] from a [`ConnectionConfig`]
///
/// Merge order is base (`driver`, `url`, `user`) then the free-form options,
/// so caller-supplied keys win. Empty and `null` values are dropped. Secrets
/// are revealed only in [`build`](Self::build), after the merge, and the
/// source selection (`query` or `dbtable`) is applied last.
pub struct OptionsBuilder<'a> {
    config: &'a ConnectionConfig,
}

impl<'a> OptionsBuilder<'a> {
    /// Create a builder over `config`
    pub fn new(config: &'a ConnectionConfig) -> Self {
        Self { config }
    }

    /// Fail unless at least one of `dbtable` and `query` is non-empty
    pub fn validate(&self) -> Result<()> {
        if self.config.effective_table().is_none() && self.config.effective_query().is_none() {
            return Err(missing_source());
        }
        Ok(())
    }

    /// Base options merged with the caller's options, before secrets and
    /// source selection
    pub fn base_options(&self) -> JdbcOptions {
        let mut options = JdbcOptions::default();
        options.set("driver", &self.config.driver);
        options.set("url", &self.config.url);
        options.set("user", &self.config.user);

        for (key, value) in &self.config.options {
            match option_value_to_string(value) {
                Some(rendered) => options.set(key, &rendered),
                None => options.remove(key),
            }
        }
        options
    }

    /// Produce the final option set
    ///
    /// Emits [`Event::TableIgnored`] when both sources are set and
    /// [`Event::QueryExecuting`] / [`Event::TableReading`] for the chosen one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if both `dbtable` and `query` are empty.
    pub fn build(&self, events: &EventSink) -> Result<JdbcOptions> {
        self.validate()?;

        let mut options = self.base_options();

        if let Some(password) = self.config.password.as_ref().filter(|p| !p.is_empty()) {
            options.set("password", password.expose_secret());
        }
        if let Some(key) = self.config.private_key.as_ref().filter(|k| !k.is_empty()) {
            options.set("pem_private_key", key.expose_secret());
            options.set("private_key", key.expose_secret());
        }

        match (self.config.effective_query(), self.config.effective_table()) {
            (Some(query), table) => {
                if let Some(table) = table {
                    events.emit(Event::TableIgnored {
                        table: table.to_string(),
                    });
                }
                options.remove("dbtable");
                options.set("query", query);
                events.emit(Event::QueryExecuting {
                    query: query.to_string(),
                });
            }
            (None, Some(table)) => {
                options.remove("query");
                options.set("dbtable", table);
                events.emit(Event::TableReading {
                    table: table.to_string(),
                });
            }
            (None, None) => return Err(missing_source()),
        }

        Ok(options)
    }
}

fn missing_source() -> Error {
    Error::config(
        "please do not leave dbtable and query both empty",
        "dbtable",
    )
}
