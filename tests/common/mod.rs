//! Common test utilities for frame-adapters integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use frame_adapters::jdbc::{FormatLoader, JdbcOptions};
use frame_adapters::{Error, Frame, Result};
use serde_json::json;
use std::sync::Mutex;

/// Loader that records every call and returns a fixed frame
#[derive(Default)]
pub struct RecordingLoader {
    pub calls: Mutex<Vec<(String, JdbcOptions)>>,
    pub fail_with: Option<String>,
}

impl RecordingLoader {
    pub fn failing(message: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<(String, JdbcOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FormatLoader for RecordingLoader {
    async fn load(&self, format: &str, options: &JdbcOptions) -> Result<Frame> {
        self.calls
            .lock()
            .unwrap()
            .push((format.to_string(), options.clone()));
        if let Some(message) = &self.fail_with {
            return Err(Error::Loader(message.clone()));
        }
        Frame::from_rows(
            ["id", "name"],
            vec![vec![json!(1), json!("alpha")], vec![json!(2), json!("beta")]],
        )
    }
}
