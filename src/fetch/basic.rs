use std::time::Duration;

use super::client::HttpClient;
use crate::error::{AquaError, Result};

pub struct BasicClient(reqwest::blocking::Client);

impl BasicClient {
    /// Builds a client. `timeout` of `None` means requests never time out.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AquaError::Transport(e.to_string()))?;
        Ok(Self(client))
    }
}

impl HttpClient for BasicClient {
    fn get_text(&self, url: &str) -> Result<String> {
        let response = self
            .0
            .get(url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| AquaError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AquaError::Transport(format!("HTTP status {status}")));
        }

        response
            .text()
            .map_err(|e| AquaError::Transport(e.to_string()))
    }
}
