//! Provider subprocess plumbing.
//!
//! Calendar writes go through external provider binaries (e.g.
//! `itinera-provider-google`) speaking JSON over stdin/stdout, so any
//! executable that implements the protocol can serve as a provider.
//! Each call spawns the binary, writes a single request line, and reads
//! its one-line response.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

use crate::error::{ItineraError, ItineraResult};
use crate::protocol::{Command as ProviderCommand, Request, Response};

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct Provider(String);

impl Provider {
    pub fn from_name(name: &str) -> Self {
        Provider(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    fn binary_path(&self) -> ItineraResult<std::path::PathBuf> {
        let binary_name = format!("itinera-provider-{}", self.0);
        which::which(&binary_name)
            .map_err(|_| ItineraError::ProviderNotInstalled(self.0.clone()))
    }

    /// Call a provider command, failing if it takes longer than the
    /// provider timeout. Not used for `authenticate`, which blocks on
    /// the user's browser.
    pub async fn call_with_timeout<R: DeserializeOwned>(
        &self,
        command: ProviderCommand,
        params: serde_json::Value,
    ) -> ItineraResult<R> {
        timeout(PROVIDER_TIMEOUT, self.call(command, params))
            .await
            .map_err(|_| ItineraError::ProviderTimeout(PROVIDER_TIMEOUT.as_secs()))?
    }

    /// Call a provider command and return the deserialized result.
    pub async fn call<R: DeserializeOwned>(
        &self,
        command: ProviderCommand,
        params: serde_json::Value,
    ) -> ItineraResult<R> {
        let request = Request { command, params };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| ItineraError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;

        let mut child = Command::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .spawn()
            .map_err(|e| {
                ItineraError::Provider(format!("Failed to spawn {}: {}", binary_path.display(), e))
            })?;

        // Write the request and close stdin so the provider exits after
        // answering (unwrap safe: we piped stdin above)
        let mut stdin = child.stdin.take().unwrap();
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(ItineraError::Provider(format!(
                "Provider exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.trim().is_empty() {
            return Err(ItineraError::Provider(
                "Provider returned no response".into(),
            ));
        }

        let response: Response<R> = serde_json::from_str(&response_str)
            .map_err(|e| ItineraError::Provider(format!("Failed to parse response: {}", e)))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(ItineraError::Provider(error)),
        }
    }
}
