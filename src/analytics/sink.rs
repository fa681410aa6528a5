// Analytics sink - appends tracked events to disk in JSON Lines format
//
// JSON Lines (JSONL) writes one JSON object per line, making the session
// log easy to grep and to process with jq or other standard tools.
//
// Each session gets its own log file: wefriendz-YYYYMMDD-HHMMSS-XXXX.jsonl
// Example: jq '.type' logs/wefriendz-20260830-143022-a7b3.jsonl

use super::TrackedEvent;
use anyhow::{Context, Result};
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Generate a unique session ID for log file naming
/// Format: YYYYMMDD-HHMMSS-XXXX (timestamp + 4 random hex chars)
pub fn generate_session_id() -> String {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let timestamp = Utc::now().format("%Y%m%d-%H%M%S");
    // Use RandomState to get a random value without adding a dependency
    let random = RandomState::new().build_hasher().finish();
    let short_hash = format!("{:04x}", random & 0xFFFF);

    format!("{}-{}", timestamp, short_hash)
}

/// Writes analytics events to a per-session JSONL file
pub struct AnalyticsSink {
    log_dir: PathBuf,
    session_id: String,
    event_rx: mpsc::Receiver<TrackedEvent>,
}

impl AnalyticsSink {
    /// Create a new sink
    /// Each session gets its own log file based on session_id
    pub fn new(
        log_dir: PathBuf,
        session_id: String,
        event_rx: mpsc::Receiver<TrackedEvent>,
    ) -> Result<Self> {
        // Create the log directory if it doesn't exist
        fs::create_dir_all(&log_dir).context("Failed to create analytics log directory")?;

        Ok(Self {
            log_dir,
            session_id,
            event_rx,
        })
    }

    /// Get the path to this session's log file
    fn log_file_path(&self) -> PathBuf {
        self.log_dir
            .join(format!("wefriendz-{}.jsonl", self.session_id))
    }

    /// Run the sink loop, writing events to disk as they arrive
    ///
    /// Runs in its own async task and continues until every `ChannelAnalytics`
    /// handle has been dropped and the channel closes.
    pub async fn run(mut self) -> Result<()> {
        tracing::info!("Analytics sink started, session log: {:?}", self.log_file_path());

        while let Some(event) = self.event_rx.recv().await {
            if let Err(e) = self.write_event(&event) {
                tracing::error!("Failed to write analytics event: {:?}", e);
                // Continue processing even if one write fails
            }
        }

        tracing::info!("Analytics sink shutting down");
        Ok(())
    }

    /// Write a single event to the log file
    fn write_event(&self, event: &TrackedEvent) -> Result<()> {
        let log_path = self.log_file_path();

        // Open file in append mode, create if it doesn't exist
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .context("Failed to open analytics log file")?;

        // Serialize the event to JSON and write with newline
        let json = serde_json::to_string(event).context("Failed to serialize event")?;

        writeln!(file, "{}", json).context("Failed to write to analytics log file")?;

        // Flush immediately so events are visible even if the process crashes
        file.flush().context("Failed to flush analytics log file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_unique_enough() {
        let a = generate_session_id();
        let b = generate_session_id();
        // Same timestamp is likely; the random suffix must differ
        assert_ne!(a, b);
    }

    #[test]
    fn session_id_has_expected_shape() {
        let id = generate_session_id();
        // YYYYMMDD-HHMMSS-XXXX
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 8);
        assert_eq!(parts[1].len(), 6);
        assert_eq!(parts[2].len(), 4);
    }
}
