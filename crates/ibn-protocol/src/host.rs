//! Host environment interfaces: save-as and user notifications

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

use crate::artifact::DecodedArtifact;
use crate::Result;

/// Persists an in-memory document as a file visible to the user
pub trait SaveAs: Send + Sync {
    fn save_as(&self, artifact: DecodedArtifact) -> impl Future<Output = Result<PathBuf>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

/// Shows a short message to the user (a toast)
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes saved documents into a fixed directory
#[derive(Debug, Clone)]
pub struct FileSaver {
    dir: PathBuf,
}

impl FileSaver {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SaveAs for FileSaver {
    async fn save_as(&self, artifact: DecodedArtifact) -> Result<PathBuf> {
        let file_name = sanitize_file_name(&artifact.file_name);
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(&file_name);
        tokio::fs::write(&path, &artifact.bytes).await?;

        tracing::info!(
            path = %path.display(),
            bytes = artifact.len(),
            mime_type = artifact.mime_type,
            sha256 = %artifact.sha256_hex(),
            "Saved protocol document"
        );

        Ok(path)
    }
}

/// Logs notifications instead of displaying them
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Danger => tracing::error!(message = %notification.message, "Notification"),
            Severity::Warning => tracing::warn!(message = %notification.message, "Notification"),
            Severity::Success | Severity::Info => {
                tracing::info!(message = %notification.message, "Notification")
            }
        }
    }
}

/// Forwards notifications to a UI task
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            tracing::debug!("Notification receiver dropped");
        }
    }
}

fn sanitize_file_name(file_name: &str) -> String {
    let name = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("download")
        .trim();

    if name.is_empty() {
        "download".to_string()
    } else {
        name.to_string()
    }
}
