//! Setup protocol downloader

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;

use crate::artifact::{protocol_file_name, DecodedArtifact};
use crate::host::{Notification, Notifier, SaveAs, Severity};
use crate::request::{GetSetupProtocolRequest, ProtocolId};
use crate::transport::ProtocolService;
use crate::Result;

pub const DOWNLOAD_FAILED_MESSAGE: &str = "The protocol could not be downloaded.";

const DEFAULT_FILE_NAME_PREFIX: &str = "IBN";

type DateSource = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum DownloadOutcome {
    Saved {
        file_name: String,
        path: PathBuf,
        size: usize,
    },
    /// The user has already been notified
    Failed,
}

impl DownloadOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, DownloadOutcome::Saved { .. })
    }
}

/// Requests, decodes and saves a setup protocol.
///
/// Every call is independent: one request, then either one save-as or one
/// notification. Errors never reach the caller.
pub struct PayloadDownloader<S, H, N> {
    service: Arc<S>,
    saver: Arc<H>,
    notifier: Arc<N>,
    file_name_prefix: String,
    today: DateSource,
}

impl<S, H, N> PayloadDownloader<S, H, N>
where
    S: ProtocolService,
    H: SaveAs,
    N: Notifier,
{
    pub fn new(service: S, saver: H, notifier: N) -> Self {
        Self {
            service: Arc::new(service),
            saver: Arc::new(saver),
            notifier: Arc::new(notifier),
            file_name_prefix: DEFAULT_FILE_NAME_PREFIX.to_string(),
            today: Arc::new(|| chrono::Local::now().date_naive()),
        }
    }

    pub fn with_file_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_name_prefix = prefix.into();
        self
    }

    pub fn with_date_source<F>(mut self, today: F) -> Self
    where
        F: Fn() -> NaiveDate + Send + Sync + 'static,
    {
        self.today = Arc::new(today);
        self
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// File name the protocol of `entity_id` gets when saved today
    pub fn file_name_for(&self, entity_id: &str) -> String {
        protocol_file_name(&self.file_name_prefix, entity_id, (self.today)())
    }

    pub async fn download(&self, entity_id: &str, protocol_id: ProtocolId) -> DownloadOutcome {
        tracing::info!(
            entity_id = %entity_id,
            setup_protocol_id = %protocol_id,
            "Downloading setup protocol"
        );

        match self.fetch_and_save(entity_id, protocol_id).await {
            Ok((file_name, path, size)) => DownloadOutcome::Saved {
                file_name,
                path,
                size,
            },
            Err(e) => {
                self.report_failure(&e);
                DownloadOutcome::Failed
            }
        }
    }

    /// Tell the user the protocol is unavailable and log why
    pub fn report_failure(&self, reason: &dyn Display) {
        tracing::warn!(reason = %reason, "Setup protocol download failed");
        self.notifier
            .notify(Notification::new(DOWNLOAD_FAILED_MESSAGE, Severity::Danger));
    }

    async fn fetch_and_save(
        &self,
        entity_id: &str,
        protocol_id: ProtocolId,
    ) -> Result<(String, PathBuf, usize)> {
        let request = GetSetupProtocolRequest::new(protocol_id);
        let response = self.service.get_setup_protocol(&request).await?;

        let file_name = self.file_name_for(entity_id);
        let artifact = DecodedArtifact::from_response(&response, file_name.clone())?;
        let size = artifact.len();

        let path = self.saver.save_as(artifact).await?;
        Ok((file_name, path, size))
    }
}

impl<S, H, N> Clone for PayloadDownloader<S, H, N> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            saver: Arc::clone(&self.saver),
            notifier: Arc::clone(&self.notifier),
            file_name_prefix: self.file_name_prefix.clone(),
            today: Arc::clone(&self.today),
        }
    }
}
