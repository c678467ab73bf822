//! Commissioning session state
//!
//! Owns the wizard and the protocol download of one installation run.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use ibn_protocol::{
    DownloadOutcome, FileSaver, HttpProtocolService, Notifier, PayloadDownloader, ProtocolId,
};
use ibn_wizard::{ViewEvent, WizardCoordinator, WizardState};

use crate::config::Config;
use crate::features::FeatureRegistry;
use crate::Result;

pub type ProtocolDownloader<N> = PayloadDownloader<HttpProtocolService, FileSaver, N>;

/// What the completion view knows about the installation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationData {
    /// Device the protocol belongs to, used for the file name
    pub edge_id: String,
    /// Issued by the backend once the protocol was generated
    #[serde(default)]
    pub setup_protocol_id: Option<ProtocolId>,
}

pub struct Commissioning<N> {
    config: Config,
    features: FeatureRegistry,
    wizard: Arc<RwLock<WizardCoordinator>>,
    downloader: ProtocolDownloader<N>,
}

impl<N: Notifier> Commissioning<N> {
    pub fn new(config: Config, notifier: N) -> Result<Self> {
        config.validate()?;

        let mut service = HttpProtocolService::new(config.endpoint_url()?)?;
        if let Some(username) = &config.username {
            service = service.with_basic_auth(
                username.clone(),
                config.password.clone().unwrap_or_default(),
            );
        }

        let downloader = PayloadDownloader::new(
            service,
            FileSaver::new(config.download_dir.clone()),
            notifier,
        )
        .with_file_name_prefix(config.file_name_prefix.clone());

        let wizard = WizardCoordinator::new(config.views.clone())?;
        let features = FeatureRegistry::builtin()?;

        tracing::info!(
            endpoint = %config.endpoint,
            download_dir = %config.download_dir.display(),
            views = config.views.len(),
            "Commissioning ready"
        );

        Ok(Self {
            config,
            features,
            wizard: Arc::new(RwLock::new(wizard)),
            downloader,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn features(&self) -> &FeatureRegistry {
        &self.features
    }

    pub fn downloader(&self) -> &ProtocolDownloader<N> {
        &self.downloader
    }

    /// Fetch and save the setup protocol of `installation`.
    ///
    /// Never fails: problems are reported through the notifier.
    pub async fn download_protocol(&self, installation: &InstallationData) -> DownloadOutcome {
        match &installation.setup_protocol_id {
            Some(id) => {
                self.downloader
                    .download(&installation.edge_id, id.clone())
                    .await
            }
            None => {
                self.downloader
                    .report_failure(&format!("{} has no setup protocol", installation.edge_id));
                DownloadOutcome::Failed
            }
        }
    }

    pub fn on_previous_clicked(&self) -> Result<WizardState> {
        self.handle_view_event(ViewEvent::Previous)
    }

    pub fn on_next_clicked(&self) -> Result<WizardState> {
        self.handle_view_event(ViewEvent::Next)
    }

    pub fn handle_view_event(&self, event: ViewEvent) -> Result<WizardState> {
        Ok(self.wizard.write().handle(event)?)
    }

    pub fn wizard_state(&self) -> WizardState {
        self.wizard.read().state()
    }

    pub fn current_view(&self) -> String {
        self.wizard.read().current_view().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use ibn_protocol::{ChannelNotifier, Notification, Severity, DOWNLOAD_FAILED_MESSAGE};
    use ibn_wizard::WizardError;
    use serde_json::json;
    use std::path::Path;
    use tokio::sync::mpsc::UnboundedReceiver;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(endpoint: &str, download_dir: &Path) -> Config {
        Config {
            endpoint: endpoint.to_string(),
            download_dir: download_dir.to_path_buf(),
            file_name_prefix: "IBN".to_string(),
            username: None,
            password: None,
            views: vec!["configuration".to_string(), "completion".to_string()],
        }
    }

    fn commissioning(
        endpoint: &str,
        download_dir: &Path,
    ) -> (Commissioning<ChannelNotifier>, UnboundedReceiver<Notification>) {
        let (notifier, rx) = ChannelNotifier::new();
        let commissioning =
            Commissioning::new(test_config(endpoint, download_dir), notifier).unwrap();
        (commissioning, rx)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let (notifier, _rx) = ChannelNotifier::new();
        let result = Commissioning::new(test_config("ftp://nowhere", Path::new("/tmp")), notifier);
        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn test_wizard_navigation() {
        let (commissioning, _rx) = commissioning("http://localhost:8084/jsonrpc", Path::new("/tmp"));
        assert_eq!(commissioning.current_view(), "configuration");

        assert!(matches!(
            commissioning.on_previous_clicked(),
            Err(CoreError::Wizard(WizardError::InvalidTransition { .. }))
        ));
        assert_eq!(commissioning.on_next_clicked().unwrap(), WizardState::InProgress);
        assert_eq!(commissioning.current_view(), "completion");
        assert_eq!(commissioning.on_next_clicked().unwrap(), WizardState::Finished);
        assert_eq!(commissioning.wizard_state(), WizardState::Finished);
    }

    #[tokio::test]
    async fn test_download_protocol() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": "1",
                "result": { "payload": "cGRmLWJ5dGVz" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let (commissioning, mut rx) =
            commissioning(&format!("{}/jsonrpc", server.uri()), dir.path());

        let installation = InstallationData {
            edge_id: "E100".to_string(),
            setup_protocol_id: Some(ProtocolId::Number(5)),
        };
        let outcome = commissioning.download_protocol(&installation).await;

        let DownloadOutcome::Saved { file_name, path, size } = outcome else {
            panic!("expected saved outcome");
        };
        assert!(file_name.starts_with("IBN-E100-"));
        assert!(file_name.ends_with(".pdf"));
        assert_eq!(size, 9);
        assert_eq!(std::fs::read(path).unwrap(), b"pdf-bytes");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_missing_protocol_id_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let (commissioning, mut rx) =
            commissioning(&format!("{}/jsonrpc", server.uri()), dir.path());

        let installation = InstallationData {
            edge_id: "E100".to_string(),
            setup_protocol_id: None,
        };
        let outcome = commissioning.download_protocol(&installation).await;

        assert_eq!(outcome, DownloadOutcome::Failed);
        let notification = rx.try_recv().unwrap();
        assert_eq!(notification.severity, Severity::Danger);
        assert_eq!(notification.message, DOWNLOAD_FAILED_MESSAGE);
    }

    #[test]
    fn test_installation_data_json() {
        let data: InstallationData =
            serde_json::from_str(r#"{ "edgeId": "fems1", "setupProtocolId": 12 }"#).unwrap();
        assert_eq!(data.setup_protocol_id, Some(ProtocolId::Number(12)));

        let data: InstallationData = serde_json::from_str(r#"{ "edgeId": "fems1" }"#).unwrap();
        assert!(data.setup_protocol_id.is_none());
    }
}
