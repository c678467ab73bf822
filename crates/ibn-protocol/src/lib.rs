//! IBN Setup Protocol Delivery
//!
//! Fetches the PDF protocol generated at the end of a commissioning session:
//! - One JSON-RPC request per download, carrying the `setupProtocolId`
//! - Whitespace-tolerant base64 payload decoding
//! - Host save-as with a dated file name
//! - Failures end as a notification, never as an error to the caller

mod artifact;
mod downloader;
mod error;
mod host;
mod request;
mod transport;

pub use artifact::{
    decode_payload, protocol_file_name, strip_whitespace, DecodedArtifact, PDF_MIME_TYPE,
};
pub use downloader::{DownloadOutcome, PayloadDownloader, DOWNLOAD_FAILED_MESSAGE};
pub use error::ProtocolError;
pub use host::{
    ChannelNotifier, FileSaver, Notification, Notifier, SaveAs, Severity, TracingNotifier,
};
pub use request::{Base64PayloadResponse, GetSetupProtocolRequest, ProtocolId};
pub use transport::{HttpProtocolService, ProtocolService};

pub type Result<T> = std::result::Result<T, ProtocolError>;
