//! Decoded protocol document

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use chrono::NaiveDate;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::request::Base64PayloadResponse;
use crate::Result;

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Standard alphabet, padding optional
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Remove ASCII whitespace (space, tab, LF, VT, FF, CR).
///
/// Unicode whitespace such as U+00A0 is kept and will fail decoding.
pub fn strip_whitespace(payload: &str) -> String {
    payload
        .chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r'))
        .collect()
}

/// Strip whitespace and decode a base64 payload into raw bytes
pub fn decode_payload(payload: &str) -> Result<Vec<u8>> {
    Ok(PAYLOAD_ENGINE.decode(strip_whitespace(payload))?)
}

/// `{prefix}-{entity_id}-{dd.MM.yyyy}.pdf`
pub fn protocol_file_name(prefix: &str, entity_id: &str, date: NaiveDate) -> String {
    format!("{}-{}-{}.pdf", prefix, entity_id, date.format("%d.%m.%Y"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedArtifact {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub file_name: String,
}

impl DecodedArtifact {
    pub fn from_response(response: &Base64PayloadResponse, file_name: String) -> Result<Self> {
        Ok(Self {
            bytes: decode_payload(&response.payload)?,
            mime_type: PDF_MIME_TYPE,
            file_name,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn sha256_hex(&self) -> String {
        let digest = Sha256::digest(&self.bytes);
        let mut out = String::with_capacity(digest.len() * 2);
        for b in digest {
            out.push_str(&format!("{:02x}", b));
        }
        out
    }
}
