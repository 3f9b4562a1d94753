//! Raw inbound webhook request.

use std::collections::HashMap;

use bytes::Bytes;

use super::SIGNATURE_HEADER;

/// An inbound webhook HTTP request as received from the web framework.
///
/// The body is kept as the exact bytes received so the signature can be
/// checked against them.
#[derive(Debug, Clone)]
pub struct WebhookRequest {
    headers: HashMap<String, String>,
    body: Bytes,
}

impl WebhookRequest {
    /// Wrap a received request.
    ///
    /// # Arguments
    ///
    /// * `headers` - Request headers; names may use any case
    /// * `body` - The body exactly as received. Re-encoded JSON will not verify.
    pub fn new(headers: HashMap<String, String>, body: Bytes) -> Self {
        Self { headers, body }
    }

    /// Value of the `Sendcloud-Signature` header. Header names match
    /// case-insensitively.
    pub fn signature(&self) -> Option<&str> {
        self.header(SIGNATURE_HEADER)
    }

    /// Look up a header by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .or_else(|| {
                self.headers
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value)
            })
            .map(|value| value.as_str())
    }

    /// Raw payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.body
    }

    /// All headers as received.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}
