//! Webhook signature validation.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::WebhookRequest;
use crate::error::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// Validates the `Sendcloud-Signature` header of inbound webhooks.
///
/// The expected signature is the lowercase hex HMAC-SHA256 of the raw body,
/// keyed with the API secret key. Comparison is exact and case-sensitive,
/// and runs in constant time for equal-length inputs.
///
/// The secret is zeroed on drop and never appears in `Debug` output.
#[derive(Clone)]
pub struct SignatureValidator {
    secret: Zeroizing<Vec<u8>>,
}

impl SignatureValidator {
    /// Create a validator keyed with the account's API secret key.
    ///
    /// # Arguments
    ///
    /// * `secret` - The secret key the vendor signs webhooks with
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sendcloud_sdk::webhook::SignatureValidator;
    ///
    /// let validator = SignatureValidator::new("my-secret-key");
    /// assert!(!format!("{:?}", validator).contains("my-secret-key"));
    /// ```
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: Zeroizing::new(secret.as_ref().to_vec()),
        }
    }

    /// Verify the signature of `request`.
    ///
    /// # Errors
    ///
    /// - [`WebhookError::InvalidRequest`] when the signature header is missing.
    /// - [`WebhookError::VerificationFailed`] when the header does not match
    ///   the body.
    pub fn verify(&self, request: &WebhookRequest) -> Result<(), WebhookError> {
        let signature = request.signature().ok_or_else(|| {
            WebhookError::invalid_request(format!("missing {} header", super::SIGNATURE_HEADER))
        })?;

        let expected = self.compute_signature(request.payload())?;
        if constant_time_compare(signature.as_bytes(), expected.as_bytes()) {
            Ok(())
        } else {
            tracing::warn!(
                payload_size = request.payload().len(),
                "Webhook signature mismatch"
            );
            Err(WebhookError::VerificationFailed)
        }
    }

    /// Lowercase hex HMAC-SHA256 of `payload`.
    pub fn compute_signature(&self, payload: &[u8]) -> Result<String, WebhookError> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.secret).map_err(|e| {
            WebhookError::Hmac {
                message: format!("Failed to create HMAC instance: {}", e),
            }
        })?;
        mac.update(payload);
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    // Length is not secret.
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

impl std::fmt::Debug for SignatureValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureValidator")
            .field("secret", &"<REDACTED>")
            .finish()
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
