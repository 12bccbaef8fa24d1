//! Single-shot credential verification against the identity-lookup endpoint.
//!
//! [`HttpVerifier`] issues exactly one blocking GET per credential and maps
//! the response onto a [`VerificationOutcome`]. Nothing is retried; rejected
//! credentials and transport failures are both ordinary outcomes.
use log::{error, info, warn};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use url::Url;

use crate::config::CheckerConfig;
use crate::credential::Credential;
use crate::profile::{ProfileAttributes, UserPayload};

/// Result of one verification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Valid { attributes: ProfileAttributes },
    Invalid { status_code: u16 },
    TransportError { message: String },
}

impl VerificationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_valid() { "VALID" } else { "INVALID" }
    }
}

/// Anything that can check a credential. The aggregator only depends on this.
pub trait Verify {
    fn verify(&self, credential: &Credential) -> VerificationOutcome;
}

impl<V: Verify + ?Sized> Verify for &V {
    fn verify(&self, credential: &Credential) -> VerificationOutcome {
        (**self).verify(credential)
    }
}

#[derive(Debug)]
pub struct HttpVerifier {
    http: Client,
    endpoint: Url,
    avatar_base: Url,
    preview_len: usize,
}

impl HttpVerifier {
    pub fn new(config: &CheckerConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            avatar_base: config.avatar_base.clone(),
            preview_len: config.preview_len,
        })
    }

    fn transport_error(&self, credential: &Credential, message: String) -> VerificationOutcome {
        error!(
            "network error for {}: {}",
            credential.preview(self.preview_len),
            message
        );
        VerificationOutcome::TransportError { message }
    }
}

impl Verify for HttpVerifier {
    fn verify(&self, credential: &Credential) -> VerificationOutcome {
        let auth = match HeaderValue::from_str(credential.as_str()) {
            Ok(v) => v,
            Err(_) => {
                return self.transport_error(
                    credential,
                    "credential is not a valid header value".to_string(),
                );
            }
        };
        let resp = match self
            .http
            .get(self.endpoint.clone())
            .header(AUTHORIZATION, auth)
            .send()
        {
            Ok(r) => r,
            Err(e) => return self.transport_error(credential, e.to_string()),
        };

        let status = resp.status();
        if status != StatusCode::OK {
            warn!(
                "invalid credential: {} (status code: {})",
                credential.preview(self.preview_len),
                status.as_u16()
            );
            return VerificationOutcome::Invalid {
                status_code: status.as_u16(),
            };
        }

        let payload: UserPayload = match resp.json() {
            Ok(p) => p,
            Err(e) => {
                return self.transport_error(credential, format!("malformed response body: {}", e));
            }
        };
        match ProfileAttributes::from_payload(payload, &self.avatar_base) {
            Ok(attributes) => {
                info!("valid credential found for user: {}", attributes.username);
                VerificationOutcome::Valid { attributes }
            }
            Err(e) => self.transport_error(credential, format!("malformed response body: {}", e)),
        }
    }
}
