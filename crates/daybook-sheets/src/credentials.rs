// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Service-account credentials and the signed token assertion

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::SheetsError;

/// OAuth scope granting read/write access to spreadsheets
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Token endpoint used when the credential omits `token_uri`
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Lifetime requested for the access token, in seconds
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// The fields of a service-account JSON key that daybook uses
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    /// Service account identity (`...@...iam.gserviceaccount.com`)
    pub client_email: String,
    /// PEM-encoded RSA private key
    pub private_key: String,
    /// Key identifier, sent as the `kid` header when present
    #[serde(default)]
    pub private_key_id: Option<String>,
    /// OAuth2 token endpoint
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    /// Owning project
    #[serde(default)]
    pub project_id: Option<String>,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl std::fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .field("project_id", &self.project_id)
            .finish()
    }
}

/// JWT claims for the OAuth2 JWT-bearer grant
#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

impl ServiceAccount {
    /// Parse a service-account JSON document
    ///
    /// # Errors
    ///
    /// Returns `SheetsError::InvalidCredentials` if the text is not JSON or
    /// lacks `client_email` / `private_key`.
    pub fn from_json(json: &str) -> Result<Self, SheetsError> {
        let account: Self = serde_json::from_str(json)
            .map_err(|e| SheetsError::InvalidCredentials(e.to_string()))?;
        if account.client_email.trim().is_empty() {
            return Err(SheetsError::InvalidCredentials(
                "client_email is empty".to_string(),
            ));
        }
        if account.private_key.trim().is_empty() {
            return Err(SheetsError::InvalidCredentials(
                "private_key is empty".to_string(),
            ));
        }
        Ok(account)
    }

    /// Build the RS256-signed assertion exchanged for an access token
    ///
    /// # Errors
    ///
    /// Returns `SheetsError::Signing` if the private key is not a valid RSA PEM.
    pub fn assertion(&self, scope: &str, issued_at: i64) -> Result<String, SheetsError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.private_key_id.clone();

        let claims = Claims {
            iss: &self.client_email,
            scope,
            aud: &self.token_uri,
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        };

        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())?;
        Ok(jsonwebtoken::encode(&header, &claims, &key)?)
    }
}
