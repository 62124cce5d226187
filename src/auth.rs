//! OAuth2 authentication for the Gmail API

use google_gmail1::{hyper_rustls, hyper_util, yup_oauth2, Gmail};
use std::path::Path;

use crate::error::{Result, TrackerError};

/// Read-only scope, the pipeline never modifies the mailbox
pub const READONLY_SCOPES: &[&str] = &["https://www.googleapis.com/auth/gmail.readonly"];

/// Type alias for Gmail Hub to simplify type signatures
pub type GmailHub = Gmail<hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>>;

/// Read and validate the installed-app client secret.
///
/// A missing or malformed file is an authentication failure.
pub async fn read_client_secret(credentials_path: &Path) -> Result<yup_oauth2::ApplicationSecret> {
    yup_oauth2::read_application_secret(credentials_path)
        .await
        .map_err(|e| {
            TrackerError::AuthError(format!(
                "Failed to read client secret {:?}: {}",
                credentials_path, e
            ))
        })
}

/// Initialize Gmail API hub with OAuth2 authentication
///
/// Sets up:
/// - OAuth2 InstalledFlow (desktop app flow), opening a browser on first use
/// - Token persistence to `token_cache_path` for automatic refresh
/// - HTTP/1 client with TLS (native roots)
pub async fn initialize_gmail_hub(
    credentials_path: &Path,
    token_cache_path: &Path,
) -> Result<GmailHub> {
    let secret = read_client_secret(credentials_path).await?;

    if let Some(parent) = token_cache_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let auth = yup_oauth2::InstalledFlowAuthenticator::builder(
        secret,
        yup_oauth2::InstalledFlowReturnMethod::HTTPRedirect,
    )
    .persist_tokens_to_disk(token_cache_path)
    .build()
    .await
    .map_err(|e| TrackerError::AuthError(format!("Failed to build authenticator: {}", e)))?;

    // Pre-authenticate so the cached token carries the read-only scope
    let _token = auth
        .token(READONLY_SCOPES)
        .await
        .map_err(|e| TrackerError::AuthError(format!("Failed to obtain token: {}", e)))?;

    let client = hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
        .build(
            hyper_rustls::HttpsConnectorBuilder::new()
                .with_native_roots()
                .map_err(|e| {
                    TrackerError::AuthError(format!("Failed to load TLS roots: {}", e))
                })?
                .https_or_http()
                .enable_http1()
                .build(),
        );

    Ok(Gmail::new(client, auth))
}
