//! Live registry fetcher.
//!
//! Talks to a crates.io-style HTTP API. Resolving one package costs two
//! sequential requests: crate metadata (for the latest version), then the
//! dependency list of that version.

use crate::config::FetchOptions;
use crate::error::{CratemapError, Result};
use crate::fetcher::DependencyFetcher;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Fetcher backed by the package registry's HTTP API.
pub struct RegistryFetcher {
    client: Client,
    base_url: String,
}

impl RegistryFetcher {
    /// Create a fetcher for the registry named in the configuration.
    #[must_use]
    pub fn new(options: &FetchOptions) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .user_agent(options.user_agent.clone())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: options.registry_url.trim_end_matches('/').to_string(),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// GET a JSON document, mapping transport and status failures to
    /// typed fetch errors.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, package: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(url, &e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CratemapError::PackageNotFound {
                package: package.to_string(),
            });
        }
        if !status.is_success() {
            return Err(CratemapError::Http {
                url: url.to_string(),
                message: format!("unexpected status {status}"),
                status_code: Some(status.as_u16()),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CratemapError::ResponseFormat {
                package: package.to_string(),
                message: e.to_string(),
            })
    }

    /// Fetch crate metadata and extract the latest published version.
    async fn latest_version(&self, package: &str) -> Result<String> {
        let url = format!("{}/api/v1/crates/{package}", self.base_url);
        tracing::debug!(package = %package, url = %url, "Fetching package metadata");

        let metadata: CrateResponse = self.get_json(&url, package).await?;
        match metadata.krate.max_version {
            Some(version) if !version.is_empty() => Ok(version),
            _ => Err(CratemapError::ResponseFormat {
                package: package.to_string(),
                message: "could not determine the latest version".to_string(),
            }),
        }
    }

    /// Fetch the dependency list of one specific version.
    async fn version_dependencies(&self, package: &str, version: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/api/v1/crates/{package}/{version}/dependencies",
            self.base_url
        );
        tracing::debug!(package = %package, version = %version, "Fetching dependency list");

        let response: DependenciesResponse = self.get_json(&url, package).await?;
        Ok(response
            .dependencies
            .into_iter()
            .map(|d| d.crate_id)
            // A crate occasionally lists itself (e.g. as a dev-dependency)
            .filter(|name| name != package)
            .collect())
    }
}

#[async_trait]
impl DependencyFetcher for RegistryFetcher {
    async fn direct_dependencies(&self, package: &str) -> Result<Vec<String>> {
        let version = self.latest_version(package).await?;
        tracing::debug!(package = %package, version = %version, "Resolved latest version");

        let dependencies = self.version_dependencies(package, &version).await?;
        tracing::debug!(
            package = %package,
            count = dependencies.len(),
            "Fetched direct dependencies"
        );
        Ok(dependencies)
    }
}

fn transport_error(url: &str, error: &reqwest::Error) -> CratemapError {
    if error.is_timeout() {
        return CratemapError::Timeout {
            url: url.to_string(),
        };
    }
    CratemapError::Http {
        url: url.to_string(),
        message: error.to_string(),
        status_code: error.status().map(|s| s.as_u16()),
    }
}

/// Crate metadata API response, reduced to the fields we read.
#[derive(Debug, Deserialize)]
struct CrateResponse {
    #[serde(rename = "crate")]
    krate: CrateData,
}

#[derive(Debug, Deserialize)]
struct CrateData {
    max_version: Option<String>,
}

/// Dependency-list API response.
#[derive(Debug, Deserialize)]
struct DependenciesResponse {
    dependencies: Vec<DependencyEntry>,
}

#[derive(Debug, Deserialize)]
struct DependencyEntry {
    crate_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher_for(server: &MockServer) -> RegistryFetcher {
        RegistryFetcher::new(&FetchOptions::default()).with_base_url(&server.uri())
    }

    async fn mount_metadata(server: &MockServer, package: &str, version: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/crates/{package}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "crate": { "max_version": version } })),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetches_dependencies_of_latest_version() {
        let server = MockServer::start().await;
        mount_metadata(&server, "serde", "1.0.197").await;
        Mock::given(method("GET"))
            .and(path("/api/v1/crates/serde/1.0.197/dependencies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "dependencies": [
                    { "crate_id": "serde_derive" },
                    { "crate_id": "serde" },
                    { "crate_id": "proc-macro2" },
                ]
            })))
            .mount(&server)
            .await;

        let deps = fetcher_for(&server)
            .direct_dependencies("serde")
            .await
            .unwrap();

        // Order preserved, self-dependency dropped
        assert_eq!(deps, ["serde_derive", "proc-macro2"]);
    }

    #[tokio::test]
    async fn test_unknown_package_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/crates/no-such-crate"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = fetcher_for(&server)
            .direct_dependencies("no-such-crate")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CratemapError::PackageNotFound { ref package } if package == "no-such-crate"
        ));
    }

    #[tokio::test]
    async fn test_missing_version_field_is_format_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/crates/odd"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "crate": {} })))
            .mount(&server)
            .await;

        let err = fetcher_for(&server)
            .direct_dependencies("odd")
            .await
            .unwrap_err();

        assert!(matches!(err, CratemapError::ResponseFormat { .. }));
    }

    #[tokio::test]
    async fn test_missing_dependencies_field_is_format_error() {
        let server = MockServer::start().await;
        mount_metadata(&server, "odd", "0.1.0").await;
        Mock::given(method("GET"))
            .and(path("/api/v1/crates/odd/0.1.0/dependencies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "deps": [] })))
            .mount(&server)
            .await;

        let err = fetcher_for(&server)
            .direct_dependencies("odd")
            .await
            .unwrap_err();

        assert!(matches!(err, CratemapError::ResponseFormat { .. }));
    }

    #[tokio::test]
    async fn test_server_error_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/crates/flaky"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = fetcher_for(&server)
            .direct_dependencies("flaky")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CratemapError::Http { status_code: Some(500), .. }
        ));
        assert!(err.is_recoverable());
    }
}
