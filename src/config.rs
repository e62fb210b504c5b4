//! Configuration for the boxoffice binaries.
//!
//! Both binaries parse their options with arrrg and fold them into one of the
//! structures here, filling gaps from the environment and then from defaults.
//!
//! | Setting  | Option           | Environment          | Default                         |
//! |----------|------------------|----------------------|---------------------------------|
//! | host     | `--host`         |                      | `127.0.0.1`                     |
//! | port     | `--port`         | `PORT`               | `3000`                          |
//! | upstream | `--upstream`     | `BOXOFFICE_UPSTREAM` | `https://www.boxofficemojo.com` |
//! | timeout  | `--timeout-secs` |                      | `30`                            |

use std::sync::Arc;
use std::time::Duration;

use crate::{BoxOfficeClient, Dispatcher, MojoProvider, Provider, ProviderError, mojo};

/// Default bind host for `boxoffd`.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default port for `boxoffd`.
pub const DEFAULT_PORT: u16 = 3000;
/// Default per-request timeout against the upstream, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable naming the port when `--port` is absent.
pub const PORT_ENV: &str = "PORT";
/// Environment variable naming the upstream when `--upstream` is absent.
pub const UPSTREAM_ENV: &str = "BOXOFFICE_UPSTREAM";

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn resolve_upstream(upstream: Option<String>, env_upstream: Option<String>) -> String {
    upstream
        .or(env_upstream)
        .unwrap_or_else(|| mojo::DEFAULT_BASE_URL.to_string())
}

/// Where data comes from and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Base URL of Box Office Mojo (or a mirror).
    pub upstream: String,
    /// Base URL of a running `boxoffd`; when set, queries go there instead.
    pub server: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Builds the provider this configuration describes.
    pub fn build_provider(&self) -> Result<Arc<dyn Provider>, ProviderError> {
        let provider: Arc<dyn Provider> = match &self.server {
            Some(server) => Arc::new(BoxOfficeClient::new(server.clone(), self.timeout)?),
            None => Arc::new(MojoProvider::new(self.upstream.clone(), self.timeout)?),
        };
        Ok(provider)
    }

    /// Builds a dispatcher over [`ProviderConfig::build_provider`].
    pub fn build_dispatcher(&self) -> Result<Dispatcher, ProviderError> {
        Ok(Dispatcher::new(self.build_provider()?))
    }
}

/// Settings for `boxoffd`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Serve the minimal handler instead of the framework router.
    pub raw: bool,
    /// Log at debug level.
    pub verbose: bool,
    /// Data source settings.
    pub provider: ProviderConfig,
}

impl ServerConfig {
    /// Resolves options against the process environment.
    pub fn resolve(
        host: Option<String>,
        port: Option<u16>,
        upstream: Option<String>,
        timeout_secs: Option<u64>,
        raw: bool,
        verbose: bool,
    ) -> Self {
        let env_port = env_var(PORT_ENV).and_then(|p| p.trim().parse().ok());
        Self::resolve_with(
            host,
            port.or(env_port),
            resolve_upstream(upstream, env_var(UPSTREAM_ENV)),
            timeout_secs,
            raw,
            verbose,
        )
    }

    fn resolve_with(
        host: Option<String>,
        port: Option<u16>,
        upstream: String,
        timeout_secs: Option<u64>,
        raw: bool,
        verbose: bool,
    ) -> Self {
        Self {
            host: host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: port.unwrap_or(DEFAULT_PORT),
            raw,
            verbose,
            provider: ProviderConfig {
                upstream,
                server: None,
                timeout: Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            },
        }
    }

    /// The `host:port` string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings for the `boxoff` CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Log at debug level.
    pub verbose: bool,
    /// Data source settings.
    pub provider: ProviderConfig,
}

impl ClientConfig {
    /// Resolves options against the process environment.
    pub fn resolve(
        server: Option<String>,
        upstream: Option<String>,
        timeout_secs: Option<u64>,
        verbose: bool,
    ) -> Self {
        Self {
            verbose,
            provider: ProviderConfig {
                upstream: resolve_upstream(upstream, env_var(UPSTREAM_ENV)),
                server: server.filter(|s| !s.is_empty()),
                timeout: Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_defaults() {
        let config = ServerConfig::resolve_with(
            None,
            None,
            mojo::DEFAULT_BASE_URL.to_string(),
            None,
            false,
            false,
        );
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.provider.upstream, "https://www.boxofficemojo.com");
        assert_eq!(config.provider.timeout, Duration::from_secs(30));
        assert_eq!(config.provider.server, None);
        assert!(!config.raw);
    }

    #[test]
    fn server_explicit_options() {
        let config = ServerConfig::resolve_with(
            Some("0.0.0.0".to_string()),
            Some(8080),
            "http://mirror.test".to_string(),
            Some(5),
            true,
            true,
        );
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.provider.upstream, "http://mirror.test");
        assert_eq!(config.provider.timeout, Duration::from_secs(5));
        assert!(config.raw);
        assert!(config.verbose);
    }

    #[test]
    fn upstream_precedence() {
        assert_eq!(
            resolve_upstream(Some("http://a".to_string()), Some("http://b".to_string())),
            "http://a"
        );
        assert_eq!(
            resolve_upstream(None, Some("http://b".to_string())),
            "http://b"
        );
        assert_eq!(resolve_upstream(None, None), mojo::DEFAULT_BASE_URL);
    }

    #[test]
    fn client_ignores_empty_server() {
        let config = ClientConfig::resolve(Some(String::new()), None, None, false);
        assert_eq!(config.provider.server, None);
    }

    #[test]
    fn providers_build() {
        let mut provider = ProviderConfig {
            upstream: mojo::DEFAULT_BASE_URL.to_string(),
            server: None,
            timeout: Duration::from_secs(1),
        };
        assert!(provider.build_dispatcher().is_ok());
        provider.server = Some("http://localhost:3000".to_string());
        assert!(provider.build_dispatcher().is_ok());
    }
}
