//! Credentials and environment inputs for a publish invocation
//!
//! The process environment is read here, once, at the boundary. Everything
//! downstream (version resolution, target selection) receives the captured
//! [`EnvironmentInputs`] value instead of looking at the environment itself.

use std::collections::HashMap;
use std::env;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::{Config, EndpointConfig};
use crate::types::ReleaseChannel;

/// Username/secret pair used for Basic authentication
///
/// Missing values are represented as empty strings; rejecting them is the
/// transport's job.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Username
    pub username: String,
    /// Secret (password or token)
    #[serde(skip_serializing)]
    pub secret: String,
}

impl Credentials {
    /// Create a credential pair
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }

    /// Build a pair from optional values, substituting empty strings
    pub fn from_parts(username: Option<String>, secret: Option<String>) -> Self {
        Self {
            username: username.unwrap_or_default(),
            secret: secret.unwrap_or_default(),
        }
    }

    /// Whether both username and secret are set
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.secret.is_empty()
    }

    /// Whether neither username nor secret is set
    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.secret.is_empty()
    }

    /// Value for an `Authorization` header using the Basic scheme
    pub fn basic_auth_header(&self) -> String {
        let token = BASE64.encode(format!("{}:{}", self.username, self.secret));
        format!("Basic {}", token)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &if self.secret.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// Values captured from the environment for one invocation
#[derive(Debug, Clone, Default)]
pub struct EnvironmentInputs {
    /// Raw release signal, if the variable was set
    pub release_signal: Option<String>,
    /// Credentials for the release repository
    pub release_credentials: Credentials,
    /// Credentials for the snapshot repository
    pub snapshot_credentials: Credentials,
}

impl EnvironmentInputs {
    /// Capture inputs from the process environment
    pub fn capture(config: &Config) -> Self {
        CredentialProvider::new().capture(config)
    }

    /// Override the release signal
    pub fn with_release_signal(mut self, signal: Option<String>) -> Self {
        self.release_signal = signal;
        self
    }

    /// Use the same credentials for both repositories
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.release_credentials = credentials.clone();
        self.snapshot_credentials = credentials;
        self
    }

    /// Credentials for a given channel
    pub fn credentials_for(&self, channel: ReleaseChannel) -> &Credentials {
        match channel {
            ReleaseChannel::Release => &self.release_credentials,
            ReleaseChannel::Snapshot => &self.snapshot_credentials,
        }
    }
}

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reads credential and signal variables, caching each lookup
pub struct CredentialProvider {
    lookup: Lookup,
    cache: HashMap<String, Option<String>>,
}

impl CredentialProvider {
    /// Create a provider backed by the process environment
    pub fn new() -> Self {
        Self::with_lookup(|name| env::var(name).ok())
    }

    /// Create a provider backed by a custom lookup function
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            lookup: Box::new(lookup),
            cache: HashMap::new(),
        }
    }

    /// Create a provider backed by a fixed map of variables
    pub fn from_map(vars: HashMap<String, String>) -> Self {
        Self::with_lookup(move |name| vars.get(name).cloned())
    }

    /// Look up a single variable
    pub fn var(&mut self, name: &str) -> Option<String> {
        if let Some(value) = self.cache.get(name) {
            return value.clone();
        }
        let value = (self.lookup)(name);
        self.cache.insert(name.to_string(), value.clone());
        value
    }

    /// Credentials for one repository endpoint
    #[instrument(skip(self, endpoint), fields(username_env = %endpoint.username_env))]
    pub fn credentials(&mut self, endpoint: &EndpointConfig) -> Credentials {
        let username = self.var(&endpoint.username_env);
        let secret = self.var(&endpoint.secret_env);
        debug!(
            has_username = username.is_some(),
            has_secret = secret.is_some(),
            "credentials looked up"
        );
        Credentials::from_parts(username, secret)
    }

    /// Capture every input a publish invocation needs
    pub fn capture(&mut self, config: &Config) -> EnvironmentInputs {
        let release_signal = self.var(&config.release.signal_env);
        debug!(
            signal_env = %config.release.signal_env,
            signal_set = release_signal.is_some(),
            "captured release signal"
        );

        EnvironmentInputs {
            release_signal,
            release_credentials: self.credentials(&config.repository.release),
            snapshot_credentials: self.credentials(&config.repository.snapshot),
        }
    }

    /// Clear cached lookups
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl Default for CredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}
