//! Guarded retrieval client: probe -> validate -> fetch orchestration.
//!
//! [`GuardedClient`] owns the per-instance policy (acceptance spec, death
//! policy, size limit, headers, auth, timeouts) and drives the transport:
//! every fetch is preceded by a metadata-only probe, and both the probe and
//! the fetch response must pass admission before a body is released.
//!
//! One probe/fetch sequence runs at a time per instance; concurrent requests
//! need separate instances.


use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::admission::{self, AdmissionError, DeathPolicy};
use crate::config::ClientConfig;
use crate::cookies;
use crate::mime::{resolve, AcceptanceSpec, MimeRegistry};
use crate::transport::{
    Credentials, CurlTransport, Method, ResponseInfo, Transport, TransportExchange,
    TransportRequest,
};

/// Headers applied at construction and after every reset.
const BASE_HEADERS: &[(&str, &str)] = &[
    ("Connection", "keep-alive"),
    ("Accept-Language", "en-us,en;q=0.5"),
];

/// libcurl's code for a URL it cannot parse.
const CURLE_URL_MALFORMAT: i32 = 3;

/// Where the client is in the probe/fetch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No request issued since construction or the last reset.
    #[default]
    Idle,
    /// The last probe or fetch response passed admission.
    Accepted,
    /// The last probe or fetch was declined or failed.
    Rejected,
    /// The last fetch passed admission and its body was released.
    Fetched,
}

/// Guarded HTTP retrieval client.
///
/// Generic over the transport so tests and custom stacks can substitute the
/// collaborator; defaults to [`CurlTransport`].
pub struct GuardedClient<T: Transport = CurlTransport> {
    transport: T,
    /// Construction-time snapshot restored by `reset()`.
    defaults: ClientConfig,
    registry: MimeRegistry,
    acceptance: AcceptanceSpec,
    death: DeathPolicy,
    headers: BTreeMap<String, String>,
    auth: Option<Credentials>,
    size_limit_kb: u64,
    connect_timeout: Duration,
    timeout: Duration,
    user_agent: String,
    cookie_jar: PathBuf,
    phase: Phase,
    last_info: Option<ResponseInfo>,
    last_error: Option<AdmissionError>,
}

impl GuardedClient<CurlTransport> {
    /// Client with built-in defaults over the curl transport.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Client with the given defaults over the curl transport.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_transport(CurlTransport::new(), config)
    }
}

impl<T: Transport> GuardedClient<T> {
    /// Client over a caller-supplied transport.
    ///
    /// Bootstraps the persistent cookie jar; an unusable jar location is a
    /// fatal construction error, no partial client exists afterwards.
    pub fn with_transport(transport: T, config: ClientConfig) -> Result<Self> {
        let cookie_jar = match &config.cookie_jar {
            Some(path) => path.clone(),
            None => cookies::default_jar_path()?,
        };
        cookies::ensure_jar(&cookie_jar).context("cookie jar location is unusable")?;

        let mut client = Self {
            transport,
            defaults: config,
            registry: MimeRegistry::default(),
            acceptance: AcceptanceSpec::default(),
            death: DeathPolicy::default(),
            headers: BTreeMap::new(),
            auth: None,
            size_limit_kb: 0,
            connect_timeout: Duration::ZERO,
            timeout: Duration::ZERO,
            user_agent: String::new(),
            cookie_jar,
            phase: Phase::Idle,
            last_info: None,
            last_error: None,
        };
        client.apply_defaults();
        Ok(client)
    }

    /// Metadata-only HEAD probe.
    ///
    /// Applies the full admission gate (death code, MIME, size) even though
    /// no body is transferred, so callers can pre-validate cheaply.
    pub fn probe(&mut self, url: &str) -> Result<ResponseInfo, AdmissionError> {
        let url = self.normalize(url)?;
        self.issue(Method::Head, &url).map(|exchange| exchange.info)
    }

    /// Guarded GET.
    ///
    /// Probes first; a rejected probe returns its error without issuing the
    /// body transfer, leaving the probe's recorded state in place. The fetch
    /// response is re-validated (it supersedes the probe's metadata) before
    /// the body is released.
    pub fn fetch(&mut self, url: &str) -> Result<Vec<u8>, AdmissionError> {
        let url = self.normalize(url)?;
        self.issue(Method::Head, &url)?;
        tracing::debug!("probe accepted, fetching {}", url);
        let exchange = self.issue(Method::Get, &url)?;
        self.phase = Phase::Fetched;
        Ok(exchange.body.unwrap_or_default())
    }

    /// Metadata recorded by the most recent probe or fetch.
    pub fn last_response(&self) -> Option<&ResponseInfo> {
        self.last_info.as_ref()
    }

    /// Error recorded by the most recent probe or fetch, if it was declined
    /// or failed. Overwritten (or cleared) by the next call.
    pub fn last_error(&self) -> Option<&AdmissionError> {
        self.last_error.as_ref()
    }

    /// Concrete MIME types the current acceptance spec resolves to.
    pub fn resolved_mimes(&self) -> BTreeSet<String> {
        resolve(&self.acceptance, &self.registry)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Replaces the acceptance set with the given tags and/or MIME types.
    pub fn set_acceptance<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.acceptance.replace(entries);
    }

    /// Appends tags and/or MIME types to the acceptance set.
    pub fn add_acceptance<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.acceptance.add(entries);
    }

    /// Empties the acceptance set: every request is declined until the set
    /// is repopulated.
    pub fn clear_acceptance(&mut self) {
        self.acceptance.clear();
    }

    /// Installs a custom MIME registry wholesale.
    pub fn set_registry(&mut self, registry: MimeRegistry) {
        self.registry = registry;
    }

    pub fn set_death_policy(&mut self, death: DeathPolicy) {
        self.death = death;
    }

    /// Sets one request header, overwriting a previous value for the name.
    pub fn set_header<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.headers.insert(name.into(), value.into());
    }

    /// Sets a group of request headers at once.
    pub fn set_headers<I, N, V>(&mut self, headers: I)
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.set_header(name, value);
        }
    }

    pub fn set_auth<U, P>(&mut self, username: U, password: P)
    where
        U: Into<String>,
        P: Into<String>,
    {
        self.auth = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
    }

    /// Maximum declared response size, in kilobytes.
    pub fn set_size_limit_kb(&mut self, kilobytes: u64) {
        self.size_limit_kb = kilobytes;
    }

    /// Overall transfer timeout, in seconds.
    pub fn set_timeout_secs(&mut self, seconds: u64) {
        self.timeout = Duration::from_secs(seconds);
    }

    pub fn set_user_agent<S: Into<String>>(&mut self, agent: S) {
        self.user_agent = agent.into();
    }

    /// Restores the construction-time configuration snapshot and returns to
    /// `Idle`. Recorded response/error state is cleared.
    pub fn reset(&mut self) {
        self.apply_defaults();
        self.phase = Phase::Idle;
        self.last_info = None;
        self.last_error = None;
    }

    fn apply_defaults(&mut self) {
        let defaults = self.defaults.clone();
        self.acceptance = AcceptanceSpec::new(defaults.accept);
        self.death = self.defaults.death_policy();
        self.headers = BASE_HEADERS
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect();
        self.auth = None;
        self.size_limit_kb = defaults.size_limit_kb;
        self.connect_timeout = Duration::from_secs(defaults.connect_timeout_secs);
        self.timeout = Duration::from_secs(defaults.timeout_secs);
        self.user_agent = defaults.user_agent;
    }

    /// Performs one transport call, records its metadata, and gates it.
    fn issue(&mut self, method: Method, url: &str) -> Result<TransportExchange, AdmissionError> {
        let resolved = self.resolved_mimes();
        let accept = match method {
            // A probe asks for anything; admission decides afterwards.
            Method::Head => "*/*".to_string(),
            Method::Get => join_mimes(&resolved),
        };
        let request = self.build_request(method, url, accept);

        let exchange = match self.transport.perform(&request) {
            Ok(exchange) => exchange,
            Err(e) => {
                let err = AdmissionError::from(e);
                tracing::debug!("transport failure for {}: {}", url, err);
                self.last_info = None;
                self.last_error = Some(err.clone());
                self.phase = Phase::Rejected;
                return Err(err);
            }
        };

        self.last_info = Some(exchange.info.clone());
        match admission::validate(&exchange.info, &self.death, &resolved, self.size_limit_kb) {
            Ok(()) => {
                self.last_error = None;
                self.phase = Phase::Accepted;
                Ok(exchange)
            }
            Err(err) => {
                tracing::debug!("declined {}: {}", url, err);
                self.last_error = Some(err.clone());
                self.phase = Phase::Rejected;
                Err(err)
            }
        }
    }

    fn build_request(&self, method: Method, url: &str, accept: String) -> TransportRequest {
        let mut headers = self.headers.clone();
        headers.insert("Accept".to_string(), accept);
        headers.insert("User-Agent".to_string(), self.user_agent.clone());
        TransportRequest {
            method,
            url: url.to_string(),
            headers,
            auth: self.auth.clone(),
            connect_timeout: self.connect_timeout,
            timeout: self.timeout,
            follow_redirects: self.defaults.follow_redirects,
            max_redirects: self.defaults.max_redirects,
            cookie_jar: Some(self.cookie_jar.clone()),
            accept_encoding: self.defaults.accept_encoding.clone(),
        }
    }

    fn normalize(&mut self, raw: &str) -> Result<String, AdmissionError> {
        match normalize_url(raw) {
            Ok(url) => Ok(url),
            Err(err) => {
                self.last_info = None;
                self.last_error = Some(err.clone());
                self.phase = Phase::Rejected;
                Err(err)
            }
        }
    }
}

/// Accepts scheme-less inputs ("example.com/pic.gif") by defaulting to
/// `http://`, and returns the canonical string form.
fn normalize_url(raw: &str) -> Result<String, AdmissionError> {
    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{}", raw)
    };
    match url::Url::parse(&candidate) {
        Ok(url) => Ok(url.into()),
        Err(e) => Err(AdmissionError::Transport {
            code: CURLE_URL_MALFORMAT,
            message: format!("invalid url {:?}: {}", raw, e),
        }),
    }
}

/// Comma-joined MIME list for the GET `Accept` header.
fn join_mimes(resolved: &BTreeSet<String>) -> String {
    resolved.iter().cloned().collect::<Vec<_>>().join(",")
}
