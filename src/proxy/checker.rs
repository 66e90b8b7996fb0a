//! Proxy checker: the per-candidate probe and the concurrent dispatcher

use crate::proxy::cancel::CancelFlag;
use crate::proxy::models::{Candidate, ProbeOutcome, ProtocolAttempt, VerifiedResult, TRIAL_ORDER};
use crate::proxy::writer::ResultWriter;
use crate::Result;
use anyhow::anyhow;
use futures::stream::{self, StreamExt};
use reqwest::{Client, Proxy as ReqwestProxy};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Default timeout for a single attempt in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default number of candidates probed at once
const DEFAULT_CONCURRENCY: usize = 25;

/// Default "what is my IP" endpoint
const DEFAULT_TEST_URL: &str = "https://api.ipify.org?format=json";

/// Configuration for proxy checker
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Timeout for each protocol attempt
    pub timeout: Duration,
    /// Number of concurrent probes
    pub concurrency: usize,
    /// URL fetched through each candidate
    pub test_url: String,
    /// Directory the category files are written to
    pub output_dir: PathBuf,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            concurrency: DEFAULT_CONCURRENCY,
            test_url: DEFAULT_TEST_URL.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl CheckerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_test_url(mut self, url: String) -> Self {
        self.test_url = url;
        self
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }
}

/// Status and body of a test request that got an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub body: String,
}

impl ProbeResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A 2xx answer whose body is a JSON object with an `ip` key
    pub fn confirms_ip(&self) -> bool {
        (200..300).contains(&self.status)
            && serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(&self.body)
                .is_ok_and(|object| object.contains_key("ip"))
    }
}

/// Sends the test request through one protocol attempt
pub trait ProbeTransport: Send + Sync {
    fn fetch(&self, attempt: &ProtocolAttempt)
        -> impl Future<Output = Result<ProbeResponse>> + Send;
}

/// Transport backed by reqwest, one client per attempt
#[derive(Debug, Clone)]
pub struct HttpTransport {
    test_url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(test_url: String, timeout: Duration) -> Self {
        Self { test_url, timeout }
    }

    /// Create a reqwest client routed through the attempt's proxy
    fn create_client(&self, attempt: &ProtocolAttempt) -> Result<Client> {
        let client = Client::builder()
            .proxy(ReqwestProxy::all(&attempt.url)?)
            .timeout(self.timeout)
            .build()?;

        Ok(client)
    }
}

impl ProbeTransport for HttpTransport {
    async fn fetch(&self, attempt: &ProtocolAttempt) -> Result<ProbeResponse> {
        let client = self.create_client(attempt)?;

        let request = async {
            let response = client.get(&self.test_url).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>(ProbeResponse { status, body })
        };

        match tokio::time::timeout(self.timeout, request).await {
            Ok(response) => Ok(response?),
            Err(_) => Err(anyhow!("timed out after {:?}", self.timeout)),
        }
    }
}

/// State every probe needs, handed to it by reference
pub struct ProbeContext {
    pub cancel: CancelFlag,
    pub writer: ResultWriter,
}

impl ProbeContext {
    pub fn new(cancel: CancelFlag, writer: ResultWriter) -> Self {
        Self { cancel, writer }
    }
}

/// Proxy checker for validating candidates
pub struct ProxyChecker<T = HttpTransport> {
    config: CheckerConfig,
    transport: T,
}

impl ProxyChecker<HttpTransport> {
    /// Create a checker that talks to the network
    pub fn new(config: CheckerConfig) -> Self {
        let transport = HttpTransport::new(config.test_url.clone(), config.timeout);
        Self { config, transport }
    }
}

impl<T: ProbeTransport> ProxyChecker<T> {
    /// Create a checker with a custom transport
    pub fn with_transport(config: CheckerConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Try one candidate as each protocol in trial order, stopping at the
    /// first that works.
    ///
    /// The cancel flag is checked before every attempt, so an interrupted run
    /// waits for at most one in-flight attempt per probe. Attempt failures
    /// are dropped; they only show up at debug level.
    pub async fn probe(&self, candidate: &Candidate, ctx: &ProbeContext) -> ProbeOutcome {
        if ctx.cancel.is_cancelled() {
            return ProbeOutcome::Cancelled;
        }

        for proxy_type in TRIAL_ORDER {
            if ctx.cancel.is_cancelled() {
                return ProbeOutcome::Cancelled;
            }

            let attempt = candidate.attempt(proxy_type);
            match self.transport.fetch(&attempt).await {
                Ok(response) if response.confirms_ip() => {
                    let result = VerifiedResult::new(candidate.clone(), proxy_type);
                    if let Err(e) = ctx.writer.record(&result) {
                        ctx.writer.warn(&format!("could not save {}: {:#}", candidate, e));
                    }
                    return ProbeOutcome::Success(proxy_type);
                }
                Ok(response) => {
                    debug!(
                        "{} not working as {}: status {}",
                        candidate, proxy_type, response.status
                    );
                }
                Err(e) => {
                    debug!("{} not working as {}: {:#}", candidate, proxy_type, e);
                }
            }
        }

        ProbeOutcome::Failure
    }

    /// Probe every candidate with at most `concurrency` probes in flight.
    ///
    /// Progress advances once per finished candidate. Candidates that had
    /// not started when the flag was set finish immediately as cancelled.
    pub async fn check_all(&self, candidates: Vec<Candidate>, ctx: &ProbeContext) {
        let concurrency = self.config.concurrency.max(1);

        stream::iter(candidates)
            .map(|candidate| async move { self.probe(&candidate, ctx).await })
            .buffer_unordered(concurrency)
            .for_each(|_| {
                ctx.writer.tick();
                futures::future::ready(())
            })
            .await;
    }
}
