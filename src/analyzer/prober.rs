//! Liveness prober for external links
//!
//! Every external link gets one HEAD request. Probes run as tasks on a
//! `JoinSet`, each holding a semaphore permit, so at most
//! `max-concurrent-probes` requests are in flight. The aggregator waits for
//! every task before producing counts.
//!
//! # Outcomes
//!
//! | Condition | Liveness |
//! |-----------|----------|
//! | 2xx (after redirects) | Accessible |
//! | Other status | Broken |
//! | Timeout / transport error | Broken |
//! | No http(s) target | Unresolved (counted as broken) |

use crate::analyzer::types::{LinkRecord, Liveness, ProbeSummary};
use crate::config::ProbeConfig;
use crate::ProbeError;
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Checks external links concurrently with a bounded pool
#[derive(Debug, Clone)]
pub struct LivenessProber {
    client: Client,
    max_concurrent: usize,
    timeout: Duration,
}

impl LivenessProber {
    /// Creates a prober sharing the given client
    pub fn new(client: Client, config: &ProbeConfig) -> Self {
        Self {
            client,
            max_concurrent: config.max_concurrent_probes.max(1),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    /// Probes every external record and stores its liveness
    ///
    /// Internal records are left untouched.
    ///
    /// # Returns
    ///
    /// * `Some(ProbeSummary)` - Counts once every probe has finished
    /// * `None` - The token was cancelled; in-flight probes were aborted
    pub async fn probe_links(
        &self,
        links: &mut [LinkRecord],
        cancel: &CancellationToken,
    ) -> Option<ProbeSummary> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks = JoinSet::new();
        let mut pending = HashSet::new();
        let mut summary = ProbeSummary::default();

        for (index, link) in links.iter_mut().enumerate() {
            if !link.class.is_external() {
                continue;
            }

            let target = match probe_target(link) {
                Ok(target) => target,
                Err(e) => {
                    tracing::debug!("Not probing {}: {}", link.href, e);
                    link.liveness = Some(Liveness::Unresolved);
                    summary.record(Liveness::Unresolved);
                    continue;
                }
            };

            let client = self.client.clone();
            let semaphore = Arc::clone(&semaphore);
            let timeout = self.timeout;
            pending.insert(index);
            tasks.spawn(async move {
                // The semaphore is never closed, so acquisition only fails if it is dropped
                let _permit = semaphore.acquire_owned().await.ok();
                let outcome = probe_one(&client, &target, timeout).await;
                (index, target, outcome)
            });
        }

        tracing::debug!(
            "Dispatched {} probes (max {} concurrent)",
            pending.len(),
            self.max_concurrent
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!("Probe collection cancelled with {} outstanding", pending.len());
                    tasks.abort_all();
                    return None;
                }
                joined = tasks.join_next() => {
                    match joined {
                        None => break,
                        Some(Ok((index, target, outcome))) => {
                            pending.remove(&index);
                            let liveness = match outcome {
                                Ok(()) => Liveness::Accessible,
                                Err(e) => {
                                    tracing::debug!("Link {} is broken: {}", target, e);
                                    Liveness::Broken
                                }
                            };
                            links[index].liveness = Some(liveness);
                            summary.record(liveness);
                        }
                        Some(Err(e)) => {
                            tracing::warn!("Probe task failed: {}", e);
                        }
                    }
                }
            }
        }

        // Tasks that panicked never reported back
        for index in pending {
            links[index].liveness = Some(Liveness::Broken);
            summary.record(Liveness::Broken);
        }

        Some(summary)
    }
}

/// Picks the URL to probe for a record
fn probe_target(link: &LinkRecord) -> Result<Url, ProbeError> {
    let target = link
        .target
        .as_ref()
        .ok_or_else(|| ProbeError::Unresolvable(link.href.clone()))?;

    match target.scheme() {
        "http" | "https" => Ok(target.clone()),
        other => Err(ProbeError::UnsupportedScheme(other.to_string())),
    }
}

/// Sends one HEAD request bounded by `timeout`
async fn probe_one(client: &Client, target: &Url, timeout: Duration) -> Result<(), ProbeError> {
    let request = client.head(target.clone()).timeout(timeout).send();

    match tokio::time::timeout(timeout, request).await {
        Err(_) => Err(ProbeError::Timeout),
        Ok(Err(e)) if e.is_timeout() => Err(ProbeError::Timeout),
        Ok(Err(e)) => Err(ProbeError::Network(e.to_string())),
        Ok(Ok(response)) => {
            let status = response.status();
            if status.is_success() {
                Ok(())
            } else {
                Err(ProbeError::Status(status.as_u16()))
            }
        }
    }
}
