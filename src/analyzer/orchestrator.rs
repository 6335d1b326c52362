//! Analysis orchestrator - sequences one page analysis
//!
//! Stages run strictly in order:
//! 1. Fetch the target page
//! 2. Parse the body into a document
//! 3. Run the extractors and the link classifier
//! 4. Probe external links (when enabled)
//! 5. Assemble the result
//!
//! Any fetch or parse failure ends the analysis. Probe failures only ever
//! count as broken links.

use crate::analyzer::document::ParsedDocument;
use crate::analyzer::extract::{count_headings, extract_title, has_login_form};
use crate::analyzer::fetcher::{build_http_client, fetch_page, FetchedPage};
use crate::analyzer::links::{collect_links, count_links};
use crate::analyzer::prober::LivenessProber;
use crate::analyzer::types::{AnalysisResult, AnalyzeOptions, HeadingCounts, LinkRecord};
use crate::analyzer::version::{HtmlVersion, VersionSniffer};
use crate::config::Config;
use crate::state::AnalysisStage;
use crate::url::{TargetUrl, TargetValidator};
use crate::{AnalyzerError, ParseError, Result};
use reqwest::Client;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Everything read from the document before it is dropped
#[derive(Debug, Clone)]
pub struct PageInspection {
    pub html_version: HtmlVersion,
    pub title: String,
    pub headings: HeadingCounts,
    pub has_login_form: bool,
    pub links: Vec<LinkRecord>,
}

/// Parses a body and runs every extractor over it
///
/// The document only lives for the duration of this call.
pub fn inspect_page(
    body: &[u8],
    content_type: Option<&str>,
    origin: &TargetUrl,
    sniffer: &VersionSniffer,
) -> std::result::Result<PageInspection, ParseError> {
    let document = ParsedDocument::parse(body, content_type)?;
    Ok(inspect_document(&document, origin, sniffer))
}

fn inspect_document(
    document: &ParsedDocument,
    origin: &TargetUrl,
    sniffer: &VersionSniffer,
) -> PageInspection {
    PageInspection {
        html_version: sniffer.sniff(document.source()),
        title: extract_title(document),
        headings: count_headings(document),
        has_login_form: has_login_form(document),
        links: collect_links(document, origin),
    }
}

/// Tracks the stage of one analysis and rejects illegal moves
struct StageTracker<'a> {
    target: &'a TargetUrl,
    stage: AnalysisStage,
}

impl<'a> StageTracker<'a> {
    fn new(target: &'a TargetUrl) -> Self {
        Self {
            target,
            stage: AnalysisStage::Start,
        }
    }

    fn advance(&mut self, to: AnalysisStage) -> Result<()> {
        if !self.stage.can_transition_to(to) {
            return Err(AnalyzerError::InvalidTransition {
                from: self.stage,
                to,
            });
        }
        tracing::trace!("{}: {} -> {}", self.target, self.stage, to);
        self.stage = to;
        Ok(())
    }

    /// Moves to `Failed` and hands the error back
    fn fail(&mut self, error: AnalyzerError) -> AnalyzerError {
        tracing::trace!("{}: {} -> {}", self.target, self.stage, AnalysisStage::Failed);
        self.stage = AnalysisStage::Failed;
        error
    }
}

/// Runs page analyses
///
/// An `Analyzer` only holds read-only configuration and a pooled HTTP client,
/// so one instance can serve any number of concurrent analyses.
pub struct Analyzer {
    config: Config,
    client: Client,
    validator: TargetValidator,
    sniffer: VersionSniffer,
    prober: LivenessProber,
}

impl Analyzer {
    /// Creates an analyzer with a client built from the configuration
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(&config)?;
        Ok(Self::with_client(config, client))
    }

    /// Creates an analyzer around an existing client
    pub fn with_client(config: Config, client: Client) -> Self {
        let prober = LivenessProber::new(client.clone(), &config.probe);
        Self {
            config,
            client,
            validator: TargetValidator::new(),
            sniffer: VersionSniffer::new(),
            prober,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The validator used by [`Analyzer::analyze_url`]
    pub fn validator(&self) -> &TargetValidator {
        &self.validator
    }

    /// Options derived from the configuration
    pub fn default_options(&self) -> AnalyzeOptions {
        AnalyzeOptions {
            enable_liveness_probe: self.config.probe.enabled,
        }
    }

    /// Validates a raw address, then analyzes it
    pub async fn analyze_url(&self, raw: &str, options: AnalyzeOptions) -> Result<AnalysisResult> {
        let target = self.validator.validate(raw)?;
        self.analyze(&target, options).await
    }

    /// Analyzes a validated target
    pub async fn analyze(&self, target: &TargetUrl, options: AnalyzeOptions) -> Result<AnalysisResult> {
        self.analyze_with_cancel(target, options, &CancellationToken::new())
            .await
    }

    /// Analyzes a validated target, abandoning work when `cancel` fires
    ///
    /// # Returns
    ///
    /// * `Ok(AnalysisResult)` - The assembled summary
    /// * `Err(AnalyzerError::Fetch)` - The page could not be retrieved
    /// * `Err(AnalyzerError::Parse)` - The body is not a document
    /// * `Err(AnalyzerError::Cancelled)` - `cancel` fired first
    pub async fn analyze_with_cancel(
        &self,
        target: &TargetUrl,
        options: AnalyzeOptions,
        cancel: &CancellationToken,
    ) -> Result<AnalysisResult> {
        let started = Instant::now();
        let mut stages = StageTracker::new(target);
        tracing::info!("Starting analysis of {}", target);

        // Stage 1: fetch
        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            fetched = fetch_page(&self.client, target, self.config.fetch.max_body_bytes) => Some(fetched),
        };
        let page = match fetched {
            None => return Err(stages.fail(self.cancelled(target))),
            Some(Ok(page)) => page,
            Some(Err(source)) => {
                return Err(stages.fail(AnalyzerError::Fetch {
                    url: target.to_string(),
                    source,
                }))
            }
        };
        stages.advance(AnalysisStage::Fetched)?;

        // Stages 2 and 3: parse, extract, classify
        let inspection = match self.inspect(page, target, &mut stages) {
            Ok(inspection) => inspection,
            Err(e) => return Err(stages.fail(e)),
        };
        let mut links = inspection.links;
        let counts = count_links(&links);
        tracing::debug!(
            "{}: {} internal, {} external links",
            target,
            counts.internal,
            counts.external
        );

        // Stage 4: probe
        let probe_summary = if options.enable_liveness_probe {
            match self.prober.probe_links(&mut links, cancel).await {
                Some(summary) => Some(summary),
                None => return Err(stages.fail(self.cancelled(target))),
            }
        } else {
            None
        };
        stages.advance(AnalysisStage::Done)?;

        if let Some(summary) = &probe_summary {
            tracing::debug!(
                "{}: {} accessible, {} broken ({} unresolved) external links",
                target,
                summary.accessible,
                summary.broken,
                summary.unresolved
            );
        }

        tracing::info!(
            "Finished analysis of {} in {:.2}s",
            target,
            started.elapsed().as_secs_f64()
        );

        Ok(AnalysisResult {
            html_version: inspection.html_version,
            title: inspection.title,
            headings: inspection.headings,
            internal_links: counts.internal,
            external_links: counts.external,
            has_login_form: inspection.has_login_form,
            accessible_external_links: probe_summary.map(|s| s.accessible),
            broken_external_links: probe_summary.map(|s| s.broken),
        })
    }

    /// Parses the fetched page and runs the extractors
    ///
    /// Synchronous on purpose: the document tree is not `Send` and must never
    /// be held across an await point.
    fn inspect(
        &self,
        page: FetchedPage,
        target: &TargetUrl,
        stages: &mut StageTracker<'_>,
    ) -> Result<PageInspection> {
        if page.final_url != *target.as_url() {
            tracing::debug!("{} redirected to {}", target, page.final_url);
        }

        let document = ParsedDocument::parse(&page.body, page.content_type.as_deref()).map_err(
            |source| AnalyzerError::Parse {
                url: target.to_string(),
                source,
            },
        )?;
        stages.advance(AnalysisStage::Parsed)?;

        let inspection = inspect_document(&document, target, &self.sniffer);
        stages.advance(AnalysisStage::Classified)?;
        Ok(inspection)
    }

    fn cancelled(&self, target: &TargetUrl) -> AnalyzerError {
        tracing::info!("Analysis of {} cancelled", target);
        AnalyzerError::Cancelled {
            url: target.to_string(),
        }
    }
}
