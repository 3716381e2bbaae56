//! One analysis run over a set of tournament pages
//!
//! Pages are processed strictly one after another. A page that fails to load
//! is logged and skipped; it adds nothing to the counts or to the number of
//! decklists. Only one run may be in flight per analyzer.

use crate::aggregate::AggregationStore;
use crate::decklist::{self, PageExtract};
use crate::discovery::discover_tournament_links;
use crate::error::{AnalyzerError, Result};
use crate::fetch::PageSource;
use crate::model::AnalysisReport;
use crate::stats;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// Reported after each page of a run
#[derive(Debug, Clone)]
pub struct Progress<'a> {
    pub processed: usize,
    pub total: usize,
    pub url: &'a str,
    pub failed: bool,
}

/// Held for the duration of a run; releases the analyzer when dropped
pub struct RunGuard<'a> {
    running: &'a AtomicBool,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

pub struct Analyzer<S: PageSource> {
    source: S,
    delay: Duration,
    running: AtomicBool,
}

impl<S: PageSource> Analyzer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            delay: Duration::ZERO,
            running: AtomicBool::new(false),
        }
    }

    /// Pause between page fetches
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Claim the analyzer for a run, failing if one is already in flight
    pub fn begin_run(&self) -> Result<RunGuard<'_>> {
        if self.running.swap(true, Ordering::AcqRel) {
            return Err(AnalyzerError::RunInProgress);
        }
        Ok(RunGuard {
            running: &self.running,
        })
    }

    /// Fetch and extract one page. Failures are logged and yield `None`.
    pub fn parse_tournament_page(&self, url: &str) -> Option<PageExtract> {
        log::info!("Parsing page: {}", url);
        match self.source.fetch(url) {
            Ok(html) => Some(decklist::extract(&html)),
            Err(e) => {
                log::error!("Error parsing {}: {}", url, e);
                None
            }
        }
    }

    /// Analyze the given tournament pages into a fresh report
    pub fn analyze<F>(&self, urls: &[String], on_progress: F) -> Result<AnalysisReport>
    where
        F: FnMut(&Progress),
    {
        let _guard = self.begin_run()?;
        self.run(urls, on_progress)
    }

    /// Discover tournament links on a listing page, append `extra_urls`, then
    /// analyze them all. The listing fetch happens inside the run.
    pub fn analyze_listing<F>(
        &self,
        listing_url: &str,
        base_url: &str,
        extra_urls: &[String],
        on_progress: F,
    ) -> Result<AnalysisReport>
    where
        F: FnMut(&Progress),
    {
        let _guard = self.begin_run()?;

        log::info!("Finding tournaments on {}", listing_url);
        let html = self.source.fetch(listing_url)?;
        let mut urls = discover_tournament_links(&html, base_url)?;
        log::debug!("Found {} tournament link(s) on {}", urls.len(), listing_url);
        urls.extend_from_slice(extra_urls);

        self.run(&urls, on_progress)
    }

    fn run<F>(&self, urls: &[String], mut on_progress: F) -> Result<AnalysisReport>
    where
        F: FnMut(&Progress),
    {
        if urls.is_empty() {
            return Err(AnalyzerError::NoTournaments);
        }

        log::info!("Analyzing {} tournament(s)", urls.len());

        let mut store = AggregationStore::new();
        let mut failed = 0;

        for (i, url) in urls.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                thread::sleep(self.delay);
            }

            let page = self.parse_tournament_page(url);
            match &page {
                Some(page) => store.add_page(page),
                None => failed += 1,
            }

            on_progress(&Progress {
                processed: i + 1,
                total: urls.len(),
                url: url.as_str(),
                failed: page.is_none(),
            });
        }

        let mut report = stats::summarize(&store);
        report.pages_analyzed = urls.len() - failed;
        report.pages_failed = failed;

        log::info!(
            "Analysis complete: {} tournament(s) analyzed, {} failed",
            report.pages_analyzed,
            report.pages_failed
        );
        Ok(report)
    }
}
