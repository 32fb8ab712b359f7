//! Batch analysis over passage lists: sequential or rayon-parallel, with a
//! content-addressed result cache.

use crate::analysis::MultiDimensionalAnalyzer;
use crate::analyzers::AlgorithmRegistry;
use crate::core::{
    BatchAnalysisResult, BatchStatistics, MultiDimensionalResult, Passage, Testament,
};
use chrono::Utc;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::time::Instant;

/// Confidence bucket counts across a batch.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ConfidenceDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Themes and confidence aggregated across a whole batch.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchPatterns {
    pub dominant_themes: Vec<(String, usize)>,
    pub theme_frequencies: BTreeMap<String, usize>,
    pub confidence_distribution: ConfidenceDistribution,
    pub average_batch_confidence: f64,
    pub total_unique_themes: usize,
}

/// Applies the multi-dimensional analyzer over passage lists with an
/// in-memory cache keyed by content digest.
pub struct BatchAnalyzer<'a> {
    registry: &'a AlgorithmRegistry,
    cache: im::HashMap<String, BatchAnalysisResult>,
}

impl<'a> BatchAnalyzer<'a> {
    pub fn new(registry: &'a AlgorithmRegistry) -> Self {
        Self {
            registry,
            cache: im::HashMap::new(),
        }
    }

    /// Analyze a passage list. Results come back in input order regardless
    /// of parallelism. An empty input yields a zero-valued result.
    pub fn analyze_batch(
        &mut self,
        passages: &[Passage],
        algorithms: Option<&[String]>,
        parallel: bool,
    ) -> BatchAnalysisResult {
        if passages.is_empty() {
            return BatchAnalysisResult::empty();
        }

        let cache_key = cache_key(passages, algorithms);
        if let Some(cached) = self.cache.get(&cache_key) {
            log::debug!("batch cache hit for {} passages", passages.len());
            let mut result = cached.clone();
            result.timestamp = Utc::now();
            return result;
        }

        let start = Instant::now();
        let use_parallel = parallel && passages.len() > 1;

        let results = if use_parallel {
            self.analyze_parallel(passages, algorithms)
        } else {
            self.analyze_sequential(passages, algorithms)
        };

        let elapsed = start.elapsed().as_secs_f64();

        let total_insights: usize = results.iter().map(|r| r.total_insights()).sum();
        let total_findings: usize = results.iter().map(|r| r.total_findings()).sum();
        let average_confidence = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|r| r.average_confidence()).sum::<f64>() / results.len() as f64
        };

        let algorithms_used = algorithms
            .map(|a| a.to_vec())
            .unwrap_or_else(|| self.registry.algorithm_names());

        let statistics = BatchStatistics {
            total_passages: passages.len(),
            total_insights,
            total_findings,
            average_insights_per_passage: total_insights as f64 / passages.len() as f64,
            average_findings_per_passage: total_findings as f64 / passages.len() as f64,
            average_confidence,
            processing_time_seconds: elapsed,
            processing_rate: if elapsed > 0.0 {
                passages.len() as f64 / elapsed
            } else {
                0.0
            },
            parallel: use_parallel,
            algorithms_used,
        };

        let result = BatchAnalysisResult {
            passages_analyzed: passages.len(),
            total_insights,
            average_confidence,
            processing_time: elapsed,
            results,
            statistics,
            timestamp: Utc::now(),
        };

        self.cache.insert(cache_key, result.clone());
        result
    }

    fn analyze_sequential(
        &self,
        passages: &[Passage],
        algorithms: Option<&[String]>,
    ) -> Vec<MultiDimensionalResult> {
        let analyzer = MultiDimensionalAnalyzer::new(self.registry);
        passages
            .iter()
            .enumerate()
            .map(|(i, passage)| {
                log::info!(
                    "Analyzing passage {}/{}: {}",
                    i + 1,
                    passages.len(),
                    passage.reference
                );
                analyzer.analyze_with(passage, algorithms)
            })
            .collect()
    }

    fn analyze_parallel(
        &self,
        passages: &[Passage],
        algorithms: Option<&[String]>,
    ) -> Vec<MultiDimensionalResult> {
        let bar = ProgressBar::new(passages.len() as u64);
        if let Ok(style) =
            ProgressStyle::with_template("{bar:40} {pos}/{len} passages ({elapsed})")
        {
            bar.set_style(style);
        }

        // par_iter + collect keeps input order.
        passages
            .par_iter()
            .progress_with(bar)
            .map(|passage| {
                let analyzer = MultiDimensionalAnalyzer::new(self.registry);
                analyzer.analyze_with(passage, algorithms)
            })
            .collect()
    }

    /// Analyze a corpus grouped by book.
    pub fn analyze_by_book(
        &mut self,
        passages: &[Passage],
        parallel: bool,
    ) -> BTreeMap<String, BatchAnalysisResult> {
        let mut groups: BTreeMap<String, Vec<Passage>> = BTreeMap::new();
        for passage in passages {
            groups
                .entry(passage.book.clone())
                .or_default()
                .push(passage.clone());
        }

        groups
            .into_iter()
            .map(|(book, group)| {
                log::info!("Analyzing book: {} ({} passages)", book, group.len());
                let result = self.analyze_batch(&group, None, parallel);
                (book, result)
            })
            .collect()
    }

    /// Analyze a corpus grouped by testament.
    pub fn analyze_by_testament(
        &mut self,
        passages: &[Passage],
        parallel: bool,
    ) -> BTreeMap<Testament, BatchAnalysisResult> {
        let mut groups: BTreeMap<String, (Testament, Vec<Passage>)> = BTreeMap::new();
        for passage in passages {
            groups
                .entry(passage.testament.to_string())
                .or_insert_with(|| (passage.testament, Vec::new()))
                .1
                .push(passage.clone());
        }

        groups
            .into_values()
            .map(|(testament, group)| {
                log::info!(
                    "Analyzing {} Testament ({} passages)",
                    testament,
                    group.len()
                );
                let result = self.analyze_batch(&group, None, parallel);
                (testament, result)
            })
            .collect()
    }

    /// Themes and confidence patterns across one finished batch.
    pub fn find_patterns(&self, batch: &BatchAnalysisResult) -> BatchPatterns {
        let mut theme_frequencies: BTreeMap<String, usize> = BTreeMap::new();
        let mut confidences = Vec::new();

        for result in &batch.results {
            if let Some(thematic) = result.dimensions.get(&crate::core::Dimension::Thematic) {
                if let Some(themes) = thematic
                    .findings
                    .get("detected_themes")
                    .and_then(|v| v.as_object())
                {
                    for (theme, matches) in themes {
                        let count = matches.as_array().map(|a| a.len()).unwrap_or(0);
                        *theme_frequencies.entry(theme.clone()).or_insert(0) += count;
                    }
                }
            }
            confidences.push(result.average_confidence());
        }

        let mut ranked: Vec<(String, usize)> = theme_frequencies
            .iter()
            .map(|(t, c)| (t.clone(), *c))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(5);

        let mut distribution = ConfidenceDistribution::default();
        for c in &confidences {
            if *c >= 0.8 {
                distribution.high += 1;
            } else if *c >= 0.5 {
                distribution.medium += 1;
            } else {
                distribution.low += 1;
            }
        }

        let average = if confidences.is_empty() {
            0.0
        } else {
            confidences.iter().sum::<f64>() / confidences.len() as f64
        };

        BatchPatterns {
            dominant_themes: ranked,
            total_unique_themes: theme_frequencies.len(),
            theme_frequencies,
            confidence_distribution: distribution,
            average_batch_confidence: average,
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

/// Deterministic content digest over the sorted reference list and the
/// requested algorithm names.
fn cache_key(passages: &[Passage], algorithms: Option<&[String]>) -> String {
    let mut references: Vec<&str> = passages.iter().map(|p| p.reference.as_str()).collect();
    references.sort_unstable();

    let mut hasher = Sha256::new();
    for reference in &references {
        hasher.update(reference.as_bytes());
        hasher.update([0u8]);
    }
    match algorithms {
        Some(names) => {
            let mut sorted: Vec<&str> = names.iter().map(String::as_str).collect();
            sorted.sort_unstable();
            for name in sorted {
                hasher.update(name.as_bytes());
                hasher.update([1u8]);
            }
        }
        None => hasher.update(b"all"),
    }

    format!("batch_{}_{:x}", passages.len(), hasher.finalize())
}
