use anyhow::{Context, Result};
use clap::Parser;
use versemap::cli::{Cli, Commands, ConceptCommands};
use versemap::{
    config, AlgorithmRegistry, AnalysisReport, BatchAnalyzer, BibleLoader,
    DimensionInteractionAnalyzer, GenreDetector, MultiDimensionalAnalyzer, Passage, SowerMetrics,
    TheologicalOntology, ValidationEngine,
};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            corpus,
            format,
            output,
            algorithms,
            sequential,
            jobs,
            validate,
            rules,
            by_book,
            by_testament,
            config: config_path,
        } => {
            if let Some(path) = config_path {
                let loaded = config::VersemapConfig::load(&path)
                    .with_context(|| format!("loading configuration from {}", path.display()))?;
                config::init(loaded);
            }
            configure_thread_pool(jobs);

            let mut loader = BibleLoader::new();
            loader
                .load_file(&corpus)
                .with_context(|| format!("loading corpus {}", corpus.display()))?;

            let registry = AlgorithmRegistry::with_builtins();
            let mut batch = BatchAnalyzer::new(&registry);
            let parallel = !sequential && config::get().batch.parallel;

            if by_book {
                for (book, result) in batch.analyze_by_book(loader.passages(), parallel) {
                    println!(
                        "{book}: {} passages, {} insights, avg confidence {:.2}",
                        result.passages_analyzed, result.total_insights, result.average_confidence
                    );
                }
                return Ok(());
            }
            if by_testament {
                for (testament, result) in batch.analyze_by_testament(loader.passages(), parallel) {
                    println!(
                        "{testament} Testament: {} passages, {} insights, avg confidence {:.2}",
                        result.passages_analyzed, result.total_insights, result.average_confidence
                    );
                }
                return Ok(());
            }

            let result = batch.analyze_batch(loader.passages(), algorithms.as_deref(), parallel);
            log::info!(
                "Analyzed {} passages in {:.2}s ({:.1}/s)",
                result.passages_analyzed,
                result.processing_time,
                result.statistics.processing_rate
            );

            if validate {
                let mut engine = ValidationEngine::with_default_rules();
                if let Some(rules_path) = rules {
                    let loaded = engine
                        .load_rules_from_file(&rules_path)
                        .with_context(|| format!("loading rules {}", rules_path.display()))?;
                    log::info!("Loaded {loaded} validation rules from file");
                }
                for analysis in &result.results {
                    let report = engine.validate(analysis);
                    if !report.passed {
                        for issue in &report.issues {
                            eprintln!(
                                "[{}] {}: {} ({})",
                                issue.severity, analysis.passage.reference, issue.message,
                                issue.rule
                            );
                        }
                    }
                }
            }

            let sower = SowerMetrics::compute(&result.results);
            log::info!(
                "Interpretive yield {:.2}, average fold {:.1}, growth index {:.2} ({})",
                sower.interpretive_yield,
                sower.average_fold,
                sower.growth_index,
                sower.classification()
            );

            let report = AnalysisReport::new(result.results);
            let mut writer = versemap::create_writer(format.into(), output.as_deref())?;
            writer.write_report(&report)?;
        }

        Commands::Passage {
            reference,
            text,
            version,
            format,
            output,
            interactions,
            genre,
        } => {
            let passage = Passage::new(reference, text).with_version(version);
            let registry = AlgorithmRegistry::with_builtins();
            let analyzer = MultiDimensionalAnalyzer::new(&registry);
            let result = analyzer.analyze(&passage);

            if interactions {
                let report = DimensionInteractionAnalyzer::new().analyze(&result.dimensions);
                println!("Resonance score: {:.2}", report.resonance_score);
                println!(
                    "Reinforcements: {}, tensions: {}, emergent patterns: {}",
                    report.reinforcements.len(),
                    report.tensions.len(),
                    report.emergent_patterns.len()
                );
                println!(
                    "Dominant theological framework: {}",
                    report.theological.dominant_framework
                );
            }
            if genre {
                let classification = GenreDetector::new().classify(&passage);
                println!(
                    "Primary genre: {} ({:.2})",
                    classification.primary_genre,
                    classification.confidence_scores[&classification.primary_genre]
                );
                if !classification.secondary_genres.is_empty() {
                    println!(
                        "Secondary genres: {}",
                        classification.secondary_genres.join(", ")
                    );
                }
            }

            let report = AnalysisReport::new(vec![result]);
            let mut writer = versemap::create_writer(format.into(), output.as_deref())?;
            writer.write_report(&report)?;
        }

        Commands::Genre { corpus, reference } => {
            let mut loader = BibleLoader::new();
            loader
                .load_file(&corpus)
                .with_context(|| format!("loading corpus {}", corpus.display()))?;

            let detector = GenreDetector::new();
            let passages: Vec<&Passage> = match &reference {
                Some(r) => loader
                    .get_passage(r)
                    .map(|p| vec![p])
                    .with_context(|| format!("passage {r} not found in corpus"))?,
                None => loader.passages().iter().collect(),
            };

            for passage in passages {
                let classification = detector.classify(passage);
                println!(
                    "{}: {} ({:.2}){}",
                    passage.reference,
                    classification.primary_genre,
                    classification.confidence_scores[&classification.primary_genre],
                    if classification.secondary_genres.is_empty() {
                        String::new()
                    } else {
                        format!(" [{}]", classification.secondary_genres.join(", "))
                    }
                );
            }
        }

        Commands::Concepts { command } => {
            let ontology = TheologicalOntology::new();
            match command {
                ConceptCommands::Path { from, to } => {
                    let path = ontology.find_concept_path(&from, &to);
                    if path.is_empty() {
                        println!("No path from {from} to {to}");
                    } else {
                        println!("{}", path.join(" -> "));
                    }
                }
                ConceptCommands::Map { reference, text } => {
                    let passage = Passage::new(reference, text);
                    let mappings = ontology.map_passage_to_concepts(&passage);
                    if mappings.is_empty() {
                        println!("No concepts mapped");
                    }
                    for mapping in &mappings {
                        println!(
                            "{} (level {}): strength {:.2}, evidence: {}",
                            mapping.concept_name,
                            mapping.hierarchical_level,
                            mapping.strength,
                            mapping.evidence_terms.join(", ")
                        );
                    }
                    let depth = ontology.theological_depth(&mappings);
                    println!(
                        "Depth score {:.2}, {} hierarchy levels represented",
                        depth.depth_score, depth.levels_represented
                    );
                }
                ConceptCommands::List => {
                    for name in ontology.concept_names() {
                        if let Some(concept) = ontology.concept(name) {
                            println!(
                                "{} (level {}): {}",
                                name,
                                ontology.hierarchy_level(name),
                                concept.definition
                            );
                        }
                    }
                }
            }
        }

        Commands::Stats { corpus } => {
            let mut loader = BibleLoader::new();
            loader
                .load_file(&corpus)
                .with_context(|| format!("loading corpus {}", corpus.display()))?;
            let stats = loader.statistics();
            println!(
                "{} passages in {} books, {} words ({} unique, diversity {:.3})",
                stats.total_passages,
                stats.total_books,
                stats.total_words,
                stats.unique_words,
                stats.lexical_diversity
            );
            println!(
                "Old Testament: {} passages, New Testament: {} passages",
                stats.testament_breakdown.old_testament, stats.testament_breakdown.new_testament
            );
            for (book, book_stats) in &stats.books {
                println!(
                    "  {book}: {} passages, {} chapters, {} words",
                    book_stats.passages, book_stats.chapters, book_stats.words
                );
            }
        }
    }

    Ok(())
}

/// Size the global rayon pool; 0 keeps one worker per core.
fn configure_thread_pool(jobs: usize) {
    if jobs == 0 {
        return;
    }
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build_global()
    {
        log::debug!("thread pool already configured: {e}");
    }
}
