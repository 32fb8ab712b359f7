use crate::core::MultiDimensionalResult;
use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::*;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Export envelope for a set of analysis results. Round-trips through JSON.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub version: String,
    pub generated: DateTime<Utc>,
    pub results: Vec<MultiDimensionalResult>,
}

impl AnalysisReport {
    pub fn new(results: Vec<MultiDimensionalResult>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated: Utc::now(),
            results,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, report: &AnalysisReport) -> Result<()> {
        writeln!(self.writer, "# Multi-Dimensional Analysis Report")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "**Version:** {}", report.version)?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "**Generated:** {}",
            report.generated.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_result(&mut self, index: usize, result: &MultiDimensionalResult) -> Result<()> {
        let passage = &result.passage;
        writeln!(self.writer, "## Analysis {}: {}", index, passage.reference)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "**Text:** {}", passage.text())?;
        writeln!(self.writer)?;
        writeln!(self.writer, "**Version:** {}", passage.version)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "**Summary:** {}", result.synthesis)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "**Metrics:**")?;
        writeln!(
            self.writer,
            "- Dimensions Analyzed: {}",
            result.dimensions.len()
        )?;
        writeln!(self.writer, "- Total Insights: {}", result.total_insights())?;
        writeln!(self.writer, "- Total Findings: {}", result.total_findings())?;
        writeln!(
            self.writer,
            "- Average Confidence: {:.2}",
            result.average_confidence()
        )?;
        writeln!(
            self.writer,
            "- Multiplication Factor: {}x",
            result.multiplication_factor
        )?;
        writeln!(self.writer)?;

        for (dimension, analysis) in &result.dimensions {
            writeln!(self.writer, "### {dimension} analysis")?;
            writeln!(self.writer)?;
            writeln!(self.writer, "**Confidence:** {}", analysis.confidence)?;
            writeln!(self.writer)?;
            writeln!(self.writer, "**Findings:**")?;
            for (key, value) in analysis.findings.iter() {
                writeln!(self.writer, "- {key}: {value}")?;
            }
            writeln!(self.writer)?;
            writeln!(self.writer, "**Insights:**")?;
            for insight in &analysis.insights {
                writeln!(self.writer, "- {insight}")?;
            }
            if !analysis.links.is_empty() {
                writeln!(self.writer)?;
                writeln!(self.writer, "**Connections:**")?;
                for link in &analysis.links {
                    writeln!(
                        self.writer,
                        "- {} ({}): {}",
                        link.reference, link.relationship, link.insight
                    )?;
                }
            }
            writeln!(self.writer)?;
        }

        writeln!(self.writer, "---")?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> Result<()> {
        self.write_header(report)?;
        for (i, result) in report.results.iter().enumerate() {
            self.write_result(i + 1, result)?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> Result<()> {
        for result in &report.results {
            writeln!(
                self.writer,
                "{} {}",
                result.passage.reference.bold(),
                format!("({} dimensions)", result.dimensions.len()).dimmed()
            )?;
            writeln!(self.writer, "  {}", result.synthesis)?;

            for (dimension, analysis) in &result.dimensions {
                let confidence = format!("{:.2}", analysis.confidence);
                let confidence = if analysis.confidence >= 0.8 {
                    confidence.green()
                } else if analysis.confidence >= 0.6 {
                    confidence.yellow()
                } else {
                    confidence.red()
                };
                writeln!(self.writer, "  {} [{}]", dimension.to_string().cyan(), confidence)?;
                if let Some(insight) = analysis.insights.first() {
                    writeln!(self.writer, "    {insight}")?;
                }
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }
}

/// Writer for the requested format, to a file when `output` is given and
/// stdout otherwise.
pub fn create_writer(
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<Box<dyn OutputWriter>> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(std::io::stdout()),
    };

    Ok(match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(sink)),
    })
}
