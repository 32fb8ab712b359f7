use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
    Markdown,
}

impl From<OutputFormat> for crate::io::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => crate::io::OutputFormat::Terminal,
            OutputFormat::Json => crate::io::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::OutputFormat::Markdown,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "versemap")]
#[command(about = "Multi-dimensional biblical passage analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a corpus file across all dimensions
    Analyze {
        /// Corpus file (.json or USFM)
        corpus: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Restrict analysis to these algorithms
        #[arg(long, value_delimiter = ',')]
        algorithms: Option<Vec<String>>,

        /// Disable parallel batch processing
        #[arg(long)]
        sequential: bool,

        /// Worker threads (0 = one per core)
        #[arg(long, default_value = "0")]
        jobs: usize,

        /// Run validation rules against each result
        #[arg(long)]
        validate: bool,

        /// Extra validation rules file (JSON)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Group analysis by book
        #[arg(long)]
        by_book: bool,

        /// Group analysis by testament
        #[arg(long)]
        by_testament: bool,

        /// Configuration file (versemap.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Analyze one inline passage
    Passage {
        /// Passage reference, e.g. "John 1:1"
        #[arg(short, long)]
        reference: String,

        /// Passage text
        #[arg(short, long)]
        text: String,

        /// Translation label
        #[arg(long, default_value = "ESV")]
        version: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also report dimension interactions
        #[arg(long)]
        interactions: bool,

        /// Also classify the literary genre
        #[arg(long)]
        genre: bool,
    },

    /// Classify the literary genre of corpus passages
    Genre {
        /// Corpus file (.json or USFM)
        corpus: PathBuf,

        /// Only classify this reference
        #[arg(long)]
        reference: Option<String>,
    },

    /// Query the theological concept ontology
    Concepts {
        #[command(subcommand)]
        command: ConceptCommands,
    },

    /// Print corpus statistics
    Stats {
        /// Corpus file (.json or USFM)
        corpus: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConceptCommands {
    /// Shortest path between two concepts
    Path {
        /// Starting concept, e.g. God
        from: String,
        /// Target concept, e.g. Faith
        to: String,
    },
    /// Map a passage onto ontology concepts
    Map {
        /// Passage reference
        #[arg(short, long)]
        reference: String,
        /// Passage text
        #[arg(short, long)]
        text: String,
    },
    /// List all concepts with their hierarchy levels
    List,
}
