pub mod output;

pub use output::{
    create_writer, AnalysisReport, JsonWriter, MarkdownWriter, OutputFormat, OutputWriter,
    TerminalWriter,
};
