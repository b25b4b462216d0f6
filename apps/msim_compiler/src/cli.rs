//! Command-line interface of `msimc`.
//!
//! Every flag has a short and long form. An `--ini` file can supply the
//! same settings; flags given on the command line win over the ini file.

use clap::Parser;
use std::path::PathBuf;

/// The msim DSL compiler.
#[derive(Parser, Debug, Clone)]
#[command(name = "msimc")]
#[command(about = "Compiles a microsimulation model DSL source tree", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Model name (used in generated metadata and SQL).
    #[arg(short = 'm', long = "model")]
    pub model_name: Option<String>,

    /// Scenario name for the default workset.
    #[arg(short = 's', long = "scenario", default_value = "Default")]
    pub scenario_name: String,

    /// Directory of DSL source modules.
    #[arg(short = 'i', long = "input-dir")]
    pub input_dir: Option<PathBuf>,

    /// Directory generated C++/SQL/metadata artifacts are written to.
    #[arg(short = 'o', long = "output-dir", default_value = "out")]
    pub output_dir: PathBuf,

    /// Semicolon- or comma-separated list of library module directories
    /// consulted for `use`-statements.
    #[arg(short = 'u', long = "use-dir")]
    pub use_dirs: Vec<String>,

    /// Directory of scenario parameter data files (`.dat`/`.csv`/`.tsv`).
    #[arg(short = 'p', long = "param-dir")]
    pub param_dir: Option<PathBuf>,

    /// Directory of fixed-parameter data files.
    #[arg(short = 'f', long = "fixed-dir")]
    pub fixed_dir: Option<PathBuf>,

    /// Directory model documentation is written to.
    #[arg(short = 'd', long = "doc-dir")]
    pub doc_dir: Option<PathBuf>,

    /// Directory the SQL schema/database script is written to.
    #[arg(short = 'q', long = "sql-dir")]
    pub sql_dir: Option<PathBuf>,

    /// Source and message code page (e.g. "UTF-8").
    #[arg(short = 'c', long = "code-page", default_value = "UTF-8")]
    pub code_page: String,

    /// Language code for externalizable runtime messages.
    #[arg(short = 'L', long = "lang", default_value = "EN")]
    pub message_lang: String,

    /// Omit `#line` directives from generated C++.
    #[arg(short = 'n', long = "suppress-line-directives")]
    pub suppress_line_directives: bool,

    /// Skip writing the relational metadata/SQL artifacts.
    #[arg(short = 'S', long = "suppress-metadata")]
    pub suppress_metadata: bool,

    /// Emit HTML model documentation (one file per language).
    #[arg(long = "emit-doc")]
    pub emit_doc: bool,

    /// Emit the Markdown counterpart of the model documentation.
    #[arg(long = "emit-doc-md")]
    pub emit_doc_md: bool,

    /// Read additional settings from an ini file; CLI flags override it.
    #[arg(long = "ini")]
    pub ini_file: Option<PathBuf>,

    /// Enable `option local_random_streams`-style per-entity RNG emission.
    #[arg(long = "local-random-streams")]
    pub local_random_streams: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn minimal_invocation_parses() {
        let cli = Cli::parse_from(["msimc", "--model", "RiskPaths"]);
        assert_eq!(cli.model_name.as_deref(), Some("RiskPaths"));
        assert_eq!(cli.scenario_name, "Default");
        assert_eq!(cli.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn short_forms_are_accepted() {
        let cli = Cli::parse_from(["msimc", "-m", "M", "-o", "build", "-n", "-S"]);
        assert_eq!(cli.model_name.as_deref(), Some("M"));
        assert_eq!(cli.output_dir, PathBuf::from("build"));
        assert!(cli.suppress_line_directives);
        assert!(cli.suppress_metadata);
    }
}
