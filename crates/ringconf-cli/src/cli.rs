use clap::{Args, Parser, Subcommand, ValueEnum};
use ringconf::core::models::ring::RingKind;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "ringconf - A command-line tool for classifying the 3D conformations of molecular rings (cyclopentane, cyclohexane, oxane, pyrane, benzene) from PDB coordinate files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel analysis.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify the ring conformation in one or more PDB structure files.
    Analyse(AnalyseArgs),
}

/// The ring topology to classify against.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingType {
    Cyclopentane,
    Cyclohexane,
    Oxane,
    Pyrane,
    Benzene,
}

impl From<RingType> for RingKind {
    fn from(value: RingType) -> Self {
        match value {
            RingType::Cyclopentane => RingKind::Cyclopentane,
            RingType::Cyclohexane => RingKind::Cyclohexane,
            RingType::Oxane => RingKind::Oxane,
            RingType::Pyrane => RingKind::Pyrane,
            RingType::Benzene => RingKind::Benzene,
        }
    }
}

/// Arguments for the `analyse` subcommand.
#[derive(Args, Debug)]
pub struct AnalyseArgs {
    /// PDB structure files to analyse, one ring per file.
    #[arg(value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Path to a text file listing input files, one path per line.
    #[arg(short = 'i', long = "input-list", value_name = "PATH")]
    pub input_list: Option<PathBuf>,

    /// The ring type to classify against.
    #[arg(short = 'r', long = "ring-type", value_enum, required = true)]
    pub ring_type: RingType,

    /// Path to a TOML atom-name table overriding the compiled-in defaults.
    #[arg(short = 'n', long = "names", value_name = "PATH")]
    pub names: Option<PathBuf>,

    /// Print only the result list, one line per input file.
    #[arg(short = 'l', long, conflicts_with = "summary")]
    pub list: bool,

    /// Print only the aggregated conformation statistics.
    #[arg(short = 's', long)]
    pub summary: bool,

    /// Print both the result list and the statistics (the default).
    #[arg(short = 'a', long, conflicts_with_all = ["list", "summary"])]
    pub all: bool,

    /// Write the results as CSV to the given path.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

impl AnalyseArgs {
    /// With no display flag given, both outputs are shown.
    pub fn show_list(&self) -> bool {
        self.list || self.all || !self.summary
    }

    pub fn show_summary(&self) -> bool {
        self.summary || self.all || !self.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn analyse_requires_a_ring_type() {
        let result = Cli::try_parse_from(["ringconf", "analyse", "a.pdb"]);
        assert!(result.is_err());
    }

    #[test]
    fn analyse_parses_inputs_and_ring_type() {
        let cli = parse(&["ringconf", "analyse", "-r", "oxane", "a.pdb", "b.pdb"]);
        let Commands::Analyse(args) = cli.command;
        assert_eq!(args.ring_type, RingType::Oxane);
        assert_eq!(args.inputs.len(), 2);
        assert!(args.show_list());
        assert!(args.show_summary());
    }

    #[test]
    fn list_alone_suppresses_the_summary() {
        let cli = parse(&["ringconf", "analyse", "-r", "oxane", "-l", "a.pdb"]);
        let Commands::Analyse(args) = cli.command;
        assert!(args.show_list());
        assert!(!args.show_summary());
    }

    #[test]
    fn all_flag_enables_both_outputs() {
        let cli = parse(&["ringconf", "analyse", "-r", "benzene", "-a", "a.pdb"]);
        let Commands::Analyse(args) = cli.command;
        assert!(args.show_list());
        assert!(args.show_summary());
    }

    #[test]
    fn summary_alone_suppresses_the_list() {
        let cli = parse(&["ringconf", "analyse", "-r", "pyrane", "-s", "a.pdb"]);
        let Commands::Analyse(args) = cli.command;
        assert!(!args.show_list());
        assert!(args.show_summary());
    }

    #[test]
    fn all_conflicts_with_list_and_summary() {
        let result = Cli::try_parse_from(["ringconf", "analyse", "-r", "oxane", "-a", "-l"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["ringconf", "analyse", "-r", "oxane", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn ring_types_map_onto_kinds() {
        assert_eq!(RingKind::from(RingType::Cyclopentane).size(), 5);
        assert_eq!(RingKind::from(RingType::Oxane), RingKind::Oxane);
        assert_eq!(RingKind::from(RingType::Benzene), RingKind::Benzene);
    }
}
