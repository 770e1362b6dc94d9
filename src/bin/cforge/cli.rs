use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "cforge",
    about = "Composition descriptor featurization",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Featurize formulas given on the command line
    #[command(visible_alias = "f")]
    Featurize(FeaturizeArgs),

    /// Featurize every row of a JSON or CSV dataset
    #[command(visible_alias = "b")]
    Batch(BatchArgs),

    /// List feature labels in output order
    #[command(visible_alias = "l")]
    Labels(LabelsArgs),

    /// Show citation, implementors and catalog coverage
    Info(InfoArgs),
}

impl Command {
    pub fn quiet(&self) -> bool {
        match self {
            Command::Batch(args) => args.io.quiet,
            Command::Featurize(_) | Command::Labels(_) | Command::Info(_) => false,
        }
    }
}

/// Descriptor selection shared by every command that featurizes.
#[derive(Args)]
#[command(next_help_heading = "Descriptors")]
pub struct DescriptorOptions {
    /// Standard descriptor set
    #[arg(long, value_name = "SET", default_value = "extended")]
    pub variant: VariantArg,

    /// Element property catalog (TOML file, embedded catalog if omitted)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Replace the averaged properties (comma-separated keys, e.g. nvalence,density)
    #[arg(long, value_name = "KEYS", value_delimiter = ',')]
    pub properties: Option<Vec<String>>,

    /// Number of ionization stages to average
    #[arg(long = "ionization-depth", value_name = "N")]
    pub ionization_depth: Option<usize>,

    /// Fail on elements with too few ionization energies instead of using 0.0
    #[arg(long = "strict-ionization")]
    pub strict_ionization: bool,
}

/// Dataset I/O options for the batch command.
#[derive(Args)]
pub struct IoOptions {
    /// Input dataset (stdin if omitted, requires --infmt)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output dataset (stdout if omitted, requires --outfmt)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct FeaturizeArgs {
    /// Chemical formulas, e.g. Fe0.6Ni0.4 or (CoCrFeNi)90Al10
    #[arg(value_name = "FORMULA", required = true)]
    pub formulas: Vec<String>,

    /// Output layout
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    pub format: ReportFormat,

    #[command(flatten)]
    pub descriptors: DescriptorOptions,
}

#[derive(Args)]
pub struct BatchArgs {
    #[command(flatten)]
    pub io: IoOptions,

    /// Input format (inferred from extension if not specified)
    #[arg(long = "infmt", value_name = "FORMAT")]
    pub input_format: Option<TableFormat>,

    /// Output format (inferred from extension if not specified)
    #[arg(long = "outfmt", value_name = "FORMAT")]
    pub output_format: Option<TableFormat>,

    #[command(flatten)]
    pub rows: RowOptions,

    #[command(flatten)]
    pub descriptors: DescriptorOptions,
}

/// Row handling options for the batch command.
#[derive(Args)]
#[command(next_help_heading = "Row Handling")]
pub struct RowOptions {
    /// Column holding the formula strings
    #[arg(long, value_name = "NAME", default_value = comp_forge::batch::DEFAULT_COMPOSITION_COLUMN)]
    pub column: String,

    /// Keep going past bad rows, leaving their features empty
    #[arg(long = "ignore-errors")]
    pub ignore_errors: bool,

    /// Worker threads (0 = one per core)
    #[arg(short, long, value_name = "N", default_value = "0")]
    pub jobs: usize,

    /// Omit the formula column from the output
    #[arg(long = "drop-source")]
    pub drop_source: bool,
}

#[derive(Args)]
pub struct LabelsArgs {
    #[command(flatten)]
    pub descriptors: DescriptorOptions,
}

#[derive(Args)]
pub struct InfoArgs {
    /// Element property catalog to summarize (embedded catalog if omitted)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum VariantArg {
    /// Seven averaged properties, strict ionization energies
    Base,
    /// Five averaged properties plus mixing entropy and size difference
    Extended,
}

impl From<VariantArg> for comp_forge::Variant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Base => comp_forge::Variant::Base,
            VariantArg::Extended => comp_forge::Variant::Extended,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TableFormat {
    Json,
    Csv,
}

impl From<TableFormat> for comp_forge::io::Format {
    fn from(f: TableFormat) -> Self {
        match f {
            TableFormat::Json => comp_forge::io::Format::Json,
            TableFormat::Csv => comp_forge::io::Format::Csv,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Aligned label/value listing per formula
    Table,
    Json,
    Csv,
}

pub fn parse() -> Cli {
    Cli::parse()
}
