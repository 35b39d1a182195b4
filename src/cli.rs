use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::Parser;

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
🧹 readprune version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   collapse duplicate reads and prune low-abundance groups";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    styles = STYLES
)]
pub struct Cli {
    /// the input file, in either .fasta or .fastq format
    pub file: String,

    /// the minimum number of reads per duplicate group; groups with
    /// fewer copies are dropped entirely
    #[arg(
        short,
        long,
        default_value_t = 1,
        value_parser = parse_min_copies,
        verbatim_doc_comment
    )]
    pub min_copies: usize,

    /// keep one output read per original group member, instead of a single
    /// consolidated read. quality is still normalized across the whole
    /// group, so every copy carries the same quality string
    #[arg(short = 'c', long, action, verbatim_doc_comment)]
    pub preserve_copies: bool,

    /// the output file; defaults to standard output
    #[arg(short)]
    pub output: Option<String>,

    /// write duplicate group statistics to this file, in JSON format
    #[arg(long)]
    pub stats: Option<String>,
}

fn parse_min_copies(arg: &str) -> Result<usize, String> {
    arg.parse::<usize>().map_err(|_| {
        indoc::formatdoc! {"
            expected a non-negative integer, got '{arg}', as in:
              --min-copies 1
              --min-copies 10
        "}
    })
}
