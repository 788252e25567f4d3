//! CLI tool to convert between fixed-width data files and JSON records.
//!
//! Usage:
//!   fixedwidth parse <layout.json> <input.data> [-o records.json]
//!   fixedwidth stringify <layout.json> <records.json> [-o output.data]
//!
//! If no output file is specified, writes to stdout.

use clap::{Args, Parser, Subcommand};
use fixedwidth_rs::{Encoding, Layout, Mode, TrimPolicy, Value, parse, stringify};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

/// Convert between fixed-width positional records and JSON.
#[derive(Parser)]
#[command(name = "fixedwidth", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse fixed-width data into a JSON array of records
    Parse(ParseArgs),
    /// Lay JSON records out as fixed-width data
    Stringify(StringifyArgs),
}

#[derive(Args)]
struct CommonArgs {
    /// Layout file (JSON field list and default options)
    layout: PathBuf,

    /// Input file (or /dev/stdin)
    input: PathBuf,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Character set: ascii, utf8, utf16le, base64, hex, latin1
    #[arg(long)]
    encoding: Option<Encoding>,

    /// Line terminator; understands \n, \r, \t and \\ escapes
    #[arg(long)]
    terminator: Option<String>,

    /// Pad character used to fill and trim columns
    #[arg(long)]
    pad: Option<char>,

    /// Show paths, options, and record counts on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args)]
struct ParseArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Trim policy: none, left, right, both
    #[arg(long)]
    trim: Option<TrimPolicy>,

    /// Pad short lines and cut long ones instead of failing
    #[arg(long, conflicts_with = "strict")]
    relaxed: bool,

    /// Fail on lines of the wrong width, even if the layout is relaxed
    #[arg(long)]
    strict: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct StringifyArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// End the output with a line terminator
    #[arg(long, conflicts_with = "no_trailing_terminator")]
    trailing_terminator: bool,

    /// Omit the final line terminator, even if the layout asks for one
    #[arg(long)]
    no_trailing_terminator: bool,
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Stringify(args) => run_stringify(args),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn run_parse(args: &ParseArgs) -> Result<(), String> {
    let common = &args.common;
    let layout = load_layout(&common.layout)?;
    let schema = layout
        .schema(Mode::Parse)
        .map_err(|e| format!("Layout error in '{}': {e}", common.layout.display()))?;

    let mut options = layout.parse_options();
    if let Some(encoding) = common.encoding {
        options.encoding = encoding;
    }
    if let Some(terminator) = &common.terminator {
        options.line_terminator = unescape(terminator);
    }
    if let Some(pad) = common.pad {
        options.pad_char = pad;
    }
    if let Some(trim) = args.trim {
        options.trim = trim;
    }
    if args.relaxed {
        options.relaxed = true;
    } else if args.strict {
        options.relaxed = false;
    }

    let input = read_input(&common.input)?;

    if common.verbose {
        report_paths(common);
        eprintln!("Encoding: {}", options.encoding);
        eprintln!("Width:    {} ({} fields)", schema.total_width(), schema.len());
        eprintln!("Trim:     {}", options.trim);
        if options.relaxed {
            eprintln!("Mode:     relaxed");
        }
    }

    let records = parse(&input, &schema, &options).map_err(|e| format!("Parse error: {e}"))?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&records)
    } else {
        serde_json::to_string(&records)
    }
    .map_err(|e| format!("Error serializing records: {e}"))?;

    write_output(common.output.as_deref(), json.as_bytes(), true)?;

    if common.verbose {
        eprintln!("Records:  {}", records.len());
    }
    Ok(())
}

fn run_stringify(args: &StringifyArgs) -> Result<(), String> {
    let common = &args.common;
    let layout = load_layout(&common.layout)?;
    let schema = layout
        .schema(Mode::Stringify)
        .map_err(|e| format!("Layout error in '{}': {e}", common.layout.display()))?;

    let mut options = layout.stringify_options();
    if let Some(encoding) = common.encoding {
        options.encoding = encoding;
    }
    if let Some(terminator) = &common.terminator {
        options.line_terminator = unescape(terminator);
    }
    if let Some(pad) = common.pad {
        options.pad_char = pad;
    }
    if args.trailing_terminator {
        options.trailing_terminator = true;
    } else if args.no_trailing_terminator {
        options.trailing_terminator = false;
    }

    let input = read_input(&common.input)?;
    let records = match serde_json::from_slice::<Value>(&input) {
        Ok(Value::Sequence(items)) => items,
        Ok(single) => vec![single],
        Err(e) => {
            return Err(format!(
                "Error reading records from '{}': {e}",
                common.input.display()
            ));
        }
    };

    if common.verbose {
        report_paths(common);
        eprintln!("Encoding: {}", options.encoding);
        eprintln!("Width:    {} ({} fields)", schema.total_width(), schema.len());
    }

    let output =
        stringify(&records, &schema, &options).map_err(|e| format!("Stringify error: {e}"))?;
    write_output(common.output.as_deref(), &output, false)?;

    if common.verbose {
        eprintln!("Records:  {}", records.len());
    }
    Ok(())
}

fn load_layout(path: &Path) -> Result<Layout, String> {
    Layout::load(path).map_err(|e| format!("Error loading layout: {e}"))
}

fn read_input(path: &Path) -> Result<Vec<u8>, String> {
    fs::read(path).map_err(|e| format!("Error reading input file '{}': {e}", path.display()))
}

fn report_paths(common: &CommonArgs) {
    eprintln!("Layout:   {}", common.layout.display());
    eprintln!("Input:    {}", common.input.display());
    eprintln!(
        "Output:   {}",
        common
            .output
            .as_deref()
            .map_or_else(|| "(stdout)".to_string(), |p| p.display().to_string())
    );
}

/// Write to `path`, or to stdout when absent. Text written to stdout
/// gets a closing newline.
fn write_output(path: Option<&Path>, bytes: &[u8], text: bool) -> Result<(), String> {
    match path {
        Some(out_path) => {
            if let Some(parent) = out_path.parent()
                && !parent.as_os_str().is_empty()
                && fs::create_dir_all(parent).is_err()
            {
                return Err(format!(
                    "Error creating output directory for '{}'",
                    out_path.display()
                ));
            }
            fs::write(out_path, bytes).map_err(|e| {
                format!("Error writing output file '{}': {e}", out_path.display())
            })
        }
        None => {
            let mut stdout = io::stdout();
            stdout
                .write_all(bytes)
                .map_err(|e| format!("Error writing output: {e}"))?;
            if text && !bytes.is_empty() && !bytes.ends_with(b"\n") {
                println!();
            }
            Ok(())
        }
    }
}

/// Expand `\n`, `\r`, `\t`, and `\\` in a terminator given on the command line.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
