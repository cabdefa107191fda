use aeson_infer::naming::{module_name_from_doc_url, pascal_case};
use aeson_infer::{infer, to_jtd_schema, ModuleContext, NumType, Schema};
use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{stdin, BufReader, Read};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

/// Generates Haskell record types and Aeson decoders from an example JSON
/// document.
#[derive(Parser)]
#[command(name = "aeson-infer", version)]
struct Cli {
    /// Where to read the example from. Dash (hyphen) indicates stdin
    #[arg(default_value = "-")]
    input: String,

    /// Name of the record generated for the top-level object
    #[arg(long, default_value = "Response")]
    name: String,

    /// Name of the generated module
    #[arg(long, conflicts_with = "doc_url")]
    module: Option<String>,

    /// Documentation URL whose path determines the module name
    #[arg(long)]
    doc_url: Option<String>,

    /// Namespace prefix of derived module names
    #[arg(long, default_value = "Api")]
    prefix: String,

    #[arg(long, value_enum, default_value_t = Format::Haskell)]
    format: Format,

    /// Write the output under this directory, at the module's path, instead
    /// of printing it
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Numeric type to prefer in JSON Typedef output, when it can hold the
    /// example data
    #[arg(long, default_value = "uint8")]
    default_num_type: NumType,

    /// Log more; repeat for more detail. RUST_LOG is honoured too
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// A Haskell module
    Haskell,
    /// The module context as JSON, for an external template
    Context,
    /// A JSON Typedef schema
    Jtd,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let reader = BufReader::new(match cli.input.as_str() {
        "-" => Box::new(stdin()) as Box<dyn Read>,
        file => Box::new(File::open(file).with_context(|| format!("Failed to open {}", file))?)
            as Box<dyn Read>,
    });

    let document: Value =
        serde_json::from_reader(reader).context("Failed to parse the input as JSON")?;

    let module_name = match (&cli.module, &cli.doc_url) {
        (Some(module), _) => module.clone(),
        (None, Some(doc_url)) => module_name_from_doc_url(&cli.prefix, doc_url)?,
        (None, None) => format!("{}.{}", cli.prefix, pascal_case(&cli.name)),
    };

    let schema = infer(&cli.name, &document);
    if schema.is_empty() {
        bail!("The input has no objects or arrays to generate types from");
    }

    for name in schema.unresolved() {
        warn!(name, "type could not be inferred; the output needs a manual fix");
    }

    let context = ModuleContext::new(module_name, &schema);
    let output = format_output(cli.format, &context, &schema, cli.default_num_type)?;

    match &cli.out_dir {
        Some(out_dir) => {
            let mut path = out_dir.join(context.file_path());
            if !matches!(cli.format, Format::Haskell) {
                path.set_extension("json");
            }

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }

            fs::write(&path, output).with_context(|| format!("Failed to write {:?}", path))?;
            info!(path = %path.display(), module = %context.module_name, "wrote module");
        }
        None => print!("{}", output),
    }

    Ok(())
}

/// The text to print or write, ending in exactly one newline.
fn format_output(
    format: Format,
    context: &ModuleContext,
    schema: &Schema,
    default_num_type: NumType,
) -> Result<String> {
    let mut output = match format {
        Format::Haskell => context.to_source(),
        Format::Context => serde_json::to_string_pretty(context)?,
        Format::Jtd => {
            let jtd = to_jtd_schema(schema, default_num_type);
            serde_json::to_string(&jtd.into_serde_schema())?
        }
    };

    if !output.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
