//! ditagen - DITA generation from parsed document trees

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use ditagen::ast::DocumentTree;
use ditagen::batch::{BatchConverter, SourceDocument};
use ditagen::dita::RenderOptions;
use ditagen::format;

#[derive(Parser)]
#[command(name = "ditagen")]
#[command(version, about = "Convert parsed document trees to DITA topics and maps", long_about = None)]
#[command(after_help = "EXAMPLES:
    ditagen docs/ out/                  Convert every .json tree under docs/
    ditagen guide.json out/             Convert a single document
    ditagen docs/ out/ --assets img/    Copy referenced images as well")]
struct Cli {
    /// Input document tree (.json) or directory of trees
    input: PathBuf,

    /// Output directory for .dita/.ditamap files
    output: PathBuf,

    /// Copy referenced resources from this directory into the output
    #[arg(long)]
    assets: Option<PathBuf>,

    /// File names to skip when converting a directory
    #[arg(long)]
    exclude: Vec<String>,

    /// Render preamble blocks as <abstract> instead of plain paragraphs
    #[arg(long)]
    abstract_preamble: bool,

    /// Value for the xml:lang attribute on generated topics
    #[arg(long, default_value = "en")]
    lang: String,

    /// Skip the XML indentation pass
    #[arg(long)]
    no_format: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let documents = load_documents(&cli.input, &cli.exclude)?;
    if documents.is_empty() {
        return Err(format!("no input documents found in {}", cli.input.display()));
    }

    let options = RenderOptions {
        preamble_as_paragraph: !cli.abstract_preamble,
        lang: cli.lang.clone(),
    };
    let mut batch = BatchConverter::new(options);
    batch.run(&documents).map_err(|e| e.to_string())?;

    fs::create_dir_all(&cli.output)
        .map_err(|e| format!("cannot create {}: {e}", cli.output.display()))?;
    for (name, content) in batch.aggregator().documents() {
        let rendered = if cli.no_format {
            content.to_string()
        } else {
            format::indent(content)
        };
        let path = cli.output.join(name);
        fs::write(&path, rendered).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
        if !cli.quiet {
            println!("Created {}", path.display());
        }
    }

    if let Some(assets) = &cli.assets {
        copy_resources(&batch, assets, &cli.output, cli.quiet);
    }

    Ok(())
}

/// Copy referenced images from the asset root into the output directory,
/// preserving relative paths. Best effort: a missing asset is reported
/// but does not fail the conversion.
fn copy_resources(batch: &BatchConverter, assets: &Path, output: &Path, quiet: bool) {
    for resource in batch.aggregator().resources() {
        let from = assets.join(resource);
        let to = output.join(resource);
        if let Some(parent) = to.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            eprintln!("warning: cannot create {}: {e}", parent.display());
            continue;
        }
        match fs::copy(&from, &to) {
            Ok(_) => {
                if !quiet {
                    println!("Copied {}", to.display());
                }
            }
            Err(e) => eprintln!("warning: cannot copy {}: {e}", from.display()),
        }
    }
}

fn load_documents(input: &Path, excludes: &[String]) -> Result<Vec<SourceDocument>, String> {
    if !input.exists() {
        return Err(format!("{} does not exist", input.display()));
    }

    let mut paths = Vec::new();
    if input.is_dir() {
        let entries =
            fs::read_dir(input).map_err(|e| format!("cannot read {}: {e}", input.display()))?;
        for entry in entries {
            let entry = entry.map_err(|e| e.to_string())?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.starts_with('.')
                || !name.ends_with(".json")
                || excludes.iter().any(|excluded| excluded == name)
            {
                continue;
            }
            paths.push(path);
        }
        // Deterministic conversion order regardless of directory order.
        paths.sort();
    } else {
        paths.push(input.to_path_buf());
    }

    let mut documents = Vec::new();
    for path in paths {
        let data =
            fs::read_to_string(&path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        let tree: DocumentTree = serde_json::from_str(&data)
            .map_err(|e| format!("cannot parse {}: {e}", path.display()))?;
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string);
        documents.push(SourceDocument { tree, stem });
    }
    Ok(documents)
}
