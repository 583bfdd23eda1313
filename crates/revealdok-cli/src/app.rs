//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quick_xml::escape::escape;

use revealdok_ast::{Doctree, SourceNode};
use revealdok_core::{load_tree, Pipeline, RevealConfig};

/// Config file looked up in the working directory when none is given
const DEFAULT_CONFIG: &str = "revealdok.toml";

/// reveal.js files copied from `<assets>/dist` into `_static`
const DIST_FILES: &[&str] = &["reveal.css", "reset.css", "reveal.js"];

#[derive(Parser)]
#[command(name = "revealdok")]
#[command(author, version, about = "Document trees to reveal.js slide decks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a slide deck (or plain HTML) from a JSON document tree
    Build {
        /// Input document tree (JSON)
        input: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "_build")]
        output: PathBuf,

        /// Output target, overriding the configuration
        #[arg(long)]
        target: Option<String>,

        /// reveal.js checkout to copy stylesheets and scripts from
        #[arg(long)]
        assets: Option<PathBuf>,
    },

    /// Print the rewritten document tree as JSON
    Transform {
        /// Input document tree (JSON)
        input: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output target, overriding the configuration
        #[arg(long)]
        target: Option<String>,
    },
}

/// Run the CLI application
///
/// Parses arguments and dispatches to the matching command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            config,
            output,
            target,
            assets,
        } => {
            let config = load_config(config.as_deref(), target)?;
            build_command(&input, config, &output, assets.as_deref())?;
        }
        Commands::Transform {
            input,
            config,
            target,
        } => {
            let config = load_config(config.as_deref(), target)?;
            let json = transform_command(&input, config)?;
            println!("{}", json);
        }
    }

    Ok(())
}

/// Execute the build command, returning the written page
pub fn build_command(
    input: &Path,
    config: RevealConfig,
    output_dir: &Path,
    assets: Option<&Path>,
) -> Result<PathBuf> {
    println!("revealdok v{}", revealdok_core::VERSION);
    println!("Building: {}", input.display());

    let pipeline = Pipeline::new(config).context("Invalid configuration")?;
    let mut tree = read_tree(input)?;

    let report = pipeline
        .transform(&mut tree)
        .with_context(|| format!("Failed to transform: {}", input.display()))?;
    let body = pipeline.render(&tree);
    let html = page(&tree, &body, pipeline.config());

    fs::create_dir_all(output_dir).with_context(|| {
        format!("Failed to create output directory: {}", output_dir.display())
    })?;
    let output_path = output_dir.join("index.html");
    fs::write(&output_path, html)
        .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;

    if pipeline.target().is_slides() {
        let copied = copy_static_files(assets, output_dir, &pipeline.config().theme);
        log::info!("Copied {} static files", copied);
    }

    println!();
    println!("Build complete!");
    println!("  Output: {}", output_path.display());
    println!("  Target: {}", pipeline.target().name());
    println!(
        "  Slide breaks: {}, hoisted: {}, unwrapped: {}, title slides: {}",
        report.breaks, report.hoisted, report.unwrapped, report.split
    );

    Ok(output_path)
}

/// Execute the transform command, returning the rewritten tree as JSON
pub fn transform_command(input: &Path, config: RevealConfig) -> Result<String> {
    let pipeline = Pipeline::new(config).context("Invalid configuration")?;
    let mut tree = read_tree(input)?;

    pipeline
        .transform(&mut tree)
        .with_context(|| format!("Failed to transform: {}", input.display()))?;

    serde_json::to_string_pretty(&tree.to_source(tree.root()))
        .context("Failed to serialize document tree")
}

/// Wrap rendered markup into a complete HTML page
///
/// Slide targets get the reveal.js scaffold and initialisation script; the
/// stylesheets and scripts are referenced from `_static`.
pub fn page(tree: &Doctree, body: &str, config: &RevealConfig) -> String {
    let title = tree
        .find_first(|n| n.kind.is_title())
        .map(|t| tree.text_content(t))
        .unwrap_or_default();
    let title = escape(title.as_str());

    if !config.output_target().is_slides() {
        return format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{title}</title>\n</head>\n<body>\n{body}</body>\n</html>\n"
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<link rel="stylesheet" href="_static/reset.css">
<link rel="stylesheet" href="_static/reveal.css">
<link rel="stylesheet" href="_static/{theme}">
</head>
<body>
<div class="reveal">
<div class="slides">
{body}</div>
</div>
<script src="_static/reveal.js"></script>
<script src="_static/plugin/notes/notes.js"></script>
<script>
Reveal.initialize({{
  hash: true,
  plugins: [RevealNotes]
}});
</script>
</body>
</html>
"#,
        theme = config.theme,
    )
}

/// Copy reveal.js stylesheets, scripts, the theme and the notes plugin
///
/// Missing or unreadable files are logged and skipped: the deck markup is
/// already written and stays usable. Returns the number of files copied.
pub fn copy_static_files(assets: Option<&Path>, output_dir: &Path, theme: &str) -> usize {
    let Some(assets) = assets else {
        log::warn!("No reveal.js assets directory given; _static was not populated");
        return 0;
    };

    let static_dir = output_dir.join("_static");
    if let Err(err) = fs::create_dir_all(&static_dir) {
        log::warn!("cannot create {}: {}", static_dir.display(), err);
        return 0;
    }

    let dist = assets.join("dist");
    let mut files: Vec<(PathBuf, PathBuf)> = DIST_FILES
        .iter()
        .map(|name| (dist.join(name), static_dir.join(name)))
        .collect();
    files.push((dist.join("theme").join(theme), static_dir.join(theme)));

    let mut copied = 0;
    for (from, to) in files {
        match fs::copy(&from, &to) {
            Ok(_) => copied += 1,
            Err(err) => log::warn!("cannot copy static file {}: {}", from.display(), err),
        }
    }

    let notes_from = assets.join("plugin").join("notes");
    let notes_to = static_dir.join("plugin").join("notes");
    match copy_dir(&notes_from, &notes_to) {
        Ok(count) => copied += count,
        Err(err) => log::warn!("cannot copy notes plugin {}: {}", notes_from.display(), err),
    }

    copied
}

fn copy_dir(from: &Path, to: &Path) -> std::io::Result<usize> {
    fs::create_dir_all(to)?;
    let mut copied = 0;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Load configuration from a file, the working directory, or defaults
fn load_config(config_path: Option<&Path>, target: Option<String>) -> Result<RevealConfig> {
    let mut config = match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            RevealConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?
        }
        None if Path::new(DEFAULT_CONFIG).exists() => RevealConfig::load(Path::new(DEFAULT_CONFIG))
            .with_context(|| format!("Failed to load config: {}", DEFAULT_CONFIG))?,
        None => RevealConfig::default(),
    };

    if let Some(target) = target {
        config.target = target;
    }
    Ok(config)
}

fn read_tree(input: &Path) -> Result<Doctree> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let source: SourceNode = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse document tree: {}", input.display()))?;
    load_tree(&source).with_context(|| format!("Invalid document tree: {}", input.display()))
}
