mod example;
mod manifest;
mod settings;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use mdgen::Document;

use crate::manifest::Manifest;
use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "mdgen", version, about = "Markdown document generator")]
struct Cli {
    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    /// Settings file (defaults to ./mdgen.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the worked example document
    Example(WriteArgs),

    /// Build a document from a TOML manifest
    Build(BuildArgs),

    /// Check heading anchors and intra-document links of a Markdown file
    Check(CheckArgs),
}

#[derive(clap::Args)]
struct WriteArgs {
    /// Output file (defaults to a file in the configured output directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Replace the output file if it already exists
    #[arg(short, long)]
    force: bool,
}

#[derive(clap::Args)]
struct BuildArgs {
    /// Manifest describing the document
    manifest: PathBuf,

    #[command(flatten)]
    write: WriteArgs,
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Markdown file to check
    file: PathBuf,

    /// Print the heading outline with anchors
    #[arg(long)]
    outline: bool,
}

/// Failure already reported to the user as diagnostics.
#[derive(Debug, thiserror::Error)]
#[error("{0} error(s) reported")]
struct Reported(usize);

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let color_choice = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    let result = Settings::resolve(cli.config.as_deref())
        .context("cannot load settings")
        .and_then(|settings| match cli.command {
            Command::Example(args) => do_example(args, &settings),
            Command::Build(args) => do_build(args, &settings, color_choice),
            Command::Check(args) => do_check(args, color_choice),
        });

    if let Err(err) = result {
        if err.downcast_ref::<Reported>().is_none() {
            log::error!("{:#}", err);
        }
        process::exit(1);
    }
}

fn do_example(args: WriteArgs, settings: &Settings) -> Result<()> {
    let path = args
        .output
        .unwrap_or_else(|| settings.output_dir.join("example.md"));
    log::info!("output directory: [{}]", settings.output_dir.display());
    log::info!("creating markdown file: [{}]", path.display());

    let doc = example::build_example(settings.render.to_options())
        .context("cannot build the example document")?;
    write_document(&doc, &path, args.force || settings.force_overwrite)
}

fn do_build(args: BuildArgs, settings: &Settings, color_choice: ColorChoice) -> Result<()> {
    let source = fs::read_to_string(&args.manifest)
        .with_context(|| format!("cannot read '{}'", args.manifest.display()))?;

    let mut files = SimpleFiles::new();
    let file_id = files.add(args.manifest.display().to_string(), source.clone());

    let doc_and_output = Manifest::parse(&source).and_then(|manifest| {
        let doc = manifest.build(settings.render.to_options())?;
        Ok((doc, manifest.output))
    });
    let (doc, output) = match doc_and_output {
        Ok(built) => built,
        Err(error) => {
            emit_diagnostics(&files, &[error.to_diagnostic(file_id)], color_choice);
            return Err(Reported(1).into());
        }
    };

    let path = match args.write.output {
        Some(path) => path,
        None => settings
            .output_dir
            .join(output.unwrap_or_else(|| default_output_name(&args.manifest))),
    };
    log::info!("building [{}] into [{}]", args.manifest.display(), path.display());
    write_document(&doc, &path, args.write.force || settings.force_overwrite)
}

fn do_check(args: CheckArgs, color_choice: ColorChoice) -> Result<()> {
    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("cannot read '{}'", args.file.display()))?;

    let mut files = SimpleFiles::new();
    let file_id = files.add(args.file.display().to_string(), source.clone());

    let parser = mdgen::parser::Parser::new(source, file_id);
    let outline = match parser.parse() {
        Ok(outline) => outline,
        Err(errors) => {
            let diagnostics: Vec<Diagnostic<usize>> =
                errors.iter().map(|e| e.to_diagnostic()).collect();
            emit_diagnostics(&files, &diagnostics, color_choice);
            let count = errors.iter().filter(|e| e.is_error()).count();
            return Err(Reported(count).into());
        }
    };

    let warnings: Vec<Diagnostic<usize>> =
        outline.warnings.iter().map(|w| w.to_diagnostic()).collect();
    emit_diagnostics(&files, &warnings, color_choice);

    if args.outline {
        for heading in &outline.headings {
            let pad = "  ".repeat(heading.level.saturating_sub(1) as usize);
            let prefix = "#".repeat(heading.level as usize);
            println!("{}{} {} (#{})", pad, prefix, heading.text, heading.anchor);
        }
    }

    eprintln!(
        "ok: {} has {} headings and {} resolved links",
        args.file.display(),
        outline.headings.len(),
        outline.links.len()
    );
    Ok(())
}

fn write_document(doc: &Document, path: &Path, overwrite: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create directory '{}'", parent.display()))?;
    }
    doc.write(path, overwrite)
        .with_context(|| format!("cannot write '{}'", path.display()))?;
    Ok(())
}

/// `notes.toml` builds `notes.md`.
fn default_output_name(manifest: &Path) -> PathBuf {
    let stem = manifest
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "document".into());
    PathBuf::from(stem).with_extension("md")
}

fn emit_diagnostics(
    files: &SimpleFiles<String, String>,
    diagnostics: &[Diagnostic<usize>],
    color_choice: ColorChoice,
) {
    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();
    for diagnostic in diagnostics {
        let _ = term::emit_to_write_style(&mut writer.lock(), &config, files, diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_output_name() {
        assert_eq!(
            default_output_name(Path::new("docs/notes.toml")),
            PathBuf::from("notes.md")
        );
    }

    #[test]
    fn test_write_document_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.md");
        let doc = Document::new("Title");
        write_document(&doc, &path, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Title\n=====\n");
        assert!(write_document(&doc, &path, false).is_err());
        write_document(&doc, &path, true).unwrap();
    }
}
