use clap::Parser;
use fidlgen::ir;
use fidlgen::Language;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Generates bindings from a library's JSON IR.
#[derive(Debug, Parser)]
#[command(name = "fidlgen", version)]
struct Args {
    /// The JSON IR of the library. Read from stdin when omitted.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Languages to generate. May be repeated.
    #[arg(long = "target", value_enum, default_values_t = [Language::Go])]
    targets: Vec<Language>,

    /// Directory receiving one `<library>.<ext>` file per target. Output goes to stdout
    /// when omitted.
    #[arg(long)]
    output_dir: Option<PathBuf>
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Ir(#[from] ir::Error),

    #[error("{language} generation failed: {source}")]
    Generate { language: Language, source: fidlgen::Error },

    #[error("unable to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error }
}

fn read_library(args: &Args) -> Result<ir::ast::Library, CliError> {
    match &args.json {
        Some(path) => {
            let mut file = File::open(path).map_err(ir::Error::from)?;
            Ok(ir::read_library(&mut file)?)
        }
        None => Ok(ir::read_library(&mut io::stdin())?)
    }
}

fn write_output(args: &Args, library: &ir::ast::Library, language: Language, code: &str) -> Result<(), CliError> {
    match &args.output_dir {
        Some(dir) => {
            let path = dir.join(format!("{}.{}", library.name(), language.file_extension()));
            tracing::info!(path = %path.display(), "writing file");
            let mut file = File::create(&path).map_err(|source| CliError::Write { path: path.clone(), source })?;
            file.write_all(code.as_bytes()).map_err(|source| CliError::Write { path, source })
        }
        None => io::stdout()
            .write_all(code.as_bytes())
            .map_err(|source| CliError::Write { path: PathBuf::from("<stdout>"), source })
    }
}

#[tracing::instrument(skip_all)]
fn run(args: &Args) -> Result<(), CliError> {
    let library = read_library(args)?;
    tracing::debug!(library = %library.name(), targets = args.targets.len(), "read library");

    for (language, result) in fidlgen::generate_all(&library, &args.targets) {
        let code = result.map_err(|source| CliError::Generate { language, source })?;
        write_output(args, &library, language, &code)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
        )
        .try_init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("fidlgen: {}", e);
            ExitCode::FAILURE
        }
    }
}
