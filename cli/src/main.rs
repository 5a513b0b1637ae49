use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use abacus::{Calculator, render_error};
use clap::{CommandFactory, Parser};
use tracing::debug;

const FILE_EXTENSION: &str = "calc";

/// Abacus - evaluate arithmetic modeling modules and expressions
#[derive(Parser, Debug)]
#[command(name = "abacus")]
#[command(about = "Evaluate .calc modules and ad-hoc expressions", long_about = None)]
struct Args {
    /// File to be interpreted
    #[arg(short, long, conflicts_with = "expression")]
    file: Option<PathBuf>,

    /// Expression to be interpreted
    #[arg(short, long)]
    expression: Option<String>,

    /// Context file whose definitions the expression may call (repeatable)
    #[arg(short = 'i', long = "import", value_name = "FILE")]
    imports: Vec<PathBuf>,
}

fn has_calc_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(FILE_EXTENSION)
}

fn read_source(path: &Path) -> Result<String, ExitCode> {
    fs::read_to_string(path).map_err(|e| {
        eprintln!("cannot read {}: {}", path.display(), e);
        ExitCode::FAILURE
    })
}

fn run(args: &Args) -> Result<Calculator, ExitCode> {
    let mut calculator = Calculator::new();

    for path in &args.imports {
        if !has_calc_extension(path) {
            eprintln!("please pass only *.{FILE_EXTENSION} files as library arguments");
        }
        let source = read_source(path)?;
        debug!(file = %path.display(), "loading context module");
        if let Err(e) = calculator.add_context_source(&source) {
            render_error(&e);
            return Err(ExitCode::FAILURE);
        }
    }

    if let Some(expression) = &args.expression {
        if let Err(e) = calculator.set_input_expression(expression) {
            render_error(&e);
            return Err(ExitCode::FAILURE);
        }
    } else if let Some(file) = &args.file {
        if !has_calc_extension(file) {
            eprintln!("please pass only *.{FILE_EXTENSION} files as input");
            return Err(ExitCode::FAILURE);
        }
        let source = read_source(file)?;
        if let Err(e) = calculator.set_input_module(&source) {
            render_error(&e);
            return Err(ExitCode::FAILURE);
        }
    } else {
        eprintln!("{}", Args::command().render_help());
        return Err(ExitCode::from(2));
    }

    Ok(calculator)
}

fn main() -> ExitCode {
    let args = Args::parse();

    // ABACUS_LOG or RUST_LOG controls the log level; default to warn.
    use tracing_subscriber::{EnvFilter, fmt};
    let filter = EnvFilter::try_from_env("ABACUS_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let calculator = match run(&args) {
        Ok(calculator) => calculator,
        Err(code) => return code,
    };

    match calculator.calculate() {
        Ok(calculation) => {
            for diagnostic in &calculation.diagnostics {
                eprintln!("{}", diagnostic);
            }
            for result in &calculation.results {
                println!("- {}: {}", result.rendered, result.value);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            render_error(&e);
            ExitCode::FAILURE
        }
    }
}
