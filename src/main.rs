//! helper-testgen CLI
//!
//! Usage:
//!   helper-testgen [DIR]   - Generate fixtures for every schema in DIR

use helper_testgen::*;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let schema_dir = match args.get(1).map(String::as_str) {
        Some("version" | "--version" | "-v") => {
            println!("helper-testgen {}", VERSION);
            return ExitCode::SUCCESS;
        }
        Some("help" | "--help" | "-h") => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Some(flag) if flag.starts_with('-') => {
            eprintln!("Unknown option: {}", flag);
            print_usage();
            return ExitCode::from(2);
        }
        Some(dir) => Some(dir.to_string()),
        None => None,
    };

    if args.len() > 2 {
        eprintln!("Unexpected argument: {}", args[2]);
        print_usage();
        return ExitCode::from(2);
    }

    match run(schema_dir) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"
helper-testgen - Test fixtures for rule-engine helper functions

USAGE:
    helper-testgen [DIR]

ARGS:
    DIR    Directory holding helper schemas (*.yml, *.yaml, *.json)
           Overrides schema_dir from {config}

CONFIGURATION ({config} in the working directory):
    schema_dir               Directory scanned for schemas (default: .)
    output_dir               Where documents are written (default: next to each schema)
    max_variadic_arguments   Argument limit for variadic helpers (default: 40)
    asset_name               Asset name of every fixture (default: {asset})
    seed                     Fixed RNG seed for reproducible output
    log_level                0 = warn, 1 = info, 2 = debug (RUST_LOG overrides)

EXAMPLES:
    helper-testgen helpers/
    RUST_LOG=debug helper-testgen
"#,
        config = CONFIG_FILE,
        asset = DEFAULT_ASSET_NAME,
    );
}

/// Returns whether every schema was processed
fn run(schema_dir: Option<String>) -> Result<bool> {
    let mut config = GeneratorConfig::load_from_dir(Path::new("."))?;
    if let Some(dir) = schema_dir {
        config = config.with_schema_dir(dir);
    }

    init_tracing(config.log_level);

    let mut generator = Generator::new(&config);
    let reports = match process_directory(&config, &mut generator) {
        Ok(reports) => reports,
        Err(e) => {
            generator.log().critical(&e.to_string());
            return Ok(false);
        }
    };

    let failed: Vec<&FileReport> = reports.iter().filter(|r| !r.is_ok()).collect();
    let fixtures: usize = reports.iter().map(|r| r.fixtures).sum();

    for report in &reports {
        match (&report.output, &report.error) {
            (Some(output), None) => println!(
                "✓ {} -> {} ({} fixtures)",
                report.path.display(),
                output.display(),
                report.fixtures
            ),
            (_, Some(error)) => println!("✗ {}: {}", report.path.display(), error),
            (None, None) => {}
        }
    }

    println!();
    println!(
        "{} schema(s), {} fixture(s), {} failed",
        reports.len(),
        fixtures,
        failed.len()
    );

    Ok(failed.is_empty())
}
