//! gitignore-tidy CLI binary entry point.
//! Resolves configuration, tidies every target and prints results.

use clap::Parser;
use gitignore_tidy::cli::Cli;
use gitignore_tidy::models::Summary;
use gitignore_tidy::tidy::{resolve_targets, run_tidy, TidyOptions};
use gitignore_tidy::{config, logging, output, utils};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{} {}", utils::note_prefix(), format!("logging disabled: {}", e));
    }

    let eff = match config::resolve_effective(&cli.overrides()) {
        Ok(eff) => eff,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(2);
        }
    };
    if let Some(path) = eff.config_path.as_ref() {
        tracing::debug!(config = %path.display(), "loaded config");
    }

    let targets = resolve_targets(&eff.files, &eff.files_base);
    let opts = TidyOptions {
        allow_leading_whitespace: eff.allow_leading_whitespace,
        write: eff.write(),
        capture: eff.diff,
    };
    tracing::debug!(targets = targets.len(), write = opts.write, "tidying");

    let reports = run_tidy(&targets, &opts);
    output::print_results(&reports, &eff.output, eff.diff);

    let summary = Summary::from_reports(&reports);
    if summary.failed > 0 {
        std::process::exit(2);
    }
    if eff.check && summary.changed > 0 {
        std::process::exit(1);
    }
}
