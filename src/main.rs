use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use cmp_check::cmp;
use cmp_check::suite::{run_suite, SuiteLoader};
use dotenv::dotenv;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a check suite from a YAML file
    Run {
        /// Path to the suite file
        #[arg(short, long)]
        file: String,

        /// Output format (defaults to $CMP_CHECK_FORMAT, then text)
        #[arg(long, value_enum)]
        format: Option<Format>,
    },
    /// Evaluate a single expectation against a literal value
    Eval {
        /// The actual value, as a literal (e.g. 0o640, "'VERBOSE'", "['x']")
        #[arg(short, long)]
        actual: String,

        /// The expectation, e.g. "cmp <= 122"
        expectation: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum Format {
    Text,
    Json,
}

fn default_format() -> Format {
    match std::env::var("CMP_CHECK_FORMAT") {
        Ok(value) => Format::from_str(&value, true).unwrap_or_else(|_| {
            log::warn!("Ignoring unknown CMP_CHECK_FORMAT '{}'", value);
            Format::Text
        }),
        Err(_) => Format::Text,
    }
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    let success = match args.command {
        Commands::Run { file, format } => {
            let suite = SuiteLoader::new()
                .load_suite(&file)
                .with_context(|| format!("Failed to load suite {}", file))?;
            let report = run_suite(&suite);

            match format.unwrap_or_else(default_format) {
                Format::Text => println!("{}", report),
                Format::Json => println!("{}", report.to_json()?),
            }
            report.success()
        }
        Commands::Eval {
            actual,
            expectation,
        } => {
            let actual = cmp::parse_literal(&actual)
                .with_context(|| format!("Invalid actual value {}", actual))?;
            let expectation = cmp::parse(&expectation)?;
            log::info!("Evaluating {} against {}", expectation, actual);

            let outcome = expectation.evaluate(&actual);
            if outcome.passed {
                println!("ok");
            } else {
                println!("FAIL: {}", outcome.message);
            }
            outcome.passed
        }
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}
