//! Interactive console for the Saber 11 analysis.
//!
//! Presents the numbered menu on stdin/stdout. `--data` (or `SABER11_DATA`)
//! preloads a dataset so the matrix options are usable without going through
//! option 1 first.

use anyhow::{Context, Result, anyhow, bail};
use saber11::config::parse_delimiter;
use saber11::logging::init_tracing;
use saber11::{Console, Session, Settings, resolve_data_path};
use std::env;
use std::io;
use std::path::PathBuf;

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    let mut settings = Settings::from_env()?;
    cli.apply(&mut settings);

    let preload = if cli.data_path.is_some() || settings.data_path.is_some() {
        Some(resolve_data_path(cli.data_path.clone(), &settings)?)
    } else {
        None
    };

    let mut session = Session::new(settings);
    if let Some(path) = preload {
        let dataset = session.load(&path)?;
        println!(
            "Loaded {} records from {}.",
            dataset.len(),
            path.display()
        );
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock(), session);
    console.run().context("console I/O failed")
}

struct Cli {
    data_path: Option<PathBuf>,
    delimiter: Option<u8>,
    region_column: Option<String>,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os();
        let _program = args.next();
        let mut data_path = None;
        let mut delimiter = None;
        let mut region_column = None;

        while let Some(arg) = args.next() {
            let arg_str = arg
                .to_str()
                .ok_or_else(|| anyhow!("invalid UTF-8 in argument"))?;
            match arg_str {
                "--data" => data_path = Some(PathBuf::from(next_value("--data", &mut args)?)),
                "--delimiter" => {
                    delimiter = Some(parse_delimiter(&next_value("--delimiter", &mut args)?)?)
                }
                "--region-column" => {
                    region_column = Some(next_value("--region-column", &mut args)?)
                }
                "--help" | "-h" => usage(0),
                other => bail!("unknown argument: {other}"),
            }
        }

        Ok(Self {
            data_path,
            delimiter,
            region_column,
        })
    }

    fn apply(&self, settings: &mut Settings) {
        if let Some(delimiter) = self.delimiter {
            settings.delimiter = delimiter;
        }
        if let Some(column) = &self.region_column {
            settings.region_column = column.clone();
        }
    }
}

fn next_value(flag: &str, args: &mut env::ArgsOs) -> Result<String> {
    let value = args
        .next()
        .ok_or_else(|| anyhow!("{flag} requires a value"))?
        .into_string()
        .map_err(|_| anyhow!("{flag} must be valid UTF-8"))?;
    if value.is_empty() {
        bail!("{flag} must not be empty");
    }
    Ok(value)
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: saber11 [--data PATH] [--delimiter CHAR] [--region-column NAME]\n\nOptions:\n  --data PATH               Preload a dataset (or set SABER11_DATA).\n  --delimiter CHAR          Field delimiter, default ',' (or set SABER11_DELIMITER).\n  --region-column NAME      Department column, default 'dpto' (or set SABER11_REGION_COLUMN).\n  --help                    Show this help text.\n\nSet SABER11_LOG (e.g. saber11=debug) to control logging on stderr."
    );
    std::process::exit(code);
}
