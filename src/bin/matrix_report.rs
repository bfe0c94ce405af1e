//! Builds the department × service matrix and prints it as one JSON report.
//!
//! The report carries the matrix axes and cells plus the derived figures the
//! console offers interactively: per-category totals, the department with the
//! most appliances, and the quality-of-life index for every department.

use anyhow::{Context, Result, anyhow, bail};
use saber11::config::parse_delimiter;
use saber11::logging::init_tracing;
use saber11::{
    Dataset, ServiceMatrix, Settings, most_appliances, quality_of_life_index, resolve_data_path,
    total_for_category,
};
use serde_json::{Map, Value, json};
use std::env;
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
    if let Some(delimiter) = cli.delimiter {
        settings.delimiter = delimiter;
    }
    if let Some(column) = &cli.region_column {
        settings.region_column = column.clone();
    }

    let data_path = resolve_data_path(cli.data_path.clone(), &settings)?;
    let dataset = Dataset::load(&data_path, &settings)?;
    let matrix = ServiceMatrix::from_records(dataset.records())
        .with_context(|| format!("building matrix from {}", data_path.display()))?;

    let report = build_report(&matrix)?;
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{rendered}");
    Ok(())
}

fn build_report(matrix: &ServiceMatrix) -> Result<Value> {
    let mut totals = Map::new();
    for category in matrix.categories().names() {
        let total = total_for_category(matrix, category.as_str())?;
        totals.insert(category.to_string(), json!(total));
    }

    let mut quality_of_life = Map::new();
    for region in matrix.regions().names() {
        let index = quality_of_life_index(matrix, region.as_str())?;
        quality_of_life.insert(region.to_string(), json!(index));
    }

    let mut report = serde_json::to_value(matrix)?;
    let object = report
        .as_object_mut()
        .ok_or_else(|| anyhow!("matrix did not serialize to a JSON object"))?;
    object.insert("totals".to_string(), Value::Object(totals));
    object.insert(
        "most_appliances".to_string(),
        json!(most_appliances(matrix)?),
    );
    object.insert("quality_of_life".to_string(), Value::Object(quality_of_life));
    Ok(report)
}

struct Cli {
    data_path: Option<PathBuf>,
    delimiter: Option<u8>,
    region_column: Option<String>,
    pretty: bool,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut data_path = None;
        let mut delimiter = None;
        let mut region_column = None;
        let mut pretty = false;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--data" => data_path = Some(PathBuf::from(next_value(&mut args, "--data")?)),
                "--delimiter" => {
                    delimiter = Some(parse_delimiter(&next_value(&mut args, "--delimiter")?)?)
                }
                "--region-column" => {
                    region_column = Some(next_value(&mut args, "--region-column")?)
                }
                "--pretty" => pretty = true,
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        Ok(Cli {
            data_path,
            delimiter,
            region_column,
            pretty,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = std::ffi::OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: matrix-report [--data PATH] [--delimiter CHAR] [--region-column NAME] [--pretty]\n\
Loads the dataset (default: SABER11_DATA), builds the department x service matrix, and prints it with totals, the department with the most appliances, and per-department quality-of-life indices as JSON.\n"
}
