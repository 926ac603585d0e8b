//! scatterview binary: load a projected point table and open the viewer.
//!
//! Usage:
//!   scatterview [--config viewer.json] [--invalid keep|drop|reject]
//!               [--x COL] [--y COL] [--category COL] <points.csv>

use std::path::PathBuf;

use scatterview::{load_csv, run_scatter, InvalidRecordPolicy, ScatterConfig};

struct Args {
    csv_path: PathBuf,
    config_path: Option<PathBuf>,
    invalid: Option<InvalidRecordPolicy>,
    x: Option<String>,
    y: Option<String>,
    category: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut csv_path: Option<PathBuf> = None;
    let mut config_path = None;
    let mut invalid = None;
    let (mut x, mut y, mut category) = (None, None, None);

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        let mut value = |name: &str| it.next().ok_or_else(|| format!("{name} needs a value"));
        match arg.as_str() {
            "--config" => config_path = Some(PathBuf::from(value("--config")?)),
            "--invalid" => {
                invalid = Some(match value("--invalid")?.as_str() {
                    "keep" => InvalidRecordPolicy::WarnAndKeep,
                    "drop" => InvalidRecordPolicy::Drop,
                    "reject" => InvalidRecordPolicy::Reject,
                    other => return Err(format!("unknown --invalid policy {other:?}")),
                })
            }
            "--x" => x = Some(value("--x")?),
            "--y" => y = Some(value("--y")?),
            "--category" => category = Some(value("--category")?),
            _ if arg.starts_with("--") => return Err(format!("unknown option {arg}")),
            _ if csv_path.is_none() => csv_path = Some(PathBuf::from(&arg)),
            _ => return Err(format!("unexpected argument {arg}")),
        }
    }

    Ok(Args {
        csv_path: csv_path.ok_or_else(|| "missing path to a CSV file".to_string())?,
        config_path,
        invalid,
        x,
        y,
        category,
    })
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;

    let mut cfg = match &args.config_path {
        Some(path) => ScatterConfig::load_json(path)?,
        None => ScatterConfig::default(),
    };
    if let Some(policy) = args.invalid {
        cfg.invalid_records = policy;
    }
    if let Some(x) = args.x {
        cfg.columns.x = x;
    }
    if let Some(y) = args.y {
        cfg.columns.y = y;
    }
    if let Some(category) = args.category {
        cfg.columns.category = category;
    }

    let dataset = load_csv(&args.csv_path, &cfg.columns, cfg.invalid_records)?;
    run_scatter(dataset, cfg)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("scatterview: {e}");
        std::process::exit(1);
    }
}
