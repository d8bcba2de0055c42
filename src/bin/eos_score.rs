//! Headless EOS risk scoring.
//!
//! Reads a JSON input record and prints the evaluation as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin eos_score -- [inputs.json]
//! echo '{"maternal_temp_c": 38.4, "gbs_positive": true}' | cargo run --bin eos_score
//! ```
//!
//! Missing fields take the calculator defaults. Values outside the slider
//! bounds are rejected.

use std::env;
use std::fs::File;
use std::io;

use anyhow::{bail, Context, Result};

use eoscalc::adapters::logging;
use eoscalc::application::ScoreReport;

fn main() -> Result<()> {
    logging::init_stderr();

    let mut args = env::args().skip(1);
    let path = args.next();
    if args.next().is_some() {
        bail!("Usage: eos_score [inputs.json]");
    }

    let report = match path.as_deref() {
        None | Some("-") => ScoreReport::from_reader(io::stdin().lock())?,
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {path}"))?;
            ScoreReport::from_reader(file).with_context(|| format!("Failed to score {path}"))?
        }
    };

    println!("{}", report.to_json()?);
    Ok(())
}
