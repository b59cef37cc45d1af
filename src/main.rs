use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

/// Print an INI file as it would be saved, or look up a single value.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Path to the INI file.
    path: PathBuf,
    /// Section to look in; the default section if omitted.
    #[arg(long, short, default_value = "")]
    section: String,
    /// Print only the value of this key.
    #[arg(long, short)]
    key: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let document = ini_tree::load(&args.path)
        .with_context(|| format!("could not load {}", args.path.display()))?;

    match args.key {
        Some(key) => {
            let value = document
                .key(&args.section, &key)
                .with_context(|| format!("no key {key:?} in section {:?}", args.section))?
                .value()
                .unwrap_or_default();
            println!("{value}");
        }
        None => print!("{document}"),
    }

    Ok(())
}
