use std::fs::File;

use anyhow::bail;
use clap::Parser;
use nysiis::nysiis;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Args {
    /// Path to target CSV file, whose first column holds the names
    #[arg(long, conflicts_with = "name")]
    path: Option<String>,

    /// Keep the full key instead of truncating it to 6 characters
    #[arg(long)]
    full: bool,

    /// Log what is being done
    #[arg(short, long)]
    verbose: bool,

    /// Names to encode
    name: Vec<String>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(args.verbose);

    let truncate = !args.full;

    if let Some(path) = &args.path {
        debug!(path = %path, truncate, "encoding CSV file");

        let file = File::open(path)?;
        let mut reader = simd_csv::Reader::from_reader(file);
        let mut writer = simd_csv::Writer::from_writer(std::io::stdout());

        let mut record = reader.byte_headers()?.clone();
        record.push_field(b"nysiis");

        writer.write_byte_record(&record)?;

        while reader.read_byte_record(&mut record)? {
            let code = match nysiis(std::str::from_utf8(&record[0])?, truncate) {
                Ok(code) => code,
                Err(err) => {
                    warn!("{}", err);
                    String::new()
                }
            };

            record.push_field(code.as_bytes());

            writer.write_byte_record(&record)?;
        }

        writer.flush()?;
    } else {
        if args.name.is_empty() {
            bail!("missing argument: expected at least one name to encode");
        }

        for name in args.name {
            println!("{}", nysiis(&name, truncate)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args() {
        let args = Args::try_parse_from(["nysiis", "--full", "Robert", "Rupert"]).unwrap();
        assert!(args.full);
        assert_eq!(args.name, vec!["Robert", "Rupert"]);

        let args = Args::try_parse_from(["nysiis", "--path", "names.csv"]).unwrap();
        assert_eq!(args.path.as_deref(), Some("names.csv"));

        assert!(Args::try_parse_from(["nysiis", "--path", "names.csv", "Robert"]).is_err());
    }
}
