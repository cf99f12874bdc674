//! Command-line parsing, kept dependency-free and testable.

use crate::error::ConfigError;
use crate::profiles::Tuning;

pub const USAGE_FLAGS: &str = "[--profile NAME|-P NAME] [--save] [--tls-ca CERT_PEM|-t CERT_PEM] \
[--interval MS] [--history-interval MS] [--stats-interval MS] [--hours N] [--drop-stale] [--dry-run] \
[http://HOST:PORT]";

#[derive(Debug, Default, PartialEq)]
pub struct ParsedArgs {
    pub url: Option<String>,
    pub tls_ca: Option<String>,
    pub profile: Option<String>,
    pub save: bool,
    pub dry_run: bool,
    pub drop_stale: bool,
    pub tuning: Tuning,
}

pub fn usage(prog: &str) -> String {
    format!("Usage: {prog} {USAGE_FLAGS}")
}

/// `Err` carries the text to print: usage for `--help`, or a parse error.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "healthtop".into());
    let mut out = ParsedArgs::default();

    while let Some(arg) = it.next() {
        // --flag=value is accepted for every flag that takes a value
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (arg.clone(), None),
        };
        let value = |it: &mut I::IntoIter| inline.clone().or_else(|| it.next());

        match flag.as_str() {
            "-h" | "--help" => return Err(usage(&prog)),
            "--tls-ca" | "-t" => out.tls_ca = value(&mut it).filter(|v| !v.is_empty()),
            "--profile" | "-P" => out.profile = value(&mut it).filter(|v| !v.is_empty()),
            "--save" => out.save = true,
            "--dry-run" => out.dry_run = true,
            "--drop-stale" => out.drop_stale = true,
            "--interval" => out.tuning.snapshot_ms = Some(number("--interval", value(&mut it))?),
            "--history-interval" => {
                out.tuning.history_ms = Some(number("--history-interval", value(&mut it))?)
            }
            "--stats-interval" => {
                out.tuning.stats_ms = Some(number("--stats-interval", value(&mut it))?)
            }
            "--hours" => out.tuning.history_hours = Some(number("--hours", value(&mut it))?),
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option {arg}. {}", usage(&prog)));
            }
            _ => {
                if out.url.is_none() {
                    out.url = Some(arg);
                } else {
                    return Err(format!("Unexpected argument. {}", usage(&prog)));
                }
            }
        }
    }
    Ok(out)
}

fn number<T: std::str::FromStr>(flag: &'static str, v: Option<String>) -> Result<T, String> {
    let raw = v.unwrap_or_default();
    raw.trim().parse::<T>().map_err(|_| {
        ConfigError::BadNumber {
            flag,
            value: raw.clone(),
        }
        .to_string()
    })
}
