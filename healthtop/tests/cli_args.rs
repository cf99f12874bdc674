//! CLI arg parsing tests for healthtop
use std::process::Command;

use healthtop::cli::parse_args;

fn args(list: &[&str]) -> Vec<String> {
    std::iter::once("healthtop")
        .chain(list.iter().copied())
        .map(String::from)
        .collect()
}

#[test]
fn test_help_mentions_short_and_long_flags() {
    let output = Command::new(env!("CARGO_BIN_EXE_healthtop"))
        .arg("--help")
        .output()
        .expect("run healthtop --help");
    assert!(output.status.success());
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(
        text.contains("--tls-ca")
            && text.contains("-t")
            && text.contains("--profile")
            && text.contains("-P")
            && text.contains("--interval")
            && text.contains("--drop-stale"),
        "help text missing expected flags\n{text}"
    );
}

#[test]
fn test_help_wins_over_other_flags() {
    let exe = env!("CARGO_BIN_EXE_healthtop");
    for extra in [
        &["--tls-ca", "/tmp/cert.pem", "--help"][..],
        &["-t", "/tmp/cert.pem", "--help"][..],
        &["--profile", "dev", "--help"][..],
    ] {
        let out = Command::new(exe).args(extra).output().expect("run healthtop");
        assert!(out.status.success(), "{extra:?} did not succeed");
        assert!(String::from_utf8_lossy(&out.stderr).contains("Usage:"));
    }
}

#[test]
fn test_unknown_flag_fails() {
    let out = Command::new(env!("CARGO_BIN_EXE_healthtop"))
        .arg("--bogus")
        .output()
        .expect("run healthtop");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Unknown option --bogus"));
}

#[test]
fn test_values_long_short_and_assign() {
    let p = parse_args(args(&[
        "-t",
        "/etc/ca.pem",
        "--profile=lab",
        "--interval",
        "1000",
        "--history-interval=7000",
        "--stats-interval",
        "9000",
        "--hours",
        "6",
        "--drop-stale",
        "--save",
        "http://10.0.0.5:5000",
    ]))
    .unwrap();
    assert_eq!(p.tls_ca.as_deref(), Some("/etc/ca.pem"));
    assert_eq!(p.profile.as_deref(), Some("lab"));
    assert_eq!(p.url.as_deref(), Some("http://10.0.0.5:5000"));
    assert_eq!(p.tuning.snapshot_ms, Some(1000));
    assert_eq!(p.tuning.history_ms, Some(7000));
    assert_eq!(p.tuning.stats_ms, Some(9000));
    assert_eq!(p.tuning.history_hours, Some(6));
    assert!(p.drop_stale && p.save && !p.dry_run);
}

#[test]
fn test_bad_number_and_extra_positional() {
    let err = parse_args(args(&["--interval", "soon"])).unwrap_err();
    assert!(err.contains("--interval"), "{err}");
    let err = parse_args(args(&["http://a:1", "http://b:2"])).unwrap_err();
    assert!(err.starts_with("Unexpected argument"), "{err}");
}

#[test]
fn test_url_with_query_is_positional() {
    let p = parse_args(args(&["http://host:5000/?token=abc"])).unwrap();
    assert_eq!(p.url.as_deref(), Some("http://host:5000/?token=abc"));
}
