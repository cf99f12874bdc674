//! Entry point for the healthtop TUI. Parses args, resolves the profile, and runs the App.

use std::env;
use std::io::{self, Write};
use std::sync::Arc;

use healthtop::app::App;
use healthtop::cli::parse_args;
use healthtop::config::Settings;
use healthtop::fetch::HttpSource;
use healthtop::logging;
use healthtop::profiles::{
    load_profiles, save_profiles, ProfileEntry, ProfileRequest, ProfilesFile, ResolveProfile,
};
use healthtop::state::OrderingPolicy;
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) if msg.starts_with("Usage:") => {
            eprintln!("{msg}");
            return Ok(());
        }
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    if let Err(e) = logging::init(&logging::log_path()) {
        eprintln!("logging disabled: {e}");
    }

    let profiles_file = load_profiles();
    let req = ProfileRequest {
        profile_name: parsed.profile.clone(),
        url: parsed.url.clone(),
        tls_ca: parsed.tls_ca.clone(),
    };

    // Determine final connection parameters (and maybe mutated profiles to persist)
    let mut profiles_mut = profiles_file.clone();
    let entry: ProfileEntry = match req.resolve(&profiles_file) {
        ResolveProfile::Direct(url, tls_ca) => {
            let mut entry = ProfileEntry {
                url,
                tls_ca,
                tuning: parsed.tuning,
            };
            if let Some(name) = parsed.profile.as_ref() {
                match profiles_mut.profiles.get(name) {
                    None => {
                        // New profile: auto-save immediately
                        profiles_mut.profiles.insert(name.clone(), entry.clone());
                        persist(&profiles_mut);
                    }
                    Some(existing) => {
                        entry.tuning = existing.tuning.merge(parsed.tuning);
                        if *existing != entry {
                            let overwrite = parsed.save
                                || prompt_yes_no(&format!(
                                    "Overwrite existing profile '{name}'? [y/N]: "
                                ));
                            if overwrite {
                                profiles_mut.profiles.insert(name.clone(), entry.clone());
                                persist(&profiles_mut);
                            }
                        }
                    }
                }
            }
            entry
        }
        ResolveProfile::Loaded(mut entry) => {
            entry.tuning = entry.tuning.merge(parsed.tuning);
            entry
        }
        ResolveProfile::PromptSelect(names) => {
            eprintln!("Select profile:");
            for (i, n) in names.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, n);
            }
            let line = prompt_string("Enter number (or blank to abort): ")?;
            let picked = line
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|idx| (1..=names.len()).contains(idx))
                .and_then(|idx| profiles_mut.profiles.get(&names[idx - 1]));
            match picked {
                Some(entry) => {
                    let mut entry = entry.clone();
                    entry.tuning = entry.tuning.merge(parsed.tuning);
                    entry
                }
                None => return Ok(()),
            }
        }
        ResolveProfile::PromptCreate(name) => {
            eprintln!("Profile '{name}' does not exist yet.");
            let url = prompt_string("Enter backend URL (http://HOST:PORT): ")?;
            if url.trim().is_empty() {
                return Ok(());
            }
            let ca = prompt_string("Enter TLS CA path (or leave blank): ")?;
            let entry = ProfileEntry {
                url: url.trim().to_string(),
                tls_ca: Some(ca.trim().to_string()).filter(|c| !c.is_empty()),
                tuning: parsed.tuning,
            };
            profiles_mut.profiles.insert(name, entry.clone());
            persist(&profiles_mut);
            entry
        }
        ResolveProfile::None => {
            eprintln!("No URL provided and no profiles to select.");
            return Ok(());
        }
    };

    let policy = if parsed.drop_stale {
        OrderingPolicy::DropStale
    } else {
        OrderingPolicy::LastWriterWins
    };
    let settings = Settings::build(
        &entry.url,
        entry.tls_ca.as_deref(),
        entry.tuning,
        profiles_mut.thresholds,
        policy,
    )?;

    if parsed.dry_run {
        let c = &settings.cadence;
        println!(
            "url: {} | snapshot every {}ms | history every {}ms ({}h window) | stats every {}ms | {:?}",
            settings.base_url,
            c.snapshot.as_millis(),
            c.history.as_millis(),
            settings.history_hours,
            c.stats.as_millis(),
            settings.policy,
        );
        return Ok(());
    }

    info!(
        url = %settings.base_url,
        thresholds = ?settings.thresholds,
        policy = ?settings.policy,
        "starting"
    );
    let source = Arc::new(HttpSource::new(
        &settings.base_url,
        settings.tls_ca.as_deref(),
        settings.history_hours,
    )?);
    let mut app = App::new(settings.base_url.as_str(), settings.policy);
    app.run(source, &settings.cadence).await
}

fn persist(p: &ProfilesFile) {
    if let Err(e) = save_profiles(p) {
        warn!(error = %e, "could not save profiles");
        eprintln!("warning: could not save profiles: {e}");
    }
}

fn prompt_yes_no(prompt: &str) -> bool {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_ok() {
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

fn prompt_string(prompt: &str) -> io::Result<String> {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}
