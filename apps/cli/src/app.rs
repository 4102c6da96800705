//! Application orchestrator — drives a session from command-line input.

use std::path::PathBuf;
use std::time::Duration;

use appmanifest_community::Client;
use appmanifest_session::{ErrorKind, GameEntry, Session, SessionError, WriteReport};
use appmanifest_steam::SteamError;

use crate::cli::Args;
use crate::config::Config;

/// Runs one invocation and returns the write report (empty when nothing
/// was generated).
pub async fn run(args: Args, config: Config) -> anyhow::Result<WriteReport> {
    if args.list_libraries {
        list_libraries(args.json)?;
        return Ok(WriteReport::default());
    }

    let profile = args
        .profile
        .clone()
        .or_else(|| config.profile_id.clone())
        .ok_or_else(|| anyhow::anyhow!("no profile given (pass one or set profile_id in the config file)"))?;

    let timeout = Duration::from_secs(args.timeout.unwrap_or(config.timeout_secs));
    let client = Client::with_timeout(timeout)?.with_base_url(config.base_url.as_str());
    let mut session = Session::new(client);

    let count = session
        .fetch_catalog(&profile)
        .await
        .map_err(|e| anyhow::anyhow!(notification(&e)))?;
    if let Some(name) = session.profile().and_then(|p| p.name.as_deref()) {
        tracing::info!(profile = name, games = count, "library loaded");
    }

    session.set_query(&args.search);

    for app_id in &args.apps {
        match session.toggle(app_id) {
            Ok(selected) => tracing::debug!(app_id = %app_id, selected, "toggled"),
            Err(e) => tracing::warn!("{}", notification(&e)),
        }
    }
    if args.all {
        session.select_visible(true)?;
    }

    if args.list || session.selected().is_empty() {
        print_visible(&session.visible(), args.json)?;
        if !args.list {
            eprintln!("Nothing selected. Use --app <APPID> or --all to choose games.");
        }
        return Ok(WriteReport::default());
    }

    let library: Option<PathBuf> = args.library.clone().or_else(|| config.library_path.clone());
    let report = session
        .generate(library.as_deref())
        .map_err(|e| anyhow::anyhow!(notification(&e)))?;

    print_report(&session, &report, args.json)?;
    Ok(report)
}

/// Translates an error into the message shown to the user.
pub fn notification(err: &SessionError) -> String {
    match err.kind() {
        ErrorKind::Network => format!("Could not reach Steam Community: {err}"),
        ErrorKind::InvalidProfile => {
            format!("Could not load that profile (is it public?): {err}")
        }
        ErrorKind::NotFound => match err {
            SessionError::Steam(SteamError::NotFound) => {
                "No Steam library found. Pass --library <path to steamapps>.".to_string()
            }
            _ => format!("Unknown game: {err}"),
        },
        ErrorKind::InvalidLibraryPath => format!("Please provide a valid Steam library path: {err}"),
        ErrorKind::Io => format!("Failed to access the Steam library: {err}"),
    }
}

fn print_visible(entries: &[&GameEntry], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    for entry in entries {
        let mark = if entry.selected { "x" } else { " " };
        println!("[{mark}] {:>8}  {}", entry.app_id, entry.title);
    }
    Ok(())
}

fn print_report(session: &Session, report: &WriteReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for app_id in &report.succeeded {
        let title = session.catalog().get(app_id).map(|e| e.title.as_str()).unwrap_or_default();
        println!("queued  {app_id:>8}  {title}");
    }
    for failed in &report.failed {
        println!("failed  {:>8}  {}", failed.app_id, failed.reason);
    }
    println!(
        "Successfully created {} manifest file(s). Restart Steam for the changes to take effect.",
        report.succeeded.len()
    );
    Ok(())
}

fn list_libraries(json: bool) -> anyhow::Result<()> {
    let mut libraries: Vec<PathBuf> = Vec::new();

    match appmanifest_steam::resolve() {
        Ok(root) => {
            libraries.push(root.clone());
            match appmanifest_steam::library_folders(&root) {
                Ok(folders) => {
                    for folder in folders {
                        if !libraries.contains(&folder) {
                            libraries.push(folder);
                        }
                    }
                }
                Err(e) => tracing::debug!(error = %e, "no additional library folders"),
            }
        }
        Err(e) => tracing::warn!(error = %e, "no Steam library detected"),
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&libraries)?);
    } else {
        for library in &libraries {
            println!("{}", library.display());
        }
    }
    Ok(())
}
