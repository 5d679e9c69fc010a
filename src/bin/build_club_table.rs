use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use caddie_engine::clubs::{
    ellipse_from_shots, merge_shots, table_from_shots, ShotEllipse, ShotKind, ShotRecord, CHI2_95,
};
use caddie_engine::data::{read_shots_from_file, write_table_to_file};
use log::{info, warn};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct SessionMetadata {
    name: String,
    source: String,
    added: usize,
    updated: usize,
}

#[derive(Debug, Serialize)]
struct ClubMetadata {
    name: String,
    /// 95% confidence ellipse over clean shots, when there are enough of them.
    ellipse_95: Option<ShotEllipse>,
}

#[derive(Debug, Serialize)]
struct TableMetadata {
    sessions: Vec<SessionMetadata>,
    clubs: Vec<ClubMetadata>,
    shots: usize,
    clean_shots: usize,
    generated_at_epoch: u64,
}

fn main() -> Result<()> {
    env_logger::init();

    let mut sources: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if sources.is_empty() {
        sources.push(PathBuf::from("data/shots.csv"));
    }

    let mut shots: Vec<ShotRecord> = Vec::new();
    let mut sessions = Vec::new();
    for source in &sources {
        let session = session_name(source);
        info!("Reading session {session:?} from {}", source.display());
        let batch = read_shots_from_file(source)
            .with_context(|| format!("failed to read shots from {}", source.display()))?;
        let summary = merge_shots(&mut shots, batch, &session);
        info!(
            "Session {session:?}: {} new shots, {} updated",
            summary.added, summary.updated
        );
        sessions.push(SessionMetadata {
            name: session,
            source: source.display().to_string(),
            added: summary.added,
            updated: summary.updated,
        });
    }
    let clean_shots = shots.iter().filter(|s| s.kind == ShotKind::Clean).count();

    let table = table_from_shots(&shots).context("failed to build club table")?;
    if table.is_empty() {
        bail!("no club has at least two clean shots in {} file(s)", sources.len());
    }
    let mut skipped: Vec<&str> = shots
        .iter()
        .map(|s| s.club.as_str())
        .filter(|club| table.get(club).is_none())
        .collect();
    skipped.sort_unstable();
    skipped.dedup();
    for club in skipped {
        warn!("Club {club} has fewer than two clean shots; left out");
    }

    let output_dir = PathBuf::from("data");
    fs::create_dir_all(&output_dir).context("failed to create data output directory")?;
    let table_path = output_dir.join("clubs.bin");
    write_table_to_file(&table, &table_path)
        .with_context(|| format!("failed to write club table to {}", table_path.display()))?;

    let metadata = TableMetadata {
        sessions,
        clubs: table
            .names()
            .map(|name| ClubMetadata {
                name: name.to_string(),
                ellipse_95: ellipse_from_shots(name, &shots, CHI2_95),
            })
            .collect(),
        shots: shots.len(),
        clean_shots,
        generated_at_epoch: current_epoch_seconds(),
    };

    let metadata_path = output_dir.join("clubs.meta.json");
    let metadata_json = serde_json::to_vec_pretty(&metadata)?;
    fs::write(&metadata_path, metadata_json)
        .with_context(|| format!("failed to write metadata to {}", metadata_path.display()))?;

    info!(
        "Wrote club table to {} ({} clubs from {} shots)",
        table_path.display(),
        table.len(),
        metadata.shots
    );

    Ok(())
}

/// Session name for an upload: the file name without its `.csv` extension.
fn session_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn current_epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
