//! Shot exports from launch monitors and simulators.
//!
//! Required columns: `Club`, `Flat_Carry`, `Offline`, `Type` (`Clean` or
//! `Mishit`). `Shot_No` is optional; other columns are ignored. Simulators
//! report shots right of the line as negative `Offline`, so the sign is
//! flipped on import.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::warn;

use crate::clubs::{ShotKind, ShotRecord};
use crate::data::DataError;

const REQUIRED_COLUMNS: [&str; 4] = ["Club", "Flat_Carry", "Offline", "Type"];

pub fn parse_shots_csv<R: Read>(reader: R) -> Result<Vec<ShotRecord>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let column = |name: &'static str| headers.iter().position(|h| h == name);
    let mut idx = [0usize; 4];
    for (slot, name) in idx.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = column(name).ok_or(DataError::MissingColumn(name))?;
    }
    let [club_idx, carry_idx, offline_idx, type_idx] = idx;
    let shot_no_idx = column("Shot_No");

    let mut shots = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        // Header is line 1.
        let line = row + 2;

        let club = record.get(club_idx).unwrap_or_default();
        if club.is_empty() {
            warn!("Line {line} - empty Club, skipping");
            continue;
        }
        let Some(carry) = parse_f64(record.get(carry_idx)) else {
            warn!("Line {line} - invalid Flat_Carry, skipping");
            continue;
        };
        let Some(offline) = parse_f64(record.get(offline_idx)) else {
            warn!("Line {line} - invalid Offline, skipping");
            continue;
        };
        let kind = match record.get(type_idx) {
            Some(t) if t.eq_ignore_ascii_case("clean") => ShotKind::Clean,
            Some(t) if t.eq_ignore_ascii_case("mishit") => ShotKind::Mishit,
            other => {
                warn!("Line {line} - unknown Type {:?}, skipping", other.unwrap_or_default());
                continue;
            }
        };
        let shot_no = shot_no_idx
            .and_then(|i| record.get(i))
            .and_then(|v| v.parse::<u32>().ok());

        shots.push(ShotRecord {
            club: club.to_string(),
            carry,
            offline: -offline,
            kind,
            shot_no,
            session: None,
        });
    }

    Ok(shots)
}

pub fn read_shots_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<ShotRecord>, DataError> {
    let file = File::open(path)?;
    parse_shots_csv(file)
}

fn parse_f64(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
