use log::debug;
use serde::{Deserialize, Serialize};

use crate::clubs::estimate::ShotRecord;

/// Counts from one [`merge_shots`] call.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MergeSummary {
    pub added: usize,
    pub updated: usize,
}

/// Merges an uploaded batch into `existing` under `session`.
///
/// Every incoming shot is tagged with `session`. An existing shot from the same
/// session with the same club and shot number is replaced; everything else is
/// appended. Shots without a shot number never match, so they are always added.
pub fn merge_shots(
    existing: &mut Vec<ShotRecord>,
    incoming: Vec<ShotRecord>,
    session: &str,
) -> MergeSummary {
    let tagged: Vec<ShotRecord> = incoming
        .into_iter()
        .map(|mut shot| {
            shot.session = Some(session.to_string());
            shot
        })
        .collect();

    let same_shot = |old: &ShotRecord, new: &ShotRecord| {
        old.session.as_deref() == Some(session)
            && old.club == new.club
            && old.shot_no.is_some()
            && old.shot_no == new.shot_no
    };

    let mut summary = MergeSummary::default();
    for shot in &tagged {
        if existing.iter().any(|old| same_shot(old, shot)) {
            summary.updated += 1;
        } else {
            summary.added += 1;
        }
    }

    existing.retain(|old| !tagged.iter().any(|new| same_shot(old, new)));
    existing.extend(tagged);

    debug!(
        "merged session {session:?}: {} added, {} updated",
        summary.added, summary.updated
    );
    summary
}
