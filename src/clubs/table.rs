use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dispersion::{dispersion_ellipse, DispersionPolygon};
use crate::{DomainError, GeoPoint};

/// Shot statistics for one club, in yards. Lateral values are signed,
/// positive to the right of the target line.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClubProfile {
    pub name: String,
    pub average_carry: f64,
    pub carry_std_dev: f64,
    pub average_lateral_offset: f64,
    pub lateral_std_dev: f64,
}

impl ClubProfile {
    pub fn new(
        name: impl Into<String>,
        average_carry: f64,
        carry_std_dev: f64,
        average_lateral_offset: f64,
        lateral_std_dev: f64,
    ) -> Self {
        ClubProfile {
            name: name.into(),
            average_carry,
            carry_std_dev,
            average_lateral_offset,
            lateral_std_dev,
        }
    }

    /// Dispersion contour for this club around an aim target.
    pub fn dispersion(
        &self,
        target: GeoPoint,
        sigma: f64,
        point_count: usize,
    ) -> Result<DispersionPolygon, DomainError> {
        dispersion_ellipse(
            target,
            self.average_lateral_offset,
            self.carry_std_dev,
            self.lateral_std_dev,
            sigma,
            point_count,
        )
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ClubTableError {
    #[error("duplicate club name {0:?}")]
    DuplicateName(String),
}

/// Static club reference data, keyed by unique name.
///
/// Serialized as a plain list of profiles; deserialization rebuilds the name
/// index and rejects duplicate names.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<ClubProfile>", into = "Vec<ClubProfile>")]
pub struct ClubTable {
    pub profiles: Vec<ClubProfile>,
    name_index: HashMap<String, usize>,
}

impl TryFrom<Vec<ClubProfile>> for ClubTable {
    type Error = ClubTableError;

    fn try_from(profiles: Vec<ClubProfile>) -> Result<Self, Self::Error> {
        ClubTable::new(profiles)
    }
}

impl From<ClubTable> for Vec<ClubProfile> {
    fn from(table: ClubTable) -> Self {
        table.profiles
    }
}

impl ClubTable {
    pub fn new(profiles: Vec<ClubProfile>) -> Result<Self, ClubTableError> {
        let mut table = ClubTable {
            profiles,
            name_index: HashMap::new(),
        };
        table.rebuild_indices()?;
        Ok(table)
    }

    /// The reference bag shipped with the engine.
    pub fn builtin() -> Self {
        let profiles = vec![
            ClubProfile::new("5-Wood", 218.5, 2.5, 2.3, 6.2),
            ClubProfile::new("4-Iron", 179.8, 9.6, 15.6, 19.8),
            ClubProfile::new("5-Iron", 169.6, 2.8, 21.0, 15.1),
            ClubProfile::new("7-Iron", 151.0, 1.8, 10.4, 5.3),
            ClubProfile::new("10-Iron (PW)", 123.0, 1.6, 2.0, 1.9),
            ClubProfile::new("LW", 88.8, 2.6, 0.5, 1.2),
        ];
        let name_index = profiles
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.name.clone(), idx))
            .collect();
        ClubTable {
            profiles,
            name_index,
        }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ClubProfile> {
        self.name_index.get(name).map(|&idx| &self.profiles[idx])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClubProfile> {
        self.profiles.iter()
    }

    pub fn rebuild_indices(&mut self) -> Result<(), ClubTableError> {
        let mut index = HashMap::with_capacity(self.profiles.len());
        for (idx, profile) in self.profiles.iter().enumerate() {
            if index.insert(profile.name.clone(), idx).is_some() {
                return Err(ClubTableError::DuplicateName(profile.name.clone()));
            }
        }
        self.name_index = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookup_by_name() {
        let table = ClubTable::builtin();
        assert_eq!(table.len(), 6);
        let seven = table.get("7-Iron").expect("7-Iron");
        assert_eq!(seven.average_carry, 151.0);
        assert_eq!(seven.lateral_std_dev, 5.3);
        assert!(table.get("Driver").is_none());
        assert_eq!(table.names().next(), Some("5-Wood"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = ClubTable::new(vec![
            ClubProfile::new("LW", 88.8, 2.6, 0.5, 1.2),
            ClubProfile::new("LW", 90.0, 2.0, 0.0, 1.0),
        ])
        .unwrap_err();
        assert_eq!(err, ClubTableError::DuplicateName("LW".into()));
    }

    #[test]
    fn profile_dispersion_uses_lateral_bias() {
        let target = GeoPoint::new(36.5670, -121.9450).unwrap();
        let lw = ClubTable::builtin().get("LW").cloned().unwrap();
        let ring = lw.dispersion(target, 1.0, 18).unwrap();
        assert_eq!(ring.len(), 19);
        assert!(ring.center.longitude() > target.longitude());
    }

    #[test]
    fn deserialized_table_is_indexed() {
        let json = serde_json::to_string(&ClubTable::builtin()).unwrap();
        assert!(json.starts_with('['));
        let table: ClubTable = serde_json::from_str(&json).unwrap();
        assert_eq!(table.get("5-Iron").unwrap().average_carry, 169.6);

        let dup = r#"[
            {"name":"LW","average_carry":88.8,"carry_std_dev":2.6,
             "average_lateral_offset":0.5,"lateral_std_dev":1.2},
            {"name":"LW","average_carry":90.0,"carry_std_dev":2.0,
             "average_lateral_offset":0.0,"lateral_std_dev":1.0}
        ]"#;
        let err = serde_json::from_str::<ClubTable>(dup).unwrap_err();
        assert!(err.to_string().contains("duplicate club name"));
    }
}
