use serde::{Deserialize, Serialize};

use crate::clubs::table::{ClubProfile, ClubTable, ClubTableError};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ShotKind {
    Clean,
    Mishit,
}

/// One recorded shot. `offline` is signed, positive to the right.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ShotRecord {
    pub club: String,
    pub carry: f64,
    pub offline: f64,
    pub kind: ShotKind,
    pub shot_no: Option<u32>,
    /// Upload session the shot was merged from, if any.
    pub session: Option<String>,
}

/// Chi-squared quantile (2 degrees of freedom) for a 50% confidence ellipse.
pub const CHI2_50: f64 = 1.386;
/// Chi-squared quantile (2 degrees of freedom) for a 95% confidence ellipse.
pub const CHI2_95: f64 = 5.991;

/// Confidence ellipse fitted to clean shots in (offline, carry) space, yards.
///
/// `angle` is the rotation of the major axis from the offline axis, in
/// radians, within (-pi/2, pi/2].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ShotEllipse {
    pub center_offline: f64,
    pub center_carry: f64,
    pub a: f64,
    pub b: f64,
    pub angle: f64,
}

impl ShotEllipse {
    /// `count` points around the ellipse as (offline, carry) pairs.
    pub fn points(&self, count: usize) -> Vec<(f64, f64)> {
        let (sin_r, cos_r) = self.angle.sin_cos();
        (0..count)
            .map(|i| {
                let t = std::f64::consts::TAU * i as f64 / count as f64;
                let (x, y) = (self.a * t.cos(), self.b * t.sin());
                (
                    self.center_offline + x * cos_r - y * sin_r,
                    self.center_carry + x * sin_r + y * cos_r,
                )
            })
            .collect()
    }
}

/// Fits a confidence ellipse to the clean shots hit with `name` from their
/// sample covariance, scaled by the chi-squared quantile `chi2`.
///
/// Needs at least three clean shots.
pub fn ellipse_from_shots(name: &str, shots: &[ShotRecord], chi2: f64) -> Option<ShotEllipse> {
    let clean: Vec<&ShotRecord> = shots
        .iter()
        .filter(|s| s.club == name && s.kind == ShotKind::Clean)
        .collect();
    if clean.len() < 3 || !chi2.is_finite() || chi2 <= 0.0 {
        return None;
    }

    let n = clean.len() as f64;
    let mx = clean.iter().map(|s| s.offline).sum::<f64>() / n;
    let my = clean.iter().map(|s| s.carry).sum::<f64>() / n;
    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for s in &clean {
        let (dx, dy) = (s.offline - mx, s.carry - my);
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    let (sxx, syy, sxy) = (sxx / (n - 1.0), syy / (n - 1.0), sxy / (n - 1.0));

    let mean = (sxx + syy) / 2.0;
    let spread = (((sxx - syy) / 2.0).powi(2) + sxy * sxy).sqrt();
    let major = mean + spread;
    let minor = (mean - spread).max(0.0);

    Some(ShotEllipse {
        center_offline: mx,
        center_carry: my,
        a: (chi2 * major).sqrt(),
        b: (chi2 * minor).sqrt(),
        angle: 0.5 * (2.0 * sxy).atan2(sxx - syy),
    })
}

/// Estimates a profile from the clean shots hit with `name`.
///
/// Uses the sample standard deviation (n - 1), so at least two clean shots are
/// required.
pub fn profile_from_shots(name: &str, shots: &[ShotRecord]) -> Option<ClubProfile> {
    let clean: Vec<&ShotRecord> = shots
        .iter()
        .filter(|s| s.club == name && s.kind == ShotKind::Clean)
        .collect();
    if clean.len() < 2 {
        return None;
    }

    let carries: Vec<f64> = clean.iter().map(|s| s.carry).collect();
    let offlines: Vec<f64> = clean.iter().map(|s| s.offline).collect();
    let (average_carry, carry_std_dev) = mean_and_std_dev(&carries);
    let (average_lateral_offset, lateral_std_dev) = mean_and_std_dev(&offlines);

    Some(ClubProfile {
        name: name.to_string(),
        average_carry,
        carry_std_dev,
        average_lateral_offset,
        lateral_std_dev,
    })
}

/// One profile per club, in the order clubs first appear in `shots`.
/// Clubs with fewer than two clean shots are left out.
pub fn table_from_shots(shots: &[ShotRecord]) -> Result<ClubTable, ClubTableError> {
    let mut names: Vec<&str> = Vec::new();
    for shot in shots {
        if !names.contains(&shot.club.as_str()) {
            names.push(&shot.club);
        }
    }

    let profiles = names
        .into_iter()
        .filter_map(|name| profile_from_shots(name, shots))
        .collect();
    ClubTable::new(profiles)
}

fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn shot(club: &str, carry: f64, offline: f64, kind: ShotKind) -> ShotRecord {
        ShotRecord {
            club: club.into(),
            carry,
            offline,
            kind,
            shot_no: None,
            session: None,
        }
    }

    #[test]
    fn mishits_are_ignored() {
        let shots = vec![
            shot("7-Iron", 150.0, 8.0, ShotKind::Clean),
            shot("7-Iron", 152.0, 12.0, ShotKind::Clean),
            shot("7-Iron", 151.0, 10.0, ShotKind::Clean),
            shot("7-Iron", 90.0, -40.0, ShotKind::Mishit),
        ];
        let profile = profile_from_shots("7-Iron", &shots).unwrap();
        assert_approx_eq!(profile.average_carry, 151.0, 1e-12);
        assert_approx_eq!(profile.carry_std_dev, 1.0, 1e-12);
        assert_approx_eq!(profile.average_lateral_offset, 10.0, 1e-12);
        assert_approx_eq!(profile.lateral_std_dev, 2.0, 1e-12);
    }

    #[test]
    fn needs_two_clean_shots() {
        let shots = vec![
            shot("LW", 88.0, 0.5, ShotKind::Clean),
            shot("LW", 60.0, 3.0, ShotKind::Mishit),
        ];
        assert!(profile_from_shots("LW", &shots).is_none());
    }

    #[test]
    fn table_keeps_first_seen_order() {
        let shots = vec![
            shot("LW", 88.0, 0.0, ShotKind::Clean),
            shot("5-Iron", 170.0, 20.0, ShotKind::Clean),
            shot("LW", 90.0, 1.0, ShotKind::Clean),
            shot("5-Iron", 168.0, 22.0, ShotKind::Clean),
            shot("Driver", 240.0, 5.0, ShotKind::Clean),
        ];
        let table = table_from_shots(&shots).unwrap();
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec!["LW", "5-Iron"]);
        assert_approx_eq!(table.get("LW").unwrap().average_carry, 89.0, 1e-12);
    }

    #[test]
    fn axis_aligned_shots_give_zero_angle() {
        let shots = vec![
            shot("5-Iron", 150.0, 2.0, ShotKind::Clean),
            shot("5-Iron", 150.0, -2.0, ShotKind::Clean),
            shot("5-Iron", 151.0, 0.0, ShotKind::Clean),
            shot("5-Iron", 149.0, 0.0, ShotKind::Clean),
        ];
        let e = ellipse_from_shots("5-Iron", &shots, CHI2_95).unwrap();
        assert_approx_eq!(e.center_carry, 150.0, 1e-12);
        assert_approx_eq!(e.center_offline, 0.0, 1e-12);
        assert_approx_eq!(e.a, (CHI2_95 * 8.0 / 3.0).sqrt(), 1e-12);
        assert_approx_eq!(e.b, (CHI2_95 * 2.0 / 3.0).sqrt(), 1e-12);
        assert_approx_eq!(e.angle, 0.0, 1e-12);
    }

    #[test]
    fn correlated_shots_rotate_the_ellipse() {
        // Longer shots drift right.
        let shots = vec![
            shot("7-Iron", 148.0, -2.0, ShotKind::Clean),
            shot("7-Iron", 149.0, -1.0, ShotKind::Clean),
            shot("7-Iron", 150.0, 0.5, ShotKind::Clean),
            shot("7-Iron", 151.0, 1.0, ShotKind::Clean),
            shot("7-Iron", 152.5, 2.0, ShotKind::Clean),
            shot("7-Iron", 120.0, -30.0, ShotKind::Mishit),
        ];
        let e95 = ellipse_from_shots("7-Iron", &shots, CHI2_95).unwrap();
        let e50 = ellipse_from_shots("7-Iron", &shots, CHI2_50).unwrap();

        assert!(e95.angle > 0.5 && e95.angle < 1.2, "angle {}", e95.angle);
        assert!(e95.a > e95.b && e95.b > 0.0);
        assert_approx_eq!(e95.angle, e50.angle, 1e-12);
        assert_approx_eq!(e95.a / e50.a, (CHI2_95 / CHI2_50).sqrt(), 1e-12);

        // Points sit on the ellipse: unit Mahalanobis radius in the rotated frame.
        for (x, y) in e95.points(12) {
            let (dx, dy) = (x - e95.center_offline, y - e95.center_carry);
            let (s, c) = e95.angle.sin_cos();
            let u = dx * c + dy * s;
            let v = -dx * s + dy * c;
            assert_approx_eq!((u / e95.a).powi(2) + (v / e95.b).powi(2), 1.0, 1e-9);
        }
    }

    #[test]
    fn ellipse_needs_three_clean_shots() {
        let shots = vec![
            shot("LW", 88.0, 0.5, ShotKind::Clean),
            shot("LW", 89.0, 0.1, ShotKind::Clean),
            shot("LW", 60.0, 3.0, ShotKind::Mishit),
        ];
        assert!(ellipse_from_shots("LW", &shots, CHI2_95).is_none());
    }
}
