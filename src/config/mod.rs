use std::path::PathBuf;

use thiserror::Error;

use crate::dispersion::{DEFAULT_POINT_COUNT, MIN_POINT_COUNT};

pub const TILE_URL_VAR: &str = "CADDIE_TILE_URL";
pub const TILE_TOKEN_VAR: &str = "CADDIE_TILE_TOKEN";
pub const CLUB_TABLE_VAR: &str = "CADDIE_CLUB_TABLE";
pub const ELLIPSE_POINTS_VAR: &str = "CADDIE_ELLIPSE_POINTS";

/// Esri World Imagery; needs no token.
pub const DEFAULT_TILE_URL: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be an integer, got {value:?}")]
    NotAnInteger { var: &'static str, value: String },
    #[error("{var} must be at least {min}, got {value}")]
    TooSmall {
        var: &'static str,
        value: usize,
        min: usize,
    },
}

/// Runtime settings, supplied through the environment rather than compiled in.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub tile_url_template: String,
    pub tile_token: Option<String>,
    pub club_table_path: Option<PathBuf>,
    pub point_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            tile_url_template: DEFAULT_TILE_URL.to_string(),
            tile_token: None,
            club_table_path: None,
            point_count: DEFAULT_POINT_COUNT,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = EngineConfig::default();

        if let Some(url) = get(TILE_URL_VAR) {
            config.tile_url_template = url;
        }
        config.tile_token = get(TILE_TOKEN_VAR);
        config.club_table_path = get(CLUB_TABLE_VAR).map(PathBuf::from);

        if let Some(raw) = get(ELLIPSE_POINTS_VAR) {
            let value = raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::NotAnInteger {
                    var: ELLIPSE_POINTS_VAR,
                    value: raw.clone(),
                })?;
            if value < MIN_POINT_COUNT {
                return Err(ConfigError::TooSmall {
                    var: ELLIPSE_POINTS_VAR,
                    value,
                    min: MIN_POINT_COUNT,
                });
            }
            config.point_count = value;
        }

        Ok(config)
    }

    /// Tile URL with `{z}`, `{x}` and `{y}` filled in and the token, if any,
    /// appended as `access_token`.
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> String {
        let url = self
            .tile_url_template
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string());
        match &self.tile_token {
            Some(token) => {
                let sep = if url.contains('?') { '&' } else { '?' };
                format!("{url}{sep}access_token={token}")
            }
            None => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = EngineConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(
            config.tile_url(17, 21000, 50000),
            "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/17/50000/21000"
        );
    }

    #[test]
    fn token_comes_from_environment() {
        let config = EngineConfig::from_lookup(lookup(&[
            (TILE_URL_VAR, "https://tiles.example/{z}/{x}/{y}.jpg?style=sat"),
            (TILE_TOKEN_VAR, "pk.test"),
            (CLUB_TABLE_VAR, "/var/task/clubs.bin"),
            (ELLIPSE_POINTS_VAR, " 36 "),
        ]))
        .unwrap();
        assert_eq!(
            config.tile_url(19, 1, 2),
            "https://tiles.example/19/1/2.jpg?style=sat&access_token=pk.test"
        );
        assert_eq!(config.club_table_path, Some(PathBuf::from("/var/task/clubs.bin")));
        assert_eq!(config.point_count, 36);
    }

    #[test]
    fn rejects_bad_point_counts() {
        assert!(matches!(
            EngineConfig::from_lookup(lookup(&[(ELLIPSE_POINTS_VAR, "many")])),
            Err(ConfigError::NotAnInteger { .. })
        ));
        assert_eq!(
            EngineConfig::from_lookup(lookup(&[(ELLIPSE_POINTS_VAR, "6")])),
            Err(ConfigError::TooSmall {
                var: ELLIPSE_POINTS_VAR,
                value: 6,
                min: 8
            })
        );
    }

    #[test]
    fn blank_token_counts_as_unset() {
        let config = EngineConfig::from_lookup(lookup(&[(TILE_TOKEN_VAR, "  ")])).unwrap();
        assert!(config.tile_token.is_none());
    }
}
