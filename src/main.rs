use caddie_engine::aim::AimState;
use caddie_engine::clubs::{ClubProfile, ClubTable};
use caddie_engine::config::EngineConfig;
use caddie_engine::data::load_table;
use caddie_engine::dispersion::DispersionPolygon;
use caddie_engine::render::{RenderFrame, RenderSettings};
use caddie_engine::GeoPoint;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use log::{error, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static CONFIG: Lazy<EngineConfig> = Lazy::new(|| {
    EngineConfig::from_env().unwrap_or_else(|err| {
        warn!("Invalid configuration ({err}); using defaults");
        EngineConfig::default()
    })
});

static CLUBS: Lazy<ClubTable> = Lazy::new(|| match &CONFIG.club_table_path {
    Some(path) => load_table(path).unwrap_or_else(|err| {
        error!("Failed to load club table from {}: {err}", path.display());
        ClubTable::builtin()
    }),
    None => ClubTable::builtin(),
});

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum EngineRequest {
    Distance {
        origin: GeoPoint,
        target: GeoPoint,
    },
    Ellipse {
        target: GeoPoint,
        club: String,
        sigma: f64,
        point_count: Option<usize>,
    },
    Frame {
        origin: GeoPoint,
        target: Option<GeoPoint>,
        club: String,
    },
    Clubs,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum EngineResponse {
    Distance {
        yards: f64,
        bearing_degrees: f64,
    },
    Ellipse {
        polygon: DispersionPolygon,
    },
    Frame {
        frame: RenderFrame,
    },
    Clubs {
        clubs: Vec<ClubProfile>,
    },
    Error {
        message: String,
    },
}

fn handle(req: EngineRequest, clubs: &ClubTable, config: &EngineConfig) -> EngineResponse {
    match req {
        EngineRequest::Distance { origin, target } => EngineResponse::Distance {
            yards: origin.distance_yards(&target),
            bearing_degrees: origin.bearing_degrees(&target),
        },
        EngineRequest::Ellipse {
            target,
            club,
            sigma,
            point_count,
        } => {
            let Some(profile) = clubs.get(&club) else {
                return EngineResponse::Error { message: format!("Unknown club {}", club) };
            };
            match profile.dispersion(target, sigma, point_count.unwrap_or(config.point_count)) {
                Ok(polygon) => EngineResponse::Ellipse { polygon },
                Err(err) => EngineResponse::Error { message: err.to_string() },
            }
        }
        EngineRequest::Frame { origin, target, club } => {
            let Some(profile) = clubs.get(&club) else {
                return EngineResponse::Error { message: format!("Unknown club {}", club) };
            };
            let aim = match target {
                Some(target) => AimState::new(origin, target),
                None => match AimState::with_default_target(origin) {
                    Ok(aim) => aim,
                    Err(err) => return EngineResponse::Error { message: err.to_string() },
                },
            };
            let settings = RenderSettings {
                point_count: config.point_count,
                ..RenderSettings::default()
            };
            match RenderFrame::compute(&aim, profile, &settings) {
                Ok(frame) => EngineResponse::Frame { frame },
                Err(err) => EngineResponse::Error { message: err.to_string() },
            }
        }
        EngineRequest::Clubs => EngineResponse::Clubs {
            clubs: clubs.iter().cloned().collect(),
        },
    }
}

async fn handler(event: LambdaEvent<EngineRequest>) -> Result<EngineResponse, Error> {
    Ok(handle(event.payload, &CLUBS, &CONFIG))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let func = service_fn(handler);
    lambda_runtime::run(func).await
}
