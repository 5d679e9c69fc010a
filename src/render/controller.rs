use log::debug;
use thiserror::Error;

use crate::aim::AimState;
use crate::clubs::ClubTable;
use crate::render::frame::{RenderFrame, RenderSettings};
use crate::{DomainError, GeoPoint};

/// Receives finished frames, e.g. a map widget drawing over satellite tiles.
pub trait FrameSink {
    fn present(&mut self, frame: &RenderFrame);
}

impl FrameSink for Vec<RenderFrame> {
    fn present(&mut self, frame: &RenderFrame) {
        self.push(frame.clone());
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("unknown club {0:?}")]
    UnknownClub(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Owns the aim state and club selection; turns position fixes and clicks
/// into state changes, and state into frames.
#[derive(Clone, Debug)]
pub struct AimController {
    aim: AimState,
    club: String,
    settings: RenderSettings,
}

impl AimController {
    pub fn new(aim: AimState, club: impl Into<String>, settings: RenderSettings) -> Self {
        AimController {
            aim,
            club: club.into(),
            settings,
        }
    }

    pub fn aim(&self) -> &AimState {
        &self.aim
    }

    pub fn club(&self) -> &str {
        &self.club
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// A new fix from the live position source.
    pub fn on_position(&mut self, origin: GeoPoint) {
        self.aim.update_origin(origin);
    }

    /// The user clicked a new aim point.
    pub fn on_click(&mut self, target: GeoPoint) {
        debug!("re-aim to {}", target);
        self.aim.re_aim(target);
    }

    pub fn select_club(&mut self, table: &ClubTable, name: &str) -> Result<(), RenderError> {
        if table.get(name).is_none() {
            return Err(RenderError::UnknownClub(name.to_string()));
        }
        self.club = name.to_string();
        Ok(())
    }

    pub fn frame(&self, table: &ClubTable) -> Result<RenderFrame, RenderError> {
        let club = table
            .get(&self.club)
            .ok_or_else(|| RenderError::UnknownClub(self.club.clone()))?;
        Ok(RenderFrame::compute(&self.aim, club, &self.settings)?)
    }

    /// Computes the current frame and hands it to `sink`.
    pub fn render<S: FrameSink>(&self, table: &ClubTable, sink: &mut S) -> Result<(), RenderError> {
        let frame = self.frame(table)?;
        sink.present(&frame);
        Ok(())
    }
}
