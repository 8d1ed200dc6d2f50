//! Passive detection markers written by seekers.
use bevy::prelude::*;
use log::debug;
use serde::Serialize;

/// Per-entity detection state: detected, closest, furthest.
///
/// Flags start false and are only ever written by seekers during scans.
/// Setters perform no validation; any caller may set any flag. The last
/// seeker to scan in a tick wins when several mark the same entity.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Wanted {
    detected: bool,
    closest: bool,
    furthest: bool,
}

impl Wanted {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_detected(&self) -> bool {
        self.detected
    }

    pub fn set_is_detected(&mut self, detected: bool) {
        self.detected = detected;
    }

    pub fn is_closest(&self) -> bool {
        self.closest
    }

    pub fn set_is_closest(&mut self, closest: bool) {
        if closest && !self.closest {
            debug!("wanted: marked closest");
        }
        self.closest = closest;
    }

    pub fn is_furthest(&self) -> bool {
        self.furthest
    }

    pub fn set_is_furthest(&mut self, furthest: bool) {
        if furthest && !self.furthest {
            debug!("wanted: marked furthest");
        }
        self.furthest = furthest;
    }

    /// Resets all three flags, as at the start of a scan.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Marker excluding an entity from visibility checks before any
/// geometric work is done.
#[derive(Component, Debug, Default, Clone, Copy, Serialize)]
pub struct Concealed;
