//! Cutoff windows
//!
//! A `CutoffWindow` is configuration: four day offsets counted back from
//! "now". `Cutoffs` is the same window pinned to absolute instants, computed
//! once per run so every issue in the run sees identical boundaries.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a cutoff window is not usable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CutoffError {
    #[error(
        "cutoff windows must strictly increase (current < grace < stale < horizon), \
         got {current}/{grace}/{stale}/{horizon} days"
    )]
    NotIncreasing {
        current: u32,
        grace: u32,
        stale: u32,
        horizon: u32,
    },

    #[error("cutoff of {days} days is out of range (at most {MAX_CUTOFF_DAYS} days)")]
    OutOfRange { days: u32 },
}

/// Largest accepted day offset, one century
pub const MAX_CUTOFF_DAYS: u32 = 36_525;

/// Day offsets, counted back from now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutoffWindow {
    /// Activity within this many days counts as "recently updated"
    #[serde(default = "default_current_days")]
    pub current_days: u32,

    /// Activity within this many days is in the grace period
    #[serde(default = "default_grace_days")]
    pub grace_days: u32,

    /// Activity within this many days earns the first notice
    #[serde(default = "default_stale_days")]
    pub stale_days: u32,

    /// Bot comments older than this are left alone
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
}

fn default_current_days() -> u32 {
    3
}

fn default_grace_days() -> u32 {
    7
}

fn default_stale_days() -> u32 {
    14
}

fn default_horizon_days() -> u32 {
    35
}

impl Default for CutoffWindow {
    fn default() -> Self {
        Self {
            current_days: default_current_days(),
            grace_days: default_grace_days(),
            stale_days: default_stale_days(),
            horizon_days: default_horizon_days(),
        }
    }
}

impl CutoffWindow {
    /// Check that the windows strictly increase and stay within range
    pub fn validate(&self) -> Result<(), CutoffError> {
        if self.horizon_days > MAX_CUTOFF_DAYS {
            return Err(CutoffError::OutOfRange {
                days: self.horizon_days,
            });
        }

        let increasing = self.current_days < self.grace_days
            && self.grace_days < self.stale_days
            && self.stale_days < self.horizon_days;

        if increasing {
            Ok(())
        } else {
            Err(CutoffError::NotIncreasing {
                current: self.current_days,
                grace: self.grace_days,
                stale: self.stale_days,
                horizon: self.horizon_days,
            })
        }
    }

    /// Pin the window to absolute instants relative to `now`
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<Cutoffs, CutoffError> {
        self.validate()?;

        let before = |days: u32| {
            Duration::try_days(i64::from(days))
                .and_then(|offset| now.checked_sub_signed(offset))
                .ok_or(CutoffError::OutOfRange { days })
        };
        Ok(Cutoffs {
            current: before(self.current_days)?,
            grace_end: before(self.grace_days)?,
            stale_end: before(self.stale_days)?,
            horizon: before(self.horizon_days)?,
        })
    }
}

/// Absolute cutoff instants; later fields are further in the past
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cutoffs {
    pub current: DateTime<Utc>,
    pub grace_end: DateTime<Utc>,
    pub stale_end: DateTime<Utc>,
    pub horizon: DateTime<Utc>,
}
