use crate::transition::{TransitionError, ValueError};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle of a single mentoring session
///
/// Completed and Cancelled are both terminal and mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[cfg_attr(
    feature = "database",
    derive(sea_orm::EnumIter, sea_orm::DeriveActiveEnum),
    sea_orm(rs_type = "String", db_type = "Text")
)]
pub enum SessionStatus {
    #[cfg_attr(feature = "database", sea_orm(string_value = "scheduled"))]
    Scheduled,
    #[cfg_attr(feature = "database", sea_orm(string_value = "completed"))]
    Completed,
    #[cfg_attr(feature = "database", sea_orm(string_value = "cancelled"))]
    Cancelled,
}

impl SessionStatus {
    const ENTITY: &'static str = "session";

    pub fn complete(self) -> Result<Self, TransitionError> {
        match self {
            Self::Scheduled => Ok(Self::Completed),
            _ => Err(TransitionError::new(Self::ENTITY, "complete", self)),
        }
    }

    pub fn cancel(self) -> Result<Self, TransitionError> {
        match self {
            Self::Scheduled => Ok(Self::Cancelled),
            _ => Err(TransitionError::new(Self::ENTITY, "cancel", self)),
        }
    }

    pub fn ensure_scheduled(self, action: &'static str) -> Result<(), TransitionError> {
        match self {
            Self::Scheduled => Ok(()),
            _ => Err(TransitionError::new(Self::ENTITY, action, self)),
        }
    }

    pub fn ensure_completed(self, action: &'static str) -> Result<(), TransitionError> {
        match self {
            Self::Completed => Ok(()),
            _ => Err(TransitionError::new(Self::ENTITY, action, self)),
        }
    }
}

/// How the session is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[cfg_attr(
    feature = "database",
    derive(sea_orm::EnumIter, sea_orm::DeriveActiveEnum),
    sea_orm(rs_type = "String", db_type = "Text")
)]
pub enum SessionType {
    #[cfg_attr(feature = "database", sea_orm(string_value = "online"))]
    Online,
    #[cfg_attr(feature = "database", sea_orm(string_value = "in_person"))]
    InPerson,
}

/// Minutes credited for a completed session
pub fn effective_minutes(actual: Option<i32>, scheduled: i32) -> i32 {
    actual.unwrap_or(scheduled)
}

pub fn minutes_to_hours(minutes: i32) -> f64 {
    f64::from(minutes) / 60.0
}

pub fn check_duration(minutes: i32) -> Result<i32, ValueError> {
    if minutes > 0 {
        Ok(minutes)
    } else {
        Err(ValueError::Duration(minutes))
    }
}
