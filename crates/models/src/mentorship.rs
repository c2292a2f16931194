use crate::transition::{TransitionError, ValueError};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle of a mentor/mentee pairing
///
/// ```text
/// Pending ──accept──▶ Active ──complete──▶ Completed
///    │                  │
///    ├──decline──▶ Rejected
///    └──cancel───▶ Cancelled ◀──cancel──┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[cfg_attr(
    feature = "database",
    derive(sea_orm::EnumIter, sea_orm::DeriveActiveEnum),
    sea_orm(rs_type = "String", db_type = "Text")
)]
pub enum MentorshipStatus {
    #[cfg_attr(feature = "database", sea_orm(string_value = "pending"))]
    Pending,
    #[cfg_attr(feature = "database", sea_orm(string_value = "active"))]
    Active,
    #[cfg_attr(feature = "database", sea_orm(string_value = "rejected"))]
    Rejected,
    #[cfg_attr(feature = "database", sea_orm(string_value = "completed"))]
    Completed,
    #[cfg_attr(feature = "database", sea_orm(string_value = "cancelled"))]
    Cancelled,
}

impl MentorshipStatus {
    const ENTITY: &'static str = "mentorship";

    /// The mentor accepts or declines a pending request
    pub fn respond(self, accept: bool) -> Result<Self, TransitionError> {
        match self {
            Self::Pending if accept => Ok(Self::Active),
            Self::Pending => Ok(Self::Rejected),
            _ => Err(TransitionError::new(Self::ENTITY, "respond to", self)),
        }
    }

    pub fn complete(self) -> Result<Self, TransitionError> {
        match self {
            Self::Active => Ok(Self::Completed),
            _ => Err(TransitionError::new(Self::ENTITY, "complete", self)),
        }
    }

    /// Either party may walk away before the mentorship has ended
    pub fn cancel(self) -> Result<Self, TransitionError> {
        match self {
            Self::Pending | Self::Active => Ok(Self::Cancelled),
            _ => Err(TransitionError::new(Self::ENTITY, "cancel", self)),
        }
    }

    /// Guards operations that only make sense while the mentorship is running
    pub fn ensure_active(self, action: &'static str) -> Result<(), TransitionError> {
        match self {
            Self::Active => Ok(()),
            _ => Err(TransitionError::new(Self::ENTITY, action, self)),
        }
    }

    pub fn ensure_completed(self, action: &'static str) -> Result<(), TransitionError> {
        match self {
            Self::Completed => Ok(()),
            _ => Err(TransitionError::new(Self::ENTITY, action, self)),
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Cancelled)
    }
}

/// Which side of a mentorship the caller is acting as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Mentor,
    Mentee,
}

impl Role {
    /// Resolves the caller's role given both parties, `None` for outsiders
    pub fn of(user_id: &str, mentor_id: &str, mentee_id: &str) -> Option<Self> {
        if user_id == mentor_id {
            Some(Self::Mentor)
        } else if user_id == mentee_id {
            Some(Self::Mentee)
        } else {
            None
        }
    }
}

/// Validates a progress percentage
pub fn check_progress(progress: i32) -> Result<i32, ValueError> {
    if (0..=100).contains(&progress) {
        Ok(progress)
    } else {
        Err(ValueError::Progress(progress))
    }
}
