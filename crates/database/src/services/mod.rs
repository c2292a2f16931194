pub mod dashboard;
pub mod error;
pub mod mentor_profile;
pub mod mentor_review;
pub mod mentoring_session;
pub mod mentorship;
