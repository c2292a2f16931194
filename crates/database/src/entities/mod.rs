pub mod mentor_profile;
pub mod mentor_review;
pub mod mentoring_session;
pub mod mentorship_relation;
