pub mod mentorship;
pub mod rating;
pub mod session;
pub mod transition;
