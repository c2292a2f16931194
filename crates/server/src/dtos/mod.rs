pub mod analysis;
pub mod dashboard;
pub mod mentor;
pub mod mentorship;
pub mod review;
pub mod session;
