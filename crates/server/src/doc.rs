use crate::routes::{
    analysis, auth, dashboard, health, mentor, mentorship, review, root, session,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        auth::me,
        mentor::upsert_my_profile,
        mentor::get_mentor_profile,
        mentorship::request_mentorship,
        mentorship::list_as_mentor,
        mentorship::list_as_mentee,
        mentorship::get_mentorship,
        mentorship::respond,
        mentorship::update_progress,
        mentorship::complete,
        mentorship::cancel,
        mentorship::leave_feedback,
        mentorship::list_sessions,
        session::schedule_session,
        session::list_sessions,
        session::get_session,
        session::update_session,
        session::complete_session,
        session::cancel_session,
        session::leave_feedback,
        review::create_review,
        review::delete_review,
        review::list_mentor_reviews,
        dashboard::mentor_stats,
        analysis::submit_analysis,
        analysis::get_analysis
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service status endpoints"),
        (name = "Authentication", description = "Authentication related endpoints"),
        (name = "Mentors", description = "Mentor profiles"),
        (name = "Mentorship", description = "Mentorship requests and their lifecycle"),
        (name = "Sessions", description = "Mentoring sessions"),
        (name = "Reviews", description = "Mentor reviews and rating aggregates"),
        (name = "Dashboard", description = "Mentor dashboard statistics"),
        (name = "Analysis", description = "Queued CV analysis"),
    ),
    info(
        title = "GradLink Mentorship API",
        version = "0.1.0",
        description = "Mentor profiles, mentorships, sessions and reviews for GradLink",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
