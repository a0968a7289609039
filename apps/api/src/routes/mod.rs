pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::auth::handlers as auth;
use crate::candidates::handlers as candidates;
use crate::interviews::handlers as interviews;
use crate::jobs::handlers as jobs;
use crate::screening::handlers as screening;
use crate::state::AppState;

/// Multipart resume batches are larger than axum's 2 MB default.
const RESUME_UPLOAD_LIMIT: usize = 25 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/password", put(auth::handle_change_password))
        .route("/api/v1/auth/users", post(auth::handle_create_user))
        .route(
            "/api/v1/auth/users/:id/password",
            put(auth::handle_reset_password),
        )
        // Job directory
        .route(
            "/api/v1/jobs",
            post(jobs::handle_create_job).get(jobs::handle_list_jobs),
        )
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job)
                .put(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
        // Screening
        .route("/api/v1/screening/match", post(screening::handle_match))
        .route(
            "/api/v1/screening/resumes",
            post(screening::handle_screen_resumes)
                .layer(DefaultBodyLimit::max(RESUME_UPLOAD_LIMIT)),
        )
        // Shortlist
        .route(
            "/api/v1/jobs/:id/candidates",
            get(candidates::handle_list_candidates),
        )
        .route(
            "/api/v1/candidates/:id/status",
            patch(candidates::handle_update_candidate_status),
        )
        // Interviews
        .route(
            "/api/v1/interviews",
            post(interviews::handle_schedule_interview).get(interviews::handle_list_interviews),
        )
        .route(
            "/api/v1/interviews/:id/status",
            patch(interviews::handle_update_interview_status),
        )
        .with_state(state)
}
