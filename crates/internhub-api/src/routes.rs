use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::auth::{self, AppState};
use crate::middleware::require_auth;
use crate::{applications, companies, internships, saved, students};

/// Build the full API router. Browsing postings and the company directory is
/// public; everything else sits behind the bearer-token middleware.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/internships", get(internships::list_internships))
        .route("/internships/{internship_id}", get(internships::get_internship))
        .route("/companies", get(companies::list_companies))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/internships", post(internships::create_internship))
        .route("/internships/{internship_id}", put(internships::update_internship))
        .route("/internships/{internship_id}", delete(internships::delete_internship))
        .route("/applications", post(applications::submit_application))
        .route("/applications/student", get(applications::student_applications))
        .route(
            "/applications/internship/{internship_id}",
            get(applications::internship_applications),
        )
        .route(
            "/applications/company/{company_id}",
            get(applications::company_applications),
        )
        .route("/applications/status", put(applications::update_status))
        .route("/saved", get(saved::list_saved))
        .route("/saved", post(saved::save_internship))
        .route("/saved/count", get(saved::saved_count))
        .route("/saved/check/{internship_id}", get(saved::check_saved))
        .route("/saved/{internship_id}", delete(saved::unsave_internship))
        .route("/students/me", get(students::get_profile))
        .route("/students/me", put(students::update_profile))
        .route("/students/me/full", get(students::full_profile))
        .route("/students/education", post(students::add_education))
        .route("/students/education", delete(students::delete_education))
        .route("/students/skills", post(students::add_skill))
        .route("/students/skills/{skill}", delete(students::delete_skill))
        .route("/students/experience", post(students::add_experience))
        .route(
            "/students/experience/{experience_id}",
            delete(students::delete_experience),
        )
        .route("/companies/me", get(companies::get_profile))
        .route("/companies/me", put(companies::update_profile))
        .route("/companies/me/full", get(companies::full_profile))
        .route("/companies/benefits", post(companies::add_benefit))
        .route("/companies/benefits", delete(companies::delete_benefit))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    Router::new().merge(public_routes).merge(protected_routes)
}
