use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use internhub_types::api::{
    Claims, SaveInternshipRequest, SavedCheckResponse, SavedCountResponse,
    SavedInternshipResponse,
};
use internhub_types::models::UserType;

use crate::auth::AppState;
use crate::error::{ApiError, ApiResult};
use crate::internships::{internship_response, parse_id};
use crate::run_blocking;

fn require_student(claims: &Claims, action: &str) -> ApiResult<()> {
    if claims.user_type != UserType::Student {
        return Err(ApiError::Forbidden(format!(
            "Only students can {} internships",
            action
        )));
    }
    Ok(())
}

pub async fn list_saved(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<impl IntoResponse> {
    require_student(&claims, "view saved")?;

    let student_id = claims.sub.to_string();
    let rows = run_blocking(move || Ok(state.db.saved_for_student(&student_id)?)).await?;

    let saved: Vec<SavedInternshipResponse> = rows
        .into_iter()
        .map(|row| SavedInternshipResponse {
            student_id: parse_id(&row.student_id, "student"),
            internship_id: parse_id(&row.internship.id, "internship"),
            saved_date: row.saved_date,
            internship: internship_response(row.internship, Some(row.company_name), row.industry),
        })
        .collect();

    Ok(Json(saved))
}

/// Duplicate saves are a Conflict, not a silent success: the existence check
/// runs first and the composite key backs it up.
pub async fn save_internship(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SaveInternshipRequest>,
) -> ApiResult<impl IntoResponse> {
    require_student(&claims, "save")?;
    let internship_id = req
        .internship_id
        .ok_or_else(|| ApiError::BadRequest("internship_id is required".into()))?;

    let student_id = claims.sub.to_string();
    let iid = internship_id.to_string();
    run_blocking(move || {
        if state.db.get_internship(&iid)?.is_none() {
            return Err(ApiError::NotFound("Internship not found".into()));
        }
        if state.db.is_saved(&student_id, &iid)? {
            return Err(ApiError::Conflict("Internship is already saved".into()));
        }
        state.db.save_internship(&student_id, &iid)?;
        Ok(())
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Internship saved",
            "student_id": claims.sub,
            "internship_id": internship_id,
        })),
    ))
}

pub async fn unsave_internship(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(internship_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require_student(&claims, "unsave")?;

    let student_id = claims.sub.to_string();
    let iid = internship_id.to_string();
    run_blocking(move || {
        if !state.db.unsave_internship(&student_id, &iid)? {
            return Err(ApiError::NotFound("Saved internship not found".into()));
        }
        Ok(())
    })
    .await?;

    Ok(Json(json!({
        "message": "Internship removed from saved list",
        "student_id": claims.sub,
        "internship_id": internship_id,
    })))
}

pub async fn check_saved(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(internship_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require_student(&claims, "check saved")?;

    let student_id = claims.sub.to_string();
    let iid = internship_id.to_string();
    let is_saved = run_blocking(move || Ok(state.db.is_saved(&student_id, &iid)?)).await?;

    Ok(Json(SavedCheckResponse {
        internship_id,
        is_saved,
    }))
}

pub async fn saved_count(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<impl IntoResponse> {
    require_student(&claims, "count saved")?;

    let student_id = claims.sub.to_string();
    let count = run_blocking(move || Ok(state.db.saved_count(&student_id)?)).await?;

    Ok(Json(SavedCountResponse { count }))
}
