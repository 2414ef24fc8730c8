use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::warn;
use uuid::Uuid;

use internhub_db::models::InternshipRow;
use internhub_types::api::{
    Claims, CreateInternshipRequest, CreateInternshipResponse, InternshipQuery,
    InternshipResponse, UpdateInternshipRequest,
};
use internhub_types::models::{InternshipStatus, UserType};

use crate::auth::AppState;
use crate::error::{ApiError, ApiResult};
use crate::run_blocking;

/// Public listing: published postings only, filterable and paged.
pub async fn list_internships(
    State(state): State<AppState>,
    Query(query): Query<InternshipQuery>,
) -> ApiResult<impl IntoResponse> {
    let rows = run_blocking(move || Ok(state.db.list_internships(&query)?)).await?;

    let internships: Vec<InternshipResponse> = rows
        .into_iter()
        .map(|row| internship_response(row.internship, Some(row.company_name), row.industry))
        .collect();

    Ok(Json(internships))
}

pub async fn get_internship(
    State(state): State<AppState>,
    Path(internship_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let id = internship_id.to_string();
    let row = run_blocking(move || {
        state
            .db
            .get_internship(&id)?
            .ok_or_else(|| ApiError::NotFound("Internship not found".into()))
    })
    .await?;

    Ok(Json(internship_response(row, None, None)))
}

pub async fn create_internship(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateInternshipRequest>,
) -> ApiResult<impl IntoResponse> {
    if claims.user_type != UserType::Company {
        return Err(ApiError::Forbidden(
            "Only companies can create internships".into(),
        ));
    }
    if req.title.is_none() || req.start_date.is_none() || req.end_date.is_none() || req.location.is_none()
    {
        return Err(ApiError::BadRequest(
            "title, start_date, end_date and location are required".into(),
        ));
    }

    let internship_id = Uuid::new_v4();
    let id = internship_id.to_string();
    let company_id = claims.sub.to_string();
    run_blocking(move || {
        state
            .db
            .create_internship(&id, &company_id, &req, InternshipStatus::Published)?;
        Ok(())
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateInternshipResponse { internship_id }),
    ))
}

pub async fn update_internship(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(internship_id): Path<Uuid>,
    Json(req): Json<UpdateInternshipRequest>,
) -> ApiResult<impl IntoResponse> {
    if claims.user_type != UserType::Company {
        return Err(ApiError::Forbidden(
            "Only companies can update internships".into(),
        ));
    }
    if let Some(status) = &req.status {
        status.parse::<InternshipStatus>().map_err(|_| {
            ApiError::BadRequest("status must be 'Pending' or 'Published'".into())
        })?;
    }

    let id = internship_id.to_string();
    let company_id = claims.sub.to_string();
    run_blocking(move || {
        let internship = state
            .db
            .get_internship(&id)?
            .ok_or_else(|| ApiError::NotFound("Internship not found".into()))?;
        if internship.company_id != company_id {
            return Err(ApiError::Forbidden(
                "You can only update your own internships".into(),
            ));
        }
        state.db.update_internship(&id, &req)?;
        Ok(())
    })
    .await?;

    Ok(Json(serde_json::json!({ "message": "Internship updated" })))
}

/// Cascading delete: the store removes dependent applications and saved rows
/// in the same transaction as the internship itself.
pub async fn delete_internship(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(internship_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    if claims.user_type != UserType::Company {
        return Err(ApiError::Forbidden(
            "Only companies can delete internships".into(),
        ));
    }

    let id = internship_id.to_string();
    let company_id = claims.sub.to_string();
    run_blocking(move || {
        let internship = state
            .db
            .get_internship(&id)?
            .ok_or_else(|| ApiError::NotFound("Internship not found".into()))?;
        if internship.company_id != company_id {
            return Err(ApiError::Forbidden(
                "You can only delete your own internships".into(),
            ));
        }
        state.db.delete_internship(&id)?;
        Ok(())
    })
    .await?;

    Ok(Json(serde_json::json!({ "message": "Internship deleted" })))
}

pub(crate) fn internship_response(
    row: InternshipRow,
    company_name: Option<String>,
    industry: Option<String>,
) -> InternshipResponse {
    InternshipResponse {
        internship_id: parse_id(&row.id, "internship"),
        company_id: parse_id(&row.company_id, "company"),
        title: row.title,
        start_date: row.start_date,
        end_date: row.end_date,
        min_salary: row.min_salary,
        max_salary: row.max_salary,
        description: row.description,
        location: row.location,
        payment: row.payment,
        work_arrangement: row.work_arrangement,
        work_time: row.work_time,
        status: row.status,
        posted_date: row.posted_date,
        company_name,
        industry,
    }
}

pub(crate) fn parse_id(id: &str, entity: &str) -> Uuid {
    id.parse().unwrap_or_else(|e| {
        warn!("Corrupt {} id '{}': {}", entity, id, e);
        Uuid::default()
    })
}
