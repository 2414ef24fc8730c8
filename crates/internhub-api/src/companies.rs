use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use internhub_db::models::CompanyRow;
use internhub_types::api::{
    BenefitRequest, Claims, CompanyDirectoryEntry, CompanyFullProfileResponse,
    CompanyProfileResponse, UpdateCompanyRequest,
};
use internhub_types::models::UserType;

use crate::auth::AppState;
use crate::error::{ApiError, ApiResult};
use crate::internships::parse_id;
use crate::run_blocking;

fn require_company(claims: &Claims) -> ApiResult<String> {
    if claims.user_type != UserType::Company {
        return Err(ApiError::Forbidden(
            "Only companies can access company profiles".into(),
        ));
    }
    Ok(claims.sub.to_string())
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<impl IntoResponse> {
    let company_id = require_company(&claims)?;

    let row = run_blocking(move || {
        state
            .db
            .get_company(&company_id)?
            .ok_or_else(|| ApiError::NotFound("Company not found".into()))
    })
    .await?;

    Ok(Json(profile_response(row)))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateCompanyRequest>,
) -> ApiResult<impl IntoResponse> {
    let company_id = require_company(&claims)?;

    run_blocking(move || {
        if !state.db.update_company(&company_id, &req)? {
            return Err(ApiError::NotFound("Company not found".into()));
        }
        Ok(())
    })
    .await?;

    Ok(Json(json!({ "message": "Profile updated" })))
}

pub async fn full_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<impl IntoResponse> {
    let company_id = require_company(&claims)?;

    let (company, benefits) = run_blocking(move || {
        let company = state
            .db
            .get_company(&company_id)?
            .ok_or_else(|| ApiError::NotFound("Company not found".into()))?;
        let benefits = state.db.benefits_for_company(&company_id)?;
        Ok((company, benefits))
    })
    .await?;

    Ok(Json(CompanyFullProfileResponse {
        profile: profile_response(company),
        benefits,
    }))
}

pub async fn add_benefit(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<BenefitRequest>,
) -> ApiResult<impl IntoResponse> {
    let company_id = require_company(&claims)?;
    if req.benefit.is_empty() {
        return Err(ApiError::BadRequest("benefit is required".into()));
    }

    run_blocking(move || {
        state.db.add_benefit(&company_id, &req.benefit)?;
        Ok(())
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Benefit added" })),
    ))
}

/// Benefits are keyed by their text, so deletion takes the benefit in the
/// body rather than a path segment.
pub async fn delete_benefit(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<BenefitRequest>,
) -> ApiResult<impl IntoResponse> {
    let company_id = require_company(&claims)?;

    run_blocking(move || {
        if !state.db.delete_benefit(&company_id, &req.benefit)? {
            return Err(ApiError::NotFound("Benefit not found".into()));
        }
        Ok(())
    })
    .await?;

    Ok(Json(json!({ "message": "Benefit removed" })))
}

/// Public company directory, no authentication required.
pub async fn list_companies(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let rows = run_blocking(move || Ok(state.db.list_companies()?)).await?;

    let companies: Vec<CompanyDirectoryEntry> = rows
        .into_iter()
        .map(|row| CompanyDirectoryEntry {
            company_id: parse_id(&row.company_id, "company"),
            company_name: row.company_name,
            website: row.website,
            industry: row.industry,
            description: row.description,
            location: row.location,
        })
        .collect();

    Ok(Json(companies))
}

fn profile_response(row: CompanyRow) -> CompanyProfileResponse {
    CompanyProfileResponse {
        company_id: parse_id(&row.id, "company"),
        company_name: row.company_name,
        website: row.website,
        industry: row.industry,
    }
}
