use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use internhub_db::models::StudentRow;
use internhub_types::api::{
    Claims, DeleteEducationRequest, EducationRequest, EducationResponse, ExperienceRequest,
    ExperienceResponse, SkillRequest, StudentFullProfileResponse, StudentProfileResponse,
    UpdateStudentRequest,
};
use internhub_types::models::UserType;

use crate::auth::AppState;
use crate::error::{ApiError, ApiResult};
use crate::internships::parse_id;
use crate::run_blocking;

fn require_student(claims: &Claims) -> ApiResult<String> {
    if claims.user_type != UserType::Student {
        return Err(ApiError::Forbidden(
            "Only students can access student profiles".into(),
        ));
    }
    Ok(claims.sub.to_string())
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<impl IntoResponse> {
    let student_id = require_student(&claims)?;

    let row = run_blocking(move || {
        state
            .db
            .get_student(&student_id)?
            .ok_or_else(|| ApiError::NotFound("Student not found".into()))
    })
    .await?;

    Ok(Json(profile_response(row)))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateStudentRequest>,
) -> ApiResult<impl IntoResponse> {
    let student_id = require_student(&claims)?;

    run_blocking(move || {
        if !state.db.update_student(&student_id, &req)? {
            return Err(ApiError::NotFound("Student not found".into()));
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
    let student_id = require_student(&claims)?;

    let (student, education, skills, experience) = run_blocking(move || {
        let student = state
            .db
            .get_student(&student_id)?
            .ok_or_else(|| ApiError::NotFound("Student not found".into()))?;
        let education = state.db.education_for_student(&student_id)?;
        let skills = state.db.skills_for_student(&student_id)?;
        let experience = state.db.experience_for_student(&student_id)?;
        Ok((student, education, skills, experience))
    })
    .await?;

    Ok(Json(StudentFullProfileResponse {
        profile: profile_response(student),
        education: education
            .into_iter()
            .map(|row| EducationResponse {
                id: parse_id(&row.id, "education"),
                institution: row.institution,
                diploma: row.diploma,
                location: row.location,
                start_date: row.start_date,
                end_date: row.end_date,
                gpa: row.gpa,
                courses: row.courses,
            })
            .collect(),
        skills,
        experience: experience
            .into_iter()
            .map(|row| ExperienceResponse {
                id: parse_id(&row.id, "experience"),
                title: row.title,
                company_name: row.company_name,
                description: row.description,
                start_date: row.start_date,
                end_date: row.end_date,
                employment_type: row.employment_type,
            })
            .collect(),
    }))
}

pub async fn add_education(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<EducationRequest>,
) -> ApiResult<impl IntoResponse> {
    let student_id = require_student(&claims)?;

    let id = Uuid::new_v4().to_string();
    run_blocking(move || {
        state.db.add_education(&id, &student_id, &req)?;
        Ok(())
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Education added" })),
    ))
}

pub async fn delete_education(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<DeleteEducationRequest>,
) -> ApiResult<impl IntoResponse> {
    let student_id = require_student(&claims)?;

    run_blocking(move || {
        if !state
            .db
            .delete_education(&student_id, &req.institution, &req.diploma)?
        {
            return Err(ApiError::NotFound("Education entry not found".into()));
        }
        Ok(())
    })
    .await?;

    Ok(Json(json!({ "message": "Education removed" })))
}

pub async fn add_skill(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SkillRequest>,
) -> ApiResult<impl IntoResponse> {
    let student_id = require_student(&claims)?;
    if req.skill.is_empty() {
        return Err(ApiError::BadRequest("skill is required".into()));
    }

    run_blocking(move || {
        state.db.add_skill(&student_id, &req.skill)?;
        Ok(())
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Skill added" })),
    ))
}

pub async fn delete_skill(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(skill): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let student_id = require_student(&claims)?;

    run_blocking(move || {
        if !state.db.delete_skill(&student_id, &skill)? {
            return Err(ApiError::NotFound("Skill not found".into()));
        }
        Ok(())
    })
    .await?;

    Ok(Json(json!({ "message": "Skill removed" })))
}

pub async fn add_experience(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ExperienceRequest>,
) -> ApiResult<impl IntoResponse> {
    let student_id = require_student(&claims)?;

    let id = Uuid::new_v4().to_string();
    run_blocking(move || {
        state.db.add_experience(&id, &student_id, &req)?;
        Ok(())
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Professional experience added" })),
    ))
}

pub async fn delete_experience(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(experience_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let student_id = require_student(&claims)?;

    let id = experience_id.to_string();
    run_blocking(move || {
        if !state.db.delete_experience(&id, &student_id)? {
            return Err(ApiError::NotFound("Experience entry not found".into()));
        }
        Ok(())
    })
    .await?;

    Ok(Json(json!({ "message": "Experience removed" })))
}

fn profile_response(row: StudentRow) -> StudentProfileResponse {
    StudentProfileResponse {
        student_id: parse_id(&row.id, "student"),
        first_name: row.first_name,
        last_name: row.last_name,
        phone: row.phone,
        about: row.about,
        university: row.university,
        degree: row.degree,
        graduation_year: row.graduation_year,
        gpa: row.gpa,
        portfolio_url: row.portfolio_url,
        linkedin_url: row.linkedin_url,
        github_url: row.github_url,
    }
}
