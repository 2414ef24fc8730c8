use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use internhub_types::api::{
    ApplicationResponse, Claims, CompanyApplicationResponse, StudentApplicationResponse,
    SubmitApplicationRequest, SubmitApplicationResponse, UpdateStatusRequest,
};
use internhub_types::models::{ApplicationStatus, UserType};

use crate::auth::AppState;
use crate::error::{ApiError, ApiResult};
use crate::internships::parse_id;
use crate::run_blocking;

/// Transition validation for application status updates, evaluated as
/// `policy(current, requested)`. The default permits any overwrite, matching
/// the unconstrained point-write model; stricter policies plug in here.
pub type StatusPolicy = fn(ApplicationStatus, ApplicationStatus) -> bool;

pub fn allow_any_transition(_from: ApplicationStatus, _to: ApplicationStatus) -> bool {
    true
}

/// Submit an application (students only). The referenced internship must
/// exist; a second submission for the same pair is a Conflict.
pub async fn submit_application(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SubmitApplicationRequest>,
) -> ApiResult<impl IntoResponse> {
    if claims.user_type != UserType::Student {
        return Err(ApiError::Forbidden(
            "Only students can apply to internships".into(),
        ));
    }
    let internship_id = req
        .internship_id
        .ok_or_else(|| ApiError::BadRequest("internship_id is required".into()))?;

    let student_id = claims.sub.to_string();
    let iid = internship_id.to_string();
    let row = run_blocking(move || {
        if state.db.get_internship(&iid)?.is_none() {
            return Err(ApiError::NotFound("Internship not found".into()));
        }
        if state.db.application_exists(&student_id, &iid)? {
            return Err(ApiError::Conflict("Application already submitted".into()));
        }
        Ok(state.db.create_application(&student_id, &iid)?)
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitApplicationResponse {
            student_id: claims.sub,
            internship_id,
            application_date: row.application_date,
            status: row.status,
        }),
    ))
}

/// A student's own applications, enriched with posting and company fields.
pub async fn student_applications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<impl IntoResponse> {
    if claims.user_type != UserType::Student {
        return Err(ApiError::Forbidden(
            "Only students can view their applications".into(),
        ));
    }

    let student_id = claims.sub.to_string();
    let rows = run_blocking(move || Ok(state.db.applications_for_student(&student_id)?)).await?;

    let applications: Vec<StudentApplicationResponse> = rows
        .into_iter()
        .map(|row| StudentApplicationResponse {
            internship_id: parse_id(&row.internship_id, "internship"),
            application_date: row.application_date,
            status: row.status,
            title: row.title,
            location: row.location,
            min_salary: row.min_salary,
            max_salary: row.max_salary,
            company_id: parse_id(&row.company_id, "company"),
            company_name: row.company_name,
        })
        .collect();

    Ok(Json(applications))
}

/// Raw application rows for one internship, restricted to its owner.
pub async fn internship_applications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(internship_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    if claims.user_type != UserType::Company {
        return Err(ApiError::Forbidden(
            "Only companies can view applications".into(),
        ));
    }

    let id = internship_id.to_string();
    let company_id = claims.sub.to_string();
    let rows = run_blocking(move || {
        let internship = state
            .db
            .get_internship(&id)?
            .ok_or_else(|| ApiError::NotFound("Internship not found".into()))?;
        if internship.company_id != company_id {
            return Err(ApiError::Forbidden(
                "You can only view applications for your own internships".into(),
            ));
        }
        Ok(state.db.applications_for_internship(&id)?)
    })
    .await?;

    let applications: Vec<ApplicationResponse> = rows
        .into_iter()
        .map(|row| ApplicationResponse {
            student_id: parse_id(&row.student_id, "student"),
            internship_id: parse_id(&row.internship_id, "internship"),
            application_date: row.application_date,
            status: row.status,
        })
        .collect();

    Ok(Json(applications))
}

/// Every application across a company's internships, with each applicant's
/// full profile attached. Skills, experience and education are fetched in one
/// batched query per table over the whole student set, then grouped in
/// memory instead of a round trip per row.
pub async fn company_applications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(company_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    if claims.user_type != UserType::Company {
        return Err(ApiError::Forbidden(
            "Only companies can view applications".into(),
        ));
    }
    if company_id != claims.sub {
        return Err(ApiError::Forbidden(
            "You can only view your own applications".into(),
        ));
    }

    let cid = company_id.to_string();
    let (rows, skills, experience, education) = run_blocking(move || {
        let rows = state.db.applications_for_company(&cid)?;

        let mut student_ids: Vec<String> = rows.iter().map(|r| r.student_id.clone()).collect();
        student_ids.sort();
        student_ids.dedup();

        let skills = state.db.skills_for_students(&student_ids)?;
        let experience = state.db.experience_for_students(&student_ids)?;
        let education = state.db.education_for_students(&student_ids)?;
        Ok((rows, skills, experience, education))
    })
    .await?;

    // Group the batched rows by student (cheap in-memory work)
    let mut skill_map: HashMap<String, Vec<String>> = HashMap::new();
    for (student_id, skill) in skills {
        skill_map.entry(student_id).or_default().push(skill);
    }

    let mut experience_map: HashMap<String, Vec<serde_json::Value>> = HashMap::new();
    for exp in experience {
        let duration = format!(
            "{} - {}",
            exp.start_date.as_deref().unwrap_or(""),
            exp.end_date.as_deref().unwrap_or("Present")
        );
        experience_map
            .entry(exp.student_id)
            .or_default()
            .push(json!({
                "title": exp.title,
                "company": exp.company_name,
                "duration": duration,
                "description": exp.description,
                "type": exp.employment_type,
            }));
    }

    let mut education_map: HashMap<String, Vec<serde_json::Value>> = HashMap::new();
    for edu in education {
        let duration = format!(
            "{} - {}",
            edu.start_date.as_deref().unwrap_or(""),
            edu.end_date.as_deref().unwrap_or("Present")
        );
        education_map
            .entry(edu.student_id)
            .or_default()
            .push(json!({
                "institution": edu.institution,
                "degree": edu.diploma,
                "location": edu.location,
                "duration": duration,
                "gpa": edu.gpa.map(|g| format!("{}/4.0", g)),
                "courses": edu.courses,
            }));
    }

    let applications: Vec<CompanyApplicationResponse> = rows
        .into_iter()
        .map(|row| {
            let skills = skill_map
                .get(&row.student_id)
                .map(|s| s.join(","))
                .unwrap_or_default();
            let experience = serde_json::Value::Array(
                experience_map.get(&row.student_id).cloned().unwrap_or_default(),
            )
            .to_string();
            let education = serde_json::Value::Array(
                education_map.get(&row.student_id).cloned().unwrap_or_default(),
            )
            .to_string();

            CompanyApplicationResponse {
                student_id: parse_id(&row.student_id, "student"),
                internship_id: parse_id(&row.internship_id, "internship"),
                application_date: row.application_date,
                status: row.status,
                title: row.title,
                location: row.location,
                min_salary: row.min_salary,
                max_salary: row.max_salary,
                company_id: parse_id(&row.company_id, "company"),
                company_name: row.company_name,
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
                phone: row.phone,
                about: row.about,
                university: row.university,
                degree: row.degree,
                graduation_year: row.graduation_year,
                gpa: row.gpa,
                portfolio_url: row.portfolio_url,
                linkedin_url: row.linkedin_url,
                github_url: row.github_url,
                skills,
                experience,
                education,
            }
        })
        .collect();

    Ok(Json(applications))
}

/// Overwrite an application's status. Only the company owning the target
/// internship may do this; the not-found checks run before the ownership
/// comparison so an absent resource never masquerades as a permission error.
pub async fn update_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<impl IntoResponse> {
    if claims.user_type != UserType::Company {
        return Err(ApiError::Forbidden(
            "Only companies can update application status".into(),
        ));
    }
    let (Some(student_id), Some(internship_id), Some(status)) =
        (req.student_id, req.internship_id, req.status)
    else {
        return Err(ApiError::BadRequest(
            "student_id, internship_id and status are required".into(),
        ));
    };
    let status: ApplicationStatus = status.parse().map_err(|_| {
        ApiError::BadRequest("status must be 'Pending', 'Accepted' or 'Rejected'".into())
    })?;

    let sid = student_id.to_string();
    let iid = internship_id.to_string();
    let company_id = claims.sub.to_string();
    let policy = state.status_policy;
    run_blocking(move || {
        let internship = state
            .db
            .get_internship(&iid)?
            .ok_or_else(|| ApiError::NotFound("Internship not found".into()))?;
        if internship.company_id != company_id {
            return Err(ApiError::Forbidden(
                "You can only update applications for your own internships".into(),
            ));
        }

        let application = state
            .db
            .get_application(&sid, &iid)?
            .ok_or_else(|| ApiError::NotFound("Application not found".into()))?;
        let current: ApplicationStatus = application
            .status
            .parse()
            .unwrap_or(ApplicationStatus::Pending);
        if !policy(current, status) {
            return Err(ApiError::Conflict(format!(
                "Status transition {} -> {} is not allowed",
                current, status
            )));
        }

        state.db.update_application_status(&sid, &iid, status)?;
        Ok(())
    })
    .await?;

    Ok(Json(json!({ "message": "Application status updated" })))
}
