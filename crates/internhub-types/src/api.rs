use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::UserType;

// -- JWT Claims --

/// JWT claims shared between the REST middleware and the auth handlers.
/// Canonical definition lives here in internhub-types to eliminate duplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub user_type: UserType,
    pub exp: usize,
}

// -- Auth --

/// Registration payload. `user_type` stays a plain string so a bad role comes
/// back as a 400 with a readable message instead of a body-rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub user_type: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub profile_pic: Option<String>,
    // Role-specific profile seeds
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub user_type: UserType,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub email: String,
    pub user_type: UserType,
    pub token: String,
}

// -- Internships --

#[derive(Debug, Deserialize)]
pub struct CreateInternshipRequest {
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub min_salary: Option<i64>,
    pub max_salary: Option<i64>,
    pub description: Option<String>,
    pub payment: Option<String>,
    pub work_arrangement: Option<String>,
    pub work_time: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateInternshipResponse {
    pub internship_id: Uuid,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateInternshipRequest {
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub min_salary: Option<i64>,
    pub max_salary: Option<i64>,
    pub description: Option<String>,
    pub payment: Option<String>,
    pub work_arrangement: Option<String>,
    pub work_time: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InternshipResponse {
    pub internship_id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub min_salary: Option<i64>,
    pub max_salary: Option<i64>,
    pub description: Option<String>,
    pub location: String,
    pub payment: Option<String>,
    pub work_arrangement: Option<String>,
    pub work_time: Option<String>,
    pub status: String,
    pub posted_date: String,
    pub company_name: Option<String>,
    pub industry: Option<String>,
}

/// Query filters for the public listing; everything optional, newest first.
#[derive(Debug, Deserialize)]
pub struct InternshipQuery {
    pub location: Option<String>,
    pub work_time: Option<String>,
    pub work_arrangement: Option<String>,
    pub payment: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

fn default_limit() -> u32 {
    20
}

// -- Applications --

#[derive(Debug, Deserialize)]
pub struct SubmitApplicationRequest {
    pub internship_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct SubmitApplicationResponse {
    pub student_id: Uuid,
    pub internship_id: Uuid,
    pub application_date: String,
    pub status: String,
}

/// Application row as a student sees it, enriched with posting and company.
#[derive(Debug, Serialize)]
pub struct StudentApplicationResponse {
    pub internship_id: Uuid,
    pub application_date: String,
    pub status: String,
    pub title: String,
    pub location: String,
    pub min_salary: Option<i64>,
    pub max_salary: Option<i64>,
    pub company_id: Uuid,
    pub company_name: String,
}

#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub student_id: Uuid,
    pub internship_id: Uuid,
    pub application_date: String,
    pub status: String,
}

/// Application row as a company sees it: posting fields plus the applicant's
/// full profile. `skills` is comma-joined; `experience` and `education` are
/// JSON-serialized summaries, most recent start date first.
#[derive(Debug, Serialize)]
pub struct CompanyApplicationResponse {
    pub student_id: Uuid,
    pub internship_id: Uuid,
    pub application_date: String,
    pub status: String,
    pub title: String,
    pub location: String,
    pub min_salary: Option<i64>,
    pub max_salary: Option<i64>,
    pub company_id: Uuid,
    pub company_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub about: Option<String>,
    pub university: Option<String>,
    pub degree: Option<String>,
    pub graduation_year: Option<i64>,
    pub gpa: Option<f64>,
    pub portfolio_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub skills: String,
    pub experience: String,
    pub education: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub student_id: Option<Uuid>,
    pub internship_id: Option<Uuid>,
    pub status: Option<String>,
}

// -- Saved internships --

#[derive(Debug, Deserialize)]
pub struct SaveInternshipRequest {
    pub internship_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct SavedInternshipResponse {
    pub student_id: Uuid,
    pub internship_id: Uuid,
    pub saved_date: String,
    pub internship: InternshipResponse,
}

#[derive(Debug, Serialize)]
pub struct SavedCheckResponse {
    pub internship_id: Uuid,
    pub is_saved: bool,
}

#[derive(Debug, Serialize)]
pub struct SavedCountResponse {
    pub count: i64,
}

// -- Student profile --

#[derive(Debug, Serialize)]
pub struct StudentProfileResponse {
    pub student_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub about: Option<String>,
    pub university: Option<String>,
    pub degree: Option<String>,
    pub graduation_year: Option<i64>,
    pub gpa: Option<f64>,
    pub portfolio_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub about: Option<String>,
    pub university: Option<String>,
    pub degree: Option<String>,
    pub graduation_year: Option<i64>,
    pub gpa: Option<f64>,
    pub portfolio_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EducationRequest {
    pub institution: String,
    pub diploma: String,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub gpa: Option<f64>,
    pub courses: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EducationResponse {
    pub id: Uuid,
    pub institution: String,
    pub diploma: String,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub gpa: Option<f64>,
    pub courses: Option<String>,
}

/// Education rows are keyed by (institution, diploma) for deletion, matching
/// how clients reference them.
#[derive(Debug, Deserialize)]
pub struct DeleteEducationRequest {
    pub institution: String,
    pub diploma: String,
}

#[derive(Debug, Deserialize)]
pub struct SkillRequest {
    pub skill: String,
}

#[derive(Debug, Deserialize)]
pub struct ExperienceRequest {
    pub title: String,
    pub company_name: String,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub employment_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExperienceResponse {
    pub id: Uuid,
    pub title: String,
    pub company_name: String,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub employment_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StudentFullProfileResponse {
    #[serde(flatten)]
    pub profile: StudentProfileResponse,
    pub education: Vec<EducationResponse>,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceResponse>,
}

// -- Company profile --

#[derive(Debug, Serialize)]
pub struct CompanyProfileResponse {
    pub company_id: Uuid,
    pub company_name: String,
    pub website: Option<String>,
    pub industry: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCompanyRequest {
    pub company_name: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BenefitRequest {
    pub benefit: String,
}

#[derive(Debug, Serialize)]
pub struct CompanyFullProfileResponse {
    #[serde(flatten)]
    pub profile: CompanyProfileResponse,
    pub benefits: Vec<String>,
}

/// Public directory entry: company fields joined with the account's
/// location and description.
#[derive(Debug, Serialize)]
pub struct CompanyDirectoryEntry {
    pub company_id: Uuid,
    pub company_name: String,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}
