//! Database row types, mapped directly from SQLite rows.
//! Distinct from the internhub-types API models to keep the DB layer independent.

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub password: String,
    pub user_type: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub profile_pic: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct StudentRow {
    pub id: String,
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

#[derive(Debug, Clone)]
pub struct CompanyRow {
    pub id: String,
    pub company_name: String,
    pub website: Option<String>,
    pub industry: Option<String>,
}

#[derive(Debug, Clone)]
pub struct InternshipRow {
    pub id: String,
    pub company_id: String,
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
}

/// Internship joined with its owning company, as shown in listings.
#[derive(Debug, Clone)]
pub struct InternshipListingRow {
    pub internship: InternshipRow,
    pub company_name: String,
    pub industry: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApplicationRow {
    pub student_id: String,
    pub internship_id: String,
    pub application_date: String,
    pub status: String,
}

/// Application joined with internship and company fields for the student view.
#[derive(Debug, Clone)]
pub struct StudentApplicationRow {
    pub internship_id: String,
    pub application_date: String,
    pub status: String,
    pub title: String,
    pub location: String,
    pub min_salary: Option<i64>,
    pub max_salary: Option<i64>,
    pub company_id: String,
    pub company_name: String,
}

/// Application joined with internship, company and the applicant's profile for
/// the company view. Skills/experience/education are fetched separately in
/// batched queries and attached at the API layer.
#[derive(Debug, Clone)]
pub struct CompanyApplicationRow {
    pub student_id: String,
    pub internship_id: String,
    pub application_date: String,
    pub status: String,
    pub title: String,
    pub location: String,
    pub min_salary: Option<i64>,
    pub max_salary: Option<i64>,
    pub company_id: String,
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
}

/// Saved bookmark joined with the full internship and its company.
#[derive(Debug, Clone)]
pub struct SavedInternshipRow {
    pub student_id: String,
    pub saved_date: String,
    pub internship: InternshipRow,
    pub company_name: String,
    pub industry: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EducationRow {
    pub id: String,
    pub student_id: String,
    pub institution: String,
    pub diploma: String,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub gpa: Option<f64>,
    pub courses: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ExperienceRow {
    pub id: String,
    pub student_id: String,
    pub title: String,
    pub company_name: String,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub employment_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CompanyDirectoryRow {
    pub company_id: String,
    pub company_name: String,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}
