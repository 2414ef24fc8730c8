use crate::Database;
use crate::models::{ApplicationRow, CompanyApplicationRow, StudentApplicationRow};
use anyhow::Result;
use internhub_types::models::ApplicationStatus;
use rusqlite::OptionalExtension;

impl Database {
    /// Insert a Pending application dated today. The composite primary key
    /// rejects a duplicate (student, internship) pair; callers check
    /// existence first to turn that into a Conflict rather than a raw
    /// constraint error.
    pub fn create_application(&self, student_id: &str, internship_id: &str) -> Result<ApplicationRow> {
        let application_date = chrono::Utc::now().date_naive().to_string();
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO applications (student_id, internship_id, application_date, status)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![
                    student_id,
                    internship_id,
                    application_date,
                    ApplicationStatus::Pending.as_str()
                ],
            )?;
            Ok(ApplicationRow {
                student_id: student_id.to_string(),
                internship_id: internship_id.to_string(),
                application_date: application_date.clone(),
                status: ApplicationStatus::Pending.as_str().to_string(),
            })
        })
    }

    pub fn get_application(
        &self,
        student_id: &str,
        internship_id: &str,
    ) -> Result<Option<ApplicationRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT student_id, internship_id, application_date, status
                 FROM applications
                 WHERE student_id = ?1 AND internship_id = ?2",
            )?;
            let row = stmt
                .query_row([student_id, internship_id], |row| {
                    Ok(ApplicationRow {
                        student_id: row.get(0)?,
                        internship_id: row.get(1)?,
                        application_date: row.get(2)?,
                        status: row.get(3)?,
                    })
                })
                .optional()?;
            Ok(row)
        })
    }

    pub fn application_exists(&self, student_id: &str, internship_id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let found: Option<i64> = conn
                .query_row(
                    "SELECT 1 FROM applications WHERE student_id = ?1 AND internship_id = ?2",
                    [student_id, internship_id],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(found.is_some())
        })
    }

    pub fn applications_for_internship(&self, internship_id: &str) -> Result<Vec<ApplicationRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT student_id, internship_id, application_date, status
                 FROM applications
                 WHERE internship_id = ?1
                 ORDER BY application_date DESC",
            )?;
            let rows = stmt
                .query_map([internship_id], |row| {
                    Ok(ApplicationRow {
                        student_id: row.get(0)?,
                        internship_id: row.get(1)?,
                        application_date: row.get(2)?,
                        status: row.get(3)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// A student's applications enriched with posting and company fields,
    /// newest application first.
    pub fn applications_for_student(&self, student_id: &str) -> Result<Vec<StudentApplicationRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT a.internship_id, a.application_date, a.status,
                        i.title, i.location, i.min_salary, i.max_salary,
                        i.company_id, c.company_name
                 FROM applications a
                 JOIN internships i ON a.internship_id = i.id
                 JOIN companies c ON i.company_id = c.id
                 WHERE a.student_id = ?1
                 ORDER BY a.application_date DESC",
            )?;
            let rows = stmt
                .query_map([student_id], |row| {
                    Ok(StudentApplicationRow {
                        internship_id: row.get(0)?,
                        application_date: row.get(1)?,
                        status: row.get(2)?,
                        title: row.get(3)?,
                        location: row.get(4)?,
                        min_salary: row.get(5)?,
                        max_salary: row.get(6)?,
                        company_id: row.get(7)?,
                        company_name: row.get(8)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Every application across a company's internships, joined with the
    /// applicant's profile. Skills/experience/education are deliberately not
    /// joined here; the API layer batch-fetches them per student set.
    pub fn applications_for_company(&self, company_id: &str) -> Result<Vec<CompanyApplicationRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT a.student_id, a.internship_id, a.application_date, a.status,
                        i.title, i.location, i.min_salary, i.max_salary,
                        i.company_id, c.company_name,
                        s.first_name, s.last_name, u.email, s.phone, s.about,
                        s.university, s.degree, s.graduation_year, s.gpa,
                        s.portfolio_url, s.linkedin_url, s.github_url
                 FROM applications a
                 JOIN internships i ON a.internship_id = i.id
                 JOIN companies c ON i.company_id = c.id
                 JOIN students s ON a.student_id = s.id
                 JOIN users u ON s.id = u.id
                 WHERE i.company_id = ?1
                 ORDER BY a.application_date DESC",
            )?;
            let rows = stmt
                .query_map([company_id], |row| {
                    Ok(CompanyApplicationRow {
                        student_id: row.get(0)?,
                        internship_id: row.get(1)?,
                        application_date: row.get(2)?,
                        status: row.get(3)?,
                        title: row.get(4)?,
                        location: row.get(5)?,
                        min_salary: row.get(6)?,
                        max_salary: row.get(7)?,
                        company_id: row.get(8)?,
                        company_name: row.get(9)?,
                        first_name: row.get(10)?,
                        last_name: row.get(11)?,
                        email: row.get(12)?,
                        phone: row.get(13)?,
                        about: row.get(14)?,
                        university: row.get(15)?,
                        degree: row.get(16)?,
                        graduation_year: row.get(17)?,
                        gpa: row.get(18)?,
                        portfolio_url: row.get(19)?,
                        linkedin_url: row.get(20)?,
                        github_url: row.get(21)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Unconditional point-write of the status. Returns false when no row
    /// matches the pair.
    pub fn update_application_status(
        &self,
        student_id: &str,
        internship_id: &str,
        status: ApplicationStatus,
    ) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE applications SET status = ?3
                 WHERE student_id = ?1 AND internship_id = ?2",
                rusqlite::params![student_id, internship_id, status.as_str()],
            )?;
            Ok(changed > 0)
        })
    }
}
