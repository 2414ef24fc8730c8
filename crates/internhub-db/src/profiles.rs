use crate::Database;
use crate::models::{CompanyDirectoryRow, CompanyRow, EducationRow, ExperienceRow, StudentRow};
use anyhow::Result;
use internhub_types::api::{
    EducationRequest, ExperienceRequest, UpdateCompanyRequest, UpdateStudentRequest,
};
use rusqlite::{Connection, OptionalExtension};

impl Database {
    // -- Students --

    pub fn get_student(&self, id: &str) -> Result<Option<StudentRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, first_name, last_name, phone, about, university, degree,
                        graduation_year, gpa, portfolio_url, linkedin_url, github_url
                 FROM students WHERE id = ?1",
            )?;
            let row = stmt
                .query_row([id], |row| {
                    Ok(StudentRow {
                        id: row.get(0)?,
                        first_name: row.get(1)?,
                        last_name: row.get(2)?,
                        phone: row.get(3)?,
                        about: row.get(4)?,
                        university: row.get(5)?,
                        degree: row.get(6)?,
                        graduation_year: row.get(7)?,
                        gpa: row.get(8)?,
                        portfolio_url: row.get(9)?,
                        linkedin_url: row.get(10)?,
                        github_url: row.get(11)?,
                    })
                })
                .optional()?;
            Ok(row)
        })
    }

    pub fn update_student(&self, id: &str, req: &UpdateStudentRequest) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE students SET
                    first_name      = COALESCE(?2, first_name),
                    last_name       = COALESCE(?3, last_name),
                    phone           = COALESCE(?4, phone),
                    about           = COALESCE(?5, about),
                    university      = COALESCE(?6, university),
                    degree          = COALESCE(?7, degree),
                    graduation_year = COALESCE(?8, graduation_year),
                    gpa             = COALESCE(?9, gpa),
                    portfolio_url   = COALESCE(?10, portfolio_url),
                    linkedin_url    = COALESCE(?11, linkedin_url),
                    github_url      = COALESCE(?12, github_url)
                 WHERE id = ?1",
                rusqlite::params![
                    id,
                    req.first_name,
                    req.last_name,
                    req.phone,
                    req.about,
                    req.university,
                    req.degree,
                    req.graduation_year,
                    req.gpa,
                    req.portfolio_url,
                    req.linkedin_url,
                    req.github_url,
                ],
            )?;
            Ok(changed > 0)
        })
    }

    // -- Education --

    pub fn add_education(&self, id: &str, student_id: &str, req: &EducationRequest) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO education
                    (id, student_id, institution, diploma, location, start_date, end_date, gpa, courses)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                rusqlite::params![
                    id,
                    student_id,
                    req.institution,
                    req.diploma,
                    req.location,
                    req.start_date,
                    req.end_date,
                    req.gpa,
                    req.courses,
                ],
            )?;
            Ok(())
        })
    }

    pub fn delete_education(&self, student_id: &str, institution: &str, diploma: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let deleted = conn.execute(
                "DELETE FROM education
                 WHERE student_id = ?1 AND institution = ?2 AND diploma = ?3",
                [student_id, institution, diploma],
            )?;
            Ok(deleted > 0)
        })
    }

    pub fn education_for_student(&self, student_id: &str) -> Result<Vec<EducationRow>> {
        self.education_for_students(std::slice::from_ref(&student_id.to_string()))
    }

    /// Batched fetch keyed by the full student set, most recent start first.
    /// One query regardless of how many applicants a listing page holds.
    pub fn education_for_students(&self, student_ids: &[String]) -> Result<Vec<EducationRow>> {
        if student_ids.is_empty() {
            return Ok(vec![]);
        }

        self.with_conn(|conn| {
            let sql = format!(
                "SELECT id, student_id, institution, diploma, location, start_date, end_date, gpa, courses
                 FROM education WHERE student_id IN ({})
                 ORDER BY start_date DESC",
                in_placeholders(student_ids.len())
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(to_params(student_ids).as_slice(), |row| {
                    Ok(EducationRow {
                        id: row.get(0)?,
                        student_id: row.get(1)?,
                        institution: row.get(2)?,
                        diploma: row.get(3)?,
                        location: row.get(4)?,
                        start_date: row.get(5)?,
                        end_date: row.get(6)?,
                        gpa: row.get(7)?,
                        courses: row.get(8)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Skills --

    pub fn add_skill(&self, student_id: &str, skill: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO skills (student_id, skill) VALUES (?1, ?2)",
                [student_id, skill],
            )?;
            Ok(())
        })
    }

    pub fn delete_skill(&self, student_id: &str, skill: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let deleted = conn.execute(
                "DELETE FROM skills WHERE student_id = ?1 AND skill = ?2",
                [student_id, skill],
            )?;
            Ok(deleted > 0)
        })
    }

    pub fn skills_for_student(&self, student_id: &str) -> Result<Vec<String>> {
        let pairs = self.skills_for_students(std::slice::from_ref(&student_id.to_string()))?;
        Ok(pairs.into_iter().map(|(_, skill)| skill).collect())
    }

    /// Batched `(student_id, skill)` pairs for a set of students.
    pub fn skills_for_students(&self, student_ids: &[String]) -> Result<Vec<(String, String)>> {
        if student_ids.is_empty() {
            return Ok(vec![]);
        }

        self.with_conn(|conn| {
            let sql = format!(
                "SELECT student_id, skill FROM skills WHERE student_id IN ({}) ORDER BY skill",
                in_placeholders(student_ids.len())
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(to_params(student_ids).as_slice(), |row| {
                    Ok((row.get(0)?, row.get(1)?))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Professional experience --

    pub fn add_experience(&self, id: &str, student_id: &str, req: &ExperienceRequest) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO experience
                    (id, student_id, title, company_name, description, start_date, end_date, employment_type)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                rusqlite::params![
                    id,
                    student_id,
                    req.title,
                    req.company_name,
                    req.description,
                    req.start_date,
                    req.end_date,
                    req.employment_type,
                ],
            )?;
            Ok(())
        })
    }

    pub fn delete_experience(&self, id: &str, student_id: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let deleted = conn.execute(
                "DELETE FROM experience WHERE id = ?1 AND student_id = ?2",
                [id, student_id],
            )?;
            Ok(deleted > 0)
        })
    }

    pub fn experience_for_student(&self, student_id: &str) -> Result<Vec<ExperienceRow>> {
        self.experience_for_students(std::slice::from_ref(&student_id.to_string()))
    }

    pub fn experience_for_students(&self, student_ids: &[String]) -> Result<Vec<ExperienceRow>> {
        if student_ids.is_empty() {
            return Ok(vec![]);
        }

        self.with_conn(|conn| {
            let sql = format!(
                "SELECT id, student_id, title, company_name, description, start_date, end_date, employment_type
                 FROM experience WHERE student_id IN ({})
                 ORDER BY start_date DESC",
                in_placeholders(student_ids.len())
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(to_params(student_ids).as_slice(), |row| {
                    Ok(ExperienceRow {
                        id: row.get(0)?,
                        student_id: row.get(1)?,
                        title: row.get(2)?,
                        company_name: row.get(3)?,
                        description: row.get(4)?,
                        start_date: row.get(5)?,
                        end_date: row.get(6)?,
                        employment_type: row.get(7)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Companies --

    pub fn get_company(&self, id: &str) -> Result<Option<CompanyRow>> {
        self.with_conn(|conn| query_company(conn, id))
    }

    pub fn update_company(&self, id: &str, req: &UpdateCompanyRequest) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE companies SET
                    company_name = COALESCE(?2, company_name),
                    website      = COALESCE(?3, website),
                    industry     = COALESCE(?4, industry)
                 WHERE id = ?1",
                rusqlite::params![id, req.company_name, req.website, req.industry],
            )?;
            Ok(changed > 0)
        })
    }

    pub fn add_benefit(&self, company_id: &str, benefit: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO company_benefits (company_id, benefit) VALUES (?1, ?2)",
                [company_id, benefit],
            )?;
            Ok(())
        })
    }

    pub fn delete_benefit(&self, company_id: &str, benefit: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let deleted = conn.execute(
                "DELETE FROM company_benefits WHERE company_id = ?1 AND benefit = ?2",
                [company_id, benefit],
            )?;
            Ok(deleted > 0)
        })
    }

    pub fn benefits_for_company(&self, company_id: &str) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT benefit FROM company_benefits WHERE company_id = ?1 ORDER BY benefit",
            )?;
            let rows = stmt
                .query_map([company_id], |row| row.get(0))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Public company directory, joined with the account's location and
    /// description, ordered by name.
    pub fn list_companies(&self) -> Result<Vec<CompanyDirectoryRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT c.id, c.company_name, c.website, c.industry, u.description, u.location
                 FROM companies c
                 JOIN users u ON c.id = u.id
                 ORDER BY c.company_name ASC",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(CompanyDirectoryRow {
                        company_id: row.get(0)?,
                        company_name: row.get(1)?,
                        website: row.get(2)?,
                        industry: row.get(3)?,
                        description: row.get(4)?,
                        location: row.get(5)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

fn query_company(conn: &Connection, id: &str) -> Result<Option<CompanyRow>> {
    let mut stmt =
        conn.prepare("SELECT id, company_name, website, industry FROM companies WHERE id = ?1")?;
    let row = stmt
        .query_row([id], |row| {
            Ok(CompanyRow {
                id: row.get(0)?,
                company_name: row.get(1)?,
                website: row.get(2)?,
                industry: row.get(3)?,
            })
        })
        .optional()?;
    Ok(row)
}

fn in_placeholders(n: usize) -> String {
    (1..=n)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

fn to_params(ids: &[String]) -> Vec<&dyn rusqlite::types::ToSql> {
    ids.iter()
        .map(|id| id as &dyn rusqlite::types::ToSql)
        .collect()
}
