use crate::Database;
use crate::models::{InternshipListingRow, InternshipRow};
use anyhow::Result;
use internhub_types::api::{CreateInternshipRequest, InternshipQuery, UpdateInternshipRequest};
use internhub_types::models::InternshipStatus;
use rusqlite::{OptionalExtension, Row};

impl Database {
    /// Required fields (title, dates, location) are validated at the API layer
    /// before this is called.
    pub fn create_internship(
        &self,
        id: &str,
        company_id: &str,
        req: &CreateInternshipRequest,
        status: InternshipStatus,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO internships
                    (id, company_id, title, start_date, end_date, min_salary, max_salary,
                     description, location, payment, work_arrangement, work_time, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                rusqlite::params![
                    id,
                    company_id,
                    req.title,
                    req.start_date,
                    req.end_date,
                    req.min_salary,
                    req.max_salary,
                    req.description,
                    req.location,
                    req.payment,
                    req.work_arrangement,
                    req.work_time,
                    status.as_str(),
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_internship(&self, id: &str) -> Result<Option<InternshipRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM internships WHERE id = ?1",
                INTERNSHIP_COLUMNS
            ))?;
            let row = stmt
                .query_row([id], |row| internship_from_row(row, 0))
                .optional()?;
            Ok(row)
        })
    }

    /// Published internships joined with their company, filtered and paged.
    pub fn list_internships(&self, query: &InternshipQuery) -> Result<Vec<InternshipListingRow>> {
        self.with_conn(|conn| {
            let mut sql = format!(
                "SELECT {}, c.company_name, c.industry
                 FROM internships i
                 JOIN companies c ON i.company_id = c.id
                 WHERE i.status = 'Published'",
                prefixed_internship_columns()
            );
            let mut params: Vec<&dyn rusqlite::types::ToSql> = Vec::new();

            let filters = [
                ("i.location", &query.location),
                ("i.work_time", &query.work_time),
                ("i.work_arrangement", &query.work_arrangement),
                ("i.payment", &query.payment),
            ];
            for (column, value) in &filters {
                if let Some(value) = value {
                    sql.push_str(&format!(" AND {} = ?{}", column, params.len() + 1));
                    params.push(value as &dyn rusqlite::types::ToSql);
                }
            }

            sql.push_str(&format!(
                " ORDER BY i.posted_date DESC LIMIT ?{} OFFSET ?{}",
                params.len() + 1,
                params.len() + 2
            ));
            let limit = query.limit.min(100);
            params.push(&limit);
            params.push(&query.offset);

            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params.as_slice(), |row| {
                    Ok(InternshipListingRow {
                        internship: internship_from_row(row, 0)?,
                        company_name: row.get(14)?,
                        industry: row.get(15)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    /// Partial update; absent fields keep their stored values.
    pub fn update_internship(&self, id: &str, req: &UpdateInternshipRequest) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE internships SET
                    title            = COALESCE(?2, title),
                    start_date       = COALESCE(?3, start_date),
                    end_date         = COALESCE(?4, end_date),
                    location         = COALESCE(?5, location),
                    min_salary       = COALESCE(?6, min_salary),
                    max_salary       = COALESCE(?7, max_salary),
                    description      = COALESCE(?8, description),
                    payment          = COALESCE(?9, payment),
                    work_arrangement = COALESCE(?10, work_arrangement),
                    work_time        = COALESCE(?11, work_time),
                    status           = COALESCE(?12, status)
                 WHERE id = ?1",
                rusqlite::params![
                    id,
                    req.title,
                    req.start_date,
                    req.end_date,
                    req.location,
                    req.min_salary,
                    req.max_salary,
                    req.description,
                    req.payment,
                    req.work_arrangement,
                    req.work_time,
                    req.status,
                ],
            )?;
            Ok(changed > 0)
        })
    }

    /// Cascading delete: dependent saved rows and applications must never
    /// outlive the internship, so all three deletions commit as one
    /// transaction or not at all.
    pub fn delete_internship(&self, id: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "DELETE FROM saved_internships WHERE internship_id = ?1",
                [id],
            )?;
            tx.execute("DELETE FROM applications WHERE internship_id = ?1", [id])?;
            let deleted = tx.execute("DELETE FROM internships WHERE id = ?1", [id])?;
            tx.commit()?;
            Ok(deleted > 0)
        })
    }
}

const INTERNSHIP_COLUMNS: &str = "id, company_id, title, start_date, end_date, min_salary, \
     max_salary, description, location, payment, work_arrangement, work_time, status, posted_date";

fn prefixed_internship_columns() -> String {
    INTERNSHIP_COLUMNS
        .split(", ")
        .map(|c| format!("i.{}", c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Map the internship column block starting at `offset`, so joined queries
/// can reuse the same mapping for their internship segment.
pub(crate) fn internship_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<InternshipRow> {
    Ok(InternshipRow {
        id: row.get(offset)?,
        company_id: row.get(offset + 1)?,
        title: row.get(offset + 2)?,
        start_date: row.get(offset + 3)?,
        end_date: row.get(offset + 4)?,
        min_salary: row.get(offset + 5)?,
        max_salary: row.get(offset + 6)?,
        description: row.get(offset + 7)?,
        location: row.get(offset + 8)?,
        payment: row.get(offset + 9)?,
        work_arrangement: row.get(offset + 10)?,
        work_time: row.get(offset + 11)?,
        status: row.get(offset + 12)?,
        posted_date: row.get(offset + 13)?,
    })
}
