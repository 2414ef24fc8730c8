use crate::Database;
use crate::internships::internship_from_row;
use crate::models::SavedInternshipRow;
use anyhow::Result;
use rusqlite::OptionalExtension;

impl Database {
    pub fn is_saved(&self, student_id: &str, internship_id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let found: Option<i64> = conn
                .query_row(
                    "SELECT 1 FROM saved_internships WHERE student_id = ?1 AND internship_id = ?2",
                    [student_id, internship_id],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(found.is_some())
        })
    }

    /// Callers check `is_saved` first and report Conflict on a duplicate; the
    /// composite primary key backs that up.
    pub fn save_internship(&self, student_id: &str, internship_id: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO saved_internships (student_id, internship_id) VALUES (?1, ?2)",
                [student_id, internship_id],
            )?;
            Ok(())
        })
    }

    /// Returns false when the pair was not saved.
    pub fn unsave_internship(&self, student_id: &str, internship_id: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let deleted = conn.execute(
                "DELETE FROM saved_internships WHERE student_id = ?1 AND internship_id = ?2",
                [student_id, internship_id],
            )?;
            Ok(deleted > 0)
        })
    }

    pub fn saved_count(&self, student_id: &str) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM saved_internships WHERE student_id = ?1",
                [student_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
    }

    /// A student's bookmarks with the full internship and company attached,
    /// newest save first.
    pub fn saved_for_student(&self, student_id: &str) -> Result<Vec<SavedInternshipRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT si.student_id, si.saved_date,
                        i.id, i.company_id, i.title, i.start_date, i.end_date,
                        i.min_salary, i.max_salary, i.description, i.location,
                        i.payment, i.work_arrangement, i.work_time, i.status, i.posted_date,
                        c.company_name, c.industry
                 FROM saved_internships si
                 JOIN internships i ON si.internship_id = i.id
                 JOIN companies c ON i.company_id = c.id
                 WHERE si.student_id = ?1
                 ORDER BY si.saved_date DESC",
            )?;
            let rows = stmt
                .query_map([student_id], |row| {
                    Ok(SavedInternshipRow {
                        student_id: row.get(0)?,
                        saved_date: row.get(1)?,
                        internship: internship_from_row(row, 2)?,
                        company_name: row.get(16)?,
                        industry: row.get(17)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;
    use crate::test_support::{seed_company, seed_internship, seed_student};

    #[test]
    fn save_is_guarded_by_existence_check() {
        let db = Database::open_in_memory().unwrap();
        let company = seed_company(&db);
        let internship = seed_internship(&db, &company);
        let student = seed_student(&db);

        assert!(!db.is_saved(&student, &internship).unwrap());
        db.save_internship(&student, &internship).unwrap();
        assert!(db.is_saved(&student, &internship).unwrap());
        assert_eq!(db.saved_count(&student).unwrap(), 1);

        // Second insert for the same pair trips the composite key
        assert!(db.save_internship(&student, &internship).is_err());
        assert_eq!(db.saved_count(&student).unwrap(), 1);
    }

    #[test]
    fn unsave_missing_pair_reports_false() {
        let db = Database::open_in_memory().unwrap();
        let company = seed_company(&db);
        let internship = seed_internship(&db, &company);
        let student = seed_student(&db);

        assert!(!db.unsave_internship(&student, &internship).unwrap());
        assert_eq!(db.saved_count(&student).unwrap(), 0);

        db.save_internship(&student, &internship).unwrap();
        assert!(db.unsave_internship(&student, &internship).unwrap());
        assert_eq!(db.saved_count(&student).unwrap(), 0);
    }

    #[test]
    fn listing_embeds_internship_details() {
        let db = Database::open_in_memory().unwrap();
        let company = seed_company(&db);
        let internship = seed_internship(&db, &company);
        let student = seed_student(&db);

        db.save_internship(&student, &internship).unwrap();

        let rows = db.saved_for_student(&student).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].internship.id, internship);
        assert_eq!(rows[0].internship.title, "Backend Intern");
        assert_eq!(rows[0].company_name, "Test Co");
    }
}
