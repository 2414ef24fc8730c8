use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id           TEXT PRIMARY KEY,
                email        TEXT NOT NULL UNIQUE,
                password     TEXT NOT NULL,
                user_type    TEXT NOT NULL CHECK (user_type IN ('Student', 'Company')),
                location     TEXT,
                description  TEXT,
                profile_pic  TEXT,
                created_at   TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE students (
                id               TEXT PRIMARY KEY REFERENCES users(id),
                first_name       TEXT NOT NULL DEFAULT '',
                last_name        TEXT NOT NULL DEFAULT '',
                phone            TEXT,
                about            TEXT,
                university       TEXT,
                degree           TEXT,
                graduation_year  INTEGER,
                gpa              REAL,
                portfolio_url    TEXT,
                linkedin_url     TEXT,
                github_url       TEXT
            );

            CREATE TABLE companies (
                id            TEXT PRIMARY KEY REFERENCES users(id),
                company_name  TEXT NOT NULL DEFAULT '',
                website       TEXT,
                industry      TEXT
            );

            CREATE TABLE internships (
                id                TEXT PRIMARY KEY,
                company_id        TEXT NOT NULL REFERENCES companies(id),
                title             TEXT NOT NULL,
                start_date        TEXT NOT NULL,
                end_date          TEXT NOT NULL,
                min_salary        INTEGER,
                max_salary        INTEGER,
                description       TEXT,
                location          TEXT NOT NULL,
                payment           TEXT,
                work_arrangement  TEXT,
                work_time         TEXT,
                status            TEXT NOT NULL DEFAULT 'Pending'
                                  CHECK (status IN ('Pending', 'Published')),
                posted_date       TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE INDEX idx_internships_company
                ON internships(company_id);
            CREATE INDEX idx_internships_listing
                ON internships(status, posted_date);

            CREATE TABLE applications (
                student_id        TEXT NOT NULL REFERENCES students(id),
                internship_id     TEXT NOT NULL REFERENCES internships(id),
                application_date  TEXT NOT NULL DEFAULT (date('now')),
                status            TEXT NOT NULL DEFAULT 'Pending'
                                  CHECK (status IN ('Pending', 'Accepted', 'Rejected')),
                PRIMARY KEY (student_id, internship_id)
            );

            CREATE INDEX idx_applications_internship
                ON applications(internship_id);

            CREATE TABLE saved_internships (
                student_id     TEXT NOT NULL REFERENCES students(id),
                internship_id  TEXT NOT NULL REFERENCES internships(id),
                saved_date     TEXT NOT NULL DEFAULT (datetime('now')),
                PRIMARY KEY (student_id, internship_id)
            );

            CREATE INDEX idx_saved_internship
                ON saved_internships(internship_id);

            CREATE TABLE education (
                id           TEXT PRIMARY KEY,
                student_id   TEXT NOT NULL REFERENCES students(id),
                institution  TEXT NOT NULL,
                diploma      TEXT NOT NULL,
                location     TEXT,
                start_date   TEXT,
                end_date     TEXT,
                gpa          REAL,
                courses      TEXT
            );

            CREATE INDEX idx_education_student
                ON education(student_id);

            CREATE TABLE skills (
                student_id  TEXT NOT NULL REFERENCES students(id),
                skill       TEXT NOT NULL,
                PRIMARY KEY (student_id, skill)
            );

            CREATE TABLE experience (
                id               TEXT PRIMARY KEY,
                student_id       TEXT NOT NULL REFERENCES students(id),
                title            TEXT NOT NULL,
                company_name     TEXT NOT NULL,
                description      TEXT,
                start_date       TEXT,
                end_date         TEXT,
                employment_type  TEXT
            );

            CREATE INDEX idx_experience_student
                ON experience(student_id);

            CREATE TABLE company_benefits (
                company_id  TEXT NOT NULL REFERENCES companies(id),
                benefit     TEXT NOT NULL,
                PRIMARY KEY (company_id, benefit)
            );

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
