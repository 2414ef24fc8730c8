use crate::Database;
use crate::models::UserRow;
use anyhow::Result;
use internhub_types::models::UserType;
use rusqlite::{Connection, OptionalExtension};

impl Database {
    pub fn create_user(
        &self,
        id: &str,
        email: &str,
        password_hash: &str,
        user_type: UserType,
        location: Option<&str>,
        description: Option<&str>,
        profile_pic: Option<&str>,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO users (id, email, password, user_type, location, description, profile_pic)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    id,
                    email,
                    password_hash,
                    user_type.as_str(),
                    location,
                    description,
                    profile_pic
                ],
            )?;
            Ok(())
        })
    }

    /// Seed the role-specific profile row created alongside the user record.
    pub fn create_student(&self, id: &str, first_name: &str, last_name: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO students (id, first_name, last_name) VALUES (?1, ?2, ?3)",
                (id, first_name, last_name),
            )?;
            Ok(())
        })
    }

    pub fn create_company(&self, id: &str, company_name: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO companies (id, company_name) VALUES (?1, ?2)",
                (id, company_name),
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "email", email))
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id", id))
    }
}

fn query_user(conn: &Connection, column: &str, value: &str) -> Result<Option<UserRow>> {
    let sql = format!(
        "SELECT id, email, password, user_type, location, description, profile_pic, created_at
         FROM users WHERE {} = ?1",
        column
    );
    let mut stmt = conn.prepare(&sql)?;

    let row = stmt
        .query_row([value], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                email: row.get(1)?,
                password: row.get(2)?,
                user_type: row.get(3)?,
                location: row.get(4)?,
                description: row.get(5)?,
                profile_pic: row.get(6)?,
                created_at: row.get(7)?,
            })
        })
        .optional()?;

    Ok(row)
}
