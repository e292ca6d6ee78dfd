use crate::types::{AppError, Result, Student};
use chrono::Utc;
use libsql::{Builder, Connection, Database, Row};

const STUDENT_COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";

/// libsql-backed student store (in-memory, local file, or remote Turso).
///
/// A single connection is opened up front and shared; for `:memory:` that is
/// what keeps every caller on the same database.
pub struct TursoClient {
    _db: Database,
    conn: Connection,
}

impl TursoClient {
    /// Opens an ephemeral in-memory database.
    pub async fn new_memory() -> Result<Self> {
        Self::new_local(":memory:").await
    }

    /// Opens (or creates) a SQLite database file.
    pub async fn new_local(path: &str) -> Result<Self> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database {}: {}", path, e)))?;

        Self::from_database(db).await
    }

    /// Connects to a remote Turso database.
    #[cfg(feature = "turso")]
    pub async fn new_remote(url: String, auth_token: String) -> Result<Self> {
        let db = Builder::new_remote(url, auth_token)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Turso: {}", e)))?;

        Self::from_database(db).await
    }

    async fn from_database(db: Database) -> Result<Self> {
        let conn = db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))?;

        let client = Self { _db: db, conn };
        client.initialize_schema().await?;

        Ok(client)
    }

    async fn initialize_schema(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS students (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    email TEXT UNIQUE NOT NULL,
                    password_hash TEXT NOT NULL,
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL
                )",
                (),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to create students table: {}", e)))?;

        Ok(())
    }

    pub async fn create_student(
        &self,
        id: &str,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Student> {
        let now = Utc::now().timestamp();

        self.conn
            .execute(
                "INSERT INTO students (id, name, email, password_hash, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
                (id, name, email, password_hash, now, now),
            )
            .await
            .map_err(|e| write_error("create student", e))?;

        Ok(Student {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_student_by_id(&self, id: &str) -> Result<Option<Student>> {
        self.query_one(
            &format!("SELECT {} FROM students WHERE id = ?", STUDENT_COLUMNS),
            id,
        )
        .await
    }

    pub async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>> {
        self.query_one(
            &format!("SELECT {} FROM students WHERE email = ?", STUDENT_COLUMNS),
            email,
        )
        .await
    }

    pub async fn list_students(&self) -> Result<Vec<Student>> {
        let mut rows = self
            .conn
            .query(
                &format!(
                    "SELECT {} FROM students ORDER BY created_at ASC, rowid ASC",
                    STUDENT_COLUMNS
                ),
                (),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query students: {}", e)))?;

        let mut students = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            students.push(student_from_row(&row)?);
        }

        Ok(students)
    }

    /// Overwrites name, email and hash. `None` when no student has `id`.
    pub async fn update_student(
        &self,
        id: &str,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<Student>> {
        let now = Utc::now().timestamp();

        let changed = self
            .conn
            .execute(
                "UPDATE students SET name = ?, email = ?, password_hash = ?, updated_at = ?
                 WHERE id = ?",
                (name, email, password_hash, now, id),
            )
            .await
            .map_err(|e| write_error("update student", e))?;

        if changed == 0 {
            return Ok(None);
        }

        self.get_student_by_id(id).await
    }

    async fn query_one(&self, sql: &str, key: &str) -> Result<Option<Student>> {
        let mut rows = self
            .conn
            .query(sql, [key])
            .await
            .map_err(|e| AppError::Database(format!("Failed to query student: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => Ok(Some(student_from_row(&row)?)),
            None => Ok(None),
        }
    }
}

fn student_from_row(row: &Row) -> Result<Student> {
    Ok(Student {
        id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
        name: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
        email: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
        password_hash: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
        created_at: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
        updated_at: row.get(5).map_err(|e| AppError::Database(e.to_string()))?,
    })
}

// The email UNIQUE index is the last line of defence against two concurrent
// registrations passing the lookup at the same time.
fn write_error(action: &str, e: libsql::Error) -> AppError {
    let message = e.to_string();
    if message.contains("UNIQUE constraint failed: students.email") {
        AppError::email_taken()
    } else {
        AppError::Database(format!("Failed to {}: {}", action, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let client = TursoClient::new_memory().await.expect("should open");

        client
            .initialize_schema()
            .await
            .expect("second schema run should be a no-op");
    }

    #[tokio::test]
    async fn test_unique_email_maps_to_conflict() {
        let client = TursoClient::new_memory().await.expect("should open");

        client
            .create_student("id-1", "A", "a@x.com", "hash")
            .await
            .expect("first insert");
        let err = client
            .create_student("id-2", "B", "a@x.com", "hash")
            .await
            .expect_err("duplicate email must fail");

        assert!(matches!(err, AppError::Conflict(ref m) if m == "Email already registered"));
    }

    #[tokio::test]
    async fn test_duplicate_id_is_database_error() {
        let client = TursoClient::new_memory().await.expect("should open");

        client
            .create_student("id-1", "A", "a@x.com", "hash")
            .await
            .expect("first insert");
        let err = client
            .create_student("id-1", "B", "b@x.com", "hash")
            .await
            .expect_err("duplicate id must fail");

        assert!(matches!(err, AppError::Database(_)));
    }
}
