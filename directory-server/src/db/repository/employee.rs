//! Employee Repository
//!
//! Payloads arriving here are already validated and normalized (emails are
//! trimmed + lowercased by `shared::validation`).

use chrono::Utc;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};

/// Build a LIKE pattern matching the term as a literal substring.
/// `%`, `_` and the escape char itself are escaped so they lose their
/// wildcard meaning.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Find all employees, optionally filtered by a substring match against
/// name, email or position. Newest first.
pub async fn find_all(pool: &SqlitePool, search: Option<&str>) -> RepoResult<Vec<Employee>> {
    let employees = match search.filter(|s| !s.is_empty()) {
        Some(term) => {
            sqlx::query_as::<_, Employee>(
                "SELECT * FROM employees \
                 WHERE name LIKE ?1 ESCAPE '\\' \
                    OR email LIKE ?1 ESCAPE '\\' \
                    OR position LIKE ?1 ESCAPE '\\' \
                 ORDER BY created_at DESC, id DESC",
            )
            .bind(like_pattern(term))
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Employee>(
                "SELECT * FROM employees ORDER BY created_at DESC, id DESC",
            )
            .fetch_all(pool)
            .await?
        }
    };
    Ok(employees)
}

/// Find employee by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(employee)
}

/// Find employee by normalized email
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Employee>> {
    let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE email = ?1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(employee)
}

/// Create a new employee
pub async fn create(pool: &SqlitePool, data: EmployeeCreate) -> RepoResult<Employee> {
    // Check duplicate email; the unique index decides under races
    if find_by_email(pool, &data.email).await?.is_some() {
        return Err(RepoError::Duplicate("Email already exists".to_string()));
    }

    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO employees (name, email, position, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.position)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to read back created employee".to_string()))
}

/// Partial update — merges supplied fields over the existing row
pub async fn update(pool: &SqlitePool, id: i64, data: EmployeeUpdate) -> RepoResult<Employee> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))?;

    // Re-check uniqueness only when the email actually changes
    if let Some(ref new_email) = data.email
        && new_email != &existing.email
        && find_by_email(pool, new_email).await?.is_some()
    {
        return Err(RepoError::Duplicate("Email already exists".to_string()));
    }

    let name = data.name.unwrap_or(existing.name);
    let email = data.email.unwrap_or(existing.email);
    let position = data.position.unwrap_or(existing.position);

    sqlx::query(
        "UPDATE employees SET name = ?1, email = ?2, position = ?3, updated_at = ?4 \
         WHERE id = ?5",
    )
    .bind(&name)
    .bind(&email)
    .bind(&position)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))
}

/// Hard delete an employee
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))?;

    sqlx::query("DELETE FROM employees WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(true)
}
