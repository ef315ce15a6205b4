use crate::{
    config::DbConfig,
    data::student::{Student, StudentDetails, StudentFilter},
    error::{DuplicateStudentSnafu, MakeQuerySnafu, MigrateSnafu, OpenDatabaseSnafu, RegistraError, RegistraResult},
    store::StudentStore,
};
use async_trait::async_trait;
use snafu::ResultExt;
use sqlx::{Pool, Postgres, QueryBuilder, postgres::PgPoolOptions};

/// The production store: one `students` table, keyed by admin number, with
/// `c_gpa` as `NUMERIC` so the decimal survives storage without float drift.
#[derive(Clone, Debug)]
pub struct PostgresStudentStore {
    pool: Pool<Postgres>,
}

impl PostgresStudentStore {
    pub async fn connect(options: PgPoolOptions, db_config: &DbConfig) -> RegistraResult<Self> {
        let pool = options
            .connect(&db_config.get_db_path())
            .await
            .context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl StudentStore for PostgresStudentStore {
    async fn find(&self, filter: &StudentFilter) -> RegistraResult<Vec<Student>> {
        let mut query = QueryBuilder::new(
            "SELECT admin_number, name, diploma, c_gpa, image FROM students",
        );

        let mut prefix = " WHERE ";
        if let Some(admin_number) = &filter.admin_number {
            query.push(prefix).push("admin_number = ").push_bind(admin_number);
            prefix = " AND ";
        }
        if let Some(needle) = &filter.name_contains {
            query
                .push(prefix)
                .push("name ILIKE ")
                .push_bind(format!("%{}%", escape_like(needle)));
            prefix = " AND ";
        }
        if let Some(diploma) = &filter.diploma {
            query.push(prefix).push("diploma = ").push_bind(diploma);
        }

        query
            .build_query_as::<Student>()
            .fetch_all(&self.pool)
            .await
            .context(MakeQuerySnafu)
    }

    async fn insert(&self, student: Student) -> RegistraResult<Student> {
        let result = sqlx::query(
            "INSERT INTO students (admin_number, name, diploma, c_gpa, image) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&student.admin_number)
        .bind(&student.name)
        .bind(&student.diploma)
        .bind(student.c_gpa)
        .bind(&student.image)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(student),
            Err(sqlx::Error::Database(db_error)) if db_error.is_unique_violation() => {
                DuplicateStudentSnafu {
                    admin_number: student.admin_number,
                }
                .fail()
            }
            Err(source) => Err(RegistraError::MakeQuery { source }),
        }
    }

    async fn replace(
        &self,
        admin_number: &str,
        details: StudentDetails,
    ) -> RegistraResult<Option<Student>> {
        sqlx::query_as::<_, Student>(
            "UPDATE students SET name = $2, diploma = $3, c_gpa = $4, image = $5 \
             WHERE admin_number = $1 \
             RETURNING admin_number, name, diploma, c_gpa, image",
        )
        .bind(admin_number)
        .bind(&details.name)
        .bind(&details.diploma)
        .bind(details.c_gpa)
        .bind(&details.image)
        .fetch_optional(&self.pool)
        .await
        .context(MakeQuerySnafu)
    }

    async fn delete(&self, admin_number: &str) -> RegistraResult<bool> {
        let result = sqlx::query("DELETE FROM students WHERE admin_number = $1")
            .bind(admin_number)
            .execute(&self.pool)
            .await
            .context(MakeQuerySnafu)?;

        Ok(result.rows_affected() > 0)
    }
}

/// A search needle is data, not a pattern, so LIKE metacharacters in it must
/// match literally.
fn escape_like(needle: &str) -> String {
    needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
