use crate::{
    data::student::{Student, StudentForm},
    error::{MissingStudentSnafu, RegistraResult},
    query::{ReadStudentParams, run_read_query},
    state::RegistraState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Serialize;
use snafu::{OptionExt, ensure};

pub async fn read_student(
    State(state): State<RegistraState>,
    Query(params): Query<ReadStudentParams>,
) -> RegistraResult<Json<Vec<Student>>> {
    run_read_query(state.store(), &params).await.map(Json)
}

pub async fn add_student(
    State(state): State<RegistraState>,
    Json(form): Json<StudentForm>,
) -> RegistraResult<(StatusCode, Json<Student>)> {
    let student = form.into_student()?;
    let created = state.store().insert(student).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Serialize)]
pub struct UpdateStudentResponse {
    pub message: &'static str,
    pub student: Student,
}

pub async fn update_student(
    State(state): State<RegistraState>,
    Json(form): Json<StudentForm>,
) -> RegistraResult<Json<UpdateStudentResponse>> {
    let (admin_number, details) = form.into_parts()?;
    let student = state
        .store()
        .replace(&admin_number, details)
        .await?
        .context(MissingStudentSnafu { admin_number })?;

    Ok(Json(UpdateStudentResponse {
        message: "Student updated successfully",
        student,
    }))
}

pub async fn delete_student(
    State(state): State<RegistraState>,
    Path(admin_number): Path<String>,
) -> RegistraResult<Json<serde_json::Value>> {
    let removed = state.store().delete(&admin_number).await?;
    ensure!(removed, MissingStudentSnafu { admin_number });

    Ok(Json(
        serde_json::json!({ "message": "Student deleted successfully" }),
    ))
}
