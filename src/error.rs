use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use snafu::Snafu;
use std::num::ParseIntError;

pub type RegistraResult<T> = Result<T, RegistraError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RegistraError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error making store query"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema"))]
    Migrate { source: sqlx::migrate::MigrateError },
    #[snafu(display("Unable to retrieve env var `{name}`"))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse IP port"))]
    ParsePort { source: ParseIntError },
    #[snafu(display("No student records found"))]
    NoStudentsFound,
    #[snafu(display("Student not found"))]
    MissingStudent { admin_number: String },
    #[snafu(display("Student with admin number {admin_number} already exists"))]
    DuplicateStudent { admin_number: String },
    #[snafu(display("Field `{field}` is required"))]
    MissingField { field: &'static str },
    #[snafu(display("Unable to parse cGPA {original:?} as a decimal"))]
    ParseGpa {
        source: rust_decimal::Error,
        original: String,
    },
}

impl RegistraError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::OpenDatabase { .. }
            | Self::MakeQuery { .. }
            | Self::Migrate { .. }
            | Self::BadEnvVar { .. }
            | Self::ParsePort { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NoStudentsFound | Self::MissingStudent { .. } => StatusCode::NOT_FOUND,
            Self::DuplicateStudent { .. } => StatusCode::CONFLICT,
            Self::MissingField { .. } | Self::ParseGpa { .. } => StatusCode::BAD_REQUEST,
        }
    }

    /// The user-visible message for this error. Infrastructure faults all
    /// collapse into one `Server error:` shape so store internals never leak
    /// structure onto the wire.
    pub fn message(&self) -> String {
        if self.status_code().is_server_error() {
            format!("Server error: {self}")
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for RegistraError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            error!(?self, "Error!");
        }
        (status_code, Json(json!({ "message": self.message() }))).into_response()
    }
}
