use crate::{
    routes::{
        api::{add_student, delete_student, read_student, update_student},
        index::{
            get_index_route, internal_delete_student, internal_get_add_student_form,
            internal_get_edit_student_form, internal_get_students, internal_put_new_student,
            internal_update_student,
        },
    },
    state::RegistraState,
};
use axum::{
    Router,
    routing::{delete, get, post, put},
};

pub mod api;
pub mod index;

pub fn router(state: RegistraState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route("/read-student", get(read_student))
        .route("/add-student", post(add_student))
        .route("/update-student", put(update_student))
        .route("/delete-student/{admin_number}", delete(delete_student))
        .route("/internal/get_students", get(internal_get_students))
        .route(
            "/internal/students",
            put(internal_put_new_student).delete(internal_delete_student),
        )
        .route(
            "/internal/students/new_form",
            get(internal_get_add_student_form),
        )
        .route(
            "/internal/students/edit_form",
            get(internal_get_edit_student_form).put(internal_update_student),
        )
        .with_state(state)
}
