use crate::{
    data::{
        AdminNumberForm,
        student::{Student, StudentFilter, StudentForm},
    },
    error::{MissingStudentSnafu, RegistraError},
    maud_conveniences::{error_banner, info_banner, render_table, title},
    query::{ReadStudentParams, run_read_query},
    state::RegistraState,
};
use axum::{
    Form,
    extract::{Query, State},
};
use maud::{Markup, html};

pub async fn get_index_route(State(state): State<RegistraState>) -> Markup {
    let table = render_students(&state, &ReadStudentParams::default()).await;

    state.render(html! {
        div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-4xl w-full flex flex-col space-y-4" {
            (title("Student Records"))
            form hx-get="/internal/get_students" hx-target="#student_table" hx-trigger="submit, change from:select" class="flex flex-row space-x-2" {
                input type="text" name="searchName" placeholder="Search by name" class="shadow appearance-none border rounded py-2 px-3 leading-tight focus:outline-none bg-gray-700 border-gray-600" {}
                input type="text" name="filterDiploma" placeholder="Diploma" class="shadow appearance-none border rounded py-2 px-3 leading-tight focus:outline-none bg-gray-700 border-gray-600" {}
                select name="sortCGPA" class="shadow border rounded py-2 px-3 bg-gray-700 border-gray-600" {
                    option value="" {"No sort"}
                    option value="asc" {"cGPA ascending"}
                    option value="desc" {"cGPA descending"}
                }
                button type="submit" class="bg-blue-600 hover:bg-blue-800 font-bold py-2 px-4 rounded" {"Search"}
            }
            div id="student_table" {
                (table)
            }
            (add_student_form(None))
        }
    })
}

pub async fn internal_get_students(
    State(state): State<RegistraState>,
    Query(params): Query<ReadStudentParams>,
) -> Markup {
    render_students(&state, &params).await
}

pub async fn internal_get_add_student_form() -> Markup {
    add_student_form(None)
}

pub async fn internal_put_new_student(
    State(state): State<RegistraState>,
    Form(form): Form<StudentForm>,
) -> Markup {
    let outcome = match form.into_student() {
        Ok(student) => state.store().insert(student).await.map(|_| ()),
        Err(error) => Err(error),
    };

    match outcome {
        Ok(()) => form_and_refreshed_table(&state).await,
        Err(error) => add_student_form(Some(&error)),
    }
}

pub async fn internal_get_edit_student_form(
    State(state): State<RegistraState>,
    Query(AdminNumberForm { admin_number }): Query<AdminNumberForm>,
) -> Markup {
    let filter = StudentFilter {
        admin_number: Some(admin_number.clone()),
        ..StudentFilter::default()
    };
    match state.store().find(&filter).await {
        Ok(students) => match students.into_iter().next() {
            Some(student) => edit_student_form(&student.to_form(), None),
            None => error_markup(&MissingStudentSnafu { admin_number }.build()),
        },
        Err(error) => error_markup(&error),
    }
}

pub async fn internal_update_student(
    State(state): State<RegistraState>,
    Form(form): Form<StudentForm>,
) -> Markup {
    let submitted = form.clone();
    let outcome = match form.into_parts() {
        Ok((admin_number, details)) => {
            match state.store().replace(&admin_number, details).await {
                Ok(Some(_)) => Ok(()),
                Ok(None) => Err(MissingStudentSnafu { admin_number }.build()),
                Err(error) => Err(error),
            }
        }
        Err(error) => Err(error),
    };

    match outcome {
        Ok(()) => form_and_refreshed_table(&state).await,
        Err(error) => edit_student_form(&submitted, Some(&error)),
    }
}

pub async fn internal_delete_student(
    State(state): State<RegistraState>,
    Query(AdminNumberForm { admin_number }): Query<AdminNumberForm>,
) -> Markup {
    let banner = match state.store().delete(&admin_number).await {
        Ok(true) => None,
        Ok(false) => Some(error_markup(
            &MissingStudentSnafu { admin_number }.build(),
        )),
        Err(error) => Some(error_markup(&error)),
    };
    let table = render_students(&state, &ReadStudentParams::default()).await;

    html! {
        @if let Some(banner) = banner {
            (banner)
        }
        (table)
    }
}

/// The UI boundary: a table of records, or the message from the query
/// pipeline's classification. The browser never re-derives the empty/error
/// state itself.
async fn render_students(state: &RegistraState, params: &ReadStudentParams) -> Markup {
    match run_read_query(state.store(), params).await {
        Ok(students) => students_table(&students),
        Err(error) => error_markup(&error),
    }
}

/// A fresh add form plus an out-of-band refresh of the table, used after
/// every successful write from the UI.
async fn form_and_refreshed_table(state: &RegistraState) -> Markup {
    let table = render_students(state, &ReadStudentParams::default()).await;
    html! {
        (add_student_form(None))
        div hx-swap-oob="outerHTML:#student_table" id="student_table" {
            (table)
        }
    }
}

fn error_markup(error: &RegistraError) -> Markup {
    if error.status_code().is_server_error() {
        error!(?error, "Error rendering student records");
        error_banner(error.message())
    } else if matches!(error, RegistraError::NoStudentsFound) {
        info_banner(error.message())
    } else {
        error_banner(error.message())
    }
}

fn students_table(students: &[Student]) -> Markup {
    let rows = students
        .iter()
        .map(|student| {
            // built with serde_json so quotes and backslashes in the admin
            // number survive the round trip through the attribute
            let payload =
                serde_json::json!({ "adminNumber": student.admin_number }).to_string();
            [
                html! {(student.admin_number)},
                html! {(student.name)},
                html! {(student.diploma)},
                html! {(student.c_gpa)},
                html! {
                    @if let Some(image) = &student.image {
                        img src=(image) alt="student photo" class="h-10 w-10 object-cover rounded" {}
                    } @else {
                        span class="text-gray-500" {"(none)"}
                    }
                },
                html! {
                    button class="bg-blue-600 hover:bg-blue-800 font-bold py-1 px-2 rounded mr-2" hx-get="/internal/students/edit_form" hx-vals=(payload) hx-target="#student_form" {
                        "Edit"
                    }
                    button class="bg-red-600 hover:bg-red-800 font-bold py-1 px-2 rounded" hx-delete="/internal/students" hx-vals=(payload) hx-target="#student_table" {
                        "Delete"
                    }
                },
            ]
        })
        .collect();

    render_table(
        ["Admin No.", "Name", "Diploma", "cGPA", "Image", ""],
        rows,
    )
}

fn add_student_form(error: Option<&RegistraError>) -> Markup {
    html! {
        div id="student_form" class="p-4" {
            h2 class="text-xl font-semibold mb-2" {"Add New Student"}
            @if let Some(error) = error {
                (error_banner(error.message()))
            }
            form hx-put="/internal/students" hx-target="#student_form" class="flex flex-col space-y-2" {
                input required type="text" name="adminNumber" placeholder="Admin number" class="shadow appearance-none border rounded py-2 px-3 leading-tight focus:outline-none bg-gray-700 border-gray-600" {}
                input required type="text" name="name" placeholder="Name" class="shadow appearance-none border rounded py-2 px-3 leading-tight focus:outline-none bg-gray-700 border-gray-600" {}
                input required type="text" name="diploma" placeholder="Diploma" class="shadow appearance-none border rounded py-2 px-3 leading-tight focus:outline-none bg-gray-700 border-gray-600" {}
                input required type="text" name="cGPA" placeholder="cGPA e.g. 3.5" class="shadow appearance-none border rounded py-2 px-3 leading-tight focus:outline-none bg-gray-700 border-gray-600" {}
                input type="text" name="image" placeholder="Image data URI (optional)" class="shadow appearance-none border rounded py-2 px-3 leading-tight focus:outline-none bg-gray-700 border-gray-600" {}
                button type="submit" class="bg-blue-500 hover:bg-blue-700 font-bold py-2 px-4 rounded focus:outline-none" {
                    "Add Student"
                }
            }
        }
    }
}

fn edit_student_form(form: &StudentForm, error: Option<&RegistraError>) -> Markup {
    html! {
        div id="student_form" class="p-4" {
            h2 class="text-xl font-semibold mb-2" {"Edit Student " (form.admin_number)}
            @if let Some(error) = error {
                (error_banner(error.message()))
            }
            form hx-put="/internal/students/edit_form" hx-target="#student_form" class="flex flex-col space-y-2" {
                input type="hidden" name="adminNumber" value=(form.admin_number) {}
                input required type="text" name="name" value=(form.name) class="shadow appearance-none border rounded py-2 px-3 leading-tight focus:outline-none bg-gray-700 border-gray-600" {}
                input required type="text" name="diploma" value=(form.diploma) class="shadow appearance-none border rounded py-2 px-3 leading-tight focus:outline-none bg-gray-700 border-gray-600" {}
                input required type="text" name="cGPA" value=(form.c_gpa) class="shadow appearance-none border rounded py-2 px-3 leading-tight focus:outline-none bg-gray-700 border-gray-600" {}
                input type="text" name="image" value=[form.image.as_deref()] placeholder="Image data URI (optional)" class="shadow appearance-none border rounded py-2 px-3 leading-tight focus:outline-none bg-gray-700 border-gray-600" {}
                div class="flex flex-row space-x-2" {
                    button type="submit" class="bg-blue-500 hover:bg-blue-700 font-bold py-2 px-4 rounded focus:outline-none" {
                        "Save"
                    }
                    button type="button" class="bg-gray-600 hover:bg-gray-700 font-bold py-2 px-4 rounded" hx-get="/internal/students/new_form" hx-target="#student_form" {
                        "Cancel"
                    }
                }
            }
        }
    }
}
