use crate::{
    data::student::{SortOrder, Student, StudentFilter, sort_by_cgpa},
    error::{NoStudentsFoundSnafu, RegistraResult},
    store::StudentStore,
};
use serde::Deserialize;

/// Query-string parameters of the read endpoint, all optional. A blank value
/// counts as absent, the same as the parameter not appearing at all.
#[derive(Debug, Default, Deserialize)]
pub struct ReadStudentParams {
    #[serde(rename = "adminNumber")]
    pub admin_number: Option<String>,
    #[serde(rename = "searchName")]
    pub search_name: Option<String>,
    #[serde(rename = "filterDiploma")]
    pub filter_diploma: Option<String>,
    #[serde(rename = "sortCGPA")]
    pub sort_cgpa: Option<String>,
}

impl ReadStudentParams {
    pub fn filter(&self) -> StudentFilter {
        StudentFilter {
            admin_number: non_blank(self.admin_number.as_deref()),
            name_contains: non_blank(self.search_name.as_deref()),
            diploma: non_blank(self.filter_diploma.as_deref()),
        }
    }

    pub fn sort_order(&self) -> Option<SortOrder> {
        self.sort_cgpa.as_deref().and_then(SortOrder::parse)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// The read pipeline: build the predicate conjunction, fetch through the
/// store, sort on the numeric cGPA in application code, and classify an
/// empty result as not-found instead of returning an empty success payload.
pub async fn run_read_query(
    store: &dyn StudentStore,
    params: &ReadStudentParams,
) -> RegistraResult<Vec<Student>> {
    let mut students = store.find(&params.filter()).await?;

    if let Some(order) = params.sort_order() {
        sort_by_cgpa(&mut students, order);
    }

    if students.is_empty() {
        return NoStudentsFoundSnafu.fail();
    }

    Ok(students)
}
