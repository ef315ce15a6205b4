use crate::error::{MissingFieldSnafu, ParseGpaSnafu, RegistraResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use snafu::{ResultExt, ensure};

/// A single student record. `admin_number` is the external key for keyed
/// operations; `c_gpa` crosses the wire as decimal text so the value never
/// gets a binary float encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub admin_number: String,
    pub name: String,
    pub diploma: String,
    #[serde(rename = "cGPA", with = "rust_decimal::serde::str")]
    pub c_gpa: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Student {
    pub fn from_parts(admin_number: String, details: StudentDetails) -> Self {
        Self {
            admin_number,
            name: details.name,
            diploma: details.diploma,
            c_gpa: details.c_gpa,
            image: details.image,
        }
    }

    /// The record as an editable form payload, cGPA back in its textual form.
    pub fn to_form(&self) -> StudentForm {
        StudentForm {
            admin_number: self.admin_number.clone(),
            name: self.name.clone(),
            diploma: self.diploma.clone(),
            c_gpa: self.c_gpa.to_string(),
            image: self.image.clone(),
        }
    }
}

/// The mutable fields of a record, i.e. everything except the key.
#[derive(Debug, Clone)]
pub struct StudentDetails {
    pub name: String,
    pub diploma: String,
    pub c_gpa: Decimal,
    pub image: Option<String>,
}

/// Raw add/update payload as it arrives from a JSON body or an urlencoded
/// form. `cGPA` stays textual here and is coerced during validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentForm {
    #[serde(default)]
    pub admin_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub diploma: String,
    #[serde(rename = "cGPA", default)]
    pub c_gpa: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub image: Option<String>,
}

impl StudentForm {
    pub fn into_student(self) -> RegistraResult<Student> {
        let (admin_number, details) = self.into_parts()?;
        Ok(Student::from_parts(admin_number, details))
    }

    /// Validates every required field and splits the payload into key +
    /// mutable fields. No store access happens here, so a failure cannot
    /// have persisted anything.
    pub fn into_parts(self) -> RegistraResult<(String, StudentDetails)> {
        let admin_number = required(self.admin_number, "adminNumber")?;
        let name = required(self.name, "name")?;
        let diploma = required(self.diploma, "diploma")?;
        let raw_gpa = required(self.c_gpa, "cGPA")?;
        let c_gpa = raw_gpa
            .parse::<Decimal>()
            .context(ParseGpaSnafu { original: raw_gpa })?;

        Ok((
            admin_number,
            StudentDetails {
                name,
                diploma,
                c_gpa,
                image: self.image,
            },
        ))
    }
}

fn required(value: String, field: &'static str) -> RegistraResult<String> {
    let trimmed = value.trim();
    ensure!(!trimmed.is_empty(), MissingFieldSnafu { field });
    Ok(trimmed.to_owned())
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|s| !s.trim().is_empty()))
}

/// Optional predicates combined as a conjunction. An absent predicate is
/// simply omitted, it never turns into a match-anything wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub admin_number: Option<String>,
    pub name_contains: Option<String>,
    pub diploma: Option<String>,
}

impl StudentFilter {
    pub fn matches(&self, student: &Student) -> bool {
        self.admin_number
            .as_ref()
            .is_none_or(|wanted| &student.admin_number == wanted)
            && self.name_contains.as_ref().is_none_or(|needle| {
                student
                    .name
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            })
            && self
                .diploma
                .as_ref()
                .is_none_or(|wanted| &student.diploma == wanted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Only `asc` and `desc` mean anything; everything else leaves the
    /// store's natural order in place.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(Self::Ascending),
            "desc" => Some(Self::Descending),
            _ => None,
        }
    }
}

/// Stable sort on the numeric cGPA value, so equal values keep the store's
/// relative order.
pub fn sort_by_cgpa(students: &mut [Student], order: SortOrder) {
    students.sort_by(|a, b| match order {
        SortOrder::Ascending => a.c_gpa.cmp(&b.c_gpa),
        SortOrder::Descending => b.c_gpa.cmp(&a.c_gpa),
    });
}
