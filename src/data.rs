use serde::Deserialize;

pub mod student;

#[derive(Deserialize)]
pub struct AdminNumberForm {
    #[serde(rename = "adminNumber")]
    pub admin_number: String,
}
