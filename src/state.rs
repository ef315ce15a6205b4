use crate::{
    config::DbConfig,
    error::RegistraResult,
    store::{StudentStore, postgres::PostgresStudentStore},
};
use maud::{DOCTYPE, Markup, html};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

#[derive(Clone)]
pub struct RegistraState {
    store: Arc<dyn StudentStore>,
}

impl RegistraState {
    pub async fn new(options: PgPoolOptions, db_config: &DbConfig) -> RegistraResult<Self> {
        let store = PostgresStudentStore::connect(options, db_config).await?;
        Ok(Self::with_store(Arc::new(store)))
    }

    /// State over any store implementation, which is how the test suite runs
    /// the app against the in-memory store.
    pub fn with_store(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn StudentStore {
        self.store.as_ref()
    }

    #[allow(clippy::unused_self, clippy::needless_pass_by_value)] //in case self is ever needed :), and to allow direct html! usage
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Registra" }
                }
                body class="bg-gray-900 min-h-screen flex flex-col items-center justify-center text-white" {
                    (markup)
                }
            }
        }
    }
}
