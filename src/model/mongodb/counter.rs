use log::debug;
use mongodb::{
    bson::doc,
    options::{FindOneAndUpdateOptions, FindOneOptions, ReturnDocument, UpdateOptions},
    ClientSession,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{db::question::Question, mongodb::Coll};

/// ID of the counter that allocates question IDs.
pub const QUESTION_ID_COUNTER_ID: &str = "question_id";

/// A counter object used to implement auto-increment fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counter {
    #[serde(rename = "_id")]
    pub id: String,
    pub next: u32,
}

impl Counter {
    /// Create a new `Counter` with the given ID, starting at the given value.
    pub fn new(id: impl Into<String>, start: u32) -> Self {
        Self {
            id: id.into(),
            next: start,
        }
    }

    /// Atomically retrieve the next value of the counter with the given ID.
    pub async fn next(
        counters: &Coll<Counter>,
        id: &str,
        session: &mut ClientSession,
    ) -> Result<u32> {
        let update = doc! {
            "$inc": { "next": 1 }
        };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::Before)
            .build();
        let counter = counters
            .find_one_and_update_with_session(doc! { "_id": id }, update, options, session)
            .await?
            .ok_or_else(|| Error::not_found(format!("Counter with ID '{id}'")))?;
        Ok(counter.next)
    }
}

/// Ensure the question ID counter exists and is ahead of every stored question.
///
/// Questions may be seeded directly into the store, so the counter is raised
/// to one past the highest existing ID. This operation is idempotent.
pub async fn ensure_question_id_counter_exists(
    counters: &Coll<Counter>,
    questions: &Coll<Question>,
) -> Result<()> {
    let newest = FindOneOptions::builder().sort(doc! {"_id": -1}).build();
    let first_free = match questions.find_one(None, newest).await? {
        Some(question) => question.id.checked_add(1).ok_or_else(|| {
            Error::validation(format!("No question IDs left after {}", question.id))
        })?,
        None => 1,
    };

    let update = doc! {
        "$max": { "next": first_free }
    };
    let upsert = UpdateOptions::builder().upsert(true).build();
    counters
        .update_one(doc! { "_id": QUESTION_ID_COUNTER_ID }, update, upsert)
        .await?;
    debug!("Question ID counter starts at {first_free} or later");

    Ok(())
}
