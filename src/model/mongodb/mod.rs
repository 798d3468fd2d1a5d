mod collection;
mod counter;

pub use collection::{ensure_indexes_exist, Coll, MongoCollection};
pub use counter::{ensure_question_id_counter_exists, Counter, QUESTION_ID_COUNTER_ID};
