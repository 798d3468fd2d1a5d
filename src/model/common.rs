//! Types shared between the database and API representations.

/// Our question IDs are integers, allocated by a counter.
pub type QuestionId = u32;
/// Our category IDs are small integers.
pub type CategoryId = u32;
/// Difficulty ratings are small positive integers.
pub type Difficulty = u32;
