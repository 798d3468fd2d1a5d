use log::debug;
use mongodb::bson::doc;
use rocket::{futures::TryStreamExt, http::Status, serde::json::Json, Route};

use crate::error::{ApiResult, Error, OrStatus, Result};
use crate::model::{
    api::{
        envelope::Success,
        quiz::{QuizQuestion, QuizRequest},
    },
    db::{
        category::{allowed_category_ids, Category, ALL_CATEGORIES},
        question::Question,
    },
    mongodb::Coll,
};

pub fn routes() -> Vec<Route> {
    routes![next_quiz_question]
}

#[post("/quizzes", data = "<request>")]
async fn next_quiz_question(
    request: Json<QuizRequest>,
    questions: Coll<Question>,
    categories: Coll<Category>,
) -> ApiResult<Json<Success<QuizQuestion>>> {
    let picked = pick_question(request.into_inner(), &questions, &categories)
        .await
        .or_status(Status::NotFound)?;
    Ok(Success::json(QuizQuestion {
        question: picked.map(Into::into),
    }))
}

/// Pick a random question from the quiz category that has not been asked yet.
///
/// Returns `None` once every eligible question has been asked.
async fn pick_question(
    request: QuizRequest,
    questions: &Coll<Question>,
    categories: &Coll<Category>,
) -> Result<Option<Question>> {
    let category_id = request.category_id().ok_or_else(|| {
        Error::not_found(format!(
            "Quiz category {:?} is missing or not an integer",
            request.quiz_category
        ))
    })?;
    if !allowed_category_ids(categories)
        .await?
        .contains(&category_id)
    {
        return Err(Error::not_found(format!("Quiz category {category_id}")));
    }

    let mut filter = doc! {
        "_id": { "$nin": request.previous_questions().to_vec() },
    };
    if category_id != ALL_CATEGORIES {
        filter.insert("category", category_id);
    }
    let pipeline = [
        doc! { "$match": filter },
        doc! { "$sample": { "size": 1 } },
    ];

    let picked = questions
        .aggregate(pipeline, None)
        .await?
        .with_type::<Question>()
        .try_next()
        .await?;
    if picked.is_none() {
        debug!("No questions left to ask in category {category_id}");
    }
    Ok(picked)
}
