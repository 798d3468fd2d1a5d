use log::{debug, info};
use mongodb::{bson::doc, options::FindOptions, Client, ClientSession};
use rocket::{futures::TryStreamExt, http::Status, serde::json::Json, Route, State};

use crate::error::{ApiResult, Error, OrStatus, Result};
use crate::model::{
    api::{
        envelope::Success,
        pagination::Pagination,
        question::{
            QuestionCreated, QuestionDeleted, QuestionList, QuestionPage, QuestionSpec,
            SearchRequest,
        },
    },
    common::QuestionId,
    db::{
        category::{category_map, Category},
        question::{Question, QuestionCore},
    },
    mongodb::{Coll, Counter, QUESTION_ID_COUNTER_ID},
};

pub fn routes() -> Vec<Route> {
    routes![
        list_questions,
        delete_question,
        create_question,
        search_questions,
    ]
}

#[get("/questions?<page>")]
async fn list_questions(
    page: Option<i64>,
    questions: Coll<Question>,
    categories: Coll<Category>,
) -> ApiResult<Json<Success<QuestionPage>>> {
    let pagination = Pagination::from_query(page);
    let page = question_page(pagination, &questions, &categories)
        .await
        .or_status(Status::NotFound)?;
    Ok(Success::json(page))
}

/// One page of all questions ordered by ID, along with the category mapping.
async fn question_page(
    pagination: Pagination,
    questions: &Coll<Question>,
    categories: &Coll<Category>,
) -> Result<QuestionPage> {
    let empty_page = || Error::not_found(format!("Page {} of questions", pagination.page_num()));

    let skip = pagination.skip().ok_or_else(empty_page)?;
    let page_options = FindOptions::builder()
        .sort(doc! {"_id": 1})
        .skip(skip)
        .limit(pagination.page_size() as i64)
        .build();
    let page: Vec<Question> = questions
        .find(None, page_options)
        .await?
        .try_collect()
        .await?;
    if page.is_empty() {
        return Err(empty_page());
    }

    let total_questions = questions.count_documents(None, None).await?;
    let categories = category_map(categories).await?;
    let current_category = page.iter().map(|question| question.category).collect();

    Ok(QuestionPage {
        questions: page.into_iter().map(Into::into).collect(),
        total_questions,
        categories,
        current_category,
    })
}

#[delete("/questions/<question_id>")]
async fn delete_question(
    question_id: QuestionId,
    questions: Coll<Question>,
    db_client: &State<Client>,
) -> ApiResult<Json<Success<QuestionDeleted>>> {
    let mut session = db_client
        .start_session(None)
        .await
        .or_status(Status::UnprocessableEntity)?;
    let result = remove_question(question_id, &questions, &mut session).await;
    drop(session);
    debug!("Released store session after deleting question {question_id}");

    let total_questions = result.or_status(Status::UnprocessableEntity)?;
    Ok(Success::json(QuestionDeleted {
        deleted: question_id,
        total_questions,
    }))
}

/// Delete the question, returning how many questions remain.
async fn remove_question(
    question_id: QuestionId,
    questions: &Coll<Question>,
    session: &mut ClientSession,
) -> Result<u64> {
    let filter = doc! {"_id": question_id};
    questions
        .find_one_with_session(filter.clone(), None, session)
        .await?
        .ok_or_else(|| Error::not_found(format!("Question {question_id}")))?;

    let result = questions
        .delete_one_with_session(filter, None, session)
        .await?;
    if result.deleted_count != 1 {
        // Deleted by a concurrent request between the lookup and here.
        return Err(Error::not_found(format!("Question {question_id}")));
    }
    info!("Deleted question {question_id}");

    let remaining = questions
        .count_documents_with_session(None, None, session)
        .await?;
    Ok(remaining)
}

#[post("/questions", data = "<spec>")]
async fn create_question(
    spec: Json<QuestionSpec>,
    questions: Coll<Question>,
    counters: Coll<Counter>,
    db_client: &State<Client>,
) -> ApiResult<Json<Success<QuestionCreated>>> {
    // Reject incomplete questions before touching the database.
    let core = spec
        .into_inner()
        .validate()
        .or_status(Status::UnprocessableEntity)?;

    let mut session = db_client
        .start_session(None)
        .await
        .or_status(Status::UnprocessableEntity)?;
    let result = insert_question(core, &questions, &counters, &mut session).await;
    drop(session);
    debug!("Released store session after creating a question");

    let created = result.or_status(Status::UnprocessableEntity)?;
    Ok(Success::json(created))
}

async fn insert_question(
    core: QuestionCore,
    questions: &Coll<Question>,
    counters: &Coll<Counter>,
    session: &mut ClientSession,
) -> Result<QuestionCreated> {
    let id = Counter::next(counters, QUESTION_ID_COUNTER_ID, session).await?;
    let question = Question { id, body: core };
    questions
        .insert_one_with_session(&question, None, session)
        .await?;
    info!("Created question {id}");

    let total_questions = questions
        .count_documents_with_session(None, None, session)
        .await?;
    Ok(QuestionCreated {
        created: id,
        total_questions,
    })
}

#[post("/search", data = "<search>")]
async fn search_questions(
    search: Json<SearchRequest>,
    questions: Coll<Question>,
) -> ApiResult<Json<Success<QuestionList>>> {
    let matching = find_matching(search.term(), &questions)
        .await
        .or_status(Status::NotFound)?;
    Ok(Success::json(matching.into()))
}

/// Questions whose text contains the term, ignoring case, ordered by ID.
async fn find_matching(term: &str, questions: &Coll<Question>) -> Result<Vec<Question>> {
    // The term is matched literally, not as a pattern.
    let filter = doc! {
        "question": {
            "$regex": regex::escape(term),
            "$options": "i",
        }
    };
    let by_id = FindOptions::builder().sort(doc! {"_id": 1}).build();
    let matching = questions.find(filter, by_id).await?.try_collect().await?;
    Ok(matching)
}
