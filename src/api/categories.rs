use mongodb::{bson::doc, options::FindOptions};
use rocket::{futures::TryStreamExt, http::Status, serde::json::Json, Route};

use crate::error::{ApiResult, Error, OrStatus, Result};
use crate::model::{
    api::{
        category::CategoryList,
        envelope::Success,
        question::QuestionList,
    },
    common::CategoryId,
    db::{
        category::{allowed_category_ids, category_map, Category},
        question::Question,
    },
    mongodb::Coll,
};

pub fn routes() -> Vec<Route> {
    routes![list_categories, category_questions]
}

#[get("/categories")]
async fn list_categories(categories: Coll<Category>) -> ApiResult<Json<Success<CategoryList>>> {
    let categories = category_map(&categories)
        .await
        .or_status(Status::NotFound)?;
    Ok(Success::json(CategoryList { categories }))
}

#[get("/categories/<category_id>/questions")]
async fn category_questions(
    category_id: CategoryId,
    questions: Coll<Question>,
    categories: Coll<Category>,
) -> ApiResult<Json<Success<QuestionList>>> {
    let matching = questions_in_category(category_id, &questions, &categories)
        .await
        .or_status(Status::NotFound)?;
    Ok(Success::json(matching.into()))
}

/// All questions in the given category, ordered by ID.
async fn questions_in_category(
    category_id: CategoryId,
    questions: &Coll<Question>,
    categories: &Coll<Category>,
) -> Result<Vec<Question>> {
    if !allowed_category_ids(categories)
        .await?
        .contains(&category_id)
    {
        return Err(Error::not_found(format!("Category {category_id}")));
    }

    let by_id = FindOptions::builder().sort(doc! {"_id": 1}).build();
    let matching = questions
        .find(doc! {"category": category_id}, by_id)
        .await?
        .try_collect()
        .await?;
    Ok(matching)
}

#[cfg(test)]
mod tests {
    use mongodb::Database;
    use rocket::{
        http::Status,
        local::asynchronous::Client,
        serde::json::serde_json,
    };

    use crate::model::api::envelope::ErrorBody;

    use super::*;

    #[backend_test(seeded)]
    async fn get_categories(client: Client) {
        let response = client.get(uri!(list_categories)).dispatch().await;
        assert_eq!(response.status(), Status::Ok);

        let raw_response = response.into_string().await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw_response).unwrap();
        assert_eq!(value["success"], true);
        let list: CategoryList = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(list.categories.len(), 6);
        assert_eq!(list.categories[&4], "History");

        // Keys are stringified IDs, in ID order.
        let keys = value["categories"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect::<Vec<_>>();
        assert_eq!(keys, vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[backend_test]
    async fn get_categories_empty(client: Client) {
        let response = client.get(uri!(list_categories)).dispatch().await;
        assert_eq!(response.status(), Status::Ok);

        let raw_response = response.into_string().await.unwrap();
        let list: CategoryList = serde_json::from_str(&raw_response).unwrap();
        assert!(list.categories.is_empty());
    }

    #[backend_test(seeded)]
    async fn get_category_questions(client: Client, db: Database) {
        let response = client
            .get("/categories/2/questions")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let raw_response = response.into_string().await.unwrap();
        let list: Success<QuestionList> = serde_json::from_str(&raw_response).unwrap();
        assert!(list.success);
        assert_eq!(list.body.total_questions, 4);
        assert_eq!(list.body.current_category, vec![2, 2, 2, 2]);
        let ids = list.body.questions.iter().map(|q| q.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![12, 13, 14, 15]);

        // The listing reflects the store at query time.
        Coll::<Question>::from_db(&db)
            .delete_one(doc! {"_id": 13}, None)
            .await
            .unwrap();
        let response = client
            .get("/categories/2/questions")
            .dispatch()
            .await;
        let list: Success<QuestionList> =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(list.body.total_questions, 3);
    }

    #[backend_test(seeded)]
    async fn category_zero_is_allowed_but_empty(client: Client) {
        let response = client
            .get("/categories/0/questions")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let list: Success<QuestionList> =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert!(list.body.questions.is_empty());
        assert_eq!(list.body.total_questions, 0);
    }

    #[backend_test(seeded)]
    async fn unknown_category(client: Client) {
        for category_id in [7, 1000] {
            let response = client
                .get(format!("/categories/{category_id}/questions"))
                .dispatch()
                .await;
            assert_eq!(response.status(), Status::NotFound);

            let error: ErrorBody =
                serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
            assert_eq!(error, ErrorBody::for_status(Status::NotFound));
        }

        // Not an integer at all.
        let response = client.get("/categories/sports/questions").dispatch().await;
        assert_eq!(response.status(), Status::NotFound);
    }

    #[backend_test(seeded)]
    async fn new_category_is_accepted(client: Client, categories: Coll<Category>) {
        categories
            .insert_one(
                Category {
                    id: 7,
                    kind: "Cooking".to_string(),
                },
                None,
            )
            .await
            .unwrap();

        let response = client
            .get("/categories/7/questions")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
    }
}
