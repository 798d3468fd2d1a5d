//! JSON error bodies for every error status.

use rocket::{
    http::{Method, Status},
    serde::json::Json,
    Catcher, Request,
};

use crate::model::api::envelope::ErrorBody;

pub fn catchers() -> Vec<Catcher> {
    catchers![
        bad_request,
        not_found,
        unprocessable,
        internal_server_error,
        default
    ]
}

type ErrorResponse = (Status, Json<ErrorBody>);

fn error_response(status: Status) -> ErrorResponse {
    (status, Json(ErrorBody::for_status(status)))
}

#[catch(400)]
fn bad_request() -> ErrorResponse {
    error_response(Status::BadRequest)
}

/// Also reports 405 when no route handled the request but the path is
/// served under a different method.
#[catch(404)]
fn not_found(req: &Request<'_>) -> ErrorResponse {
    if req.route().is_none() && served_by_other_method(req) {
        error_response(Status::MethodNotAllowed)
    } else {
        error_response(Status::NotFound)
    }
}

#[catch(422)]
fn unprocessable() -> ErrorResponse {
    error_response(Status::UnprocessableEntity)
}

#[catch(500)]
fn internal_server_error() -> ErrorResponse {
    error_response(Status::InternalServerError)
}

#[catch(default)]
fn default(status: Status, _req: &Request<'_>) -> ErrorResponse {
    error_response(status)
}

/// Whether any mounted route for another method matches the request path.
/// CORS preflight routes match every path, so they are not considered.
fn served_by_other_method(req: &Request<'_>) -> bool {
    let segments = req.uri().path().segments().collect::<Vec<_>>();
    req.rocket()
        .routes()
        .filter(|route| route.method != req.method() && route.method != Method::Options)
        .filter(|route| !(req.method() == Method::Head && route.method == Method::Get))
        .any(|route| path_matches(route.uri.path(), &segments))
}

/// Match request path segments against a route path such as
/// `/questions/<question_id>` or `/static/<path..>`.
///
/// Every single-segment parameter in our routes is an integer ID, so a
/// segment only matches one if it parses as an ID.
fn path_matches(pattern: &str, segments: &[&str]) -> bool {
    let mut parts = pattern.split('/').filter(|part| !part.is_empty());
    let mut segments = segments.iter();
    loop {
        match (parts.next(), segments.next()) {
            (Some(part), _) if part.starts_with('<') && part.ends_with("..>") => return true,
            (Some(part), Some(segment)) if part.starts_with('<') && part.ends_with('>') => {
                if segment.parse::<u32>().is_err() {
                    return false;
                }
            }
            (Some(part), Some(segment)) if part == *segment => {}
            (None, None) => return true,
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use rocket::{
        http::{ContentType, Status},
        local::asynchronous::Client,
        serde::json::serde_json,
    };

    use super::*;

    #[test]
    fn route_paths() {
        assert!(path_matches("/questions", &["questions"]));
        assert!(path_matches("/questions/<question_id>", &["questions", "45"]));
        assert!(path_matches(
            "/categories/<category_id>/questions",
            &["categories", "3", "questions"]
        ));
        assert!(path_matches("/<_..>", &[]));
        assert!(path_matches("/<_..>", &["a", "b"]));
        assert!(!path_matches("/questions", &["questions", "45"]));
        assert!(!path_matches("/questions/<question_id>", &["questions"]));
        assert!(!path_matches("/search", &["quizzes"]));
        assert!(path_matches("/", &[]));

        // Parameters are IDs; anything else is a different resource.
        assert!(!path_matches("/questions/<question_id>", &["questions", "abc"]));
        assert!(!path_matches("/questions/<question_id>", &["questions", "-1"]));
        assert!(!path_matches(
            "/categories/<category_id>/questions",
            &["categories", "sports", "questions"]
        ));
    }

    #[backend_test]
    async fn method_not_allowed(client: Client) {
        let response = client
            .post("/questions/45")
            .header(ContentType::JSON)
            .body("{}")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::MethodNotAllowed);

        let error: ErrorBody =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(
            error,
            ErrorBody {
                success: false,
                error: 405,
                message: "method not allowed".to_string(),
            }
        );

        let response = client.get("/search").dispatch().await;
        assert_eq!(response.status(), Status::MethodNotAllowed);
        let response = client.delete("/categories").dispatch().await;
        assert_eq!(response.status(), Status::MethodNotAllowed);
    }

    #[backend_test]
    async fn unknown_path(client: Client) {
        let response = client.get("/answers").dispatch().await;
        assert_eq!(response.status(), Status::NotFound);

        let error: ErrorBody =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(error, ErrorBody::for_status(Status::NotFound));
    }

    #[backend_test]
    async fn non_integer_id_is_not_found(client: Client) {
        for path in ["/questions/abc", "/questions/4.5"] {
            let response = client.get(path).dispatch().await;
            assert_eq!(response.status(), Status::NotFound);

            let error: ErrorBody =
                serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
            assert_eq!(error, ErrorBody::for_status(Status::NotFound));
        }

        // An integer ID under the wrong method is still 405.
        let response = client.get("/questions/45").dispatch().await;
        assert_eq!(response.status(), Status::MethodNotAllowed);
    }

    #[backend_test]
    async fn wrong_body_shape(client: Client) {
        let response = client
            .post("/search")
            .header(ContentType::JSON)
            .body(r#"{"searchTerm": 42}"#)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::UnprocessableEntity);

        let error: ErrorBody =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(error.message, "unprocessable");
    }
}
