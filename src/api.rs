use rocket::{Catcher, Route};

use crate::cors;

mod catchers;
mod categories;
mod questions;
mod quizzes;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(categories::routes());
    routes.extend(questions::routes());
    routes.extend(quizzes::routes());
    routes.extend(cors::routes());
    routes
}

pub fn catchers() -> Vec<Catcher> {
    catchers::catchers()
}
