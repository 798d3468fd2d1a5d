#[macro_use]
extern crate rocket;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

use rocket::{Build, Rocket};

use crate::config::{ConfigFairing, DatabaseFairing};
use crate::cors::CorsFairing;
use crate::logging::LoggerFairing;

pub mod api;
pub mod config;
pub mod cors;
pub mod error;
pub mod logging;
pub mod model;

/// Build the rocket, without connecting to the database until ignition.
pub fn build() -> Rocket<Build> {
    base_rocket().attach(DatabaseFairing)
}

/// Everything except the database connection, which tests provide themselves.
fn base_rocket() -> Rocket<Build> {
    rocket::build()
        .mount("/", api::routes())
        .register("/", api::catchers())
        .attach(ConfigFairing)
        .attach(LoggerFairing)
        .attach(CorsFairing)
}

/// Connect to the database server named by `db_uri`.
#[cfg(test)]
async fn db_client() -> mongodb::Client {
    let db_uri = rocket::Config::figment()
        .extract_inner::<String>("db_uri")
        .unwrap();
    mongodb::Client::with_uri_str(db_uri).await.unwrap()
}

/// A fresh database name, so tests can run in parallel.
#[cfg(test)]
fn database() -> String {
    format!("test{}", rand::random::<u64>())
}

/// Build the rocket against the given test database.
#[cfg(test)]
async fn rocket_for_db(client: mongodb::Client, db_name: &str) -> Rocket<Build> {
    let db = client.database(db_name);
    config::prepare_database(&db).await.unwrap();
    base_rocket().manage(client).manage(db)
}
