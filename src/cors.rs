use rocket::{
    fairing::{Fairing, Info, Kind},
    http::Header,
    Request, Response, Route,
};

use crate::config::Config;

pub const ALLOW_HEADERS: &str = "Content-Type,Authorization";
pub const ALLOW_METHODS: &str = "GET,POST,DELETE";

pub fn routes() -> Vec<Route> {
    routes![preflight]
}

/// Answer CORS preflight requests for any path; the headers come from [`CorsFairing`].
#[options("/<_..>")]
fn preflight() {}

/// A rocket fairing that adds permissive cross-origin headers to every response,
/// including error responses.
#[derive(Debug, Copy, Clone)]
pub struct CorsFairing;

#[rocket::async_trait]
impl Fairing for CorsFairing {
    fn info(&self) -> Info {
        Info {
            name: "CORS",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let origin = req
            .rocket()
            .state::<Config>()
            .map(|config| config.cors_allow_origin().to_string())
            .unwrap_or_else(|| "*".to_string());
        res.set_header(Header::new("Access-Control-Allow-Origin", origin));
        res.set_header(Header::new("Access-Control-Allow-Headers", ALLOW_HEADERS));
        res.set_header(Header::new("Access-Control-Allow-Methods", ALLOW_METHODS));
    }
}
