//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod contacts;
pub mod error;
pub mod health;
pub mod identity;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::{Scope, web};

/// All `/api` routes. Health probes are mounted separately at the root.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use contacts_backend::inbound::http::{api_scope, validation::json_config};
///
/// let app = App::new().app_data(json_config()).service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(users::register)
        .service(auth::login)
        .service(auth::current_user)
        .service(contacts::list_contacts)
        .service(contacts::create_contact)
        .service(contacts::update_contact)
        .service(contacts::delete_contact)
}
