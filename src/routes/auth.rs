use actix_web::{web, HttpResponse, Responder};

use crate::middleware::auth::TokenKeys;
use crate::models::user::{Session, SignInInput, SignInResponse, UserRole};
use crate::routes::errors::ErrorResponse;
use crate::services::session::MockAuthenticator;

pub async fn signin(keys: web::Data<TokenKeys>, input: web::Json<SignInInput>) -> impl Responder {
    sign_in_as(&keys, input.into_inner(), UserRole::User)
}

pub async fn admin_signin(
    keys: web::Data<TokenKeys>,
    input: web::Json<SignInInput>,
) -> impl Responder {
    sign_in_as(&keys, input.into_inner(), UserRole::Admin)
}

fn sign_in_as(keys: &TokenKeys, input: SignInInput, role: UserRole) -> HttpResponse {
    if input.email.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Email is required"));
    }

    let user = MockAuthenticator::sign_in(&input.email, &input.password, role);
    match keys.issue(&user) {
        Ok(auth_token) => {
            log::info!("Signed in {} as {:?}", user.email, user.role);
            HttpResponse::Ok().json(SignInResponse { auth_token, user })
        }
        Err(err) => {
            log::error!("Token generation failed: {:?}", err);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Token generation failed"))
        }
    }
}

pub async fn session(session: Session) -> impl Responder {
    HttpResponse::Ok().json(session)
}
