use std::future::{ready, Ready};

use actix_web::{dev::Payload, Error, FromRequest, HttpMessage, HttpRequest};

use crate::models::user::{Session, SessionUser};

/// Never fails: requests without a verified token get an anonymous session.
impl FromRequest for Session {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let session = match req.extensions().get::<SessionUser>() {
            Some(user) => Session::signed_in(user.clone()),
            None => Session::anonymous(),
        };
        ready(Ok(session))
    }
}
