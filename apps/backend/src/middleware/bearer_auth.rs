//! Bearer-token middleware.
//!
//! Reads the Authorization header and, when a valid access token is
//! present, inserts a typed [`Identity`] into request extensions for the
//! handlers' `Identity` extractor to pick up.
//!
//! A request *without* a token proceeds anonymous — authorization is a
//! per-handler decision, and the public endpoints depend on this. A
//! request with an *invalid* token (bad signature, expired, garbled) is
//! rejected here with 401 instead of being silently downgraded to
//! anonymous; the two cases used to be indistinguishable downstream.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ResponseError;
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::claims::TokenContext;
use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::extractors::Identity;
use crate::state::app_state::AppState;

pub struct BearerAuth;

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware { service }))
    }
}

pub struct BearerAuthMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let auth_header = req.headers().get(header::AUTHORIZATION).cloned();

        let token = match extract_bearer_from_header(auth_header.as_ref()) {
            // No token at all: anonymous request, identity stays absent.
            Ok(None) => {
                let fut = self.service.call(req);
                return Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) });
            }
            Ok(Some(token)) => token,
            Err(err) => return Box::pin(ready(Ok(reject(req, err)))),
        };

        let app_state = match req.app_data::<web::Data<AppState>>().cloned() {
            Some(state) => state,
            None => {
                let err = AppError::internal("AppState not available");
                return Box::pin(ready(Ok(reject(req, err))));
            }
        };

        match verify_token(&token, TokenContext::Access, &app_state.security) {
            Ok(claims) => {
                // Publish identity BEFORE calling the downstream service.
                req.extensions_mut()
                    .insert(Identity::new(claims.sub, claims.role));
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) })
            }
            Err(e) => Box::pin(ready(Ok(reject(req, e)))),
        }
    }
}

/// Short-circuit the request with the error's envelope response.
fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let (req, _payload) = req.into_parts();
    let res = err.error_response().map_into_right_body();
    ServiceResponse::new(req, res)
}

/// Parse `Authorization: Bearer <token>`. Absent header is `Ok(None)`;
/// a present-but-unusable header is a malformed-token error.
fn extract_bearer_from_header(
    header_value: Option<&actix_web::http::header::HeaderValue>,
) -> Result<Option<String>, AppError> {
    let auth_value = match header_value {
        Some(value) => value,
        None => return Ok(None),
    };

    let auth_str = auth_value
        .to_str()
        .map_err(|_| AppError::token_malformed())?;

    let parts: Vec<&str> = auth_str.split_whitespace().collect();
    if parts.len() != 2 || parts[0] != "Bearer" || parts[1].is_empty() {
        return Err(AppError::token_malformed());
    }

    Ok(Some(parts[1].to_string()))
}

#[cfg(test)]
mod tests {
    use actix_web::http::header::HeaderValue;

    use super::*;

    #[test]
    fn absent_header_is_anonymous() {
        assert_eq!(extract_bearer_from_header(None).unwrap(), None);
    }

    #[test]
    fn well_formed_bearer_is_extracted() {
        let value = HeaderValue::from_static("Bearer abc.def.ghi");
        assert_eq!(
            extract_bearer_from_header(Some(&value)).unwrap(),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn non_bearer_scheme_is_malformed() {
        let value = HeaderValue::from_static("Basic dXNlcjpwdw==");
        assert!(extract_bearer_from_header(Some(&value)).is_err());
    }

    #[test]
    fn empty_token_is_malformed() {
        let value = HeaderValue::from_static("Bearer ");
        assert!(extract_bearer_from_header(Some(&value)).is_err());
    }
}
