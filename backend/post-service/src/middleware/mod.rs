/// HTTP middleware utilities for post-service
///
/// Provides bearer-token authentication. The middleware validates the
/// token whenever an Authorization header is present and stores the
/// caller's identity in the request extensions; requests without a
/// header pass through anonymously, and handlers that mutate state
/// require the identity via the `UserId` extractor.
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{error::ErrorUnauthorized, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use uuid::Uuid;

/// Extracted user identifier stored in request extensions after auth.
#[derive(Debug, Clone)]
pub struct UserId(pub Uuid);

impl FromRequest for UserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<UserId>()
                .cloned()
                .ok_or_else(|| ErrorUnauthorized("Authentication required")),
        )
    }
}

/// Claims carried by the bearer token; `sub` is the user id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
}

/// Validates HS256 bearer tokens issued by the identity provider.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn validate(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding_key, &self.validation).map(|data| data.claims)
    }
}

/// Actix middleware that authenticates Bearer tokens.
pub struct JwtAuthMiddleware {
    validator: Arc<JwtValidator>,
}

impl JwtAuthMiddleware {
    pub fn new(validator: Arc<JwtValidator>) -> Self {
        Self { validator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
            validator: self.validator.clone(),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
    validator: Arc<JwtValidator>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let validator = self.validator.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .map(str::to_owned);

            // Anonymous requests pass through; read-only routes do not
            // require an identity.
            if let Some(auth_header) = auth_header {
                let token = auth_header
                    .strip_prefix("Bearer ")
                    .ok_or_else(|| ErrorUnauthorized("Invalid Authorization scheme"))?;

                let claims = validator
                    .validate(token)
                    .map_err(|_| ErrorUnauthorized("Invalid or expired token"))?;

                let user_id = Uuid::parse_str(&claims.sub)
                    .map_err(|_| ErrorUnauthorized("Invalid user ID"))?;

                req.extensions_mut().insert(UserId(user_id));
            }

            service.call(req).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::Payload;
    use actix_web::test::TestRequest;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn issue(secret: &str, sub: &str, expires_in: Duration) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            exp: (Utc::now() + expires_in).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = issue("secret", &user_id.to_string(), Duration::minutes(5));

        let validator = JwtValidator::new("secret");
        let claims = validator.validate(&token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = issue(
            "secret",
            &Uuid::new_v4().to_string(),
            Duration::minutes(-5),
        );

        let validator = JwtValidator::new("secret");
        assert!(validator.validate(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue("secret", &Uuid::new_v4().to_string(), Duration::minutes(5));

        let validator = JwtValidator::new("other-secret");
        assert!(validator.validate(&token).is_err());
    }

    #[actix_web::test]
    async fn test_user_id_extractor_requires_identity() {
        let req = TestRequest::default().to_http_request();
        let result = UserId::from_request(&req, &mut Payload::None).await;
        assert!(result.is_err());
    }

    #[actix_web::test]
    async fn test_user_id_extractor_reads_extension() {
        let id = Uuid::new_v4();
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(UserId(id));

        let extracted = UserId::from_request(&req, &mut Payload::None).await.unwrap();
        assert_eq!(extracted.0, id);
    }
}
