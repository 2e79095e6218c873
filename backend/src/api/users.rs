//! User registration and verification handlers.
//!
//! These routes exercise the declared-outcome half of the pipeline:
//! registration declares `pending` or `sendMailFailed`, verification
//! declares `isVerified`, `alreadyVerified`, or `invalidOrExpired`, and
//! the normalizer turns each into its localized envelope.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, post, web};
use envelope::{OutcomeKey, declare};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;
use utoipa::ToSchema;

use crate::api::state::AppState;
use crate::api::to_raw;
use crate::models::{ApiResult, Error};
use crate::normalize::routes;
use crate::stores::{RegisterError, VerifyOutcome};

/// Registration request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Address the verification mail is sent to.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Display name shown to other users.
    #[schema(example = "Ada Lovelace")]
    pub display_name: String,
}

/// Verification request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    /// Token received by mail during registration.
    pub token: String,
}

/// Register an account and dispatch its verification mail.
///
/// Mail dispatch failing is not a request failure: the account exists
/// either way, so the outcome degrades from `pending` to `sendMailFailed`
/// and the envelope says so.
#[utoipa::path(
    post,
    path = "/api/v1/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created; envelope reports the mail outcome"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Address already registered", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users/register")]
pub async fn register_user(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    validate_registration(&request)?;

    let (user, token) = state
        .users
        .register(&request.email, &request.display_name)
        .map_err(|err| match err {
            RegisterError::DuplicateEmail { email } => {
                Error::conflict("an account already exists for this address")
                    .with_details(json!({ "field": "email", "value": email }))
            }
        })?;

    let outcome = match state.mailer.send_verification(&user.email, &token) {
        Ok(()) => OutcomeKey::Pending,
        Err(err) => {
            warn!(error = %err, email = %user.email, "verification mail failed to dispatch");
            OutcomeKey::SendMailFailed
        }
    };
    let raw = declare(outcome, to_raw(&user)?);
    Ok(state
        .normalizer
        .respond(raw, StatusCode::CREATED, routes::USER_REGISTER))
}

fn validate_registration(request: &RegisterRequest) -> ApiResult<()> {
    if request.email.trim().is_empty() || !request.email.contains('@') {
        return Err(Error::invalid_request("a valid email address is required")
            .with_details(json!({ "field": "email", "code": "invalid_email" })));
    }
    if request.display_name.trim().is_empty() {
        return Err(Error::invalid_request("display name must not be empty")
            .with_details(json!({ "field": "displayName", "code": "empty_display_name" })));
    }
    Ok(())
}

/// Consume a verification token.
#[utoipa::path(
    post,
    path = "/api/v1/users/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Verification outcome wrapped in the uniform envelope"),
        (status = 400, description = "Token invalid or expired; envelope reports the outcome")
    ),
    tags = ["users"],
    operation_id = "verifyUser"
)]
#[post("/users/verify")]
pub async fn verify_user(
    state: web::Data<AppState>,
    payload: web::Json<VerifyRequest>,
) -> ApiResult<HttpResponse> {
    let (raw, status) = match state.users.verify(&payload.token) {
        VerifyOutcome::Verified(user) => (
            declare(OutcomeKey::IsVerified, to_raw(&user)?),
            StatusCode::OK,
        ),
        VerifyOutcome::AlreadyVerified(user) => (
            declare(OutcomeKey::AlreadyVerified, to_raw(&user)?),
            StatusCode::OK,
        ),
        VerifyOutcome::InvalidOrExpired => (
            declare(OutcomeKey::InvalidOrExpired, Value::Null),
            StatusCode::BAD_REQUEST,
        ),
    };
    Ok(state.normalizer.respond(raw, status, routes::USER_VERIFY))
}

#[cfg(test)]
mod tests {
    //! Handler-level tests covering every declared verification outcome.

    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test, web};
    use envelope::HttpEnvelope;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::i18n::{MessageCatalog, MessageResolver};
    use crate::models::user::VerificationToken;
    use crate::normalize::ResponseNormalizer;
    use crate::normalize::routes::RouteCatalog;
    use crate::stores::{FixtureMailer, InMemoryProducts, InMemoryUsers, MailError, Mailer};

    /// Mailer double whose provider always rejects the message.
    struct RejectingMailer;

    impl Mailer for RejectingMailer {
        fn send_verification(
            &self,
            _email: &str,
            _token: &VerificationToken,
        ) -> Result<(), MailError> {
            Err(MailError::Rejected {
                reason: "mailbox quota exceeded".to_owned(),
            })
        }
    }

    fn normalizer() -> ResponseNormalizer {
        let catalog = MessageCatalog::builtin().expect("embedded catalog");
        ResponseNormalizer::new(
            MessageResolver::new(Arc::new(catalog)),
            RouteCatalog::storefront(),
        )
    }

    fn state_with_mailer(mailer: Arc<dyn Mailer>) -> web::Data<AppState> {
        web::Data::new(AppState::new(
            Arc::new(InMemoryProducts::new()),
            Arc::new(InMemoryUsers::new()),
            mailer,
            Arc::new(normalizer()),
        ))
    }

    async fn init(
        state: web::Data<AppState>,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    > {
        test::init_service(
            App::new().app_data(state).service(
                web::scope("/api/v1")
                    .service(register_user)
                    .service(verify_user),
            ),
        )
        .await
    }

    fn ada() -> serde_json::Value {
        json!({"email": "ada@example.com", "displayName": "Ada Lovelace"})
    }

    #[rstest]
    #[actix_web::test]
    async fn registration_declares_pending_when_the_mail_goes_out() {
        let app = init(state_with_mailer(Arc::new(FixtureMailer))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/users/register")
                .set_json(ada())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: HttpEnvelope = test::read_body_json(res).await;
        assert!(body.success);
        assert_eq!(body.message, "Verification mail sent");
        assert_eq!(body.payload.get("verified"), Some(&json!(false)));
    }

    #[rstest]
    #[actix_web::test]
    async fn registration_degrades_to_send_mail_failed() {
        let app = init(state_with_mailer(Arc::new(RejectingMailer))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/users/register")
                .set_json(ada())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: HttpEnvelope = test::read_body_json(res).await;
        assert!(body.success);
        assert_eq!(
            body.message,
            "Account created but the verification mail could not be sent"
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn duplicate_registration_maps_to_a_conflict_error() {
        let shared = state_with_mailer(Arc::new(FixtureMailer));
        let app = init(shared).await;
        for _ in 0..2 {
            let res = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/api/v1/users/register")
                    .set_json(ada())
                    .to_request(),
            )
            .await;
            if res.status() == StatusCode::CREATED {
                continue;
            }
            assert_eq!(res.status(), StatusCode::CONFLICT);
            let body: Error = test::read_body_json(res).await;
            assert_eq!(body.message, "an account already exists for this address");
            return;
        }
        panic!("second registration should have conflicted");
    }

    #[rstest]
    #[case(json!({"email": "not-an-address", "displayName": "Ada"}), "invalid_email")]
    #[case(json!({"email": "ada@example.com", "displayName": "  "}), "empty_display_name")]
    #[actix_web::test]
    async fn invalid_registrations_are_rejected_with_details(
        #[case] payload: serde_json::Value,
        #[case] expected_code: &str,
    ) {
        let app = init(state_with_mailer(Arc::new(FixtureMailer))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/users/register")
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Error = test::read_body_json(res).await;
        let details = body.details.expect("validation details");
        assert_eq!(details.get("code"), Some(&json!(expected_code)));
    }

    #[rstest]
    #[actix_web::test]
    async fn verification_walks_through_each_declared_outcome() {
        let shared = state_with_mailer(Arc::new(FixtureMailer));
        let app = init(shared.clone()).await;
        let (_, token) = shared
            .users
            .register("ada@example.com", "Ada Lovelace")
            .expect("registered");

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/users/verify")
                .set_json(json!({"token": token.as_str()}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: HttpEnvelope = test::read_body_json(res).await;
        assert!(body.success);
        assert_eq!(body.message, "Account verified");
        assert_eq!(body.payload.get("verified"), Some(&json!(true)));

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/users/verify")
                .set_json(json!({"token": token.as_str()}))
                .to_request(),
        )
        .await;
        let body: HttpEnvelope = test::read_body_json(res).await;
        assert!(body.success);
        assert_eq!(body.message, "Account was already verified");
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_tokens_produce_a_failed_envelope_not_an_error_body() {
        let app = init(state_with_mailer(Arc::new(FixtureMailer))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/users/verify")
                .set_json(json!({"token": "nope"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: HttpEnvelope = test::read_body_json(res).await;
        assert!(!body.success);
        assert_eq!(body.status_code, 400);
        assert_eq!(body.message, "Verification token is invalid or expired");
        assert_eq!(body.payload, json!({}));
    }
}
