use serde::Deserialize;
use worker::{Env, Request, Response, Result};

use bkl_core::error::SubmitError;
use bkl_core::form::RegistrationForm;
use bkl_core::verify::PendingChallenge;
use bkl_core::workflow::SubmissionWorkflow;

use crate::worker_wasm::db::db_connect;
use crate::worker_wasm::http::{error_response, internal_error_response, json_with_cors};
use crate::worker_wasm::otp::SmsVerifier;
use crate::worker_wasm::sms::sms_is_configured;
use crate::worker_wasm::store::LibsqlStore;
use crate::worker_wasm::turnstile::ensure_human;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendCodeData {
    #[serde(default)]
    name: String,
    #[serde(default)]
    age: String,
    #[serde(default)]
    gender: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    mobile: String,
    #[serde(default)]
    turnstile_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyData {
    challenge_id: String,
    #[serde(default)]
    code: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    age: String,
    #[serde(default)]
    gender: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    mobile: String,
}

fn build_form(name: String, age: String, gender: String, address: String, mobile: &str) -> RegistrationForm {
    let mut form = RegistrationForm {
        name,
        age,
        gender,
        address,
        mobile: String::new(),
    };
    form.set_mobile(mobile);
    form
}

fn submit_error_response(req: &Request, err: SubmitError) -> Result<Response> {
    match err {
        SubmitError::Validation(e) => error_response(req, 400, "invalid_fields", &e.to_string()),
        SubmitError::Challenge(e) => {
            worker::console_log!("Challenge request failed: {e}");
            error_response(
                req,
                502,
                "challenge-request-failed",
                "Failed to send OTP. Please check your mobile number and try again.",
            )
        }
        SubmitError::Confirm(e) => {
            worker::console_log!("Code confirmation failed: {e}");
            error_response(
                req,
                400,
                "bad-code",
                "Invalid OTP or registration failed. Please try again.",
            )
        }
        SubmitError::Store(e) => {
            worker::console_log!("Registration persistence failed: {e}");
            error_response(req, 500, "persist-failed", "Failed to save registration data")
        }
        SubmitError::InvalidState(state) => error_response(
            req,
            409,
            "invalid_state",
            &format!("Submission is not valid in the {state} state"),
        ),
    }
}

/// `Editing → OtpPending`: validate the form and dispatch an OTP.
pub async fn handle_send_code(mut req: Request, env: &Env) -> Result<Response> {
    let payload: SendCodeData = match req.json().await {
        Ok(p) => p,
        Err(e) => {
            worker::console_log!("Invalid JSON in send-code: {e}");
            return error_response(&req, 400, "invalid_json", "Invalid JSON body");
        }
    };

    // The anti-automation gate must pass before the first challenge request.
    if let Some(resp) = ensure_human(&req, env, payload.turnstile_token.as_deref()).await? {
        return Ok(resp);
    }

    if !sms_is_configured(env) {
        return error_response(&req, 503, "sms_unconfigured", "SMS delivery is not configured");
    }

    let db = match db_connect(env).await {
        Ok(db) => db,
        Err(e) => return internal_error_response(&req, "Failed to open libSQL connection", &e),
    };

    let mut workflow =
        SubmissionWorkflow::new(SmsVerifier::new(env, &db), LibsqlStore::new(&db));
    *workflow.form_mut() = build_form(
        payload.name,
        payload.age,
        payload.gender,
        payload.address,
        &payload.mobile,
    );

    match workflow.send_code().await {
        Ok(challenge) => {
            let resp = Response::from_json(&serde_json::json!({
                "success": true,
                "challengeId": challenge.id,
            }))?;
            json_with_cors(&req, resp)
        }
        Err(e) => submit_error_response(&req, e),
    }
}

/// `OtpPending → Verifying → Completed`: confirm the code and persist.
pub async fn handle_verify(mut req: Request, env: &Env) -> Result<Response> {
    let payload: VerifyData = match req.json().await {
        Ok(p) => p,
        Err(e) => {
            worker::console_log!("Invalid JSON in verify: {e}");
            return error_response(&req, 400, "invalid_json", "Invalid JSON body");
        }
    };

    let db = match db_connect(env).await {
        Ok(db) => db,
        Err(e) => return internal_error_response(&req, "Failed to open libSQL connection", &e),
    };

    let form = build_form(
        payload.name,
        payload.age,
        payload.gender,
        payload.address,
        &payload.mobile,
    );
    let challenge = PendingChallenge {
        id: payload.challenge_id,
        mobile: form.mobile.clone(),
    };

    let mut workflow = SubmissionWorkflow::resume(
        SmsVerifier::new(env, &db),
        LibsqlStore::new(&db),
        form,
        challenge,
    );

    match workflow.submit_code(&payload.code).await {
        Ok(stored) => {
            let resp = Response::from_json(&serde_json::json!({
                "success": true,
                "registrationNumber": stored.registration_number,
                "id": stored.storage_key,
            }))?;
            json_with_cors(&req, resp)
        }
        Err(e) => submit_error_response(&req, e),
    }
}
