use serde::Deserialize;
use worker::{Env, Request, Response, Result};

use crate::worker_wasm::config::env_string;
use crate::worker_wasm::http::error_response;

#[derive(Debug, Deserialize)]
struct SiteverifyResult {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

async fn verify_token(secret: &str, token: &str) -> Result<SiteverifyResult> {
    let form = format!(
        "secret={}&response={}",
        urlencoding_escape(secret),
        urlencoding_escape(token)
    );

    let headers = worker::Headers::new();
    headers.set("Content-Type", "application/x-www-form-urlencoded")?;
    headers.set("Accept", "application/json")?;

    let mut init = worker::RequestInit::new();
    init.with_method(worker::Method::Post);
    init.with_headers(headers);
    init.with_body(Some(form.into()));

    let cf_req = worker::Request::new_with_init(
        "https://challenges.cloudflare.com/turnstile/v0/siteverify",
        &init,
    )?;

    let mut resp = worker::Fetch::Request(cf_req).send().await?;
    let status = resp.status_code();
    let body = resp.text().await.unwrap_or_default();

    serde_json::from_str(&body).map_err(|e| {
        worker::Error::RustError(format!(
            "Turnstile siteverify returned non-JSON (status={status}): {e}"
        ))
    })
}

fn urlencoding_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

/// Human-verification gate for the send-code endpoint.
///
/// When `TURNSTILE_SECRET` is configured, a valid widget token must
/// accompany the first challenge request. Deployments without the secret
/// skip the check.
///
/// Returns `Ok(None)` when the request may proceed; otherwise the error
/// response to send.
pub async fn ensure_human(
    req: &Request,
    env: &Env,
    token: Option<&str>,
) -> Result<Option<Response>> {
    let Some(secret) = env_string(env, "TURNSTILE_SECRET") else {
        return Ok(None);
    };

    let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
        return Ok(Some(error_response(
            req,
            400,
            "human_verification_required",
            "Human verification token is required",
        )?));
    };

    match verify_token(&secret, token.trim()).await {
        Ok(result) if result.success => Ok(None),
        Ok(result) => {
            worker::console_log!("Turnstile rejected token: {:?}", result.error_codes);
            Ok(Some(error_response(
                req,
                403,
                "human_verification_failed",
                "Human verification failed",
            )?))
        }
        Err(e) => {
            worker::console_log!("Turnstile verification error: {e}");
            Ok(Some(error_response(
                req,
                502,
                "human_verification_unavailable",
                "Human verification is temporarily unavailable",
            )?))
        }
    }
}
