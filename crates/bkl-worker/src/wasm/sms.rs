use serde::Serialize;
use worker::{Env, Headers, Method, Request, RequestInit, Result};

use crate::worker_wasm::config::{country_prefix, env_string, require_env};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoSmsBody {
    sender: String,
    recipient: String,
    content: String,
    #[serde(rename = "type")]
    kind: &'static str,
}

fn is_success_status(status: u16) -> bool {
    (200..=299).contains(&status)
}

pub fn sms_is_configured(env: &Env) -> bool {
    env_string(env, "BREVO_API_KEY").is_some_and(|v| !v.trim().is_empty())
        && env_string(env, "BREVO_SMS_SENDER").is_some_and(|v| !v.trim().is_empty())
}

/// Deliver one transactional SMS to a 10-digit national number. The country
/// prefix is applied here and nowhere else.
pub async fn send_sms(env: &Env, national_number: &str, content: &str) -> Result<()> {
    let api_key = require_env(env, "BREVO_API_KEY")?;
    let sender = require_env(env, "BREVO_SMS_SENDER")?;

    let body = BrevoSmsBody {
        sender,
        recipient: format!("{}{}", country_prefix(env), national_number),
        content: content.to_string(),
        kind: "transactional",
    };

    let json = serde_json::to_string(&body)
        .map_err(|e| worker::Error::RustError(format!("Failed to serialize Brevo payload: {e}")))?;

    let headers = Headers::new();
    headers.set("api-key", &api_key)?;
    headers.set("Content-Type", "application/json")?;
    headers.set("Accept", "application/json")?;
    headers.set("User-Agent", "BKLRegistration/0.1 (Cloudflare Worker)")?;

    let mut init = RequestInit::new();
    init.with_method(Method::Post);
    init.with_headers(headers);
    init.with_body(Some(json.into()));

    let req = Request::new_with_init("https://api.brevo.com/v3/transactionalSMS/sms", &init)?;

    let mut resp = worker::Fetch::Request(req).send().await?;
    let status = resp.status_code();
    if is_success_status(status) {
        return Ok(());
    }

    let body = resp.text().await.unwrap_or_default();
    Err(worker::Error::RustError(format!(
        "Brevo SMS send failed (status={status}): {body}"
    )))
}
