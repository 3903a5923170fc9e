use worker::*;

#[path = "wasm/db/mod.rs"]
pub mod db;
#[path = "wasm/config.rs"]
pub mod config;
#[path = "wasm/crypto.rs"]
pub mod crypto;
#[path = "wasm/handlers/mod.rs"]
pub mod handlers;
#[path = "wasm/http.rs"]
pub mod http;
#[path = "wasm/otp.rs"]
pub mod otp;
#[path = "wasm/sms.rs"]
pub mod sms;
#[path = "wasm/store.rs"]
pub mod store;
#[path = "wasm/turnstile.rs"]
pub mod turnstile;
#[path = "wasm/util.rs"]
pub mod util;

use http::{json_with_cors, not_found};

#[event(fetch)]
pub async fn fetch(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    console_error_panic_hook::set_once();

    if req.method() == Method::Options {
        let resp = Response::empty()?.with_status(204);
        return json_with_cors(&req, resp);
    }

    let url = req.url()?;
    let path = url.path();

    if req.method() == Method::Get && path == "/health" {
        let body = serde_json::json!({
            "ok": true,
            "service": "bkl-registration",
        });
        let resp = Response::from_json(&body)?;
        return json_with_cors(&req, resp);
    }

    // --- Public registration flow ---
    if req.method() == Method::Post && path == "/api/registrations/send-code" {
        return handlers::register::handle_send_code(req, &env).await;
    }
    if req.method() == Method::Post && path == "/api/registrations/verify" {
        return handlers::register::handle_verify(req, &env).await;
    }

    // --- Admin session ---
    if req.method() == Method::Post && path == "/api/admin/login" {
        return handlers::admin_auth::handle_login(req, &env).await;
    }
    if req.method() == Method::Post && path == "/api/admin/logout" {
        return handlers::admin_auth::handle_logout(req, &env).await;
    }

    // --- Admin listing & moderation ---
    // The export route must be matched before the "/api/admin/registrations/<id>"
    // prefix handler.
    if req.method() == Method::Get && path == "/api/admin/registrations/export" {
        return handlers::admin::handle_export(req, &env).await;
    }
    if req.method() == Method::Get && path == "/api/admin/registrations" {
        return handlers::admin::handle_registrations(req, &env).await;
    }
    if req.method() == Method::Get && path == "/api/admin/stats" {
        return handlers::admin::handle_stats(req, &env).await;
    }
    if let Some(rest) = path.strip_prefix("/api/admin/registrations/") {
        let (id, tail) = rest.split_once('/').unwrap_or((rest, ""));
        let tail = if tail.is_empty() { None } else { Some(tail) };
        return handlers::admin::handle_registration(req, &env, id.to_string(), tail).await;
    }

    // --- Operations ---
    if req.method() == Method::Post && path == "/v1/admin/migrations/up" {
        return handlers::migrations::handle_migrations_up(&req, &env).await;
    }
    if req.method() == Method::Get && path == "/v1/admin/db/ping" {
        return handlers::admin::handle_db_ping(&req, &env).await;
    }

    not_found(&req)
}
