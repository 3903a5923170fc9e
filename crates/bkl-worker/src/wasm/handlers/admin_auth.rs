use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::Deserialize;
use worker::{Env, Request, Response, Result};

use bkl_core::session::CredentialVerifier;

use entity::admin_session;

use crate::worker_wasm::config::{admin_credentials, env_string};
use crate::worker_wasm::db::db_connect;
use crate::worker_wasm::http::{error_response, internal_error_response, json_with_cors};
use crate::worker_wasm::util::{generate_session_token, now_ts};

pub fn extract_bearer_token(req: &Request) -> Result<Option<String>> {
    let Some(raw) = req.headers().get("Authorization")? else {
        return Ok(None);
    };

    let raw = raw.trim();
    let Some((scheme, rest)) = raw.split_once(' ') else {
        return Ok(None);
    };
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Ok(None);
    }

    let token = rest.trim();
    if token.is_empty() {
        return Ok(None);
    }

    Ok(Some(token.to_string()))
}

#[derive(Debug, Deserialize)]
struct LoginData {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Issue an opaque session token for a valid credential pair. Sessions do
/// not expire; only logout removes them.
pub async fn handle_login(mut req: Request, env: &Env) -> Result<Response> {
    let payload: LoginData = match req.json().await {
        Ok(p) => p,
        Err(e) => {
            worker::console_log!("Invalid JSON in admin login: {e}");
            return error_response(&req, 400, "invalid_json", "Invalid JSON body");
        }
    };

    let credentials = admin_credentials(env);
    if !credentials.verify(payload.username.trim(), &payload.password) {
        // Deliberately silent about which field was wrong.
        return error_response(&req, 401, "invalid_credentials", "Invalid username or password");
    }

    let db = match db_connect(env).await {
        Ok(db) => db,
        Err(e) => return internal_error_response(&req, "Failed to open libSQL connection", &e),
    };

    let token = generate_session_token();
    let active = admin_session::ActiveModel {
        token: Set(token.clone()),
        created_at: Set(now_ts()),
    };

    if let Err(e) = active.insert(&db).await {
        return internal_error_response(&req, "Failed to save admin session", &e);
    }

    let resp = Response::from_json(&serde_json::json!({
        "success": true,
        "token": token,
    }))?;
    json_with_cors(&req, resp)
}

/// Remove the presented session token. The marker is erased; the session is
/// gone on every subsequent request.
pub async fn handle_logout(req: Request, env: &Env) -> Result<Response> {
    let Some(token) = extract_bearer_token(&req)? else {
        return error_response(&req, 401, "missing_token", "Missing Authorization Bearer token");
    };

    let db = match db_connect(env).await {
        Ok(db) => db,
        Err(e) => return internal_error_response(&req, "Failed to open libSQL connection", &e),
    };

    if let Err(e) = admin_session::Entity::delete_by_id(token).exec(&db).await {
        return internal_error_response(&req, "Failed to remove admin session", &e);
    }

    let resp = Response::from_json(&serde_json::json!({ "success": true }))?;
    json_with_cors(&req, resp)
}

/// Shared authorization for admin endpoints: the bearer token must match a
/// stored admin session.
///
/// Returns `Ok(None)` when authorized; otherwise returns the error response.
pub async fn ensure_admin(req: &Request, db: &DatabaseConnection) -> Result<Option<Response>> {
    let Some(token) = extract_bearer_token(req)? else {
        return Ok(Some(error_response(
            req,
            401,
            "missing_token",
            "Missing Authorization Bearer token",
        )?));
    };

    let found = admin_session::Entity::find_by_id(token)
        .one(db)
        .await
        .map_err(|e| worker::Error::RustError(e.to_string()))?;

    if found.is_none() {
        return Ok(Some(error_response(
            req,
            401,
            "unauthorized",
            "Invalid session token",
        )?));
    }

    Ok(None)
}

/// Operational endpoints (migrations, db ping) are gated by a deploy-time
/// token instead of an admin session, so they work before the schema exists.
pub fn ensure_ops_authorized(req: &Request, env: &Env) -> Result<Option<Response>> {
    let Some(token) = extract_bearer_token(req)? else {
        return Ok(Some(error_response(
            req,
            401,
            "missing_token",
            "Missing Authorization Bearer token",
        )?));
    };

    let Some(required) = env_string(env, "MIGRATIONS_TOKEN") else {
        return Ok(Some(error_response(
            req,
            401,
            "unauthorized",
            "MIGRATIONS_TOKEN is not configured",
        )?));
    };

    if token != required {
        return Ok(Some(error_response(
            req,
            401,
            "unauthorized",
            "Invalid operations token",
        )?));
    }

    Ok(None)
}
