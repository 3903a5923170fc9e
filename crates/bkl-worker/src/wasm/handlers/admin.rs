use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::Value;
use worker::{Env, Method, Request, Response, Result};

use bkl_core::csv::{export_csv, export_filename};
use bkl_core::model::{Gender, RegistrationRecord, Status};
use bkl_core::roster::{RegistrationRoster, GIFT_LIMIT};
use bkl_core::store::RegistrationStore;

use crate::worker_wasm::db::db_connect;
use crate::worker_wasm::http::{csv_attachment, error_response, internal_error_response, json_with_cors};
use crate::worker_wasm::store::LibsqlStore;
use crate::worker_wasm::util::today;

use super::admin_auth::{ensure_admin, ensure_ops_authorized};

fn search_term(req: &Request) -> String {
    req.url()
        .ok()
        .and_then(|url| {
            url.query_pairs()
                .find(|(k, _)| k == "q" || k == "search")
                .map(|(_, v)| v.into_owned())
        })
        .unwrap_or_default()
}

fn registration_json(rank: Option<usize>, r: &RegistrationRecord) -> Value {
    serde_json::json!({
        "id": r.id,
        "name": r.name,
        "age": r.age,
        "gender": r.gender,
        "address": r.address,
        "mobile": r.mobile,
        "phoneVerified": r.phone_verified,
        "registrationNumber": r.registration_number,
        "status": r.status,
        "createdAt": r.created_at,
        "createdDate": r.created_date(),
        "giftRank": rank,
        "giftEligible": rank.is_some_and(|n| n < GIFT_LIMIT),
    })
}

async fn loaded_roster<'a>(
    db: &'a DatabaseConnection,
) -> std::result::Result<RegistrationRoster<LibsqlStore<'a>>, bkl_core::error::StoreError> {
    let mut roster = RegistrationRoster::new(LibsqlStore::new(db));
    roster.load().await?;
    Ok(roster)
}

/// The full ordered collection, optionally narrowed by `?q=`. Gift rank is
/// always computed against the full set.
pub async fn handle_registrations(req: Request, env: &Env) -> Result<Response> {
    let db = match db_connect(env).await {
        Ok(db) => db,
        Err(e) => return internal_error_response(&req, "Failed to open libSQL connection", &e),
    };

    if let Some(resp) = ensure_admin(&req, &db).await? {
        return Ok(resp);
    }

    let roster = match loaded_roster(&db).await {
        Ok(r) => r,
        Err(e) => return internal_error_response(&req, "Failed to fetch registrations", &e),
    };

    let term = search_term(&req);
    let visible = roster.filter(&term);
    let data: Vec<Value> = visible
        .iter()
        .map(|&r| registration_json(roster.gift_rank(&r.id), r))
        .collect();

    let resp = Response::from_json(&serde_json::json!({
        "total": roster.records().len(),
        "filtered": data.len(),
        "data": data,
    }))?;
    json_with_cors(&req, resp)
}

#[derive(Debug, Deserialize)]
struct StatusData {
    status: Status,
}

/// Per-record moderation: `PUT|POST <id>/status`, `DELETE <id>` and the
/// `POST <id>/delete` alias. Deletes are permanent; the dashboard asks the
/// admin for confirmation before calling.
pub async fn handle_registration(
    mut req: Request,
    env: &Env,
    id: String,
    tail: Option<&str>,
) -> Result<Response> {
    let db = match db_connect(env).await {
        Ok(db) => db,
        Err(e) => return internal_error_response(&req, "Failed to open libSQL connection", &e),
    };

    if let Some(resp) = ensure_admin(&req, &db).await? {
        return Ok(resp);
    }

    let method = req.method();
    let is_delete_alias = method == Method::Post && tail == Some("delete");
    let is_status = (method == Method::Put || method == Method::Post) && tail == Some("status");

    if is_status {
        let payload: StatusData = match req.json().await {
            Ok(p) => p,
            Err(_) => {
                return error_response(&req, 400, "invalid_status", "Status must be registered, confirmed or cancelled");
            }
        };

        let store = LibsqlStore::new(&db);
        return match store.update_status(&id, payload.status).await {
            Ok(()) => {
                let resp = Response::from_json(&serde_json::json!({
                    "success": true,
                    "status": payload.status,
                }))?;
                json_with_cors(&req, resp)
            }
            Err(bkl_core::error::StoreError::NotFound) => {
                error_response(&req, 404, "not_found", "Invalid registration")
            }
            Err(e) => internal_error_response(&req, "Failed to update status", &e),
        };
    }

    if method == Method::Delete && tail.is_none() || is_delete_alias {
        let store = LibsqlStore::new(&db);
        return match store.remove(&id).await {
            Ok(()) => {
                let resp = Response::empty()?.with_status(200);
                json_with_cors(&req, resp)
            }
            Err(bkl_core::error::StoreError::NotFound) => {
                error_response(&req, 404, "not_found", "Invalid registration")
            }
            Err(e) => internal_error_response(&req, "Failed to delete registration", &e),
        };
    }

    error_response(&req, 405, "method_not_allowed", "Method not allowed")
}

/// CSV download of the currently visible (filtered) set.
pub async fn handle_export(req: Request, env: &Env) -> Result<Response> {
    let db = match db_connect(env).await {
        Ok(db) => db,
        Err(e) => return internal_error_response(&req, "Failed to open libSQL connection", &e),
    };

    if let Some(resp) = ensure_admin(&req, &db).await? {
        return Ok(resp);
    }

    let roster = match loaded_roster(&db).await {
        Ok(r) => r,
        Err(e) => return internal_error_response(&req, "Failed to fetch registrations", &e),
    };

    let term = search_term(&req);
    let csv = export_csv(roster.filter(&term).into_iter());
    csv_attachment(&req, csv, &export_filename(today()))
}

/// Dashboard stat cards: totals, gift-eligible count and the gender split.
pub async fn handle_stats(req: Request, env: &Env) -> Result<Response> {
    let db = match db_connect(env).await {
        Ok(db) => db,
        Err(e) => return internal_error_response(&req, "Failed to open libSQL connection", &e),
    };

    if let Some(resp) = ensure_admin(&req, &db).await? {
        return Ok(resp);
    }

    let roster = match loaded_roster(&db).await {
        Ok(r) => r,
        Err(e) => return internal_error_response(&req, "Failed to fetch registrations", &e),
    };

    let records = roster.records();
    let male = records.iter().filter(|r| r.gender == Gender::Male).count();
    let female = records.iter().filter(|r| r.gender == Gender::Female).count();

    let resp = Response::from_json(&serde_json::json!({
        "total": records.len(),
        "giftEligible": records.len().min(GIFT_LIMIT),
        "male": male,
        "female": female,
    }))?;
    json_with_cors(&req, resp)
}

pub async fn handle_db_ping(req: &Request, env: &Env) -> Result<Response> {
    if let Some(resp) = ensure_ops_authorized(req, env)? {
        return Ok(resp);
    }

    let db = match db_connect(env).await {
        Ok(db) => db,
        Err(e) => return internal_error_response(req, "Failed to open libSQL connection", &e),
    };

    // A minimal query to validate the connection.
    if let Err(e) = db.ping().await {
        return internal_error_response(req, "libSQL ping failed", &e);
    }

    let resp = Response::from_json(&serde_json::json!({
        "success": true,
        "db": { "ok": true }
    }))?;

    json_with_cors(req, resp)
}
