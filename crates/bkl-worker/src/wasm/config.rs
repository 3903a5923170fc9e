use bkl_core::session::FixedCredentials;
use worker::Env;

pub fn normalize_env_value(raw: String) -> String {
    let trimmed = raw.trim();

    if let Some(inner) = trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        return inner.trim().to_string();
    }
    if let Some(inner) = trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
        return inner.trim().to_string();
    }

    trimmed.to_string()
}

pub fn env_string(env: &Env, key: &str) -> Option<String> {
    env.var(key)
        .ok()
        .map(|v| normalize_env_value(v.to_string()))
        .filter(|s| !s.is_empty())
}

pub fn require_env(env: &Env, key: &str) -> worker::Result<String> {
    env_string(env, key).ok_or_else(|| worker::Error::RustError(format!("{key} is required")))
}

/// Admin credentials. Deployments should inject `ADMIN_USERNAME` /
/// `ADMIN_PASSWORD`; the compiled-in pair is a compatibility fallback only.
pub fn admin_credentials(env: &Env) -> FixedCredentials {
    match (
        env_string(env, "ADMIN_USERNAME"),
        env_string(env, "ADMIN_PASSWORD"),
    ) {
        (Some(username), Some(password)) => FixedCredentials::new(username, password),
        _ => FixedCredentials::default(),
    }
}

/// Country prefix applied at the OTP-provider boundary. Stored numbers are
/// always the bare 10-digit national number.
pub fn country_prefix(env: &Env) -> String {
    env_string(env, "SMS_COUNTRY_PREFIX").unwrap_or_else(|| "+91".to_string())
}
