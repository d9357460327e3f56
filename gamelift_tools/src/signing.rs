//! AWS Signature Version 4 for GameLift's JSON protocol.
//!
//! Only what GameLift needs is supported: `POST /` with an empty query string and a JSON body. The signed headers are
//! `content-type`, `host`, `x-amz-date`, `x-amz-target` and, for temporary credentials, `x-amz-security-token`.
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use mrs_common::helpers::to_hex;
use sha2::{Digest, Sha256};

use crate::GameLiftApiError;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNING_ALGORITHM: &str = "AWS4-HMAC-SHA256";
pub const JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

#[derive(Debug, Clone)]
pub struct SigningParams<'a> {
    pub access_key_id: &'a str,
    pub secret_access_key: &'a str,
    pub session_token: Option<&'a str>,
    pub region: &'a str,
    pub service: &'a str,
    pub timestamp: DateTime<Utc>,
}

/// Signs a GameLift request and returns the headers that must accompany it, `authorization` included.
///
/// `host` must match the `Host` header the HTTP client will send, including any non-default port.
pub fn sign_request(
    params: &SigningParams<'_>,
    host: &str,
    target: &str,
    body: &[u8],
) -> Result<Vec<(String, String)>, GameLiftApiError> {
    let amz_date = params.timestamp.format("%Y%m%dT%H%M%SZ").to_string();
    let date = params.timestamp.format("%Y%m%d").to_string();
    let mut headers = vec![
        ("content-type".to_string(), JSON_CONTENT_TYPE.to_string()),
        ("host".to_string(), host.to_string()),
        ("x-amz-date".to_string(), amz_date.clone()),
        ("x-amz-target".to_string(), target.to_string()),
    ];
    if let Some(token) = params.session_token {
        headers.push(("x-amz-security-token".to_string(), token.to_string()));
    }
    headers.sort_by(|a, b| a.0.cmp(&b.0));
    let canonical_headers = headers.iter().map(|(k, v)| format!("{k}:{}\n", v.trim())).collect::<String>();
    let signed_headers = headers.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>().join(";");
    let payload_hash = to_hex(&Sha256::digest(body));
    let canonical_request = format!("POST\n/\n\n{canonical_headers}\n{signed_headers}\n{payload_hash}");

    let scope = format!("{date}/{}/{}/aws4_request", params.region, params.service);
    let string_to_sign = format!(
        "{SIGNING_ALGORITHM}\n{amz_date}\n{scope}\n{}",
        to_hex(&Sha256::digest(canonical_request.as_bytes()))
    );
    let signing_key = derive_signing_key(params.secret_access_key, &date, params.region, params.service)?;
    let signature = to_hex(&hmac_sha256(&signing_key, string_to_sign.as_bytes())?);
    let authorization = format!(
        "{SIGNING_ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
        params.access_key_id
    );
    headers.push(("authorization".to_string(), authorization));
    Ok(headers)
}

fn derive_signing_key(secret: &str, date: &str, region: &str, service: &str) -> Result<Vec<u8>, GameLiftApiError> {
    let k_date = hmac_sha256(format!("AWS4{secret}").as_bytes(), date.as_bytes())?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    hmac_sha256(&k_service, b"aws4_request")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, GameLiftApiError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| GameLiftApiError::SigningError(e.to_string()))?;
    Mac::update(&mut mac, data);
    Ok(mac.finalize().into_bytes().to_vec())
}
