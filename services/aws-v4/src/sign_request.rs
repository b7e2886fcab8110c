// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::constants::{
    AWS4_HMAC_SHA256, AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET, MAX_PRESIGN_EXPIRES,
    UNSIGNED_PAYLOAD, X_AMZ_CONTENT_SHA_256, X_AMZ_DATE, X_AMZ_SECURITY_TOKEN,
};
use crate::Credential;
use http::request::Parts;
use http::{header, HeaderValue};
use log::debug;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use reqstore_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use reqstore_core::time::{format_date, format_iso8601, now, DateTime};
use reqstore_core::{Error, Result, SignRequest, SigningCredential, SigningMethod, SigningRequest};
use std::fmt::{self, Display, Formatter, Write};

/// RequestSigner that implement AWS SigV4.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
#[derive(Debug)]
pub struct RequestSigner {
    service: String,
    region: String,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer for the given service and region.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),

            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Region this signer puts into the credential scope.
    pub fn region(&self) -> &str {
        &self.region
    }

    fn scope(&self, now: DateTime) -> String {
        format!(
            "{}/{}/{}/aws4_request",
            format_date(now),
            self.region,
            self.service
        )
    }
}

impl SignRequest for RequestSigner {
    type Credential = Credential;

    fn sign_request(
        &self,
        req: &mut Parts,
        credential: &Self::Credential,
        method: SigningMethod,
    ) -> Result<()> {
        if !credential.is_valid() {
            return Err(Error::request_invalid(
                "credential must carry both access key id and secret access key",
            ));
        }
        if let SigningMethod::Query(expire) = method {
            if expire.is_zero() || expire > MAX_PRESIGN_EXPIRES {
                return Err(Error::request_invalid(format!(
                    "presign expiry must be between 1 and {} seconds, got {}",
                    MAX_PRESIGN_EXPIRES.as_secs(),
                    expire.as_secs()
                )));
            }
        }

        let now = self.time.unwrap_or_else(now);
        let mut signed_req = SigningRequest::build(req)?;

        // canonicalize context
        canonicalize_header(&mut signed_req, credential, method, now)?;
        canonicalize_query(&mut signed_req, credential, method, now, &self.scope(now));

        // build canonical request and string to sign.
        let creq = CanonicalRequest::build(&signed_req)?.to_string();
        let encoded_req = hex_sha256(creq.as_bytes());

        // Scope: "20220313/<region>/<service>/aws4_request"
        let scope = self.scope(now);
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "{AWS4_HMAC_SHA256}")?;
            writeln!(f, "{}", format_iso8601(now))?;
            writeln!(f, "{}", &scope)?;
            write!(f, "{}", &encoded_req)?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = generate_signing_key(
            &credential.secret_access_key,
            now,
            &self.region,
            &self.service,
        );
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        match method {
            SigningMethod::Query(_) => signed_req.query_push("X-Amz-Signature", signature),
            SigningMethod::Header => {
                let mut authorization = HeaderValue::from_str(&format!(
                    "{AWS4_HMAC_SHA256} Credential={}/{}, SignedHeaders={}, Signature={}",
                    credential.access_key_id,
                    scope,
                    signed_req.header_name_to_vec_sorted().join(";"),
                    signature
                ))?;
                authorization.set_sensitive(true);

                signed_req
                    .headers
                    .insert(header::AUTHORIZATION, authorization);
            }
        }

        // Apply to the request.
        signed_req.apply(req)
    }
}

/// CanonicalRequest is the SigV4 canonical form of a request.
///
/// ```text
/// GET
/// /test.txt
/// X-Amz-Algorithm=AWS4-HMAC-SHA256&X-Amz-Date=20130524T000000Z
/// host:examplebucket.s3.amazonaws.com
///
/// host
/// UNSIGNED-PAYLOAD
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    /// Upper-case HTTP method.
    pub method: String,
    /// Path encoded with [`AWS_URI_ENCODE_SET`].
    pub path: String,
    /// Encoded and sorted query string.
    pub query: String,
    /// Lower-case header names with their trimmed values, sorted by name.
    pub headers: Vec<(String, String)>,
    /// Payload hash taken from `x-amz-content-sha256`.
    pub payload_hash: String,
}

impl CanonicalRequest {
    /// Build the canonical form from a prepared signing request.
    ///
    /// The query of `req` is expected to be encoded and sorted already.
    pub fn build(req: &SigningRequest) -> Result<Self> {
        let path = percent_decode_str(&req.path).decode_utf8().map_err(|e| {
            Error::request_invalid(format!("path {} is not valid utf-8", req.path)).with_source(e)
        })?;
        let path = utf8_percent_encode(&path, &AWS_URI_ENCODE_SET).to_string();

        let query = req
            .query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut headers = Vec::with_capacity(req.headers.len());
        for name in req.header_name_to_vec_sorted() {
            // Repeated headers are folded into one comma separated value.
            let values = req
                .headers
                .get_all(name)
                .iter()
                .map(|v| v.to_str())
                .collect::<std::result::Result<Vec<_>, _>>()?;
            headers.push((name.to_string(), values.join(",")));
        }

        let payload_hash = req
            .header_get(X_AMZ_CONTENT_SHA_256)?
            .unwrap_or(UNSIGNED_PAYLOAD)
            .to_string();

        Ok(Self {
            method: req.method.to_string(),
            path,
            query,
            headers,
            payload_hash,
        })
    }

    /// Names of the signed headers joined by `;`.
    pub fn signed_headers(&self) -> String {
        self.headers
            .iter()
            .map(|(k, _)| k.as_str())
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl Display for CanonicalRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.method)?;
        writeln!(f, "{}", self.path)?;
        writeln!(f, "{}", self.query)?;
        for (k, v) in &self.headers {
            writeln!(f, "{k}:{v}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.signed_headers())?;
        write!(f, "{}", self.payload_hash)
    }
}

fn canonicalize_header(
    ctx: &mut SigningRequest,
    cred: &Credential,
    method: SigningMethod,
    now: DateTime,
) -> Result<()> {
    // Header names and values need to be normalized according to Step 4 of https://docs.aws.amazon.com/general/latest/gr/sigv4-create-canonical-request.html
    ctx.normalize_header_values();

    // Insert HOST header if not present.
    if ctx.headers.get(header::HOST).is_none() {
        ctx.headers
            .insert(header::HOST, ctx.authority.as_str().parse()?);
    }

    if method == SigningMethod::Header {
        // Insert DATE header if not present.
        if ctx.headers.get(X_AMZ_DATE).is_none() {
            ctx.headers
                .insert(X_AMZ_DATE, HeaderValue::try_from(format_iso8601(now))?);
        }

        // Insert X_AMZ_CONTENT_SHA_256 header if not present.
        if ctx.headers.get(X_AMZ_CONTENT_SHA_256).is_none() {
            ctx.headers.insert(
                X_AMZ_CONTENT_SHA_256,
                HeaderValue::from_static(UNSIGNED_PAYLOAD),
            );
        }

        // Insert X_AMZ_SECURITY_TOKEN header if security token exists.
        if let Some(token) = &cred.session_token {
            let mut value = HeaderValue::from_str(token)?;
            // Set token value sensitive to valid leaking.
            value.set_sensitive(true);

            ctx.headers.insert(X_AMZ_SECURITY_TOKEN, value);
        }
    }

    Ok(())
}

fn canonicalize_query(
    ctx: &mut SigningRequest,
    cred: &Credential,
    method: SigningMethod,
    now: DateTime,
    scope: &str,
) {
    if let SigningMethod::Query(expire) = method {
        ctx.query_push("X-Amz-Algorithm", AWS4_HMAC_SHA256);
        ctx.query_push(
            "X-Amz-Credential",
            format!("{}/{}", cred.access_key_id, scope),
        );
        ctx.query_push("X-Amz-Date", format_iso8601(now));
        ctx.query_push("X-Amz-Expires", expire.as_secs().to_string());
        let signed_headers = ctx.header_name_to_vec_sorted().join(";");
        ctx.query_push("X-Amz-SignedHeaders", signed_headers);

        if let Some(token) = &cred.session_token {
            ctx.query_push("X-Amz-Security-Token", token.as_str());
        }
    }

    // Return if query is empty.
    if ctx.query.is_empty() {
        return;
    }

    ctx.query = ctx
        .query
        .iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect();

    // Sort by encoded param name, then value.
    ctx.query.sort();
}

fn generate_signing_key(secret: &str, time: DateTime, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), "aws4_request".as_bytes())
}
