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

use crate::constants::{DEFAULT_CONTENT_TYPE, DEFAULT_PRESIGN_EXPIRES};
use crate::{DataUrl, RequestDescriptor};
use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, ETAG};
use http::{HeaderMap, HeaderValue, Method, Request, Response, StatusCode};
use log::{debug, warn};
use reqstore_aws_v4::{
    EMPTY_STRING_SHA256, PUBLIC_READ, UNSIGNED_PAYLOAD, X_AMZ_ACL, X_AMZ_CONTENT_SHA_256,
};
use reqstore_core::hash::hex_sha256;
use reqstore_core::{Context, Error, Result, SignRequest, SigningMethod};
use std::time::{Duration, Instant};

/// Client performs object operations against S3 compatible services.
///
/// The client itself is stateless: every call signs a fresh request from the
/// given [`RequestDescriptor`] and sends it through the [`Context`]'s
/// `HttpSend`. Calls never retry and never time out on their own.
///
/// ```no_run
/// use bytes::Bytes;
/// use reqstore_aws_v4::Credential;
/// use reqstore_core::Context;
/// use reqstore_s3::{Client, Provider, ProviderId, RequestDescriptor};
///
/// # async fn example(ctx: Context) -> reqstore_core::Result<()> {
/// let client = Client::new(ctx);
/// let provider = Provider::new(ProviderId::Aws, "b", Some("us-east-1"), None)?;
/// let desc = RequestDescriptor::new(provider, Credential::new("ak", "sk"), "hello.txt")
///     .with_directory("TESTFILES");
///
/// let _url = client.upload(&desc, Bytes::from("Hello, World!"), None).await?;
/// assert_eq!(client.get_text_file(&desc).await?, "Hello, World!");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Client {
    ctx: Context,
}

impl Client {
    /// Create a new client on top of `ctx`.
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    /// Context this client sends requests with.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Upload `content` and return the public url of the object.
    ///
    /// The content type is `content_type` if given, otherwise detected by
    /// the context, otherwise `application/octet-stream`. Headers of the
    /// descriptor take precedence over the computed ones.
    pub async fn upload(
        &self,
        desc: &RequestDescriptor,
        content: impl Into<Bytes>,
        content_type: Option<&str>,
    ) -> Result<String> {
        let content = content.into();
        if content.is_empty() {
            return Err(Error::empty_body());
        }

        let content_type = match content_type.filter(|v| !v.is_empty()) {
            Some(v) => v.to_string(),
            None => self
                .ctx
                .detect_content_type(desc.key().as_str(), &content)
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(&content_type)?);
        headers.insert(CONTENT_LENGTH, HeaderValue::from(content.len()));
        headers.insert(
            X_AMZ_CONTENT_SHA_256,
            HeaderValue::from_str(&hex_sha256(&content))?,
        );
        if desc.is_public() {
            headers.insert(X_AMZ_ACL, HeaderValue::from_static(PUBLIC_READ));
        }

        self.send(desc, Method::PUT, "upload", headers, content)
            .await?;
        Ok(desc.res())
    }

    /// Upload the payload of a data url and return the public url.
    ///
    /// The mime type of the data url is used as content type.
    pub async fn upload_data_url(&self, desc: &RequestDescriptor, data_url: &str) -> Result<String> {
        let url = DataUrl::parse(data_url)?;
        let mime = url.mime().to_string();

        self.upload(desc, url.into_data(), Some(&mime)).await
    }

    /// Download the object, returning its response headers and content.
    pub async fn get_object(&self, desc: &RequestDescriptor) -> Result<Response<Bytes>> {
        self.send(desc, Method::GET, "download", HeaderMap::new(), Bytes::new())
            .await
    }

    /// Download the content of the object.
    pub async fn get_object_buffer(&self, desc: &RequestDescriptor) -> Result<Bytes> {
        Ok(self.get_object(desc).await?.into_body())
    }

    /// Download the object as text.
    ///
    /// Invalid UTF-8 sequences are replaced with `U+FFFD`.
    pub async fn get_text_file(&self, desc: &RequestDescriptor) -> Result<String> {
        let bs = self.get_object_buffer(desc).await?;
        Ok(String::from_utf8_lossy(&bs).into_owned())
    }

    /// Download the object as a base64 data url.
    pub async fn get_object_data_url(&self, desc: &RequestDescriptor) -> Result<String> {
        let resp = self.get_object(desc).await?;
        let mime = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        Ok(DataUrl::new(mime, resp.into_body()).to_string())
    }

    /// Delete the object.
    ///
    /// Returns `true` only when the service answers `204 No Content`; other
    /// successful statuses mean the deletion couldn't be confirmed.
    pub async fn delete_object(&self, desc: &RequestDescriptor) -> Result<bool> {
        let resp = self
            .send(desc, Method::DELETE, "delete", HeaderMap::new(), Bytes::new())
            .await?;
        Ok(resp.status() == StatusCode::NO_CONTENT)
    }

    /// Fetch the response headers of a `HEAD` on the object.
    pub async fn get_object_metadata(&self, desc: &RequestDescriptor) -> Result<HeaderMap> {
        let resp = self
            .send(desc, Method::HEAD, "head", HeaderMap::new(), Bytes::new())
            .await?;
        Ok(resp.into_parts().0.headers)
    }

    /// Check whether the object exists.
    ///
    /// An object exists if its metadata carries an `etag`, even an empty one.
    /// A missing object yields `false` instead of an error.
    pub async fn object_exists(&self, desc: &RequestDescriptor) -> Result<bool> {
        match self.get_object_metadata(desc).await {
            Ok(headers) => Ok(headers.contains_key(ETAG)),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Fetch the etag of the object.
    pub async fn get_object_etag(&self, desc: &RequestDescriptor) -> Result<Option<String>> {
        let headers = self.get_object_metadata(desc).await?;
        match headers.get(ETAG) {
            Some(v) => Ok(Some(v.to_str()?.to_string())),
            None => Ok(None),
        }
    }

    /// Build a presigned url to download the object.
    ///
    /// `expires` defaults to one hour. No request is sent.
    pub fn presigned_url(&self, desc: &RequestDescriptor, expires: Option<Duration>) -> Result<String> {
        presign(desc, Method::GET, expires, HeaderMap::new())
    }

    /// Build a presigned url to upload the object.
    ///
    /// `content_type` and, for public descriptors, the `public-read` ACL are
    /// signed, so the uploader must send the same headers.
    pub fn presigned_upload_url(
        &self,
        desc: &RequestDescriptor,
        expires: Option<Duration>,
        content_type: Option<&str>,
    ) -> Result<String> {
        let mut headers = HeaderMap::new();
        if let Some(v) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_str(v)?);
        }
        if desc.is_public() {
            headers.insert(X_AMZ_ACL, HeaderValue::from_static(PUBLIC_READ));
        }

        presign(desc, Method::PUT, expires, headers)
    }

    /// Public url of the object. No request is sent.
    pub fn cloud_url(&self, desc: &RequestDescriptor) -> String {
        desc.res()
    }

    async fn send(
        &self,
        desc: &RequestDescriptor,
        method: Method,
        op: &str,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response<Bytes>> {
        let path = format!("/{}", desc.key());
        let provider = desc.provider().id();

        let req = sign(desc, method, headers, body)?;

        let start = Instant::now();
        debug!("{op} {path} in {provider} started");
        let resp = match self.ctx.http_send(req).await {
            Ok(resp) => resp,
            Err(err) => {
                warn!("{op} {path} in {provider} failed: {err}");
                return Err(err);
            }
        };

        let status = resp.status();
        if status.is_success() {
            debug!(
                "{op} {path} in {provider} finished with {status} in {}ms",
                start.elapsed().as_millis()
            );
            return Ok(resp);
        }

        warn!("{op} {path} in {provider} failed with {status}");
        if status == StatusCode::NOT_FOUND {
            return Err(Error::not_found(&path, provider));
        }
        Err(Error::unexpected(format!(
            "{op} {path} in {provider} failed with {status}: {}",
            String::from_utf8_lossy(resp.body())
        )))
    }
}

/// Build a header signed request for the object.
fn sign(
    desc: &RequestDescriptor,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Request<Bytes>> {
    let (mut parts, body) = Request::builder()
        .method(method)
        .uri(desc.uri()?)
        .body(body)?
        .into_parts();

    parts.headers = headers;
    parts.headers.extend(desc.headers().clone());

    if !parts.headers.contains_key(X_AMZ_CONTENT_SHA_256) {
        let payload_hash = if desc.provider().is_explicit_https() {
            UNSIGNED_PAYLOAD.to_string()
        } else if body.is_empty() {
            EMPTY_STRING_SHA256.to_string()
        } else {
            hex_sha256(&body)
        };
        parts
            .headers
            .insert(X_AMZ_CONTENT_SHA_256, HeaderValue::from_str(&payload_hash)?);
    }

    desc.signer()
        .sign_request(&mut parts, desc.credential(), SigningMethod::Header)?;
    Ok(Request::from_parts(parts, body))
}

/// Build a query signed url for the object.
fn presign(
    desc: &RequestDescriptor,
    method: Method,
    expires: Option<Duration>,
    headers: HeaderMap,
) -> Result<String> {
    let expires = expires.unwrap_or(DEFAULT_PRESIGN_EXPIRES);

    let (mut parts, _) = Request::builder()
        .method(method)
        .uri(desc.uri()?)
        .body(())?
        .into_parts();
    parts.headers = headers;

    desc.signer()
        .sign_request(&mut parts, desc.credential(), SigningMethod::Query(expires))?;
    debug!(
        "presigned {} {} in {} for {}s",
        parts.method,
        desc.path(),
        desc.provider(),
        expires.as_secs()
    );

    Ok(parts.uri.to_string())
}
