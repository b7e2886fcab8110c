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

use crate::{Error, Result};
use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use http::Uri;
use std::mem;
use std::str::FromStr;
use std::time::Duration;

/// Signing context for request.
///
/// The request is taken apart so a signer can rewrite headers and query
/// without reparsing the uri, then [`SigningRequest::apply`] puts it back.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, still percent encoded.
    pub path: String,
    /// HTTP query parameters, percent decoded.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let uri = mem::take(&mut parts.uri).into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: uri.scheme.unwrap_or(Scheme::HTTP),
            authority: uri.authority.ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?,
            path: paq.path().to_string(),
            query: paq
                .query()
                .map(|v| {
                    form_urlencoded::parse(v.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default(),

            // Take the headers out of the request to avoid copy.
            // They are returned in `apply`.
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    ///
    /// Query pairs are written as-is, so the signer is expected to have
    /// encoded them already.
    pub fn apply(self, parts: &mut http::request::Parts) -> Result<()> {
        let mut paq = self.path;
        for (i, (k, v)) in self.query.iter().enumerate() {
            paq.push(if i == 0 { '?' } else { '&' });
            paq.push_str(k);
            if !v.is_empty() {
                paq.push('=');
                paq.push_str(v);
            }
        }

        parts.headers = self.headers;
        parts.method = self.method;
        parts.uri = Uri::builder()
            .scheme(self.scheme)
            .authority(self.authority)
            .path_and_query(PathAndQuery::from_str(&paq)?)
            .build()?;

        Ok(())
    }

    /// Normalize every header value for canonical signing.
    pub fn normalize_header_values(&mut self) {
        for (_, value) in self.headers.iter_mut() {
            Self::header_value_normalize(value)
        }
    }

    /// Normalize header value.
    ///
    /// Leading and trailing spaces are trimmed and every run of spaces
    /// inside the value is collapsed into a single space.
    pub fn header_value_normalize(v: &mut HeaderValue) {
        let bs = v.as_bytes();

        let mut normalized = Vec::with_capacity(bs.len());
        for word in bs.split(|b| *b == b' ').filter(|w| !w.is_empty()) {
            if !normalized.is_empty() {
                normalized.push(b' ');
            }
            normalized.extend_from_slice(word);
        }

        if normalized == bs {
            return;
        }

        // Removing spaces from a valid value always yields a valid value.
        if let Ok(value) = HeaderValue::from_bytes(&normalized) {
            let sensitive = v.is_sensitive();
            *v = value;
            v.set_sensitive(sensitive);
        }
    }

    /// Get header names as sorted vector.
    ///
    /// `http` already stores names lower-cased.
    pub fn header_name_to_vec_sorted(&self) -> Vec<&str> {
        let mut h = self
            .headers
            .keys()
            .map(|k| k.as_str())
            .collect::<Vec<&str>>();
        h.sort_unstable();

        h
    }

    /// Get header value as str, returns `None` if it's absent.
    pub fn header_get(&self, key: &str) -> Result<Option<&str>> {
        match self.headers.get(key) {
            Some(v) => Ok(Some(v.to_str()?)),
            None => Ok(None),
        }
    }

    /// Push a new query pair into query list.
    #[inline]
    pub fn query_push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }
}

/// SigningMethod is the method that used in signing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SigningMethod {
    /// Signing with header.
    Header,
    /// Signing with query, valid for the given duration.
    Query(Duration),
}
