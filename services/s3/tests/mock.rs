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

use async_trait::async_trait;
use bytes::Bytes;
use http::header::{CONTENT_TYPE, ETAG};
use http::{Method, Request, Response, StatusCode};
use reqstore_aws_v4::Credential;
use reqstore_core::hash::hex_sha256;
use reqstore_core::{Context, Error, HttpSend, Result};
use reqstore_s3::{Client, Provider, ProviderId, RequestDescriptor};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// HttpSend that records every request and replays queued responses.
#[derive(Debug, Clone, Default)]
pub struct MockHttpSend {
    requests: Arc<Mutex<Vec<Request<Bytes>>>>,
    responses: Arc<Mutex<VecDeque<Response<Bytes>>>>,
}

impl MockHttpSend {
    /// Queue a response.
    pub fn respond(self, status: StatusCode, headers: &[(&str, &str)], body: &'static [u8]) -> Self {
        let mut builder = Response::builder().status(status);
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        let resp = builder
            .body(Bytes::from_static(body))
            .expect("response must be valid");

        self.responses.lock().unwrap().push_back(resp);
        self
    }

    /// Take all recorded requests.
    pub fn take_requests(&self) -> Vec<Request<Bytes>> {
        std::mem::take(&mut *self.requests.lock().unwrap())
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: Request<Bytes>) -> Result<Response<Bytes>> {
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::unexpected("connection refused"))
    }
}

/// HttpSend that behaves like a bucket kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryHttpSend {
    objects: Arc<Mutex<HashMap<String, (String, Bytes)>>>,
}

#[async_trait]
impl HttpSend for MemoryHttpSend {
    async fn http_send(&self, req: Request<Bytes>) -> Result<Response<Bytes>> {
        let path = req.uri().path().to_string();
        let mut objects = self.objects.lock().unwrap();

        let resp = match (req.method().clone(), objects.get(&path).cloned()) {
            (Method::PUT, _) => {
                let content_type = req
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                objects.insert(path, (content_type, req.into_body()));
                Response::builder().status(StatusCode::OK).body(Bytes::new())
            }
            (Method::GET, Some((content_type, body))) => Response::builder()
                .status(StatusCode::OK)
                .header(CONTENT_TYPE, content_type)
                .header(ETAG, format!("\"{}\"", hex_sha256(&body)))
                .body(body),
            (Method::HEAD, Some((content_type, body))) => Response::builder()
                .status(StatusCode::OK)
                .header(CONTENT_TYPE, content_type)
                .header(ETAG, format!("\"{}\"", hex_sha256(&body)))
                .body(Bytes::new()),
            (Method::DELETE, Some(_)) => {
                objects.remove(&path);
                Response::builder()
                    .status(StatusCode::NO_CONTENT)
                    .body(Bytes::new())
            }
            _ => Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Bytes::from_static(b"<Error><Code>NoSuchKey</Code></Error>")),
        };

        Ok(resp?)
    }
}

/// Client on top of `http`.
pub fn client(http: impl HttpSend) -> Client {
    Client::new(Context::new().with_http_send(http))
}

/// Descriptor of `TESTFILES/new/<filename>` in bucket `b`.
pub fn descriptor(id: ProviderId, filename: &str) -> RequestDescriptor {
    let host = match id {
        ProviderId::Minio => Some("http://127.0.0.1:9000"),
        ProviderId::Supabase => Some("https://project.supabase.co"),
        ProviderId::R2 | ProviderId::R2Alt => Some("https://account.r2.cloudflarestorage.com"),
        _ => None,
    };
    let provider =
        Provider::new(id, "b", Some("us-east-1"), host).expect("provider must be valid");

    RequestDescriptor::new(
        provider,
        Credential::new("access_key_id", "secret_access_key"),
        filename,
    )
    .with_directory("TESTFILES/new")
}
