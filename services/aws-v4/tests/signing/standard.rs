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

use super::{init_signing_test, load_static_credential, send_signed_request};
use anyhow::Result;
use http::{Method, Request, StatusCode};
use log::warn;
use reqstore_aws_v4::X_AMZ_CONTENT_SHA_256;
use reqstore_core::hash::hex_sha256;
use reqstore_core::SigningMethod;
use std::str::FromStr;

#[tokio::test]
async fn test_head_object() -> Result<()> {
    let Some((signer, url)) = init_signing_test() else {
        warn!("REQSTORE_AWS_V4_TEST is not set, skipped");
        return Ok(());
    };

    let cred = load_static_credential();

    let mut req = Request::new(String::new());
    *req.method_mut() = Method::HEAD;
    *req.uri_mut() = http::Uri::from_str(&format!("{}/{}", url, "not_exist_file"))?;

    let (status, _body) = send_signed_request(&signer, req, &cred, SigningMethod::Header).await?;
    assert_eq!(StatusCode::NOT_FOUND, status);
    Ok(())
}

#[tokio::test]
async fn test_get_object() -> Result<()> {
    let Some((signer, url)) = init_signing_test() else {
        warn!("REQSTORE_AWS_V4_TEST is not set, skipped");
        return Ok(());
    };

    let cred = load_static_credential();

    let mut req = Request::new(String::new());
    *req.method_mut() = Method::GET;
    *req.uri_mut() = http::Uri::from_str(&format!("{}/{}", url, "not_exist_file"))?;

    let (status, _body) = send_signed_request(&signer, req, &cred, SigningMethod::Header).await?;
    assert_eq!(StatusCode::NOT_FOUND, status);
    Ok(())
}

#[tokio::test]
async fn test_put_and_delete_object() -> Result<()> {
    let Some((signer, url)) = init_signing_test() else {
        warn!("REQSTORE_AWS_V4_TEST is not set, skipped");
        return Ok(());
    };

    let cred = load_static_credential();
    let body = "Hello, World!";

    let mut req = Request::new(body.to_string());
    req.headers_mut()
        .insert(X_AMZ_CONTENT_SHA_256, hex_sha256(body.as_bytes()).parse()?);
    *req.method_mut() = Method::PUT;
    *req.uri_mut() = http::Uri::from_str(&format!("{}/{}", url, "put_object_test"))?;

    let (status, _body) = send_signed_request(&signer, req, &cred, SigningMethod::Header).await?;
    assert_eq!(StatusCode::OK, status);

    let mut req = Request::new(String::new());
    *req.method_mut() = Method::DELETE;
    *req.uri_mut() = http::Uri::from_str(&format!("{}/{}", url, "put_object_test"))?;

    let (status, _body) = send_signed_request(&signer, req, &cred, SigningMethod::Header).await?;
    assert_eq!(StatusCode::NO_CONTENT, status);
    Ok(())
}
