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

use anyhow::Result;
use log::warn;
use reqstore_core::{Context, OsEnv};
use reqstore_detect_mime_guess::MimeGuessDetect;
use reqstore_http_send_reqwest::ReqwestHttpSend;
use reqstore_s3::{Client, Config};
use std::env;
use std::time::Duration;

/// Build a client and config from `REQSTORE_*` variables, or `None` if
/// live tests are disabled.
fn init() -> Option<(Client, Config)> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("REQSTORE_S3_TEST").unwrap_or_default() != "on" {
        warn!("REQSTORE_S3_TEST is not set, skipped");
        return None;
    }

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
        .with_detect_content_type(MimeGuessDetect);
    let config = Config::from_env(&ctx);

    Some((Client::new(ctx), config))
}

#[tokio::test]
async fn test_live_object_lifecycle() -> Result<()> {
    let Some((client, config)) = init() else {
        return Ok(());
    };
    let desc = config.descriptor(Some("reqstore-test"), "hello.txt")?;

    client.upload(&desc, "Hello, World!", None).await?;
    assert!(client.object_exists(&desc).await?);
    assert!(client.get_object_etag(&desc).await?.is_some());
    assert_eq!(client.get_text_file(&desc).await?, "Hello, World!");

    let url = client.presigned_url(&desc, Some(Duration::from_secs(60)))?;
    let resp = reqwest::get(&url).await?;
    assert_eq!(resp.status(), http::StatusCode::OK);
    assert_eq!(resp.text().await?, "Hello, World!");

    client.delete_object(&desc).await?;
    assert!(!client.object_exists(&desc).await?);
    Ok(())
}
