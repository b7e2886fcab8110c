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
use reqstore::s3::default_client_from_env;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Reads REQSTORE_PROVIDER, REQSTORE_BUCKET and friends.
    let (client, config) = default_client_from_env();
    let desc = config.descriptor(Some("reqstore-demo"), "hello.txt")?;

    let url = client.upload(&desc, "Hello, World!", None).await?;
    println!("Uploaded to: {url}");

    let etag = client.get_object_etag(&desc).await?;
    println!("ETag: {etag:?}");

    let presigned = client.presigned_url(&desc, Some(Duration::from_secs(300)))?;
    println!("Download for five minutes: {presigned}");

    let resp = client.get_object(&desc).await?;
    let content_type = resp.headers().get(http::header::CONTENT_TYPE).cloned();
    println!("Downloaded {} bytes of {content_type:?}", resp.body().len());

    let deleted = client.delete_object(&desc).await?;
    println!("Deleted: {deleted}");

    Ok(())
}
