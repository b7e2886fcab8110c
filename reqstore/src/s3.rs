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

//! S3 compatible object storage with convenience APIs.

pub use reqstore_s3::*;

#[cfg(feature = "default-context")]
use crate::default_context;

/// Create a [`Client`] on top of [`default_context`].
///
/// # Example
///
/// ```no_run
/// # async fn example() -> reqstore::Result<()> {
/// use reqstore::aws::Credential;
/// use reqstore::s3::{default_client, Provider, ProviderId, RequestDescriptor};
///
/// let provider = Provider::new(ProviderId::Aws, "my-bucket", Some("us-east-1"), None)?;
/// let desc = RequestDescriptor::new(provider, Credential::new("ak", "sk"), "a.txt");
///
/// let deleted = default_client().delete_object(&desc).await?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "default-context")]
pub fn default_client() -> Client {
    Client::new(default_context())
}

/// Create a [`Client`] and the [`Config`] read from `REQSTORE_*`
/// environment variables.
#[cfg(feature = "default-context")]
pub fn default_client_from_env() -> (Client, Config) {
    let ctx = default_context();
    let config = Config::from_env(&ctx);

    (Client::new(ctx), config)
}
