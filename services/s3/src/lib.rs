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

//! Object operations for S3 compatible services.
//!
//! This crate resolves where an object lives on each supported provider,
//! signs requests for it with [`reqstore_aws_v4`] and sends them through the
//! [`reqstore_core::Context`].
//!
//! ## Overview
//!
//! - [`resolve_path`] and [`ObjectKey`]: normalize a directory and filename
//!   into an object key.
//! - [`ProviderId`] and [`Provider`]: the provider table, producing host,
//!   signing url, public url and explicit key of an object.
//! - [`RequestDescriptor`]: one object on one provider, with credential and
//!   extra headers.
//! - [`Client`]: upload, download, delete, metadata and presigned urls.
//! - [`Config`]: build descriptors from configuration or environment.
//!
//! ## Example
//!
//! ```
//! use reqstore_core::Context;
//! use reqstore_s3::{Client, Config};
//! use std::time::Duration;
//!
//! # fn main() -> reqstore_core::Result<()> {
//! let cfg = Config {
//!     provider: Some("WASABI".to_string()),
//!     region: Some("eu-central-1".to_string()),
//!     bucket: Some("b".to_string()),
//!     access_key_id: Some("access_key_id".to_string()),
//!     secret_access_key: Some("secret_access_key".to_string()),
//!     ..Default::default()
//! };
//! let desc = cfg.descriptor(Some("TESTFILES"), "hello.txt")?;
//!
//! let client = Client::new(Context::new());
//! assert_eq!(client.cloud_url(&desc), "https://s3.eu-central-1.wasabisys.com/b/TESTFILES/hello.txt");
//!
//! let url = client.presigned_url(&desc, Some(Duration::from_secs(600)))?;
//! assert!(url.contains("X-Amz-Expires=600"));
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;
pub use constants::{DEFAULT_CONTENT_TYPE, DEFAULT_PRESIGN_EXPIRES, DEFAULT_REGION};

mod path;
pub use path::{resolve_path, ObjectKey};

mod provider;
pub use provider::{Provider, ProviderId};

mod descriptor;
pub use descriptor::RequestDescriptor;

mod data_url;
pub use data_url::DataUrl;

mod config;
pub use config::Config;

mod client;
pub use client::Client;
