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

//! Core components for talking to S3 compatible object storage.
//!
//! This crate provides the foundational types and traits shared by the
//! reqstore crates. It holds no provider knowledge and performs no I/O on
//! its own; everything that touches the outside world is injected through
//! a [`Context`].
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for HTTP sending,
//!   environment access and content type detection.
//! - **Traits**: [`SignRequest`] for request signing and [`SigningCredential`]
//!   for credential validation.
//! - **SigningRequest**: A decomposed view of `http::request::Parts` that
//!   signers mutate before applying it back.
//!
//! ## Example
//!
//! ```
//! use reqstore_core::{Context, StaticEnv};
//! use std::collections::HashMap;
//!
//! let ctx = Context::new().with_env(StaticEnv {
//!     envs: HashMap::from([("REQSTORE_BUCKET".to_string(), "b".to_string())]),
//! });
//!
//! assert_eq!(ctx.env_var("REQSTORE_BUCKET").as_deref(), Some("b"));
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
pub use context::DetectContentType;
pub use context::Env;
pub use context::HttpSend;
pub use context::NoopDetectContentType;
pub use context::NoopEnv;
pub use context::NoopHttpSend;
pub use context::OsEnv;
pub use context::StaticEnv;

mod error;
pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;

mod api;
pub use api::{SignRequest, SigningCredential};
mod request;
pub use request::{SigningMethod, SigningRequest};
