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

use reqstore_core::{Context, OsEnv};
use reqstore_detect_mime_guess::MimeGuessDetect;
use reqstore_http_send_reqwest::ReqwestHttpSend;

/// Create a [`Context`] with the collaborators most callers want:
///
/// - HTTP requests are sent by a default `reqwest::Client`.
/// - Environment variables are read from the current process.
/// - Content types are guessed from the object key's extension.
///
/// Use [`Context::new`] and its `with_*` methods to replace any of them,
/// for example to bring a `reqwest::Client` with timeouts.
pub fn default_context() -> Context {
    Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
        .with_detect_content_type(MimeGuessDetect)
}
