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

use crate::constants::S3_SERVICE;
use crate::{ObjectKey, Provider};
use http::{HeaderMap, HeaderName, HeaderValue, Uri};
use percent_encoding::utf8_percent_encode;
use reqstore_aws_v4::{Credential, RequestSigner, OBJECT_PATH_ENCODE_SET};
use reqstore_core::Result;

/// RequestDescriptor addresses one object and carries everything needed to
/// sign requests for it.
///
/// ```
/// use reqstore_aws_v4::Credential;
/// use reqstore_s3::{Provider, ProviderId, RequestDescriptor};
///
/// # fn main() -> reqstore_core::Result<()> {
/// let provider = Provider::new(ProviderId::Aws, "b", Some("us-east-1"), None)?;
/// let desc = RequestDescriptor::new(provider, Credential::new("ak", "sk"), "123.jpg")
///     .with_directory("/TESTFILES/new/");
///
/// assert_eq!(desc.res(), "https://b.s3.us-east-1.amazonaws.com/TESTFILES/new/123.jpg");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    provider: Provider,
    credential: Credential,
    directory: Option<String>,
    filename: String,
    headers: HeaderMap,
    public: bool,
}

impl RequestDescriptor {
    /// Address `filename` at the root of the provider's bucket.
    pub fn new(provider: Provider, credential: Credential, filename: &str) -> Self {
        Self {
            provider,
            credential,
            directory: None,
            filename: filename.to_string(),
            headers: HeaderMap::new(),
            public: false,
        }
    }

    /// Place the object inside `directory`.
    pub fn with_directory(mut self, directory: &str) -> Self {
        self.directory = Some(directory.to_string());
        self
    }

    /// Add a header that is sent and signed with every request.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Add headers that are sent and signed with every request.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Make uploads of this object world readable.
    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// Provider this descriptor is bound to.
    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Credential requests are signed with.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Extra headers given by the caller.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Whether uploads are made world readable.
    pub fn is_public(&self) -> bool {
        self.public
    }

    /// Normalized key of the object.
    pub fn key(&self) -> ObjectKey {
        ObjectKey::new(self.directory.as_deref(), &self.filename)
    }

    /// Path of the object in requests, starting with `/`.
    pub fn path(&self) -> String {
        self.provider.path_of(&self.key())
    }

    /// Canonical url of the object.
    pub fn url(&self) -> String {
        self.provider.url(&self.key())
    }

    /// Public url of the object.
    pub fn res(&self) -> String {
        self.provider.res(&self.key())
    }

    /// Uri requests for this object are sent to.
    ///
    /// Bytes that can't appear in a uri path are percent encoded; everything
    /// else in the key is kept as is.
    pub fn uri(&self) -> Result<Uri> {
        let path = utf8_percent_encode(&self.path(), &OBJECT_PATH_ENCODE_SET).to_string();

        Ok(Uri::builder()
            .scheme(self.provider.scheme())
            .authority(self.provider.authority().as_str())
            .path_and_query(path.as_str())
            .build()?)
    }

    /// SigV4 signer for this descriptor's provider.
    pub fn signer(&self) -> RequestSigner {
        RequestSigner::new(S3_SERVICE, self.provider.signing_region())
    }
}
