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

use crate::{Result, SigningMethod};
use std::fmt::Debug;

/// SigningCredential is the trait used by signer as the signing credential.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is valid.
    fn is_valid(&self) -> bool;
}

/// SignRequest is the trait used to sign a request in place.
///
/// Signing is a pure function of the request parts, the credential and the
/// signing time. Implementations must never perform network I/O, so a signer
/// can only fail on malformed input.
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this signer.
    type Credential: SigningCredential;

    /// Sign the request.
    ///
    /// ## Method
    ///
    /// [`SigningMethod::Header`] injects the signature as headers, while
    /// [`SigningMethod::Query`] moves all signature material into the query
    /// string so the resulting URI can be handed out as a presigned URL.
    fn sign_request(
        &self,
        req: &mut http::request::Parts,
        credential: &Self::Credential,
        method: SigningMethod,
    ) -> Result<()>;
}
