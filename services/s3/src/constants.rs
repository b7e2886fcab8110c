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

// Env values used to build a `Config`.
pub const REQSTORE_PROVIDER: &str = "REQSTORE_PROVIDER";
pub const REQSTORE_REGION: &str = "REQSTORE_REGION";
pub const REQSTORE_BUCKET: &str = "REQSTORE_BUCKET";
pub const REQSTORE_ACCESS_KEY_ID: &str = "REQSTORE_ACCESS_KEY_ID";
pub const REQSTORE_SECRET_ACCESS_KEY: &str = "REQSTORE_SECRET_ACCESS_KEY";
pub const REQSTORE_HOST: &str = "REQSTORE_HOST";

/// Region signed with when a provider doesn't need one.
pub const DEFAULT_REGION: &str = "us-east-1";
/// Placeholder region GCP's interoperability endpoint expects.
pub const GCP_SIGNING_REGION: &str = "region";
/// Service name in the SigV4 credential scope.
pub const S3_SERVICE: &str = "s3";

/// Content type used when none is given and none can be detected.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Presigned urls are valid for one hour unless told otherwise.
pub const DEFAULT_PRESIGN_EXPIRES: std::time::Duration = std::time::Duration::from_secs(3600);
