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

use crate::constants::{DEFAULT_REGION, GCP_SIGNING_REGION};
use crate::ObjectKey;
use http::uri::Scheme;
use reqstore_core::{Error, Result};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// ProviderId identifies one of the supported storage backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    /// Google Cloud Storage through its S3 interoperability endpoint.
    Gcp,
    /// Wasabi.
    Wasabi,
    /// Amazon S3.
    Aws,
    /// Contabo object storage, path-style only.
    Contabo,
    /// DigitalOcean Spaces.
    Do,
    /// MinIO or any S3 compatible server behind an explicit host.
    Minio,
    /// Supabase storage S3 gateway.
    Supabase,
    /// Cloudflare R2 with the bucket as subdomain.
    R2,
    /// Cloudflare R2 with the bucket in the path.
    R2Alt,
}

impl ProviderId {
    /// Every supported provider.
    pub const ALL: [ProviderId; 9] = [
        ProviderId::Gcp,
        ProviderId::Wasabi,
        ProviderId::Aws,
        ProviderId::Contabo,
        ProviderId::Do,
        ProviderId::Minio,
        ProviderId::Supabase,
        ProviderId::R2,
        ProviderId::R2Alt,
    ];

    /// Name of the provider as it appears in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderId::Gcp => "GCP",
            ProviderId::Wasabi => "WASABI",
            ProviderId::Aws => "AWS",
            ProviderId::Contabo => "CONTABO",
            ProviderId::Do => "DO",
            ProviderId::Minio => "MINIO",
            ProviderId::Supabase => "SUPABASE",
            ProviderId::R2 => "R2",
            ProviderId::R2Alt => "R2_ALT",
        }
    }

    /// Whether requests to this provider go to a caller supplied host.
    pub fn requires_host(self) -> bool {
        matches!(
            self,
            ProviderId::Minio | ProviderId::Supabase | ProviderId::R2 | ProviderId::R2Alt
        )
    }

    /// Whether the host or url templates of this provider embed a region.
    pub fn requires_region(self) -> bool {
        matches!(
            self,
            ProviderId::Wasabi | ProviderId::Aws | ProviderId::Contabo | ProviderId::Do
        )
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = Error;

    /// Names are matched ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self> {
        ProviderId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let supported = ProviderId::ALL.map(ProviderId::as_str);
                Error::unsupported_provider(s, &supported)
            })
    }
}

/// Provider is a storage backend bound to a bucket.
///
/// Each variant only carries the fields its address templates need, so a
/// constructed provider can always produce its host and urls.
///
/// ## Templates
///
/// | Provider | host | url | res |
/// |---|---|---|---|
/// | GCP | `b.storage.googleapis.com` | `https://b.storage.googleapis.com/k` | `https://storage.googleapis.com/b/k` |
/// | AWS | `b.s3.r.amazonaws.com` | `https://b.s3.r.amazonaws.com/k` | same as url |
/// | WASABI | `b.s3.r.wasabisys.com` | `https://b.s3.r.wasabisys.com/k` | `https://s3.r.wasabisys.com/b/k` |
/// | DO | `b.r.digitaloceanspaces.com` | `https://b.r.digitaloceanspaces.com/k` | same as url |
/// | CONTABO | `r.contabostorage.com` | `https://r.contabostorage.com/b/k` | same as url |
/// | MINIO | `h` | `h/b/k` | same as url |
/// | SUPABASE | `h` | `h/storage/v1/s3/b/k` | same as url |
/// | R2 | `https://b.h` | `https://b.h/k` | same as url |
/// | R2_ALT | `https://h` | `https://h/b/k` | same as url |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provider {
    /// Google Cloud Storage.
    Gcp {
        /// Bucket name.
        bucket: String,
    },
    /// Wasabi.
    Wasabi {
        /// Bucket name.
        bucket: String,
        /// Region such as `eu-central-1`.
        region: String,
    },
    /// Amazon S3.
    Aws {
        /// Bucket name.
        bucket: String,
        /// Region such as `us-east-1`.
        region: String,
    },
    /// Contabo.
    Contabo {
        /// Bucket name.
        bucket: String,
        /// Region such as `eu2`.
        region: String,
    },
    /// DigitalOcean Spaces.
    Do {
        /// Bucket name.
        bucket: String,
        /// Region such as `fra1`.
        region: String,
    },
    /// MinIO.
    Minio {
        /// Bucket name.
        bucket: String,
        /// Host, optionally with scheme: `http://127.0.0.1:9000`.
        host: String,
        /// Signing region, `us-east-1` if absent.
        region: Option<String>,
    },
    /// Supabase.
    Supabase {
        /// Bucket name.
        bucket: String,
        /// Host, optionally with scheme: `https://project.supabase.co`.
        host: String,
        /// Signing region, `us-east-1` if absent.
        region: Option<String>,
    },
    /// Cloudflare R2, bucket as subdomain.
    R2 {
        /// Bucket name.
        bucket: String,
        /// Account host without scheme: `account.r2.cloudflarestorage.com`.
        host: String,
        /// Signing region, `us-east-1` if absent.
        region: Option<String>,
    },
    /// Cloudflare R2, bucket in path.
    R2Alt {
        /// Bucket name.
        bucket: String,
        /// Account host without scheme: `account.r2.cloudflarestorage.com`.
        host: String,
        /// Signing region, `us-east-1` if absent.
        region: Option<String>,
    },
}

impl Provider {
    /// Bind provider `id` to `bucket`.
    ///
    /// Empty strings count as absent. Returns a `RequestInvalid` error naming
    /// the missing field when the provider needs a region or host that isn't
    /// given.
    pub fn new(
        id: ProviderId,
        bucket: &str,
        region: Option<&str>,
        host: Option<&str>,
    ) -> Result<Self> {
        let bucket = non_empty(Some(bucket))
            .ok_or_else(|| Error::missing_field("bucket", id))?
            .to_string();
        let region = non_empty(region);
        let host = non_empty(host).map(|v| v.trim_end_matches('/'));

        let required_region = || {
            region
                .map(|v| v.to_string())
                .ok_or_else(|| Error::missing_field("region", id))
        };
        let required_host = || host.ok_or_else(|| Error::missing_field("host", id));
        let optional_region = region.map(|v| v.to_string());

        Ok(match id {
            ProviderId::Gcp => Provider::Gcp { bucket },
            ProviderId::Wasabi => Provider::Wasabi {
                bucket,
                region: required_region()?,
            },
            ProviderId::Aws => Provider::Aws {
                bucket,
                region: required_region()?,
            },
            ProviderId::Contabo => Provider::Contabo {
                bucket,
                region: required_region()?,
            },
            ProviderId::Do => Provider::Do {
                bucket,
                region: required_region()?,
            },
            ProviderId::Minio => Provider::Minio {
                bucket,
                host: required_host()?.to_string(),
                region: optional_region,
            },
            ProviderId::Supabase => Provider::Supabase {
                bucket,
                host: required_host()?.to_string(),
                region: optional_region,
            },
            ProviderId::R2 => Provider::R2 {
                bucket,
                host: strip_scheme(required_host()?).to_string(),
                region: optional_region,
            },
            ProviderId::R2Alt => Provider::R2Alt {
                bucket,
                host: strip_scheme(required_host()?).to_string(),
                region: optional_region,
            },
        })
    }

    /// Id of this provider.
    pub fn id(&self) -> ProviderId {
        match self {
            Provider::Gcp { .. } => ProviderId::Gcp,
            Provider::Wasabi { .. } => ProviderId::Wasabi,
            Provider::Aws { .. } => ProviderId::Aws,
            Provider::Contabo { .. } => ProviderId::Contabo,
            Provider::Do { .. } => ProviderId::Do,
            Provider::Minio { .. } => ProviderId::Minio,
            Provider::Supabase { .. } => ProviderId::Supabase,
            Provider::R2 { .. } => ProviderId::R2,
            Provider::R2Alt { .. } => ProviderId::R2Alt,
        }
    }

    /// Bucket this provider is bound to.
    pub fn bucket(&self) -> &str {
        match self {
            Provider::Gcp { bucket }
            | Provider::Wasabi { bucket, .. }
            | Provider::Aws { bucket, .. }
            | Provider::Contabo { bucket, .. }
            | Provider::Do { bucket, .. }
            | Provider::Minio { bucket, .. }
            | Provider::Supabase { bucket, .. }
            | Provider::R2 { bucket, .. }
            | Provider::R2Alt { bucket, .. } => bucket,
        }
    }

    /// Host requests are sent to.
    ///
    /// The value may carry an `http://` or `https://` prefix, which decides
    /// the scheme of the request. A host without prefix is reached over https.
    pub fn host(&self) -> String {
        match self {
            Provider::Gcp { bucket } => format!("{bucket}.storage.googleapis.com"),
            Provider::Wasabi { bucket, region } => format!("{bucket}.s3.{region}.wasabisys.com"),
            Provider::Aws { bucket, region } => format!("{bucket}.s3.{region}.amazonaws.com"),
            Provider::Contabo { region, .. } => format!("{region}.contabostorage.com"),
            Provider::Do { bucket, region } => format!("{bucket}.{region}.digitaloceanspaces.com"),
            Provider::Minio { host, .. } | Provider::Supabase { host, .. } => host.clone(),
            Provider::R2 { bucket, host, .. } => format!("https://{bucket}.{host}"),
            Provider::R2Alt { host, .. } => format!("https://{host}"),
        }
    }

    /// Canonical url of the object, the one requests are signed for.
    pub fn url(&self, key: &ObjectKey) -> String {
        match self {
            Provider::Gcp { .. }
            | Provider::Wasabi { .. }
            | Provider::Aws { .. }
            | Provider::Do { .. }
            | Provider::R2 { .. } => format!("{}/{key}", with_scheme(&self.host())),
            Provider::Contabo { .. }
            | Provider::Minio { .. }
            | Provider::Supabase { .. }
            | Provider::R2Alt { .. } => {
                format!("{}{}", with_scheme(&self.host()), self.path_of(key))
            }
        }
    }

    /// Public url of the object, the one handed out after an upload.
    pub fn res(&self, key: &ObjectKey) -> String {
        match self {
            Provider::Gcp { bucket } => format!("https://storage.googleapis.com/{bucket}/{key}"),
            Provider::Wasabi { bucket, region } => {
                format!("https://s3.{region}.wasabisys.com/{bucket}/{key}")
            }
            _ => self.url(key),
        }
    }

    /// Explicit object path for providers addressed path-style.
    ///
    /// Returns `None` for virtual-hosted providers, whose request path is
    /// `/` followed by the key.
    pub fn key(&self, key: &ObjectKey) -> Option<String> {
        match self {
            Provider::Contabo { bucket, .. }
            | Provider::Minio { bucket, .. }
            | Provider::R2Alt { bucket, .. } => Some(format!("/{bucket}/{key}")),
            Provider::Supabase { bucket, .. } => Some(format!("/storage/v1/s3/{bucket}/{key}")),
            Provider::Gcp { .. }
            | Provider::Wasabi { .. }
            | Provider::Aws { .. }
            | Provider::Do { .. }
            | Provider::R2 { .. } => None,
        }
    }

    /// Path of the object in requests, always starting with `/`.
    pub fn path_of(&self, key: &ObjectKey) -> String {
        self.key(key).unwrap_or_else(|| format!("/{key}"))
    }

    /// Region used in the SigV4 credential scope.
    ///
    /// GCP's interoperability endpoint expects the literal `region`.
    pub fn signing_region(&self) -> &str {
        match self {
            Provider::Gcp { .. } => GCP_SIGNING_REGION,
            Provider::Wasabi { region, .. }
            | Provider::Aws { region, .. }
            | Provider::Contabo { region, .. }
            | Provider::Do { region, .. } => region,
            Provider::Minio { region, .. }
            | Provider::Supabase { region, .. }
            | Provider::R2 { region, .. }
            | Provider::R2Alt { region, .. } => region.as_deref().unwrap_or(DEFAULT_REGION),
        }
    }

    /// Scheme requests are sent with.
    pub fn scheme(&self) -> Scheme {
        if self.host().starts_with("http://") {
            Scheme::HTTP
        } else {
            Scheme::HTTPS
        }
    }

    /// Whether the host carries an explicit `https://` prefix.
    ///
    /// Requests to such hosts that don't carry a payload hash are signed with
    /// `UNSIGNED-PAYLOAD`.
    pub fn is_explicit_https(&self) -> bool {
        self.host().starts_with("https://")
    }

    /// Host without scheme, as used in the `Host` header.
    pub fn authority(&self) -> String {
        strip_scheme(&self.host()).to_string()
    }
}

impl Display for Provider {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.id(), f)
    }
}

fn non_empty(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|v| !v.is_empty())
}

fn strip_scheme(host: &str) -> &str {
    host.strip_prefix("https://")
        .or_else(|| host.strip_prefix("http://"))
        .unwrap_or(host)
}

fn with_scheme(host: &str) -> String {
    if host.starts_with("https://") || host.starts_with("http://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}
