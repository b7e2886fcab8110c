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

use crate::constants::*;
use crate::{Provider, ProviderId, RequestDescriptor};
use reqstore_aws_v4::Credential;
use reqstore_core::utils::Redact;
use reqstore_core::{Context, Error, Result};
use serde::Deserialize;
use std::fmt::{Debug, Formatter};

/// Config for S3 compatible services.
///
/// All fields are optional here; which of them are required depends on the
/// provider and is checked when a descriptor is built.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Provider id such as `AWS` or `MINIO`.
    pub provider: Option<String>,
    /// Region of the bucket.
    pub region: Option<String>,
    /// Bucket name.
    pub bucket: Option<String>,
    /// Access key id.
    pub access_key_id: Option<String>,
    /// Secret access key.
    pub secret_access_key: Option<String>,
    /// Explicit host, only used by MINIO, SUPABASE, R2 and R2_ALT.
    pub host: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("provider", &self.provider)
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("host", &self.host)
            .finish()
    }
}

impl Config {
    /// Load config from environment variables.
    pub fn from_env(ctx: &Context) -> Self {
        Self {
            provider: ctx.env_var(REQSTORE_PROVIDER),
            region: ctx.env_var(REQSTORE_REGION),
            bucket: ctx.env_var(REQSTORE_BUCKET),
            access_key_id: ctx.env_var(REQSTORE_ACCESS_KEY_ID),
            secret_access_key: ctx.env_var(REQSTORE_SECRET_ACCESS_KEY),
            host: ctx.env_var(REQSTORE_HOST),
        }
    }

    /// Build the provider this config points to.
    pub fn provider(&self) -> Result<Provider> {
        let id: ProviderId = required(&self.provider, "provider")?.parse()?;
        let bucket = required(&self.bucket, "bucket")?;

        Provider::new(id, bucket, self.region.as_deref(), self.host.as_deref())
            .map_err(|e| Error::config_invalid(e.to_string()).with_source(e))
    }

    /// Build the static credential of this config.
    pub fn credential(&self) -> Result<Credential> {
        Ok(Credential::new(
            required(&self.access_key_id, "access_key_id")?,
            required(&self.secret_access_key, "secret_access_key")?,
        ))
    }

    /// Build a descriptor for `filename` inside `directory`.
    pub fn descriptor(&self, directory: Option<&str>, filename: &str) -> Result<RequestDescriptor> {
        let desc = RequestDescriptor::new(self.provider()?, self.credential()?, filename);

        Ok(match directory {
            Some(dir) => desc.with_directory(dir),
            None => desc,
        })
    }
}

fn required<'a>(v: &'a Option<String>, field: &str) -> Result<&'a str> {
    v.as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::config_invalid(format!("config field {field} is required")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqstore_core::{ErrorKind, StaticEnv};
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> Context {
        Context::new().with_env(StaticEnv {
            envs: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
    }

    #[test]
    fn test_from_env() -> Result<()> {
        let ctx = env(&[
            (REQSTORE_PROVIDER, "MINIO"),
            (REQSTORE_BUCKET, "b"),
            (REQSTORE_ACCESS_KEY_ID, "minioadmin"),
            (REQSTORE_SECRET_ACCESS_KEY, "minioadmin"),
            (REQSTORE_HOST, "http://127.0.0.1:9000"),
        ]);
        let cfg = Config::from_env(&ctx);
        assert_eq!(cfg.region, None);

        let desc = cfg.descriptor(Some("dir"), "a.txt")?;
        assert_eq!(desc.provider().id(), ProviderId::Minio);
        assert_eq!(desc.url(), "http://127.0.0.1:9000/b/dir/a.txt");
        assert_eq!(desc.credential().access_key_id, "minioadmin");
        Ok(())
    }

    #[test]
    fn test_deserialize() -> Result<()> {
        let cfg: Config = serde_json::from_str(
            r#"{"provider": "AWS", "region": "us-east-1", "bucket": "b", "access_key_id": "ak", "secret_access_key": "sk"}"#,
        )
        .map_err(|e| Error::unexpected("invalid json").with_source(e))?;

        assert_eq!(cfg.host, None);
        assert_eq!(
            cfg.descriptor(None, "a.txt")?.res(),
            "https://b.s3.us-east-1.amazonaws.com/a.txt"
        );
        Ok(())
    }

    #[test]
    fn test_missing_fields() {
        let err = Config::default()
            .descriptor(None, "a.txt")
            .expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.to_string(), "config field provider is required");

        let cfg = Config {
            provider: Some("AWS".to_string()),
            bucket: Some("b".to_string()),
            access_key_id: Some("ak".to_string()),
            secret_access_key: Some("sk".to_string()),
            ..Default::default()
        };
        let err = cfg.descriptor(None, "a.txt").expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.to_string(), "region is required for provider AWS");
    }

    #[test]
    fn test_unsupported_provider() {
        let cfg = Config {
            provider: Some("S4".to_string()),
            bucket: Some("b".to_string()),
            ..Default::default()
        };
        let err = cfg.provider().expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::UnsupportedProvider);
    }

    #[test]
    fn test_debug_is_redacted() {
        let cfg = Config {
            secret_access_key: Some("wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY".to_string()),
            ..Default::default()
        };
        assert!(!format!("{cfg:?}").contains("wJalrXUtnFEMI"));
    }
}
