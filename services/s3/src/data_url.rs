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

use bytes::Bytes;
use percent_encoding::percent_decode_str;
use reqstore_core::hash::{base64_decode, base64_encode};
use reqstore_core::{Error, Result};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// DataUrl is an inline object in the form `data:<mime>;base64,<payload>`.
///
/// - [RFC 2397](https://www.rfc-editor.org/rfc/rfc2397)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    mime: String,
    data: Bytes,
}

impl DataUrl {
    /// Wrap `data` of type `mime`.
    pub fn new(mime: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            mime: mime.into(),
            data: data.into(),
        }
    }

    /// Parse a data url.
    ///
    /// The payload after the first `,` is base64 decoded when the url is
    /// marked `;base64`, and percent decoded otherwise.
    pub fn parse(s: &str) -> Result<Self> {
        let rest = s
            .strip_prefix("data:")
            .ok_or_else(|| Error::request_invalid("data url must start with `data:`"))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| Error::request_invalid("data url must contain `,`"))?;

        let (mime, data) = match meta.strip_suffix(";base64") {
            Some(mime) => (mime, base64_decode(payload.trim())?),
            None => (meta, percent_decode_str(payload).collect::<Vec<u8>>()),
        };

        Ok(Self::new(mime, data))
    }

    /// Mime type, may be empty.
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Decoded payload.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Consume self and return the decoded payload.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl FromStr for DataUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Display for DataUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime, base64_encode(&self.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqstore_core::ErrorKind;

    const PIXEL: &str = "data:image/gif;base64,R0lGODlhAQABAAAAACw=";

    #[test]
    fn test_parse_base64() -> Result<()> {
        let url = DataUrl::parse(PIXEL)?;
        assert_eq!(url.mime(), "image/gif");
        assert_eq!(&url.data()[..6], b"GIF89a");
        assert_eq!(url.to_string(), PIXEL);
        Ok(())
    }

    #[test]
    fn test_parse_percent_encoded() -> Result<()> {
        let url: DataUrl = "data:text/plain;charset=utf-8,hello%20world".parse()?;
        assert_eq!(url.mime(), "text/plain;charset=utf-8");
        assert_eq!(url.into_data(), Bytes::from_static(b"hello world"));
        Ok(())
    }

    #[test]
    fn test_parse_without_mime() -> Result<()> {
        let url = DataUrl::parse("data:;base64,aGk=")?;
        assert_eq!(url.mime(), "");
        assert_eq!(&url.data()[..], b"hi");
        Ok(())
    }

    #[test]
    fn test_parse_invalid() {
        for s in ["image/gif;base64,R0lG", "data:image/gif;base64", "data:;base64,%%%"] {
            let err = DataUrl::parse(s).expect_err("must fail");
            assert_eq!(err.kind(), ErrorKind::RequestInvalid, "{s}");
        }
    }

    #[test]
    fn test_display() {
        let url = DataUrl::new("image/jpeg", Bytes::from_static(&[0xff, 0xd8, 0xff]));
        assert_eq!(url.to_string(), "data:image/jpeg;base64,/9j/");
    }
}
