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

use std::fmt::{self, Display, Formatter};

/// Join `directory` and `filename` into an object key.
///
/// Exactly one leading and one trailing `/` is stripped from `directory`;
/// repeated slashes are kept. `filename` is used verbatim, so a filename
/// containing `/` ends up in nested directories.
///
/// ```
/// use reqstore_s3::resolve_path;
///
/// assert_eq!(resolve_path(Some("/TESTFILES/new/"), "123.jpg"), "TESTFILES/new/123.jpg");
/// assert_eq!(resolve_path(Some("/"), "123.jpg"), "123.jpg");
/// assert_eq!(resolve_path(None, "123.jpg"), "123.jpg");
/// ```
pub fn resolve_path(directory: Option<&str>, filename: &str) -> String {
    let dir = directory.unwrap_or_default();
    let dir = dir.strip_prefix('/').unwrap_or(dir);
    let dir = dir.strip_suffix('/').unwrap_or(dir);

    if dir.is_empty() {
        filename.to_string()
    } else {
        format!("{dir}/{filename}")
    }
}

/// ObjectKey is the normalized `directory/filename` of an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Build the key of `filename` inside `directory`.
    pub fn new(directory: Option<&str>, filename: &str) -> Self {
        Self(resolve_path(directory, filename))
    }

    /// Key without leading slash.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ObjectKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(None, "a.txt", "a.txt"; "no directory")]
    #[test_case(Some(""), "a.txt", "a.txt"; "empty directory")]
    #[test_case(Some("/"), "a.txt", "a.txt"; "root directory")]
    #[test_case(Some("//"), "a.txt", "a.txt"; "double slash directory")]
    #[test_case(Some("dir"), "a.txt", "dir/a.txt"; "plain directory")]
    #[test_case(Some("/dir/"), "a.txt", "dir/a.txt"; "wrapped directory")]
    #[test_case(Some("//dir//"), "a.txt", "/dir//a.txt"; "only one slash stripped")]
    #[test_case(Some("TESTFILES/new"), "123.jpg", "TESTFILES/new/123.jpg"; "nested directory")]
    #[test_case(Some("dir"), "sub/a.txt", "dir/sub/a.txt"; "filename with slash")]
    fn test_resolve_path(directory: Option<&str>, filename: &str, expected: &str) {
        assert_eq!(resolve_path(directory, filename), expected);
    }

    #[test]
    fn test_resolve_path_is_idempotent() {
        let cases = [
            (Some("/dir/"), "a.txt"),
            (Some("a/b/c/"), "d.png"),
            (None, "e.pdf"),
        ];

        for (directory, filename) in cases {
            let key = resolve_path(directory, filename);
            let (dir, file) = key.rsplit_once('/').unwrap_or(("", key.as_str()));
            assert_eq!(resolve_path(Some(dir), file), key);
        }
    }

    #[test]
    fn test_object_key_display() {
        let key = ObjectKey::new(Some("/TESTFILES/new/"), "123.jpg");
        assert_eq!(key.to_string(), "TESTFILES/new/123.jpg");
        assert_eq!(key.as_str(), "TESTFILES/new/123.jpg");
    }
}
