use std::fmt;
use std::path::PathBuf;

/// An opaque content URI as handed over by an image picker.
///
/// Bare filesystem paths are accepted as well and treated like `file://` URIs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentUri(String);

impl ContentUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The URI scheme, or `None` for a bare path.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.0.split_once("://").map(|(scheme, _)| scheme)
    }

    /// The local path this URI points at, for `file://` URIs and bare paths.
    ///
    /// `file://` URIs are percent-decoded. A host other than `localhost` names
    /// a remote file and yields `None`.
    #[must_use]
    pub fn to_path(&self) -> Option<PathBuf> {
        match self.scheme() {
            None => Some(PathBuf::from(&self.0)),
            Some(s) if s.eq_ignore_ascii_case("file") => {
                url::Url::parse(&self.0).ok()?.to_file_path().ok()
            }
            Some(_) => None,
        }
    }
}

impl fmt::Display for ContentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentUri {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ContentUri {
    fn from(s: String) -> Self {
        Self(s)
    }
}
