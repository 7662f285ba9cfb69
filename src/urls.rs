use url::{ParseError, Url};

use crate::record::RecordId;

/// Convenience wrapper for URL generation functions.
#[derive(Clone, Debug)]
pub struct Urls {
    /// Top-level URL, including trailing slash.
    base: Url,
}

impl Urls {
    pub fn new(base: impl AsRef<str>) -> Result<Self, ParseError> {
        Ok(Urls {
            base: Url::parse(base.as_ref())?,
        })
    }

    pub fn collection(&self, collection: &str) -> Result<Url, ParseError> {
        self.base.join(&format!("{}/", collection))
    }

    /// The URL a single record can be retrieved from.
    pub fn record(&self, collection: &str, id: &RecordId) -> Result<Url, ParseError> {
        let mut url = self.collection(collection)?.join("id/")?;

        url.path_segments_mut()
            .map_err(|_| ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(id.as_str());

        Ok(url)
    }
}
