use std::ops::Deref;

/// The list of selectors to look for, in lexicographic order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Checks {
    selectors: Vec<String>,
}

/// A checks definition that isn't a JSON array of strings.
pub type MalformedChecks = serde_json::Error;

impl Checks {
    /// Sorts `selectors` by code point, which is also the order [`super::CheckResults`] keys serialize in. This
    /// differs from UTF-16 code unit order only when comparing U+E000..=U+FFFF against non-BMP characters.
    pub fn new(mut selectors: Vec<String>) -> Self {
        selectors.sort();
        Self { selectors }
    }

    /// Parses a checks definition, which must be a JSON array of strings like `["h1", "div#main"]`.
    pub fn from_json(json: &str) -> Result<Self, MalformedChecks> {
        let selectors: Vec<String> = serde_json::from_str(json)?;
        Ok(Self::new(selectors))
    }
}

impl Deref for Checks {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.selectors
    }
}

impl<S: Into<String>> FromIterator<S> for Checks {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
