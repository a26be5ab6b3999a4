use serde::Serialize;
use std::collections::BTreeMap;
use std::io;
use std::io::Write;

/// A mapping from each selector to whether it matched anything.
///
/// Keys are unique and kept in lexicographic order, which is also the order they serialize in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CheckResults {
    results: BTreeMap<String, bool>,
}

const JSON_INDENT: &[u8] = b"    ";

impl CheckResults {
    pub(crate) fn record(&mut self, selector: &str, present: bool) {
        self.results.insert(selector.to_string(), present);
    }

    pub fn get(&self, selector: &str) -> Option<bool> {
        self.results.get(selector).copied()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.results.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn passed(&self) -> usize {
        self.results.values().filter(|present| **present).count()
    }

    pub fn failed(&self) -> usize {
        self.len() - self.passed()
    }

    /// Writes the results as a JSON object indented by four spaces, followed by a newline.
    pub fn write_pretty<W: Write>(&self, mut out: W) -> io::Result<()> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        out.write_all(b"\n")
    }
}
