use crate::prelude::*;

/// Counters reported by the execution engine, organized into named groups.
/// We don't interpret these, we just show them to the user.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Counters(pub BTreeMap<String, BTreeMap<String, i64>>);

impl Counters {
    /// Are there any counters at all?
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|group| group.is_empty())
    }

    /// Iterate over `(group, counter, value)` triples in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, i64)> {
        self.0.iter().flat_map(|(group, counters)| {
            counters
                .iter()
                .map(move |(name, value)| (group.as_str(), name.as_str(), *value))
        })
    }
}
