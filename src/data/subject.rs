use std::collections::BTreeMap;

/// Lookup from short subject codes to display names.
///
/// Codes missing from the map are shown verbatim, so an incomplete map never
/// hides data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectMap {
    names: BTreeMap<String, String>,
}

impl Default for SubjectMap {
    fn default() -> Self {
        let mut map = SubjectMap::empty();
        map.insert("inf", "Информатика");
        map.insert("fr", "Французский язык");
        map
    }
}

impl SubjectMap {
    pub fn empty() -> Self {
        SubjectMap {
            names: BTreeMap::new(),
        }
    }

    /// Add or replace a mapping.
    pub fn insert(&mut self, code: impl Into<String>, name: impl Into<String>) {
        self.names.insert(code.into(), name.into());
    }

    pub fn display_name(&self, code: &str) -> String {
        self.names
            .get(code)
            .cloned()
            .unwrap_or_else(|| code.to_string())
    }
}
