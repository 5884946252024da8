//! `<key>` declarations: short key tokens mapped to display names.

use indexmap::IndexMap;
use serde::Serialize;

/// Key token -> display name, in declaration order.
///
/// Built once per parse and never mutated afterwards. Tokens without a declaration resolve to
/// themselves, so lookups never lose data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeKeyTable {
    names: IndexMap<String, String>,
}

impl AttributeKeyTable {
    /// Scans every `<key>` element of the document once.
    ///
    /// The display name is `attr.name` (standard GraphML), then the legacy `attrname`, then the
    /// key id itself. Keys without an `id` are skipped; a later declaration of the same id
    /// replaces the earlier one.
    pub fn from_document(doc: &roxmltree::Document<'_>) -> Self {
        let mut names = IndexMap::new();
        for key in doc
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "key")
        {
            let Some(id) = key.attribute("id") else {
                continue;
            };
            let name = key
                .attribute("attr.name")
                .or_else(|| key.attribute("attrname"))
                .unwrap_or(id);
            names.insert(id.to_string(), name.to_string());
        }
        Self { names }
    }

    pub fn resolve<'a>(&'a self, token: &'a str) -> &'a str {
        self.names.get(token).map(String::as_str).unwrap_or(token)
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.names.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
