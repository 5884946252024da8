use crate::keys::AttributeKeyTable;
use crate::model::{Attributes, EdgeRecord, GraphModel, NodeRecord};
use crate::{ParseOptions, Result};
use roxmltree::{Document, Node};

/// Parses GraphML text into a [`GraphModel`] with default [`ParseOptions`].
pub fn build(text: &str) -> Result<GraphModel> {
    GraphBuilder::new().build(text)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder {
    options: ParseOptions,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Builds a fresh model from the full document text.
    ///
    /// Only structurally unparseable markup is an error. Dangling edge endpoints, duplicate node
    /// ids, undeclared keys and empty values all produce a model.
    pub fn build(&self, text: &str) -> Result<GraphModel> {
        let doc = self.parse_document(text)?;
        let keys = AttributeKeyTable::from_document(&doc);

        let default_directed = doc
            .descendants()
            .find(|n| is_element(n, "graph"))
            .and_then(|g| g.attribute("edgedefault"))
            == Some("directed");

        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        for n in doc.descendants().filter(Node::is_element) {
            match n.tag_name().name() {
                "node" => nodes.push(NodeRecord {
                    id: n.attribute("id").unwrap_or_default().to_string(),
                    attributes: collect_data(&n, &keys),
                }),
                "edge" => {
                    let directed = match n.attribute("directed") {
                        Some(flag) => flag == "true",
                        None => default_directed,
                    };
                    edges.push(EdgeRecord {
                        source_id: n.attribute("source").unwrap_or_default().to_string(),
                        target_id: n.attribute("target").unwrap_or_default().to_string(),
                        directed,
                        attributes: collect_data(&n, &keys),
                    });
                }
                _ => {}
            }
        }

        tracing::debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            keys = keys.len(),
            default_directed,
            "built graph model"
        );
        Ok(GraphModel::new(nodes, edges, default_directed))
    }

    /// Resolves the document's key table without building the rest of the model.
    pub fn key_table(&self, text: &str) -> Result<AttributeKeyTable> {
        let doc = self.parse_document(text)?;
        Ok(AttributeKeyTable::from_document(&doc))
    }

    fn parse_document<'a>(&self, text: &'a str) -> Result<Document<'a>> {
        let mut opt = roxmltree::ParsingOptions::default();
        opt.allow_dtd = self.options.allow_dtd;
        Document::parse_with_options(text, opt).map_err(|err| {
            tracing::debug!(%err, "graph document rejected by XML parser");
            crate::Error::from(err)
        })
    }
}

fn is_element(node: &Node<'_, '_>, local_name: &str) -> bool {
    node.is_element() && node.tag_name().name() == local_name
}

/// Direct `<data>` children only; nested graphs carry their own data.
fn collect_data(owner: &Node<'_, '_>, keys: &AttributeKeyTable) -> Attributes {
    let mut out = Attributes::new();
    for d in owner.children().filter(|c| is_element(c, "data")) {
        let token = d.attribute("key").unwrap_or_default();
        let value: String = d
            .descendants()
            .filter(Node::is_text)
            .filter_map(|t| t.text())
            .collect();
        // Last write wins; `insert` keeps the key's first position.
        out.insert(keys.resolve(token).to_string(), value);
    }
    out
}
