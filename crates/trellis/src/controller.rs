use crate::event::HostMessage;
use crate::session::Session;
use base64::Engine as _;

/// An encoded export of the full scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportedImage {
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

impl Session {
    /// Selects every node whose id contains `substring` and centers on the first of them.
    ///
    /// Matching is literal and case-sensitive. An empty `substring` only clears the selection.
    /// Returns the number of selected nodes.
    pub fn select_by_id(&mut self, substring: &str) -> usize {
        let count = self.scene.select_matching(substring);
        tracing::debug!(query = substring, count, "selection changed");
        count
    }

    /// Encodes the full scene, not just the visible part, as PNG. `None` when there is nothing
    /// on screen.
    #[cfg(feature = "raster")]
    pub fn export_image(&self) -> crate::Result<Option<ExportedImage>> {
        if self.scene.is_empty() {
            return Ok(None);
        }
        let bytes = crate::raster::svg_to_png(&self.scene_svg(), &self.export.raster)?;
        Ok(Some(ExportedImage {
            file_name: "graph.png".to_string(),
            mime_type: "image/png",
            bytes,
        }))
    }

    /// Without rasterization the export is the scene SVG itself.
    #[cfg(not(feature = "raster"))]
    pub fn export_image(&self) -> crate::Result<Option<ExportedImage>> {
        if self.scene.is_empty() {
            return Ok(None);
        }
        Ok(Some(ExportedImage {
            file_name: "graph.svg".to_string(),
            mime_type: "image/svg+xml",
            bytes: self.scene_svg().into_bytes(),
        }))
    }

    /// The outward notification for a node the user interacted with. Resolving `node_id` to a
    /// source location is up to the host.
    pub fn on_node_activated(&self, node_id: &str) -> HostMessage {
        tracing::debug!(node = node_id, "node activated");
        HostMessage::Activate {
            id: node_id.to_string(),
        }
    }

    /// Hit-tests a click in screen coordinates. Empty canvas and placeholders activate nothing.
    pub fn activate_at(&self, x: f64, y: f64) -> Option<HostMessage> {
        let node = self.scene.node_at(x, y).filter(|n| !n.placeholder)?;
        Some(self.on_node_activated(&node.id))
    }

    /// Re-renders the current model with another layout; the document is not parsed again.
    ///
    /// The status line is left alone: it describes the document, which has not changed.
    pub fn set_layout(&mut self, name: &str) {
        let status = self.scene.status().map(str::to_owned);
        let mut scene = match &self.model {
            Some(model) => self.engine.render(Some(&self.scene), model, name),
            None => self.engine.render_failure(Some(&self.scene), name, ""),
        };
        scene.set_status(status);
        self.scene = scene;
    }

    pub fn fit(&mut self) {
        self.scene.fit();
    }
}
