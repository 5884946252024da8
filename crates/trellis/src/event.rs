use serde::{Deserialize, Serialize};

/// Inbound user and host events, applied by a [`crate::Session`] in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ViewerEvent {
    /// The source document was replaced with `text`.
    DocumentUpdated { text: String },
    NodeActivated { id: String },
    SearchChanged { text: String },
    LayoutChanged { name: String },
    ExportRequested,
    FitRequested,
    /// Click on the rendering surface, in screen coordinates.
    CanvasClicked { x: f64, y: f64 },
}

/// Outbound messages from a session to its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostMessage {
    /// A node was activated; the host resolves `id` to a source location.
    Activate { id: String },
    #[serde(rename_all = "camelCase")]
    Export { file_name: String, data_uri: String },
    /// The status line changed. `None` hides it.
    Status { message: Option<String> },
}
