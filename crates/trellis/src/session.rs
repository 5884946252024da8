use crate::config::ViewerConfig;
use crate::event::{HostMessage, ViewerEvent};
use std::sync::mpsc::Receiver;
use trellis_core::{GraphBuilder, GraphModel, ParseOptions};
use trellis_render::{RenderEngine, RenderOptions, Scene, SvgRenderOptions, render_scene_svg};

/// How exports are encoded.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub svg: SvgRenderOptions,
    #[cfg(feature = "raster")]
    pub raster: crate::raster::RasterOptions,
}

/// One viewer: the current document's model, its scene, and the event loop that drives them.
///
/// The session owns its scene for its whole life. Document updates rebuild the model and
/// repopulate the scene; a document that fails to parse leaves the last good scene on screen
/// and only changes the status line.
#[derive(Debug)]
pub struct Session {
    pub(crate) builder: GraphBuilder,
    pub(crate) engine: RenderEngine,
    pub(crate) export: ExportOptions,
    pub(crate) model: Option<GraphModel>,
    pub(crate) scene: Scene,
}

impl Session {
    /// Initial load. A malformed document still yields a session: an empty scene with the parse
    /// error in the status.
    pub fn open(text: &str, config: &ViewerConfig) -> Self {
        let export = ExportOptions {
            svg: config.svg_options(),
            #[cfg(feature = "raster")]
            raster: config.raster_options(),
        };
        Self::with_options(
            text,
            &config.layout,
            config.parse_options(),
            config.render_options(),
            export,
        )
    }

    pub fn with_options(
        text: &str,
        layout_name: &str,
        parse: ParseOptions,
        render: RenderOptions,
        export: ExportOptions,
    ) -> Self {
        let builder = GraphBuilder::new().with_options(parse);
        let engine = RenderEngine::new(render);
        let (model, scene) = match builder.build(text) {
            Ok(model) => {
                let scene = engine.render(None, &model, layout_name);
                (Some(model), scene)
            }
            Err(err) => {
                tracing::warn!(error = %err, "initial document rejected");
                let scene = engine.render_failure(None, layout_name, err.to_string());
                (None, scene)
            }
        };
        Self {
            builder,
            engine,
            export,
            model,
            scene,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Model behind the current scene. `None` until a document has parsed successfully.
    pub fn model(&self) -> Option<&GraphModel> {
        self.model.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.scene.status()
    }

    pub fn engine(&self) -> &RenderEngine {
        &self.engine
    }

    /// Rebuilds from `text` and re-renders in place.
    ///
    /// On a parse failure the previous scene and model stay untouched; the error becomes the
    /// status and is also returned.
    pub fn on_document_updated(&mut self, text: &str) -> crate::Result<()> {
        match self.builder.build(text) {
            Ok(model) => {
                let layout_name = self.scene.layout_name().to_string();
                self.scene = self.engine.render(Some(&self.scene), &model, &layout_name);
                self.model = Some(model);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "document update rejected; keeping previous scene");
                self.scene.set_status(Some(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Standalone SVG of the full scene.
    pub fn scene_svg(&self) -> String {
        render_scene_svg(&self.scene, &self.engine.options().style, &self.export.svg)
    }

    /// Applies one event and returns what the host should hear about it.
    pub fn dispatch(&mut self, event: ViewerEvent) -> Vec<HostMessage> {
        let status_before = self.status().map(str::to_owned);
        let mut out = Vec::new();

        match event {
            ViewerEvent::DocumentUpdated { text } => {
                // Failure is already reflected in the status.
                let _ = self.on_document_updated(&text);
            }
            ViewerEvent::NodeActivated { id } => out.push(self.on_node_activated(&id)),
            ViewerEvent::SearchChanged { text } => {
                self.select_by_id(text.trim());
            }
            ViewerEvent::LayoutChanged { name } => self.set_layout(&name),
            ViewerEvent::ExportRequested => match self.export_image() {
                Ok(Some(image)) => out.push(HostMessage::Export {
                    file_name: image.file_name.clone(),
                    data_uri: image.data_uri(),
                }),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "export failed");
                    self.scene.set_status(Some(format!("Export failed: {err}")));
                }
            },
            ViewerEvent::FitRequested => self.fit(),
            ViewerEvent::CanvasClicked { x, y } => out.extend(self.activate_at(x, y)),
        }

        let status_after = self.status().map(str::to_owned);
        if status_after != status_before {
            out.push(HostMessage::Status {
                message: status_after,
            });
        }
        out
    }

    /// Applies events in arrival order until every sender is gone.
    pub fn run<F>(&mut self, events: &Receiver<ViewerEvent>, mut emit: F)
    where
        F: FnMut(HostMessage),
    {
        for event in events.iter() {
            for message in self.dispatch(event) {
                emit(message);
            }
        }
    }
}
