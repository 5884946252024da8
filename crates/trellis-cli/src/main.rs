use base64::Engine as _;
use notify::{RecursiveMode, Watcher};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::mpsc;
use trellis::raster;
use trellis::{GraphBuilder, HostMessage, Session, ViewerConfig, ViewerEvent};
use tracing_subscriber::prelude::*;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Document(String),
    Trellis(trellis::Error),
    Json(serde_json::Error),
    Watch(notify::Error),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Document(msg) => write!(f, "{msg}"),
            CliError::Trellis(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Watch(err) => write!(f, "watch error: {err}"),
            CliError::NotFound(id) => write!(f, "node id `{id}` not found in the document"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<trellis::Error> for CliError {
    fn from(value: trellis::Error) -> Self {
        match value {
            trellis::Error::Document(err) => Self::Document(err.to_string()),
            other => Self::Trellis(other),
        }
    }
}

impl From<trellis::raster::RasterError> for CliError {
    fn from(value: trellis::raster::RasterError) -> Self {
        Self::Trellis(value.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<notify::Error> for CliError {
    fn from(value: notify::Error) -> Self {
        Self::Watch(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Parse,
    Render,
    Reveal,
    Watch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
}

impl RenderFormat {
    fn extension(self) -> &'static str {
        match self {
            RenderFormat::Svg => "svg",
            RenderFormat::Png => "png",
            RenderFormat::Jpeg => "jpg",
        }
    }
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    node_id: Option<String>,
    pretty: bool,
    config: Option<String>,
    layout: Option<String>,
    render_format: RenderFormat,
    render_scale: Option<f32>,
    background: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "trellis\n\
\n\
USAGE:\n\
  trellis [parse] [--pretty] [--config <file.json>] [<path>|-]\n\
  trellis render [--format svg|png|jpg] [--layout <name>] [--scale <n>] [--background <color>] [--config <file.json>] [--out <path>] [<path>|-]\n\
  trellis reveal <node-id> [<path>|-]\n\
  trellis watch [--layout <name>] [--scale <n>] [--background <color>] [--config <file.json>] [--out <path>] <path>\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin (except for watch).\n\
  - Layouts: force-directed (force, cose), grid, concentric, layered (breadthfirst).\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG/JPG output defaults to writing next to the input file (or ./out.png, ./out.jpg for stdin).\n\
  - reveal prints the 1-based line:column of the first literal id=\"<node-id>\".\n\
  - watch re-renders a PNG (default: next to the input) every time the file changes.\n\
  - Set TRELLIS_LOG (e.g. TRELLIS_LOG=debug) to control log output on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    let mut positional = Vec::new();
    let mut command_seen = false;
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            cmd @ ("parse" | "render" | "reveal" | "watch")
                if !command_seen && positional.is_empty() =>
            {
                command_seen = true;
                args.command = match cmd {
                    "render" => Command::Render,
                    "reveal" => Command::Reveal,
                    "watch" => Command::Watch,
                    _ => Command::Parse,
                };
            }
            "--pretty" => args.pretty = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--layout" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.layout = Some(name.clone());
            }
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(scale.is_finite() && scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.render_scale = Some(scale);
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => positional.extend(it.by_ref().cloned()),
            "-" => positional.push(a.clone()),
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            _ => positional.push(a.clone()),
        }
    }

    let mut positional = positional.into_iter();
    if args.command == Command::Reveal {
        args.node_id = Some(positional.next().ok_or(CliError::Usage(usage()))?);
    }
    args.input = positional.next();
    if positional.next().is_some() {
        return Err(CliError::Usage(usage()));
    }
    if args.command == Command::Watch && matches!(args.input.as_deref(), None | Some("-")) {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn load_config(args: &Args) -> Result<ViewerConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => ViewerConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => ViewerConfig::default(),
    };
    if let Some(layout) = &args.layout {
        config.layout = layout.clone();
    }
    if let Some(scale) = args.render_scale {
        config.raster.scale = scale;
    }
    if args.background.is_some() {
        config.raster.background = args.background.clone();
    }
    Ok(config)
}

fn default_out_path(input: Option<&str>, ext: &str) -> PathBuf {
    match input {
        Some(path) if path != "-" => PathBuf::from(path).with_extension(ext),
        _ => PathBuf::from(format!("out.{ext}")),
    }
}

fn write_bytes(bytes: &[u8], out: &str) -> Result<(), CliError> {
    if out == "-" {
        use std::io::Write;
        std::io::stdout().lock().write_all(bytes)?;
    } else {
        std::fs::write(out, bytes)?;
    }
    Ok(())
}

fn open_session(text: &str, config: &ViewerConfig) -> Result<Session, CliError> {
    let session = Session::open(text, config);
    if session.model().is_none() {
        let msg = session.status().unwrap_or("document could not be parsed");
        return Err(CliError::Document(msg.to_string()));
    }
    Ok(session)
}

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(&args)?;
    match args.command {
        Command::Parse => {
            let text = read_input(args.input.as_deref())?;
            let model = GraphBuilder::new()
                .with_options(config.parse_options())
                .build(&text)
                .map_err(trellis::Error::from)?;
            let stdout = std::io::stdout().lock();
            if args.pretty {
                serde_json::to_writer_pretty(stdout, &model)?;
            } else {
                serde_json::to_writer(stdout, &model)?;
            }
            Ok(())
        }
        Command::Render => {
            let text = read_input(args.input.as_deref())?;
            let session = open_session(&text, &config)?;
            tracing::info!(summary = %session.scene().summary(), "rendered");

            let svg = session.scene_svg();
            let bytes = match args.render_format {
                RenderFormat::Svg => {
                    return match args.out.as_deref() {
                        None => {
                            print!("{svg}");
                            Ok(())
                        }
                        Some(path) => write_bytes(svg.as_bytes(), path),
                    };
                }
                RenderFormat::Png => raster::svg_to_png(&svg, &config.raster_options())?,
                RenderFormat::Jpeg => raster::svg_to_jpeg(&svg, &config.raster_options())?,
            };
            let out = args.out.clone().unwrap_or_else(|| {
                default_out_path(args.input.as_deref(), args.render_format.extension())
                    .to_string_lossy()
                    .to_string()
            });
            write_bytes(&bytes, &out)
        }
        Command::Reveal => {
            let text = read_input(args.input.as_deref())?;
            let id = args.node_id.unwrap_or_default();
            match trellis::reveal::locate_node_id(&text, &id) {
                Some(pos) => {
                    println!("{}:{}", pos.line + 1, pos.column + 1);
                    Ok(())
                }
                None => Err(CliError::NotFound(id)),
            }
        }
        Command::Watch => {
            let input = args.input.clone().unwrap_or_default();
            let out = args
                .out
                .clone()
                .map(PathBuf::from)
                .unwrap_or_else(|| default_out_path(Some(&input), "png"));
            watch(Path::new(&input), &out, &config)
        }
    }
}

/// Keeps a session open on `input`, feeding every change of the file through the event loop
/// and rewriting `out` after each export.
fn watch(input: &Path, out: &Path, config: &ViewerConfig) -> Result<(), CliError> {
    let text = std::fs::read_to_string(input)?;
    let mut session = Session::open(&text, config);
    match session.status() {
        Some(msg) => eprintln!("error: {msg}"),
        None => eprintln!("{}", session.scene().summary()),
    }

    let (tx, rx) = mpsc::channel::<ViewerEvent>();
    let _ = tx.send(ViewerEvent::ExportRequested);

    let file_name = input.file_name().map(|n| n.to_os_string());
    let watched = input.to_path_buf();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        let event = match res {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(error = %err, "watch error");
                return;
            }
        };
        if !(event.kind.is_modify() || event.kind.is_create()) {
            return;
        }
        if !event
            .paths
            .iter()
            .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name)
        {
            return;
        }
        // Editors may save through a temp file; a missing file is picked up by the next event.
        let Ok(text) = std::fs::read_to_string(&watched) else {
            return;
        };
        let _ = tx.send(ViewerEvent::DocumentUpdated { text });
    })?;
    // Watch the directory: atomic saves replace the file's inode.
    let dir = input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    eprintln!("watching {} -> {}", input.display(), out.display());

    let mut failure = None;
    drive(&mut session, &rx, |message| match message {
        HostMessage::Export { data_uri, .. } => {
            if let Err(err) = write_data_uri(&data_uri, out) {
                eprintln!("{err}");
                failure = Some(err);
            }
        }
        HostMessage::Status { message } => match message {
            Some(msg) => eprintln!("error: {msg}"),
            None => eprintln!("ok"),
        },
        HostMessage::Activate { .. } => {}
    });
    drop(watcher);
    failure.map_or(Ok(()), Err)
}

/// Applies events in arrival order. Every accepted document update is followed by an export;
/// a rejected one only changes the status.
fn drive<F>(session: &mut Session, events: &mpsc::Receiver<ViewerEvent>, mut emit: F)
where
    F: FnMut(HostMessage),
{
    for event in events.iter() {
        let update = matches!(event, ViewerEvent::DocumentUpdated { .. });
        session.dispatch(event).into_iter().for_each(&mut emit);
        if update && session.status().is_none() {
            session
                .dispatch(ViewerEvent::ExportRequested)
                .into_iter()
                .for_each(&mut emit);
        }
    }
}

fn write_data_uri(data_uri: &str, out: &Path) -> Result<(), CliError> {
    let payload = data_uri
        .split_once(";base64,")
        .map(|(_, data)| data)
        .unwrap_or_default();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|err| CliError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))?;
    std::fs::write(out, bytes)?;
    Ok(())
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("TRELLIS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    init_logging();

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::Document(_)) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err @ CliError::NotFound(_)) => {
            eprintln!("{err}");
            std::process::exit(4);
        }
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_NODES: &str = r#"<graphml><graph edgedefault="directed">
  <node id="n0"/><node id="n1"/><edge source="n0" target="n1"/>
</graph></graphml>"#;

    #[test]
    fn watch_loop_exports_only_after_accepted_updates() {
        let mut session = Session::open(TWO_NODES, &ViewerConfig::default());
        let (tx, rx) = mpsc::channel();
        tx.send(ViewerEvent::DocumentUpdated {
            text: TWO_NODES.replace("n1", "n2"),
        })
        .unwrap();
        tx.send(ViewerEvent::DocumentUpdated {
            text: "<graphml><graph>".to_string(),
        })
        .unwrap();
        drop(tx);

        let mut messages = Vec::new();
        drive(&mut session, &rx, |m| messages.push(m));

        assert_eq!(messages.len(), 2);
        assert!(matches!(&messages[0], HostMessage::Export { data_uri, .. }
            if data_uri.starts_with("data:image/png;base64,")));
        assert!(matches!(&messages[1], HostMessage::Status { message: Some(_) }));
        assert_eq!(session.scene().node_index("n2"), Some(1));
    }
}
