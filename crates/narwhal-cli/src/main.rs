use narwhal::{Graph, Layout, Sankey, SankeyConfig};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write as _;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Layout(narwhal::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<narwhal::Error> for CliError {
    fn from(value: narwhal::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Paths,
    Render,
}

/// Flag overrides applied on top of the input's `config` object.
#[derive(Debug, Default)]
struct ConfigOverrides {
    width: Option<f64>,
    height: Option<f64>,
    node_width: Option<f64>,
    node_padding: Option<f64>,
    iterations: Option<usize>,
    curvature: Option<f64>,
    align_sources_right: bool,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut SankeyConfig) {
        if let Some(w) = self.width {
            config.size.width = w;
        }
        if let Some(h) = self.height {
            config.size.height = h;
        }
        if let Some(w) = self.node_width {
            config.node_width = w;
        }
        if let Some(p) = self.node_padding {
            config.node_padding = p;
        }
        if let Some(n) = self.iterations {
            config.iterations = n;
        }
        if let Some(c) = self.curvature {
            config.curvature = c;
        }
        if self.align_sources_right {
            config.align_sources_right = true;
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    out: Option<String>,
    overrides: ConfigOverrides,
}

#[derive(Serialize)]
struct PathOut<'a> {
    edge: usize,
    source: &'a str,
    target: &'a str,
    d: String,
}

fn usage() -> &'static str {
    "narwhal-cli\n\
\n\
USAGE:\n\
  narwhal-cli [layout] [--pretty] [OPTIONS] [<path>|-]\n\
  narwhal-cli paths [--pretty] [OPTIONS] [<path>|-]\n\
  narwhal-cli render [--out <path>] [OPTIONS] [<path>|-]\n\
\n\
OPTIONS:\n\
  --width <w> --height <h>      canvas size\n\
  --node-width <n>              node rectangle width\n\
  --node-padding <n>            vertical gap between nodes of a column\n\
  --iterations <n>              relaxation rounds\n\
  --curvature <c>               link curvature in [0, 1]\n\
  --align-sources-right         move sources next to their nearest target\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a JSON object with `nodes`, `edges` (or `links`) and an optional `config`.\n\
  - Flags override the matching fields of `config`.\n\
  - layout prints the computed layout as JSON; paths prints the SVG path of every edge.\n\
  - render prints an SVG document to stdout by default; use --out to write a file.\n\
"
}

fn parse_value<T: std::str::FromStr>(value: Option<&String>) -> Result<T, CliError> {
    let Some(value) = value else {
        return Err(CliError::Usage(usage()));
    };
    value.parse::<T>().map_err(|_| CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "paths" => args.command = Command::Paths,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--width" => args.overrides.width = Some(parse_value(it.next())?),
            "--height" => args.overrides.height = Some(parse_value(it.next())?),
            "--node-width" => args.overrides.node_width = Some(parse_value(it.next())?),
            "--node-padding" => args.overrides.node_padding = Some(parse_value(it.next())?),
            "--iterations" => args.overrides.iterations = Some(parse_value(it.next())?),
            "--curvature" => args.overrides.curvature = Some(parse_value(it.next())?),
            "--align-sources-right" => args.overrides.align_sources_right = true,
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
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

/// Splits the input document into the graph and its (optional) embedded config.
fn parse_input(text: &str) -> Result<(Graph, SankeyConfig), CliError> {
    let value: Value = serde_json::from_str(text)?;
    let config = match value.get("config") {
        Some(config) if !config.is_null() => serde_json::from_value(config.clone())?,
        _ => SankeyConfig::default(),
    };
    let graph: Graph = serde_json::from_value(value)?;
    Ok((graph, config))
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn escape_xml_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

const PALETTE: [&str; 8] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#9c755f",
];

fn render_svg(layout: &Layout) -> String {
    let size = layout.config.size;
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = size.width,
        h = size.height
    );

    svg.push_str(r#"<g class="links" fill="none" stroke-opacity="0.4">"#);
    svg.push('\n');
    for (id, path) in layout.edge_paths() {
        let edge = layout.edge(id);
        let color = PALETTE[edge.source.0 % PALETTE.len()];
        let _ = writeln!(
            svg,
            r#"<path d="{d}" stroke="{color}" stroke-width="{t}"/>"#,
            d = path,
            t = edge.thickness.max(1.0)
        );
    }
    svg.push_str("</g>\n");

    svg.push_str(r#"<g class="nodes">"#);
    svg.push('\n');
    for (i, node) in layout.nodes.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let _ = writeln!(
            svg,
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" fill="{color}"><title>{title}</title></rect>"#,
            x = node.column,
            y = node.depth,
            w = node.column_width,
            h = node.height,
            title = escape_xml_text(node.label.as_deref().unwrap_or(&node.id)),
        );
    }
    svg.push_str("</g>\n</svg>\n");
    svg
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let (graph, mut config) = parse_input(&text)?;
    args.overrides.apply(&mut config);
    let layout = Sankey::new(config).layout(&graph)?;

    match args.command {
        Command::Layout => write_json(&layout, args.pretty),
        Command::Paths => {
            let paths: Vec<PathOut<'_>> = layout
                .edge_paths()
                .map(|(id, path)| {
                    let edge = layout.edge(id);
                    PathOut {
                        edge: id.0,
                        source: &layout.node(edge.source).id,
                        target: &layout.node(edge.target).id,
                        d: path.to_svg_path_data(),
                    }
                })
                .collect();
            write_json(&paths, args.pretty)
        }
        Command::Render => write_text(&render_svg(&layout), args.out.as_deref()),
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
