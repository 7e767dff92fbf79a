use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use zukei::analysis::statistics;
use zukei::prelude::*;

/// Clap-facing mirrors of the library enums.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum DialectCli {
    Plantuml,
    Mermaid,
}

impl From<DialectCli> for Dialect {
    fn from(value: DialectCli) -> Self {
        match value {
            DialectCli::Plantuml => Dialect::PlantUml,
            DialectCli::Mermaid => Dialect::Mermaid,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatCli {
    Image,
    Code,
    Both,
}

impl From<FormatCli> for OutputFormat {
    fn from(value: FormatCli) -> Self {
        match value {
            FormatCli::Image => OutputFormat::Image,
            FormatCli::Code => OutputFormat::Code,
            FormatCli::Both => OutputFormat::Both,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutCli {
    Vertical,
    Horizontal,
    Auto,
}

impl From<LayoutCli> for LayoutDirection {
    fn from(value: LayoutCli) -> Self {
        match value {
            LayoutCli::Vertical => LayoutDirection::Vertical,
            LayoutCli::Horizontal => LayoutDirection::Horizontal,
            LayoutCli::Auto => LayoutDirection::Auto,
        }
    }
}

/// Flowchart translation between detected diagram elements, text and markup
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a settings JSON file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log per-node decisions (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build, interpret and describe a graph from detector output
    Analyze {
        /// Detection JSON file; a built-in sample diagram is used when omitted
        detections: Option<String>,

        /// Also print markup in this dialect
        #[arg(short, long, value_enum)]
        dialect: Option<DialectCli>,

        /// Print the graph in its neutral JSON form
        #[arg(long)]
        json: bool,
    },
    /// Parse a process description into a diagram
    Generate {
        /// The description text
        text: Option<String>,

        /// Read the description from a file instead
        #[arg(short, long)]
        file: Option<String>,

        #[arg(long, value_enum)]
        format: Option<FormatCli>,

        #[arg(short, long, value_enum)]
        dialect: Option<DialectCli>,

        #[arg(short, long, value_enum)]
        layout: Option<LayoutCli>,

        /// Where to write the Graphviz source when an image is requested
        #[arg(long, default_value = "diagram.dot")]
        image_out: String,

        /// Print the graph in its neutral JSON form
        #[arg(long)]
        json: bool,
    },
    /// Report advisory violations and statistics for a graph JSON file
    Validate {
        /// Graph in neutral JSON form
        graph: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load settings: {}", e))),
        None => Settings::default(),
    };

    match cli.command {
        Command::Analyze {
            detections,
            dialect,
            json,
        } => run_analyze(settings, detections, dialect.map(Dialect::from), json),
        Command::Generate {
            text,
            file,
            format,
            dialect,
            layout,
            image_out,
            json,
        } => {
            let description = match (text, file) {
                (Some(text), None) => text,
                (None, Some(path)) => fs::read_to_string(&path).unwrap_or_else(|e| {
                    exit_with_error(&format!("Failed to read description file '{}': {}", path, e))
                }),
                (Some(_), Some(_)) => exit_with_error("Pass either TEXT or --file, not both."),
                (None, None) => exit_with_error("A description is required: pass TEXT or --file."),
            };
            let pipeline = build_pipeline(settings);
            let mut request = pipeline.request(description);
            if let Some(format) = format {
                request = request.with_output_format(format.into());
            }
            if let Some(dialect) = dialect {
                request = request.with_dialect(dialect.into());
            }
            if let Some(layout) = layout {
                request = request.with_layout(layout.into());
            }
            run_generate(&pipeline, &request, &image_out, json);
        }
        Command::Validate { graph } => run_validate(&graph),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_pipeline(settings: Settings) -> Pipeline {
    Pipeline::builder(settings)
        .with_renderer(DotRenderer)
        .build()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to set up pipeline: {}", e)))
}

fn run_analyze(settings: Settings, detections: Option<String>, dialect: Option<Dialect>, json: bool) {
    let total_start = Instant::now();

    let data = match detections {
        Some(path) => DetectionData::from_file(&path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load detections from '{}': {}", path, e))
        }),
        None => {
            println!("No detection file provided. Using the built-in sample diagram.");
            DetectionData::sample()
        }
    };

    let pipeline = build_pipeline(settings);
    let report = pipeline
        .analyze_data(&data)
        .unwrap_or_else(|e| exit_with_failure(&e));

    println!("\n--- Analysis ---");
    println!("Detected elements: {}", report.detected_elements.len());
    println!(
        "Graph:             {} nodes, {} edges",
        report.graph.node_count(),
        report.graph.edge_count()
    );
    println!("Flow type:         {}", report.flow_type);
    println!("Complexity:        {}", report.complexity);
    println!("\n{}", report.description);

    if !report.violations.is_empty() {
        println!("\n--- Warnings ---");
        for violation in &report.violations {
            println!("  - {}", violation);
        }
    }

    if let Some(dialect) = dialect {
        println!("\n--- {} ---", dialect);
        println!("{}", CodeGenerator::new().generate(&report.graph, dialect));
    }
    if json {
        print_json(&report.graph);
    }

    println!("\nTotal Execution: {:?}", total_start.elapsed());
}

fn run_generate(pipeline: &Pipeline, request: &GenerateRequest, image_out: &str, json: bool) {
    let total_start = Instant::now();

    let report = pipeline
        .generate(request)
        .unwrap_or_else(|e| exit_with_failure(&e));

    println!("\n--- Description ---");
    println!("{}", report.description);

    if let Some(code) = &report.diagram_code {
        println!("\n--- {} ---", request.dialect);
        println!("{}", code);
    }
    if let Some(image) = &report.diagram_image {
        fs::write(image_out, image).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to write '{}': {}", image_out, e))
        });
        println!("\nGraphviz source written to '{}' ({} bytes)", image_out, image.len());
    }
    if json {
        print_json(&report.graph);
    }

    println!("\nTotal Execution: {:?}", total_start.elapsed());
}

fn run_validate(path: &str) {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read graph file '{}': {}", path, e)));
    let graph: Graph = serde_json::from_str(&content)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse graph JSON: {}", e)));

    let stats = statistics(&graph);
    println!("--- Statistics ---");
    println!("Nodes:      {}", stats.num_nodes);
    println!("Edges:      {}", stats.num_edges);
    println!("Acyclic:    {}", stats.is_dag);
    println!("Connected:  {}", stats.is_connected);
    println!("Cycles:     {}", stats.num_cycles);
    println!("Density:    {:.3}", stats.density);

    let violations = validate(&graph);
    if violations.is_empty() {
        println!("\nGraph is valid.");
        return;
    }
    println!("\n--- Violations ---");
    for violation in &violations {
        println!("  - {}", violation);
    }
    std::process::exit(2);
}

fn print_json(graph: &Graph) {
    let json = graph
        .to_neutral()
        .to_json_pretty()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize graph: {}", e)));
    println!("\n--- Graph ---");
    println!("{}", json);
}

fn exit_with_failure(error: &PipelineError) -> ! {
    eprintln!("\nError: {}", error);
    for (key, value) in error.details() {
        eprintln!("  {}: {}", key, value);
    }
    std::process::exit(1);
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
