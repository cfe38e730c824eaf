// Command-line entry point for sol_callgraph.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sol_callgraph::application::AnalyzeUsecase;
use sol_callgraph::config::{AnalysisConfig, DEFAULT_CONFIG_FILE};
use sol_callgraph::domain::hierarchy::build_class_hierarchy;
use sol_callgraph::domain::Algorithm;
use sol_callgraph::infrastructure::concurrency::init_thread_pool;
use sol_callgraph::infrastructure::{builder_for, AstLoader, OutputFormat};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Compact JSON AST produced by `solc --ast-compact-json`
    input: PathBuf,

    /// Algorithm to run (repeatable). Defaults to both.
    #[arg(short, long, value_parser = parse_algorithm)]
    algorithm: Vec<Algorithm>,

    /// Output format (json, dot, text)
    #[arg(short, long, value_parser = parse_format)]
    format: Option<OutputFormat>,

    /// Output directory. Results go to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Compute edge sets in parallel
    #[arg(long)]
    parallel: bool,

    /// Worker threads for --parallel
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Also emit the class hierarchy
    #[arg(long)]
    hierarchy: bool,
}

fn parse_algorithm(s: &str) -> Result<Algorithm, String> {
    s.parse().map_err(|e: sol_callgraph::AnalysisError| e.to_string())
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse().map_err(|e: sol_callgraph::AnalysisError| e.to_string())
}

impl Cli {
    /// File values first, flags on top.
    fn resolve_config(&self) -> Result<AnalysisConfig> {
        let path = self
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let mut config = AnalysisConfig::load(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?;

        if !self.algorithm.is_empty() {
            config.algorithms = self.algorithm.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.parallel {
            config.parallel = true;
        }
        if self.jobs.is_some() {
            config.jobs = self.jobs;
        }
        if self.hierarchy {
            config.hierarchy = true;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn write_or_print(output: Option<&Path>, file_name: &str, title: &str, content: &str) -> Result<()> {
    match output {
        Some(dir) => {
            let path = dir.join(file_name);
            fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "{} written", title);
        }
        None => println!("{} result:\n{}", title, content),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    init_tracing(&config.log);

    if config.parallel {
        init_thread_pool(config.jobs)?;
    }

    let ast = AstLoader::load_file(&cli.input)?;

    let output = cli.output.as_deref();
    if let Some(dir) = output {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    if config.hierarchy {
        let hierarchy = build_class_hierarchy(&ast);
        let rendered = config.format.hierarchy_exporter().render_hierarchy(&hierarchy);
        let ext = match config.format {
            OutputFormat::Dot => "dot",
            OutputFormat::Json | OutputFormat::Text => "json",
        };
        write_or_print(output, &format!("class-hierarchy.{}", ext), "Class hierarchy", &rendered)?;
    }

    let exporter = config.format.exporter();
    for algorithm in &config.algorithms {
        let builder = builder_for(*algorithm, config.engine_options());
        let usecase = AnalyzeUsecase {
            callgraph_builder: builder.as_ref(),
            exporter: exporter.as_ref(),
        };
        let (_, rendered) = usecase.render(&ast);
        let file_name = format!("{}.{}", algorithm.file_stem(), config.format.extension());
        write_or_print(output, &file_name, &format!("{} analysis", algorithm), &rendered)?;
    }

    Ok(())
}
