use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gitgen_core::{parse_commands_from_reader, CommandEmitter, GeneratorConfig, GraphGenerator};
use graph::Dag;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "gitgen")]
#[command(about = "Generates command streams describing synthetic Git commit graphs", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbose logging (written to stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a tree of commits and print it as JSON commands
    Generate {
        /// Number of generations from the root to the leaves, inclusive
        depth: u32,
        /// Number of children of every non-leaf commit
        children: u32,
        /// TOML file with generator settings
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write to a file instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Emit JSON on a single line
        #[arg(long)]
        compact: bool,
        /// Refuse graphs with more commits than this
        #[arg(long)]
        max_commits: Option<u64>,
    },
    /// Check a command stream and summarize the graph it describes
    Inspect {
        /// Read from a file instead of standard input
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Commits to test for a common fast-forward target
        #[arg(long, value_delimiter = ',')]
        fastforward: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the command stream, so logs go to stderr
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Generate { depth, children, config, output, compact, max_commits } => {
            let mut settings = match config {
                Some(path) => GeneratorConfig::load(&path)
                    .with_context(|| format!("failed to load config from {}", path.display()))?,
                None => GeneratorConfig::default(),
            };
            if compact {
                settings.pretty = false;
            }
            if let Some(max) = max_commits {
                settings.max_commits = max;
            }

            let emitter = CommandEmitter::new(settings.pretty);
            let generator = GraphGenerator::new(settings);
            let commands = generator.generate(depth, children)?;

            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    emitter.write_to(BufWriter::new(file), &commands)?;
                    info!(commands = commands.len(), path = %path.display(), "wrote command log");
                }
                None => {
                    emitter.write_to(io::stdout().lock(), &commands)?;
                    info!(commands = commands.len(), "wrote command log");
                }
            }
        }
        Commands::Inspect { input, fastforward } => {
            let commands = match input {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("failed to open {}", path.display()))?;
                    parse_commands_from_reader(BufReader::new(file))?
                }
                None => parse_commands_from_reader(io::stdin().lock())?,
            };

            let dag = Dag::from_commands(&commands).context("command stream is not replayable")?;
            let stats = dag.stats();

            println!("Commands:       {}", commands.len());
            println!("Commits:        {}", stats.total_commits);
            println!("Edges:          {}", stats.total_edges);
            println!("Roots:          {}", stats.root_commits);
            println!("Leaves:         {}", stats.leaf_commits);
            println!("Merges:         {} ({} merge edges)", stats.merge_commits, stats.merge_edges);
            println!("Tagged commits: {}", stats.tagged_commits);
            println!("Max depth:      {}", stats.max_depth);
            if stats.has_orphans {
                println!("Warning: more than one root commit");
            }

            if !fastforward.is_empty() {
                let ids: Vec<&str> = fastforward.iter().map(String::as_str).collect();
                match dag.fastforward_target(&ids) {
                    Some(target) => println!("Fast-forward:   {}", target),
                    None => println!("Fast-forward:   not possible"),
                }
            }
        }
    }

    Ok(())
}
