use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(version, about = "A markdown notepad with a live HTML preview")]
struct Args {
    /// Log what the renderer and the store are doing
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,

    /// The command to execute
    #[command(subcommand)]
    command: MdpadCommand,
}

#[derive(Parser)]
struct InitArgs {
    /// The path to initialize the notepad in
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Whether to create the directory if it doesn't exist
    #[arg(short, long, default_value = "false")]
    create: bool,
}

#[derive(Parser)]
struct RenderArgs {
    /// The markdown file to render (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Write the HTML here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Wrap the HTML in a complete preview page
    #[arg(short, long, default_value = "false")]
    standalone: bool,

    /// The path to the configuration file
    #[arg(short, long)]
    config_file: Option<PathBuf>,
}

#[derive(Parser)]
struct WatchArgs {
    /// The markdown file to watch
    input: PathBuf,

    /// Where to write the HTML (defaults to the input with an .html extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a complete preview page instead of a fragment
    #[arg(short, long, default_value = "false")]
    standalone: bool,

    /// The path to the configuration file
    #[arg(short, long)]
    config_file: Option<PathBuf>,
}

#[derive(Parser)]
struct FilesArgs {
    /// The path to the configuration file
    #[arg(short, long)]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: FilesCommand,
}

#[derive(Subcommand)]
enum FilesCommand {
    /// List stored documents; the open one is marked with `*`
    List,

    /// Create a document and open it
    New {
        /// Name of the document (generated when omitted or taken)
        name: Option<String>,

        /// Initial markdown content
        #[arg(long)]
        content: Option<String>,
    },

    /// Print a document, rendered to HTML unless --raw is given
    Show {
        /// Name of the document (the open one when omitted)
        name: Option<String>,

        /// Print the markdown instead of HTML
        #[arg(long, default_value = "false")]
        raw: bool,
    },

    /// Make a document the open one
    Open { name: String },

    /// Rename a document
    Rename { old: String, new: String },

    /// Delete a document
    Delete {
        name: String,

        /// Don't ask for confirmation
        #[arg(short, long, default_value = "false")]
        yes: bool,
    },

    /// Add the tutorial document
    Tutorial,

    /// Copy a markdown file into the store
    Import {
        path: PathBuf,

        /// Name of the document (defaults to the file stem)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Write a stored document to a file
    Export {
        name: String,

        /// Destination file (defaults to `<name>.md`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export rendered HTML instead of markdown
        #[arg(long, default_value = "false")]
        html: bool,
    },
}

#[derive(Parser)]
struct ServeArgs {
    /// The address to bind to (overrides serve.bind)
    #[arg(short, long)]
    bind: Option<String>,

    /// The port to bind to (overrides serve.port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Open the preview in the default browser
    #[arg(short, long, default_value = "false")]
    open: bool,

    /// The path to the configuration file
    #[arg(short, long)]
    config_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum MdpadCommand {
    /// Write a default mdpad.yaml
    Init(InitArgs),

    /// Render a markdown file to HTML
    Render(RenderArgs),

    /// Re-render a markdown file whenever it changes
    Watch(WatchArgs),

    /// Manage the stored documents
    Files(FilesArgs),

    /// Edit and preview the stored documents in the browser
    Serve(ServeArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        MdpadCommand::Init(args) => {
            commands::init::run(&args).await?;
        }
        MdpadCommand::Render(args) => {
            commands::render::run(&args).await?;
        }
        MdpadCommand::Watch(args) => {
            commands::watch::run(&args).await?;
        }
        MdpadCommand::Files(args) => {
            commands::files::run(&args).await?;
        }
        MdpadCommand::Serve(args) => {
            commands::serve::run(&args).await?;
        }
    }

    Ok(())
}
