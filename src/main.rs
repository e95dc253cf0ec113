use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use guiforge::commands;
use guiforge::commands::compile::CompileOptions;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "guiforge")]
#[command(about = "Generate Minecraft GUI screen classes from screen documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new screen project
    Init {
        /// Name of the project
        name: String,
    },
    /// Generate Java for a single screen document (printed to stdout)
    Compile {
        /// Path to the screen .json file
        file: String,
        /// Override the mod loader (fabric, forge, neoforge, quilt, lwjgl2)
        #[arg(long)]
        loader: Option<String>,
        /// Override the Minecraft version (e.g. 1.20.4)
        #[arg(long)]
        mc_version: Option<String>,
        /// Override the generated class name
        #[arg(long)]
        class_name: Option<String>,
        /// Package declaration to emit
        #[arg(long)]
        package: Option<String>,
        /// Directory of sibling screens, for resolving OPEN_SCREEN targets
        #[arg(long)]
        screens: Option<String>,
    },
    /// Generate Java for every screen in the project
    Build {
        /// Path to project directory or manifest (defaults to current directory)
        #[arg(default_value = ".")]
        target: String,
        /// Rewrite every output, even if unchanged
        #[arg(long)]
        clean: bool,
    },
    /// Validate screen documents without writing anything
    /// Works with both project directories (guiforge.toml) and single .json files
    Check {
        /// Path to project directory or .json file (defaults to current directory)
        #[arg(default_value = ".")]
        target: String,
    },
    /// Watch for changes and rebuild automatically
    Watch {
        /// Path to project directory or manifest (defaults to current directory)
        #[arg(default_value = ".")]
        target: String,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Init { name } => commands::init::execute(&name),
        Commands::Compile {
            file,
            loader,
            mc_version,
            class_name,
            package,
            screens,
        } => {
            let options = CompileOptions {
                loader,
                mc_version,
                class_name,
                package,
                screens,
            };
            commands::compile::execute(&file, &options)
        }
        Commands::Build { target, clean } => commands::build::execute(&target, clean),
        Commands::Check { target } => commands::check::execute(&target),
        Commands::Watch { target } => commands::watch::execute(&target),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
