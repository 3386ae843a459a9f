//! CLI definitions and entry point

use clap::{Parser, Subcommand};

use super::commands::{self, Context};
use docverify::core::models::Role;
use docverify::output::OutputMode;

/// docverify - Multi-phase verification of academic documents
#[derive(Parser, Debug)]
#[command(
    name = "docverify",
    version,
    about = "Multi-phase verification of academic documents",
    long_about = "Track document verification requests through four review phases.\n\n\
                  Regulators process phases 1, 2 and 4; the target institution\n\
                  verifies phase 3 once the request has been forwarded."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Act as this role: regulator_admin, institution_user, platform_admin
    #[arg(long, global = true)]
    pub role: Option<Role>,

    /// Institution the caller belongs to (institution users)
    #[arg(long, global = true)]
    pub institution: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory with a default config and an empty store
    Init {
        /// Overwrite existing config and store
        #[arg(short, long)]
        force: bool,
    },

    /// Register or list institutions
    Institution {
        #[command(subcommand)]
        action: InstitutionAction,
    },

    /// Submit, list or show verification requests
    Request {
        #[command(subcommand)]
        action: RequestAction,
    },

    /// Process the current phase of a request
    Process {
        /// Request ID
        id: String,

        /// Phase to process (must be the current phase)
        #[arg(short, long)]
        phase: u8,

        /// Use this score instead of the configured scorer
        #[arg(short, long)]
        score: Option<u8>,
    },

    /// Reject a request
    Reject {
        /// Request ID
        id: String,

        /// Why the request is rejected
        #[arg(short, long)]
        reason: String,
    },

    /// Add a fraud flag to a request
    Flag {
        /// Request ID
        id: String,

        /// Flag identifier
        flag: String,
    },

    /// Attach a document to a request
    Document {
        /// Request ID
        id: String,

        /// File name (pdf, jpg, jpeg or png)
        file_name: String,

        /// Document type: academic_certificate, transcript, diploma, degree, identity_document, other
        #[arg(short = 't', long = "type")]
        document_type: String,

        /// Size in bytes
        #[arg(short, long)]
        size: u64,
    },

    /// Show request counts
    Status,

    /// Serve the JSON API over HTTP
    #[cfg(feature = "server")]
    Serve {
        /// Interface to bind (defaults to config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (defaults to config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum InstitutionAction {
    /// Register an institution (platform_admin)
    Add {
        /// Short identifier, e.g. uni-ghana
        id: String,

        /// Display name
        name: String,

        /// Kind: university, college, polytechnic, organization, regulator
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// List institutions
    List,
}

#[derive(Subcommand, Debug)]
pub enum RequestAction {
    /// Submit a verification request
    Create {
        /// Institution asked to verify
        #[arg(long = "to")]
        target: String,

        /// Submitting institution (admins only)
        #[arg(long = "from")]
        requesting: Option<String>,

        /// Student full name
        #[arg(long)]
        student_name: String,

        /// Student identifier
        #[arg(long)]
        student_id: String,

        /// Program of study
        #[arg(long)]
        program: String,

        /// Graduation date (YYYY-MM-DD)
        #[arg(long)]
        graduated: String,

        /// academic_certificate, transcript, diploma or degree
        #[arg(short = 't', long = "type")]
        verification_type: String,

        /// low, normal, high or urgent
        #[arg(long)]
        priority: Option<String>,

        /// Stated purpose
        #[arg(long)]
        purpose: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// List requests visible to the caller
    List {
        /// Filter by status
        #[arg(short, long)]
        status: Option<String>,

        /// Filter by requesting institution
        #[arg(long = "from")]
        requesting: Option<String>,

        /// Filter by target institution
        #[arg(long = "to")]
        target: Option<String>,
    },

    /// Show a request with its documents and history
    Show {
        /// Request ID
        id: String,
    },
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    let ctx = Context::new(output_mode, cli.role, cli.institution);

    match cli.command {
        Some(Command::Init { force }) => commands::init(force, &ctx),
        Some(Command::Institution { action }) => commands::institution(action, &ctx),
        Some(Command::Request { action }) => commands::request(action, &ctx),
        Some(Command::Process { id, phase, score }) => commands::process(&id, phase, score, &ctx),
        Some(Command::Reject { id, reason }) => commands::reject(&id, &reason, &ctx),
        Some(Command::Flag { id, flag }) => commands::flag(&id, &flag, &ctx),
        Some(Command::Document {
            id,
            file_name,
            document_type,
            size,
        }) => commands::document(&id, file_name, document_type, size, &ctx),
        Some(Command::Status) => commands::status(&ctx),
        #[cfg(feature = "server")]
        Some(Command::Serve { host, port }) => commands::serve(host, port),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("docverify v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("docverify v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'docverify --help' for usage");
                println!("Run 'docverify init' to get started");
            }
            Ok(())
        },
    }
}
