mod commands;
mod config;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use aula_core::tracing_setup::init_tracing;

#[derive(Parser)]
#[command(name = "aula")]
#[command(about = "Terminal client for the aula school platform")]
struct Cli {
    /// Server base URL; overrides the saved one for this invocation
    #[arg(long)]
    domain: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ListArgs {
    /// Fuzzy title search
    #[arg(long)]
    search: Option<String>,

    /// Only records on this calendar day (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Keep paging until the whole filtered list is shown
    #[arg(long)]
    all: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Save the server base URL
    Domain { url: String },

    /// Sign in and list the schools available to the account
    Login {
        id: String,
        #[arg(long)]
        password: String,
    },

    /// Choose the active school for the saved token
    School { id: String },

    /// Sign out and forget the saved session
    Logout,

    /// Show the signed-in account
    Whoami,

    /// List messages
    Messages {
        #[command(flatten)]
        filters: ListArgs,
    },

    /// List activities
    Activities {
        #[command(flatten)]
        filters: ListArgs,

        /// Only activities due on this calendar day (YYYY-MM-DD)
        #[arg(long)]
        expires: Option<NaiveDate>,
    },

    /// List reports
    Reports {
        #[command(flatten)]
        filters: ListArgs,
    },

    /// List the people directory
    People {
        /// Fuzzy name search
        #[arg(long)]
        search: Option<String>,
    },

    /// Show the grade sheet
    Grades {
        /// Another student's sheet (administrators only)
        #[arg(long)]
        student: Option<String>,
    },

    /// Send a message
    SendMessage {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Recipient ids (repeatable)
        #[arg(long = "to", required = true)]
        receivers: Vec<String>,
    },

    /// Delete a message
    DeleteMessage { id: String },

    /// Change the account name and/or password
    EditProfile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        current_password: String,
    },

    /// Stream live events until interrupted
    Follow,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    // Saving the domain and clearing the session work without a resolved config.
    match &cli.command {
        Commands::Domain { url } => return commands::save_domain(url),
        Commands::Logout => return commands::logout(),
        Commands::School { id } => return commands::choose_school(id),
        _ => {}
    }

    let config = commands::resolve_config(cli.domain)?;

    match cli.command {
        Commands::Domain { .. } | Commands::Logout | Commands::School { .. } => unreachable!(),
        Commands::Login { id, password } => commands::login(&config, &id, &password),
        Commands::Whoami => commands::whoami(&config),
        Commands::Messages { filters } => commands::list_messages(&config, &filters),
        Commands::Activities { filters, expires } => {
            commands::list_activities(&config, &filters, expires)
        }
        Commands::Reports { filters } => commands::list_reports(&config, &filters),
        Commands::People { search } => commands::list_people(&config, search.as_deref()),
        Commands::Grades { student } => commands::show_grades(&config, student.as_deref()),
        Commands::SendMessage {
            title,
            content,
            receivers,
        } => commands::send_message(&config, title, content, receivers),
        Commands::DeleteMessage { id } => commands::delete_message(&config, &id),
        Commands::EditProfile {
            name,
            password,
            current_password,
        } => commands::edit_profile(&config, name, password, current_password),
        Commands::Follow => commands::follow(&config),
    }
}
