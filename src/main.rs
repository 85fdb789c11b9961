//! Alumni Registry
//!
//! Command line entry point

use std::path::PathBuf;
use std::sync::Arc;
use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use alumni_registry::{
    config::Settings,
    handlers::{AlumniPanel, EventsPanel, LoginCard, StatusWidget},
    models::{parse_date, AlumnusForm, EventDraft, GraduatePath, RsvpStatus},
    services::TerminalClipboard,
    shell::{App, AppContext},
    utils::logging,
    Language, RegistryError,
};

#[derive(Parser)]
#[command(name = "alumni-registry")]
#[command(version)]
#[command(about = "Alumni and events registry with shareable invitations")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a path or link: `/` or `/invite/{token}`
    Open {
        #[arg(value_name = "PATH", default_value = "/")]
        path: String,
    },

    /// Show the admin dashboard
    Dashboard,

    /// Open an invitation
    Invite {
        #[arg(value_name = "TOKEN")]
        token: String,

        /// Answer the invitation
        #[arg(long, value_enum)]
        rsvp: Option<RsvpArg>,

        /// Save the invitation card as a PDF
        #[arg(long)]
        pdf: bool,
    },

    /// Sign in as an administrator
    Login {
        #[arg(value_name = "USERNAME")]
        username: String,

        /// Password; read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Switch the interface language
    Lang {
        #[arg(value_enum, default_value = "toggle")]
        choice: LangArg,
    },

    /// Manage alumni records
    Alumni {
        #[command(subcommand)]
        command: AlumniCommands,
    },

    /// Manage events and invitations
    Events {
        #[command(subcommand)]
        command: EventsCommands,
    },

    /// Show the API status message
    Status,

    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
enum AlumniCommands {
    /// List alumni
    List {
        /// Name or email substring
        #[arg(short, long, default_value = "")]
        query: String,

        /// Graduation year
        #[arg(short, long, default_value = "")]
        year: String,

        /// Save the filtered list to alumni.csv
        #[arg(long)]
        csv: bool,
    },

    /// Record a new alumnus
    Add {
        #[command(flatten)]
        fields: AlumnusArgs,
    },

    /// Show one record
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Change fields of a record
    Update {
        #[arg(value_name = "ID")]
        id: String,

        #[command(flatten)]
        fields: AlumnusArgs,
    },

    /// Delete a record
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(clap::Args)]
struct AlumnusArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    year: Option<i32>,

    /// Passed the baccalaureate
    #[arg(long)]
    bac: Option<bool>,

    #[arg(long, value_enum)]
    path: Option<PathArg>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    phone: Option<String>,
}

impl AlumnusArgs {
    fn apply(self, form: &mut AlumnusForm) {
        if let Some(name) = self.name {
            form.full_name = name;
        }
        if let Some(year) = self.year {
            form.graduation_year = year;
        }
        if let Some(bac) = self.bac {
            form.bacalaureat_passed = bac;
        }
        if let Some(path) = self.path {
            form.path = path.into();
        }
        if let Some(email) = self.email {
            form.email = Some(email);
        }
        if let Some(phone) = self.phone {
            form.phone = Some(phone);
        }
    }
}

#[derive(Subcommand)]
enum EventsCommands {
    /// List events
    List,

    /// Create an event
    Add {
        #[arg(long)]
        title: String,

        /// YYYY-MM-DD
        #[arg(long)]
        date: String,

        #[arg(long)]
        location: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Show one event
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Generate an invitation link and copy it
    Invite {
        #[arg(value_name = "EVENT_ID")]
        id: String,
    },
}

// CLI argument types
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum RsvpArg {
    Yes,
    No,
}

impl From<RsvpArg> for RsvpStatus {
    fn from(arg: RsvpArg) -> Self {
        match arg {
            RsvpArg::Yes => RsvpStatus::Yes,
            RsvpArg::No => RsvpStatus::No,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum PathArg {
    Faculty,
    Employed,
    Other,
}

impl From<PathArg> for GraduatePath {
    fn from(arg: PathArg) -> Self {
        match arg {
            PathArg::Faculty => GraduatePath::Faculty,
            PathArg::Employed => GraduatePath::Employed,
            PathArg::Other => GraduatePath::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum LangArg {
    Toggle,
    Ro,
    En,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    settings.validate()?;

    // Initialize logging
    let guard = logging::init_logging(&settings.logging)?;
    debug!("Starting {}", alumni_registry::info());

    let ctx = AppContext::init(settings, Arc::new(TerminalClipboard)).await?;
    let mut app = App::new(ctx);

    let outcome = run(&mut app, cli.command).await;
    let code = match outcome {
        Ok(output) => {
            print!("{}", output);
            0
        }
        Err(e) => {
            eprintln!("{}", app.describe_error(&e));
            App::exit_code(&e)
        }
    };

    drop(guard);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

async fn run(app: &mut App, command: Commands) -> Result<String, RegistryError> {
    match command {
        Commands::Open { path } => app.open(&path).await,
        Commands::Dashboard => app.open("/").await,
        Commands::Invite { token, rsvp, pdf } => {
            let mut page = app.invitation(&token).await;
            if let Some(status) = rsvp {
                page.submit_rsvp(status.into()).await;
            }

            let mut out = page.render(&app.ctx.localizer);
            if pdf {
                let path = page
                    .export_pdf(&app.ctx.localizer, &app.ctx.services.downloads)
                    .await?;
                out.push_str(&format!("{}\n", path.display()));
            }
            Ok(out)
        }
        Commands::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => read_password().await?,
            };

            let mut card = LoginCard::new();
            card.username = username;
            card.password = password;
            let ctx = &mut app.ctx;
            let username = card
                .submit(&ctx.services.auth_service, &mut ctx.session, &ctx.localizer)
                .await?;
            Ok(format!("{}: {}\n", ctx.localizer.t("logged_in_as"), username))
        }
        Commands::Logout => {
            let ctx = &mut app.ctx;
            LoginCard::new()
                .logout(&ctx.services.auth_service, &mut ctx.session)
                .await?;
            Ok(format!("{}\n", ctx.localizer.t("not_logged_in")))
        }
        Commands::Lang { choice } => {
            let localizer = &mut app.ctx.localizer;
            match choice {
                LangArg::Toggle => {
                    localizer.toggle().await?;
                }
                LangArg::Ro => localizer.set_language(Language::Ro).await?,
                LangArg::En => localizer.set_language(Language::En).await?,
            }
            Ok(format!("{}\n", localizer.language().toggle_label()))
        }
        Commands::Alumni { command } => run_alumni(app, command).await,
        Commands::Events { command } => run_events(app, command).await,
        Commands::Status => {
            let mut widget = StatusWidget::new();
            widget.refresh(&app.ctx.services).await;
            Ok(widget.render(&app.ctx.localizer))
        }
        Commands::Config => toml::to_string_pretty(&app.ctx.settings)
            .map_err(|e| RegistryError::Config(format!("Failed to serialize settings: {}", e))),
    }
}

async fn run_alumni(app: &mut App, command: AlumniCommands) -> Result<String, RegistryError> {
    let ctx = &app.ctx;
    let mut panel = AlumniPanel::new(ctx.services.api.clone(), ctx.settings.features.clone())?;
    let loc = &ctx.localizer;

    match command {
        AlumniCommands::List { query, year, csv } => {
            panel.load().await?;
            panel.set_query(query);
            panel.set_year_filter(year);

            let mut out = panel.render(loc);
            if csv {
                let path = panel.export_csv(&ctx.services.downloads).await?;
                out.push_str(&format!("{}\n", path.display()));
            }
            Ok(out)
        }
        AlumniCommands::Add { fields } => {
            fields.apply(&mut panel.form);
            let created = panel.create(&ctx.session).await?;
            info!(id = %created.id, "Alumnus created");
            Ok(format!("{}\n", created.id))
        }
        AlumniCommands::Show { id } => {
            let alumnus = panel.get(&id).await?;
            serde_json::to_string_pretty(&alumnus)
                .map(|json| format!("{}\n", json))
                .map_err(RegistryError::from)
        }
        AlumniCommands::Update { id, fields } => {
            let current = panel.get(&id).await?;
            let mut form = AlumnusForm::from(&current);
            fields.apply(&mut form);
            let updated = panel.update(&ctx.session, &id, form).await?;
            Ok(format!("{}\n", updated.id))
        }
        AlumniCommands::Delete { id } => {
            panel.delete(&ctx.session, &id).await?;
            Ok(format!("{}\n", id))
        }
    }
}

async fn run_events(app: &mut App, command: EventsCommands) -> Result<String, RegistryError> {
    let ctx = &app.ctx;
    let mut panel = EventsPanel::new(
        ctx.services.api.clone(),
        ctx.services.clipboard.clone(),
        ctx.settings.api.public_origin.clone(),
    );
    let loc = &ctx.localizer;

    match command {
        EventsCommands::List => {
            panel.load().await?;
            Ok(panel.render(loc))
        }
        EventsCommands::Add { title, date, location, description } => {
            panel.form = EventDraft {
                title,
                date: Some(parse_date(&date)?),
                location,
                description,
            };
            let created = panel.create(&ctx.session).await?;
            Ok(format!("{}\n", created.id))
        }
        EventsCommands::Show { id } => {
            let event = panel.get(&id).await?;
            serde_json::to_string_pretty(&event)
                .map(|json| format!("{}\n", json))
                .map_err(RegistryError::from)
        }
        EventsCommands::Invite { id } => {
            let link = panel.generate_link(&ctx.session, &id).await?;
            Ok(format!("{} ({})\n", link, loc.t("copied")))
        }
    }
}

async fn read_password() -> Result<String, RegistryError> {
    eprint!("Password: ");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
