use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use recovery_client::net::types::AnalysisPeriod;
use recovery_client::services::{admin, challenge, content, emotional, habits, professional, profile};
use recovery_client::state::auth::login_url;
use recovery_client::{ApiClient, ApiError, App, AuthSession, ClientConfig, FileTokenStore, Role, TokenStore};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("no config directory on this platform; pass --token-dir or set RECOVERY_TOKEN_DIR")]
    NoTokenDir,
    #[error("token storage failed: {0}")]
    Storage(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),
    #[error("not logged in; run `recovery login` first")]
    NotLoggedIn,
}

#[derive(Parser, Debug)]
#[command(name = "recovery", about = "SinAdicciones recovery backend client")]
struct Cli {
    #[arg(long, env = "RECOVERY_BACKEND_URL")]
    base_url: Option<String>,

    #[arg(long, env = "RECOVERY_TOKEN_DIR")]
    token_dir: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    send_cookies: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in with email and password.
    Login {
        email: String,
        #[arg(long, env = "RECOVERY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register {
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long, env = "RECOVERY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Print the hosted login URL to open in a browser.
    LoginUrl,
    /// Complete a hosted login from the redirect URL carrying `session_id`.
    Callback { url: String },
    Whoami,
    /// Print the screen the app would open on launch.
    Route,
    Logout,
    ChangePassword {
        #[arg(long, env = "RECOVERY_PASSWORD", hide_env_values = true)]
        current: String,
        #[arg(long)]
        new: String,
    },
    SetRole {
        role: Role,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        identification: Option<String>,
    },
    /// Submit the onboarding form for a role as a JSON object.
    Onboard {
        role: Role,
        #[arg(long)]
        data: String,
    },
    Profile(ProfileCommand),
    Habits(HabitsCommand),
    Challenge(ChallengeCommand),
    Wellness {
        #[arg(default_value = "week")]
        period: AnalysisPeriod,
    },
    Therapists {
        #[arg(default_value = "")]
        query: String,
    },
    Admin(AdminCommand),
    Health,
    /// Raw authenticated request, e.g. `api GET /api/dashboard/stats`.
    Api {
        method: String,
        path: String,
        #[arg(long)]
        data: Option<String>,
    },
}

#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    Show,
    Update {
        #[arg(long)]
        data: String,
    },
}

#[derive(Args, Debug)]
struct HabitsCommand {
    #[command(subcommand)]
    command: HabitsSubcommand,
}

#[derive(Subcommand, Debug)]
enum HabitsSubcommand {
    List,
    Create {
        name: String,
        #[arg(long, default_value = habits::DEFAULT_HABIT_COLOR)]
        color: String,
        #[arg(long, default_value = "daily")]
        frequency: String,
    },
    Log {
        habit_id: String,
        #[arg(long, default_value_t = false)]
        undo: bool,
    },
    Delete {
        habit_id: String,
    },
    Analysis {
        #[arg(default_value = "week")]
        period: AnalysisPeriod,
    },
}

#[derive(Args, Debug)]
struct ChallengeCommand {
    #[command(subcommand)]
    command: ChallengeSubcommand,
}

#[derive(Subcommand, Debug)]
enum ChallengeSubcommand {
    Start {
        #[arg(long)]
        goal: Option<String>,
    },
    Current,
    Log {
        #[arg(long, default_value_t = false)]
        relapsed: bool,
        #[arg(long, default_value_t = 5)]
        mood: u8,
        #[arg(long, default_value_t = 5)]
        cravings: u8,
        #[arg(long)]
        notes: Option<String>,
    },
    Restart,
    Complete,
}

#[derive(Args, Debug)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminSubcommand {
    Stats,
    Users {
        #[arg(long)]
        role: Option<Role>,
        #[arg(long, default_value_t = admin::DEFAULT_USER_LIMIT)]
        limit: u32,
    },
    Activity,
    SetRole {
        user_id: String,
        role: Role,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = build_config(&cli);
    let store_dir = config.resolved_token_dir().ok_or(CliError::NoTokenDir)?;
    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open(store_dir)?);
    let api = ApiClient::new(&config, store)?;

    match cli.command {
        Command::Login { email, password } => {
            let mut app = App::new(AuthSession::new(api));
            let state = app.login_with_email(&email, &password).await?;
            println!("{}", state.route);
            Ok(())
        }
        Command::Register { email, name, password } => {
            let mut app = App::new(AuthSession::new(api));
            let state = app.register_with_email(&email, &password, &name).await?;
            println!("{}", state.route);
            Ok(())
        }
        Command::LoginUrl => {
            println!("{}", login_url(&config.auth_portal_url, &config.redirect_url)?);
            Ok(())
        }
        Command::Callback { url } => {
            let mut app = App::new(AuthSession::new(api));
            let state = app.handle_callback_url(&url).await?;
            println!("{}", state.route);
            Ok(())
        }
        Command::Whoami => {
            let mut session = AuthSession::new(api);
            session.bootstrap().await?;
            let user = session.user().ok_or(CliError::NotLoggedIn)?;
            print_json(&serde_json::to_value(user)?)
        }
        Command::Route => {
            let mut app = App::new(AuthSession::new(api));
            let state = app.launch(None).await?;
            println!("{}", state.route);
            Ok(())
        }
        Command::Logout => {
            let mut app = App::new(AuthSession::new(api));
            app.logout().await?;
            eprintln!("logged out");
            Ok(())
        }
        Command::ChangePassword { current, new } => {
            let session = AuthSession::new(api);
            print_json(&session.change_password(&current, &new).await?)
        }
        Command::SetRole { role, country, identification } => {
            let mut app = App::new(AuthSession::new(api));
            let state = app.select_role(role, country.as_deref(), identification.as_deref()).await?;
            println!("{}", state.route);
            Ok(())
        }
        Command::Onboard { role, data } => {
            let form = serde_json::from_str::<Value>(&data)?;
            print_json(&profile::submit_onboarding(&api, role, &form).await?)
        }
        Command::Profile(command) => run_profile(&api, command).await,
        Command::Habits(command) => run_habits(&api, command).await,
        Command::Challenge(command) => run_challenge(&api, command).await,
        Command::Wellness { period } => print_json(&emotional::wellness_analysis(&api, period).await?),
        Command::Therapists { query } => print_json(&professional::search_therapists(&api, &query).await?),
        Command::Admin(command) => run_admin(&api, command).await,
        Command::Health => print_json(&content::health(&api).await?),
        Command::Api { method, path, data } => {
            let method = reqwest::Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                .map_err(|_| CliError::InvalidMethod(method.clone()))?;
            let body = data.as_deref().map(serde_json::from_str::<Value>).transpose()?;
            let json = api.call::<Value, Value>(method, &path, &[], body.as_ref()).await?;
            print_json(&json)
        }
    }
}

fn build_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.base_url {
        config = config.with_backend_url(url);
    }
    if let Some(dir) = &cli.token_dir {
        config.token_dir = Some(dir.clone());
    }
    if cli.send_cookies {
        config.send_cookies = true;
    }
    config
}

async fn run_profile(api: &ApiClient, profile_cmd: ProfileCommand) -> Result<(), CliError> {
    match profile_cmd.command {
        ProfileSubcommand::Show => {
            let fetched = profile::get_profile(api).await?;
            print_json(&serde_json::to_value(fetched)?)
        }
        ProfileSubcommand::Update { data } => {
            let fields = serde_json::from_str::<Value>(&data)?;
            print_json(&profile::update_profile(api, &fields).await?)
        }
    }
}

async fn run_habits(api: &ApiClient, habits_cmd: HabitsCommand) -> Result<(), CliError> {
    match habits_cmd.command {
        HabitsSubcommand::List => print_json(&habits::list_habits(api).await?),
        HabitsSubcommand::Create { name, color, frequency } => {
            let habit = habits::NewHabit { name: &name, color: &color, frequency: &frequency };
            print_json(&habits::create_habit(api, &habit).await?)
        }
        HabitsSubcommand::Log { habit_id, undo } => print_json(&habits::log_habit(api, &habit_id, !undo).await?),
        HabitsSubcommand::Delete { habit_id } => print_json(&habits::delete_habit(api, &habit_id).await?),
        HabitsSubcommand::Analysis { period } => print_json(&habits::habits_analysis(api, period).await?),
    }
}

async fn run_challenge(api: &ApiClient, challenge_cmd: ChallengeCommand) -> Result<(), CliError> {
    match challenge_cmd.command {
        ChallengeSubcommand::Start { goal } => print_json(&challenge::start(api, goal.as_deref()).await?),
        ChallengeSubcommand::Current => print_json(&challenge::current(api).await?),
        ChallengeSubcommand::Log { relapsed, mood, cravings, notes } => {
            let log = challenge::DailyLog {
                mood,
                cravings_level: cravings,
                notes: notes.as_deref(),
                ..challenge::DailyLog::new(!relapsed)
            };
            print_json(&challenge::log_day(api, &log).await?)
        }
        ChallengeSubcommand::Restart => print_json(&challenge::restart(api).await?),
        ChallengeSubcommand::Complete => print_json(&challenge::complete(api).await?),
    }
}

async fn run_admin(api: &ApiClient, admin_cmd: AdminCommand) -> Result<(), CliError> {
    match admin_cmd.command {
        AdminSubcommand::Stats => print_json(&admin::stats(api).await?),
        AdminSubcommand::Users { role, limit } => print_json(&admin::users(api, role, limit).await?),
        AdminSubcommand::Activity => print_json(&admin::activity(api).await?),
        AdminSubcommand::SetRole { user_id, role } => print_json(&admin::set_user_role(api, &user_id, role).await?),
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
