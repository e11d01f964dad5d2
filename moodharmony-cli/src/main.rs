mod render;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::Timelike;
use clap::{Parser, Subcommand};
use moodharmony_core::error::InputError;
use moodharmony_core::text::time_of_day;
use moodharmony_core::types::{Credentials, Hour};
use moodharmony_engine::controller::SubmitOutcome;
use moodharmony_engine::session::View;
use moodharmony_engine::state::RequestState;
use moodharmony_runtime::fs_util::default_data_dir;
use moodharmony_runtime::service::{AppService, forget_identity, set_api_base_url};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::render::{PROMPT, SLOW_BACKEND_NOTE, render_history_entry, render_state};

#[derive(Parser)]
#[command(name = "moodharmony")]
#[command(about = "Food and music recommendations based on your mood")]
#[command(version)]
struct Cli {
    /// Base URL of the recommendation API
    #[arg(long, global = true, env = "MOODHARMONY_SERVER_API")]
    api: Option<String>,

    /// Directory holding config, identity and history
    #[arg(long, global = true, env = "MOODHARMONY_HOME")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask for recommendations. Without a mood, reads one mood per line from stdin.
    Recommend {
        mood: Option<String>,

        /// Hour of day (0-23) to send instead of the local clock
        #[arg(long)]
        hour: Option<u32>,
    },

    /// Create an account and remember its identity
    Register {
        #[arg(short, long)]
        email: String,

        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Sign in to an existing account
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored identity
    Logout,

    /// Show the current identity and API endpoint
    Whoami,

    /// List past recommendations
    History {
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,

        #[arg(long)]
        clear: bool,
    },

    /// Persist the API base URL into the config file
    SetApi { url: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    log::debug!("data dir: {}", data_dir.display());

    let open = || AppService::open(&data_dir, cli.api.as_deref());

    match cli.command {
        Commands::Recommend { mood, hour } => {
            let fixed = hour.map(Hour::new).transpose()?;
            let svc = open()?;
            match mood {
                Some(mood) => recommend_once(&svc, &mood, fixed).await,
                None => recommend_interactive(&svc, fixed).await,
            }
        }
        Commands::Register { email, password } => {
            let creds = Credentials::new(email, password_or_prompt(password)?)?;
            match open()?.session().register(&creds).await {
                Ok(id) => {
                    println!("Registered. Signed in as user {id}.");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("{e}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Login { email, password } => {
            let creds = Credentials::new(email, password_or_prompt(password)?)?;
            match open()?.session().login(&creds).await {
                Ok(id) => {
                    println!("Signed in as user {id}.");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("{e}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Logout => {
            forget_identity(&data_dir)?;
            println!("Logged out.");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Whoami => {
            let svc = open()?;
            match svc.session().identity() {
                Some(id) => println!("user:  {id}"),
                None => println!("user:  (anonymous)"),
            }
            println!("api:   {}", svc.config().api_base_url);
            println!("data:  {}", svc.data_dir().display());
            Ok(ExitCode::SUCCESS)
        }
        Commands::History { limit, clear } => {
            let svc = open()?;
            if clear {
                svc.history().clear()?;
                println!("History cleared.");
                return Ok(ExitCode::SUCCESS);
            }
            let entries = svc.history().load()?;
            if entries.is_empty() {
                println!("No recommendations yet.");
            }
            let skip = entries.len().saturating_sub(limit);
            for entry in entries.iter().skip(skip) {
                println!("{}", render_history_entry(entry));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::SetApi { url } => {
            let cfg = set_api_base_url(&data_dir, &url)?;
            println!("API set to {}", cfg.api_base_url);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn recommend_once(
    svc: &AppService,
    mood: &str,
    fixed: Option<Hour>,
) -> anyhow::Result<ExitCode> {
    let hour = submission_hour(fixed, local_clock_hour)?;
    announce(svc, hour);
    println!("{}", render_state(&RequestState::Pending));

    let outcome = svc.recommend(mood, hour).await?;
    let state = match outcome {
        SubmitOutcome::Applied(state) => state,
        SubmitOutcome::Superseded => svc.controller().state(),
    };
    println!("{}", render_state(&state));

    Ok(match state {
        RequestState::Failed(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

async fn recommend_interactive(svc: &AppService, fixed: Option<Hour>) -> anyhow::Result<ExitCode> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{PROMPT} ");
        std::io::stdout().flush().context("flush stdout")?;

        let Some(line) = lines.next_line().await.context("read mood")? else {
            println!();
            return Ok(ExitCode::SUCCESS);
        };
        if line.trim().is_empty() {
            continue;
        }

        // Each submission carries the hour at which it is made.
        let hour = submission_hour(fixed, local_clock_hour)?;
        announce(svc, hour);
        println!("{}", render_state(&RequestState::Pending));
        match svc.recommend(&line, hour).await {
            Ok(SubmitOutcome::Applied(state)) => println!("{}\n", render_state(&state)),
            Ok(SubmitOutcome::Superseded) => {}
            Err(e) => println!("{e}\n"),
        }
    }
}

fn announce(svc: &AppService, hour: Hour) {
    if svc.session().view() == View::Entry {
        log::info!("no stored identity; sending an anonymous request");
    }
    eprintln!(
        "Sending hour {hour} ({}). {SLOW_BACKEND_NOTE}",
        time_of_day(hour).as_str()
    );
}

/// The `--hour` override when given, otherwise the clock read now.
fn submission_hour(fixed: Option<Hour>, clock: impl FnOnce() -> u32) -> Result<Hour, InputError> {
    match fixed {
        Some(hour) => Ok(hour),
        None => Hour::new(clock()),
    }
}

fn local_clock_hour() -> u32 {
    chrono::Local::now().hour()
}

fn password_or_prompt(password: Option<String>) -> anyhow::Result<String> {
    if let Some(p) = password {
        return Ok(p);
    }
    eprint!("Password: ");
    std::io::stderr().flush().context("flush stderr")?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
