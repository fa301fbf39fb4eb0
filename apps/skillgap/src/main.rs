mod api_client;
mod app;
mod config;
mod errors;
mod models;
mod pages;
mod render;
mod routes;
mod session;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api_client::ApiClient;
use crate::app::{App, Screen};
use crate::config::Config;
use crate::errors::AppError;
use crate::models::ProgressUpdate;
use crate::pages::resources::{Choice, ResourceFilter};
use crate::render::View;
use crate::routes::Route;
use crate::session::token_store::FileTokenStore;

/// skillgap - assess your skills against a career role and plan the gap
#[derive(Parser, Debug)]
#[command(name = "skillgap")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Backend origin, overrides SKILLGAP_BACKEND_URL
    #[arg(long)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open any page by path, e.g. `/dashboard` or `/roadmap/<id>`
    Open {
        path: String,
    },

    /// Sign in and open the dashboard
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account and open the career roles
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign out and forget the stored token
    Logout,

    /// Rate your skills for a role and run the gap analysis
    Assess {
        role_id: String,

        /// Skill rating as SKILL=LEVEL (1-5); unrated skills stay at 1
        #[arg(long = "rate", value_name = "SKILL=LEVEL")]
        ratings: Vec<String>,

        /// Also generate a roadmap from the analysis
        #[arg(long)]
        roadmap: bool,
    },

    /// Run a gap analysis for an existing assessment
    Analyze {
        assessment_id: String,

        /// Also generate a roadmap from the analysis
        #[arg(long)]
        roadmap: bool,
    },

    /// Browse learning resources
    Resources {
        #[arg(long, default_value = "")]
        search: String,

        /// Beginner, Intermediate, Advanced or All
        #[arg(long, default_value = "All")]
        difficulty: String,

        /// Course, Tutorial, Video, Article or All
        #[arg(long = "type", default_value = "All")]
        kind: String,
    },

    /// Record progress on one skill of a role
    Track {
        role_id: String,
        #[arg(long)]
        skill: String,
        /// 0-100
        #[arg(long)]
        progress: u8,
        #[arg(long, default_value = "")]
        notes: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env(cli.backend_url.as_deref())?;

    // Logs go to stderr; stdout carries the rendered page
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting SkillGap client v{}", env!("CARGO_PKG_VERSION"));
    let api = ApiClient::new(&config.backend_url).context("Failed to build HTTP client")?;
    info!("Backend API: {}", api.base_url());
    let tokens = Arc::new(FileTokenStore::new(config.token_file.clone()));
    info!("Token file: {}", tokens.path().display());
    let mut app = App::start(api, tokens).await;

    run(&mut app, cli.command).await?;

    print!("{}", View(&app));
    for toast in app.drain_toasts() {
        println!("{toast}");
    }
    Ok(())
}

/// Drives the app through one command. Each step only runs while the
/// previous one left the app on the expected page.
async fn run(app: &mut App, command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Open { path } => app.open(path.parse()?).await,
        Commands::Login { email, password } => {
            if open(app, Route::Login).await? {
                app.login(&email, &password).await?;
            }
            Ok(())
        }
        Commands::Register {
            name,
            email,
            password,
        } => {
            if open(app, Route::Register).await? {
                app.register(&name, &email, &password).await?;
            }
            Ok(())
        }
        Commands::Logout => app.logout().await,
        Commands::Assess {
            role_id,
            ratings,
            roadmap,
        } => {
            let ratings = ratings
                .iter()
                .map(|raw| parse_rating(raw))
                .collect::<Result<Vec<_>, _>>()?;
            open(app, Route::Assessment { role_id }).await?;
            if !matches!(app.screen(), Screen::Assessment(page) if page.role().is_some()) {
                return Ok(());
            }
            for (skill, level) in ratings {
                app.rate(&skill, level)?;
            }
            app.submit_assessment().await?;
            if roadmap {
                generate_roadmap(app).await?;
            }
            Ok(())
        }
        Commands::Analyze {
            assessment_id,
            roadmap,
        } => {
            if open(app, Route::GapAnalysis { assessment_id }).await? && roadmap {
                generate_roadmap(app).await?;
            }
            Ok(())
        }
        Commands::Resources {
            search,
            difficulty,
            kind,
        } => {
            if open(app, Route::Resources).await? {
                app.set_resource_filter(ResourceFilter {
                    search,
                    difficulty: parse_choice(&difficulty),
                    kind: parse_choice(&kind),
                })?;
            }
            Ok(())
        }
        Commands::Track {
            role_id,
            skill,
            progress,
            notes,
        } => {
            if open(app, Route::Progress).await? {
                let update = ProgressUpdate {
                    skill,
                    progress,
                    notes,
                };
                app.record_progress(&role_id, update).await?;
            }
            Ok(())
        }
    }
}

/// Opens `route` and reports whether the app actually landed there rather
/// than being redirected.
async fn open(app: &mut App, route: Route) -> Result<bool, AppError> {
    app.open(route.clone()).await?;
    Ok(app.location() == Some(&route))
}

/// Generates the roadmap only if the analysis step left the app on a
/// loaded gap analysis.
async fn generate_roadmap(app: &mut App) -> Result<(), AppError> {
    let ready = matches!(app.screen(), Screen::GapAnalysis(page) if page.analysis().is_some());
    if ready {
        app.generate_roadmap().await?;
    }
    Ok(())
}

fn parse_rating(raw: &str) -> Result<(String, u8), AppError> {
    let malformed = || AppError::MalformedRating(raw.to_string());
    let (skill, level) = raw.split_once('=').ok_or_else(malformed)?;
    let skill = skill.trim();
    if skill.is_empty() {
        return Err(malformed());
    }
    let level = level.trim().parse::<u8>().map_err(|_| malformed())?;
    Ok((skill.to_string(), level))
}

fn parse_choice(raw: &str) -> Choice {
    raw.parse().unwrap_or_default()
}
