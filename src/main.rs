use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use learning_roadmap::catalog::{check_integrity, CatalogSeed, EnrollmentStatus, UserProfile};
use learning_roadmap::config::{Config, ConfigOverrides};
use learning_roadmap::output::json::render_json;
use learning_roadmap::output::table::{
    render_issues_table, render_roadmap_table, render_scores_table,
};
use learning_roadmap::server::run_server;
use learning_roadmap::store::{CatalogStore, RoadmapInputs};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "learning-roadmap",
    about = "Personalized learning roadmaps from onboarding answers"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    db: Option<String>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Seed {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        replace: bool,
    },
    Profile {
        #[arg(long)]
        user: String,
        #[arg(long = "goal")]
        goals: Vec<String>,
        #[arg(long = "track")]
        tracks: Vec<String>,
        #[arg(long)]
        context: Option<String>,
        #[arg(long = "ai-level")]
        ai_level: Option<String>,
        #[arg(long = "code-level")]
        code_level: Option<String>,
    },
    Enroll {
        #[arg(long)]
        user: String,
        #[arg(long)]
        course: String,
        #[arg(long)]
        status: EnrollmentStatus,
    },
    Roadmap {
        #[arg(long)]
        user: String,
    },
    Scores {
        #[arg(long)]
        user: String,
    },
    Check,
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    let (host, port) = match &cli.command {
        Commands::Serve { host, port } => (host.clone(), *port),
        _ => (None, None),
    };
    config.apply_overrides(ConfigOverrides {
        db_path: cli.db.clone(),
        host,
        port,
    });
    init_tracing(&config);

    if matches!(cli.command, Commands::Config { .. }) {
        return handle_config_command(&cli.command, &config, &config_path);
    }
    if matches!(cli.command, Commands::Serve { .. }) {
        let bind = format!("{}:{}", config.server.host, config.server.port);
        let addr: SocketAddr = bind
            .parse()
            .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))?;
        return run_server(config, addr).await;
    }

    let db_path = config.resolved_db_path();
    let mut store = CatalogStore::open(&db_path)?;

    match &cli.command {
        Commands::Seed { catalog, replace } => {
            let seed = CatalogSeed::from_path(catalog)?;
            if seed.is_empty() {
                warn!("catalog {} contains no rows", catalog.display());
            }
            store.seed(&seed, *replace)?;
            info!(
                "seeded {} directions, {} course groups, {} weights into {}",
                seed.directions.len(),
                seed.course_groups.len(),
                seed.direction_weights.len(),
                db_path.display()
            );
            let issues = check_integrity(
                &seed.directions,
                &seed.course_groups,
                &seed.direction_weights,
            );
            for issue in &issues {
                warn!("catalog issue: {issue}");
            }
        }
        Commands::Profile {
            user,
            goals,
            tracks,
            context,
            ai_level,
            code_level,
        } => {
            let profile = UserProfile {
                goals: goals.iter().cloned().map(Some).collect(),
                priority_tracks: tracks.iter().cloned().map(Some).collect(),
                context: context.clone(),
                ai_level: ai_level.clone(),
                code_level: code_level.clone(),
            };
            store.upsert_profile(user, &profile)?;
            info!("saved profile for {user} ({} answers)", profile.answers().len());
        }
        Commands::Enroll {
            user,
            course,
            status,
        } => {
            store.set_enrollment(user, course, *status)?;
            info!("{user}: {course} -> {status}");
        }
        Commands::Roadmap { user } => {
            let inputs = load_inputs(&store, user)?;
            let roadmap = inputs.compute();
            match cli.output {
                OutputFormat::Table => println!("{}", render_roadmap_table(&roadmap)),
                OutputFormat::Json => println!("{}", render_json(&roadmap)?),
            }
        }
        Commands::Scores { user } => {
            let inputs = load_inputs(&store, user)?;
            let scores = inputs.ranked_directions();
            match cli.output {
                OutputFormat::Table => println!("{}", render_scores_table(&scores)),
                OutputFormat::Json => println!("{}", render_json(&scores)?),
            }
        }
        Commands::Check => {
            let issues = check_integrity(
                &store.load_directions()?,
                &store.load_course_groups()?,
                &store.load_direction_weights()?,
            );
            match cli.output {
                OutputFormat::Table => println!("{}", render_issues_table(&issues)),
                OutputFormat::Json => println!("{}", render_json(&issues)?),
            }
        }
        Commands::Config { .. } => {}
        Commands::Serve { .. } => unreachable!("serve command handled before dispatch"),
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_inputs(store: &CatalogStore, user: &str) -> Result<RoadmapInputs> {
    let inputs = store
        .load_inputs(user)?
        .ok_or_else(|| anyhow!("no profile recorded for user {user}"))?;
    for issue in inputs.issues() {
        warn!("catalog issue: {issue}");
    }
    Ok(inputs)
}

fn handle_config_command(command: &Commands, config: &Config, config_path: &PathBuf) -> Result<()> {
    let Commands::Config { init, show } = command else {
        return Ok(());
    };
    if *init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if *show || !*init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}
