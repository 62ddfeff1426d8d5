mod render;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inpatient_core::config::{
    DEFAULT_INTAKE_WINDOW_DAYS, DEFAULT_MAX_VISIBLE_PAGES, DEFAULT_PAGE_SIZE, DEFAULT_SEED_DELAY,
};
use inpatient_core::intake::local_today;
use inpatient_core::models::{SortDirective, SortKey, DOCTOR_OPTIONS, ROOM_OPTIONS};
use inpatient_core::{DemoSeed, Intake, JsonFileSeed, PatientForm, QueryEngine, RegistryConfig};

#[derive(Parser)]
#[command(name = "inpatient")]
#[command(about = "Inpatient registration and listing")]
struct Cli {
    /// JSON file with the initial patient list (defaults to the demo ward)
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    /// Simulated latency of the demo seed, in milliseconds
    #[arg(long, global = true, default_value_t = DEFAULT_SEED_DELAY.as_millis() as u64)]
    seed_delay_ms: u64,

    /// Rows per page
    #[arg(long, global = true, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List admitted patients
    List {
        /// Filter by name (case-insensitive) or national ID
        #[arg(long, default_value = "")]
        search: String,
        /// Sort column: name, nationalId, diagnosis, admissionDate, doctor, room
        #[arg(long)]
        sort: Option<SortKey>,
        /// Sort descending instead of ascending
        #[arg(long, requires = "sort")]
        desc: bool,
        /// Page to show (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Admit a new patient
    Admit {
        /// Full name
        #[arg(long)]
        name: String,
        /// 16-digit national ID
        #[arg(long)]
        national_id: String,
        /// Diagnosis
        #[arg(long)]
        diagnosis: String,
        /// Admission date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Attending doctor (see `options`)
        #[arg(long)]
        doctor: String,
        /// Room (see `options`)
        #[arg(long)]
        room: String,
    },
    /// Show the doctor and room catalogues
    Options,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("inpatient=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = RegistryConfig::new(
        cli.page_size,
        DEFAULT_MAX_VISIBLE_PAGES,
        DEFAULT_INTAKE_WINDOW_DAYS,
        Duration::from_millis(cli.seed_delay_ms),
    )?;

    match cli.command {
        Commands::Options => {
            println!("Doctors:");
            for doctor in DOCTOR_OPTIONS {
                println!("  {doctor}");
            }
            println!("Rooms:");
            for room in ROOM_OPTIONS {
                println!("  {room}");
            }
        }
        Commands::List {
            search,
            sort,
            desc,
            page,
        } => {
            let mut engine = load_engine(&config, cli.seed).await;
            engine.set_search_term(search);
            if let Some(key) = sort {
                let directive = if desc {
                    SortDirective::descending(key)
                } else {
                    SortDirective::ascending(key)
                };
                engine.set_sort_directive(Some(directive));
            }
            engine.set_page(page);
            print!("{}", render::render_table(&engine, config.max_visible_pages()));
        }
        Commands::Admit {
            name,
            national_id,
            diagnosis,
            date,
            doctor,
            room,
        } => {
            let mut engine = load_engine(&config, cli.seed).await;
            let today = local_today();
            let form = PatientForm {
                name,
                national_id,
                diagnosis,
                admission_date: date.unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
                doctor,
                room,
            };

            let mut intake = Intake::new(&config);
            let patient = match intake.submit(&form, today) {
                Ok(patient) => patient,
                Err(errors) => {
                    for (field, message) in errors.iter() {
                        eprintln!("{field}: {message}");
                    }
                    bail!(errors);
                }
            };

            let name = patient.name.clone();
            engine.add(patient);
            println!("Patient {name} registered.");
            print!("{}", render::render_table(&engine, config.max_visible_pages()));
        }
    }

    Ok(())
}

/// Build the engine and run the initial load.
///
/// A failed load is logged and leaves the engine empty; the table then
/// shows the error line.
async fn load_engine(config: &RegistryConfig, seed: Option<PathBuf>) -> QueryEngine {
    let mut engine = QueryEngine::new(config);
    let result = match seed {
        Some(path) => {
            let provider = JsonFileSeed::new(&path);
            engine
                .load(&provider)
                .await
                .with_context(|| format!("loading seed from {}", path.display()))
        }
        None => engine
            .load(&DemoSeed::new(config.seed_delay()))
            .await
            .context("loading demo seed"),
    };
    if let Err(e) = result {
        tracing::error!("{:#}", e);
    }
    engine
}
