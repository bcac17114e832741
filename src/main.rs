use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{ArgGroup, Args, Parser, Subcommand};
use fla_wizard::config::AppConfig;
use fla_wizard::error::AppError;
use fla_wizard::wizard::{
    AnswerSnapshot, DocumentSet, Pathway, PathwayTypeCatalog, RegistryType, WizardSession,
    WizardState,
};
use fla_wizard::{service, telemetry};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

#[derive(Parser, Debug)]
#[command(
    name = "Family Law Forms Wizard",
    about = "Serve or exercise the family law forms wizard rule engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute the required and reminder documents for one document set
    Documents(DocumentsArgs),
    /// Apply an answer-change event to a saved wizard state
    SurveyChanged(SurveyChangedArgs),
    /// Check which registries a court location belongs to
    Registry(RegistryArgs),
    /// List the application forms the wizard can produce
    PathwayTypes,
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct DocumentsArgs {
    /// Document set key, e.g. familyLawMatter or agreementEnfrc27
    #[arg(long, value_parser = parse_document_set)]
    set: DocumentSet,
    /// Saved wizard state (JSON); a fresh wizard when omitted
    #[arg(long)]
    state: Option<PathBuf>,
    /// Survey answers keyed by survey name (JSON); defaults to the state's own
    #[arg(long)]
    answers: Option<PathBuf>,
    /// Substitute the Form 11 notice for unfileable existing orders (FLM only)
    #[arg(long)]
    case_management_fallback: bool,
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("change")
        .required(true)
        .args(["pathway", "all_except_protection_order"])
))]
struct SurveyChangedArgs {
    /// Saved wizard state (JSON)
    #[arg(long)]
    state: PathBuf,
    /// Pathway whose answers changed
    #[arg(long, value_parser = parse_pathway)]
    pathway: Option<Pathway>,
    /// Reset every pathway other than the protection order
    #[arg(long)]
    all_except_protection_order: bool,
}

#[derive(Args, Debug)]
struct RegistryArgs {
    /// Court location name as shown in the wizard
    #[arg(long)]
    location: String,
    /// Restrict the check to one registry type
    #[arg(long)]
    registry: Option<RegistryType>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Documents(args) => run_documents(args),
        Command::SurveyChanged(args) => run_survey_changed(args),
        Command::Registry(args) => run_registry(args),
        Command::PathwayTypes => print_json(PathwayTypeCatalog::standard().types()),
    }
}

fn parse_document_set(raw: &str) -> Result<DocumentSet, String> {
    DocumentSet::from_key(raw).ok_or_else(|| format!("unknown document set '{raw}'"))
}

fn parse_pathway(raw: &str) -> Result<Pathway, String> {
    Pathway::from_key(raw).ok_or_else(|| format!("unknown pathway '{raw}'"))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;
    service::run(config).await
}

fn run_documents(args: DocumentsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let locations = Arc::new(service::load_locations(&config.registry)?);

    let state: WizardState = match &args.state {
        Some(path) => read_json(path)?,
        None => WizardState::default(),
    };
    let answers: AnswerSnapshot = match &args.answers {
        Some(path) => read_json(path)?,
        None => state.pathway_answers(args.set.pathway()),
    };

    let mut session = WizardSession::new(state, locations);
    session.compute_required_documents(args.set, &answers);
    if args.case_management_fallback && args.set == DocumentSet::FamilyLawMatter {
        session.apply_case_management_fallback();
    }
    let state = session.into_state();
    let documents = state.required_documents(args.set).cloned().unwrap_or_default();

    print_json(&json!({ "documents": documents, "state": state }))
}

fn run_survey_changed(args: SurveyChangedArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let locations = Arc::new(service::load_locations(&config.registry)?);

    let state: WizardState = read_json(&args.state)?;
    let mut session = WizardSession::new(state, locations);
    match args.pathway {
        Some(pathway) => session.survey_changed(pathway),
        None => session.survey_changed_all_except_protection_order(),
    }

    print_json(&session.into_state())
}

fn run_registry(args: RegistryArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let locations = service::load_locations(&config.registry)?;

    let registries: Vec<RegistryType> = match args.registry {
        Some(registry) => vec![registry],
        None => RegistryType::ordered().to_vec(),
    };

    let membership: serde_json::Map<String, serde_json::Value> = registries
        .into_iter()
        .map(|registry| {
            let included = locations.included_in_registries(&args.location, registry);
            (registry.key().to_string(), json!(included))
        })
        .collect();

    print_json(&json!({
        "location": locations.find(&args.location),
        "registries": membership,
    }))
}
