use clap::Parser;
use pullwatch::adapters::outbound::console::StderrProgressReporter;
use pullwatch::adapters::outbound::journal::{FileLogSource, JournalctlLogSource};
use pullwatch::adapters::outbound::kubernetes::KubePodLister;
use pullwatch::adapters::outbound::network::{DockerHubAuth, DockerHubClient, GitHubClient};
use pullwatch::application::dto::ReportRequest;
use pullwatch::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use pullwatch::application::use_cases::{CheckRateLimitsUseCase, GenerateReportUseCase};
use pullwatch::cli::Args;
use pullwatch::config::Settings;
use pullwatch::image_stats::domain::RateLimit;
use pullwatch::image_stats::services::LogEventExtractor;
use pullwatch::ports::outbound::{LogSource, ProgressReporter, RateLimitClient};
use pullwatch::shared::error::ExitCode;
use pullwatch::shared::Result;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // clap exits with 2 on invalid arguments and 0 for --help/--version
    let args = Args::try_parse().unwrap_or_else(|e| e.exit());

    init_tracing(args.verbose);

    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(anyhow::Error::from)
        .and_then(|runtime| runtime.block_on(run(args)));

    if let Err(e) = result {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "warn,pullwatch=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let settings = Settings::load(args)?;
    tracing::debug!(period = %settings.period, format = %settings.format, "resolved settings");

    let progress_reporter = StderrProgressReporter::new();

    // Cluster client first so a broken kubeconfig fails before any network call
    let pod_lister = KubePodLister::from_kubeconfig(settings.kubeconfig.clone(), settings.timeout).await?;

    // Registry quotas; failures only drop their section
    let rate_limits = if settings.skip_rate_limits {
        Vec::new()
    } else {
        check_rate_limits(&settings, progress_reporter).await?
    };

    // Create adapters (Dependency Injection)
    let log_source: Box<dyn LogSource> = match &settings.log_file {
        Some(path) => Box::new(FileLogSource::new(path.clone())),
        None => Box::new(JournalctlLogSource::new(
            settings.journal_unit.clone(),
            settings.log_format,
            settings.markers.clone(),
            settings.timeout,
        )),
    };
    let extractor = LogEventExtractor::new(settings.log_format).with_markers(settings.markers.clone());

    let use_case = GenerateReportUseCase::new(pod_lister, log_source, extractor, progress_reporter);
    let request = ReportRequest::new(settings.period.clone(), settings.in_use_only);
    let response = use_case.execute(request).await?;

    progress_reporter.report(FormatterFactory::progress_message(settings.format));
    let formatter = FormatterFactory::create(settings.format);
    let formatted_output = formatter.format(&response.report, &rate_limits)?;

    let presenter = PresenterFactory::create(PresenterType::from_output(settings.output.clone()));
    presenter.present(&formatted_output)?;

    Ok(())
}

async fn check_rate_limits(
    settings: &Settings,
    progress_reporter: StderrProgressReporter,
) -> Result<Vec<RateLimit>> {
    let auth = DockerHubAuth {
        username: settings.docker_username.clone(),
        password: settings.docker_password.clone(),
        token: settings.docker_token.clone(),
    };

    let mut clients: Vec<Box<dyn RateLimitClient>> = Vec::new();
    if let Some(token) = &settings.github_token {
        clients.push(Box::new(GitHubClient::new(token.clone(), settings.timeout)?));
    }
    clients.push(Box::new(DockerHubClient::new(auth, settings.timeout)?));

    let use_case = CheckRateLimitsUseCase::new(clients, progress_reporter);
    Ok(use_case.execute().await)
}
