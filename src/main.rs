use anyhow::Context;
use clap::Parser;
use leave_form::config::cli::{parse_assignment, Command, ThemeAction};
use leave_form::core::theme::THEME_KEY;
use leave_form::domain::ports::PreferenceStore;
use leave_form::utils::logger::{self, LogFormat};
use leave_form::utils::validation::Validate;
use leave_form::{
    Attachment, CliConfig, DarkLightProbe, FormConfig, FormController, HttpTransport,
    JsonFilePreferenceStore, SubmissionOutcome, SubmitAttempt, TerminalView, ThemeManager,
    ThemePreference, Validator,
};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    let format = if cli.json_log {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(format, cli.verbose);

    tracing::info!("🚀 Starting leave-form");
    tracing::debug!("CLI config: {:?}", cli);

    // 載入並驗證配置
    let config = match FormConfig::load_or_default(&cli.config).and_then(|c| {
        c.validate()?;
        Ok(c)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    match cli.command {
        Command::Theme { action } => run_theme(&config, action),
        Command::Submit {
            values,
            attachment,
            dry_run,
        } => run_submit(&config, &values, attachment.as_deref(), dry_run).await,
    }
}

fn run_theme(config: &FormConfig, action: ThemeAction) -> anyhow::Result<()> {
    let store = JsonFilePreferenceStore::new(config.theme_store_path());
    let mut manager = ThemeManager::new(Box::new(store.clone()), Box::new(DarkLightProbe));
    let mut view = TerminalView::new();

    match action {
        ThemeAction::Show => {
            let current = manager.initialize_theme(&mut view);
            let source = if store
                .get(THEME_KEY)
                .ok()
                .flatten()
                .is_some_and(|v| !v.is_empty())
            {
                "saved"
            } else {
                "system"
            };
            println!("🎨 Theme: {} ({})", current.as_str(), source);
        }
        ThemeAction::Dark | ThemeAction::Light => {
            let is_dark = action == ThemeAction::Dark;
            manager.on_toggle_changed(&mut view, is_dark);
            println!(
                "🎨 Theme set to {} ({})",
                ThemePreference::from_is_dark(is_dark).as_str(),
                store.path().display()
            );
        }
    }
    Ok(())
}

async fn run_submit(
    config: &FormConfig,
    values: &[String],
    attachment: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let schema = config.schema()?;
    let theme = ThemeManager::new(
        Box::new(JsonFilePreferenceStore::new(config.theme_store_path())),
        Box::new(DarkLightProbe),
    );
    let transport = HttpTransport::from_config(config)?;
    let mut controller = FormController::new(
        schema,
        Validator::new(config.max_attachment_bytes()),
        theme,
        TerminalView::new(),
        transport,
    );
    controller.initialize();

    for raw in values {
        let (name, value) = parse_assignment(raw)?;
        if let Err(e) = controller.set_field(&name, &value) {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    if let Some(path) = attachment {
        controller.set_attachment(Some(read_attachment(path)?));
    }

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be sent");
        let result = controller.validate_form();
        controller.display_errors(&result.messages);
        if result.is_valid() {
            println!("{}", serde_json::to_string_pretty(&controller.payload())?);
            return Ok(());
        }
        std::process::exit(2);
    }

    let exit_code = match controller.handle_form_submit().await {
        SubmitAttempt::Completed(SubmissionOutcome::Success(_)) => {
            controller.close_success_modal();
            0
        }
        SubmitAttempt::Completed(_) => 1,
        SubmitAttempt::Invalid(_) => 2,
        SubmitAttempt::Rejected(state) => {
            tracing::warn!("Submission rejected in state {:?}", state);
            1
        }
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

fn read_attachment(path: &str) -> anyhow::Result<Attachment> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Cannot read attachment '{}'", path))?;
    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    Ok(Attachment::new(file_name, metadata.len()))
}
