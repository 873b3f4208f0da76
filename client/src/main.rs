//! AgriSmart client - command-line front end
//!
//! Each subcommand stands in for one page of the farmer-facing app.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agrismart_client::cli::{Cli, Command, CommunityAction, HistoryAction, ManualArgs, ProfileAction};
use agrismart_client::error::{AppError, AppResult};
use agrismart_client::external::BackendClient;
use agrismart_client::services::{
    ChatbotService, CommunityService, DashboardService, FeedbackService, FixedPositionProvider,
    HistoryOrigin, LocationFlow, ProfileService,
};
use agrismart_client::storage::FileStore;
use agrismart_client::Config;
use shared::{
    parse_measurement, tutorials, AppContext, Credentials, FeedbackSubmission, HistoryEntry,
    HistorySource, Localizer, NewCommunityPost, RawPosition, RecommendationSet,
    SoilInputs,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "agrismart=debug,agrismart_client=debug"
    } else {
        "agrismart=info,agrismart_client=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let mut config = Config::load()?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    tracing::debug!("Environment: {}", config.environment);
    tracing::debug!("Backend: {}", config.api.base_url());

    let store = FileStore::open(config.data_dir())?;
    let backend = BackendClient::new(&config.api)?;
    let language = cli
        .lang
        .unwrap_or_else(|| load_context(store.clone()).language());

    if let Err(err) = run(cli, &config, store, backend).await {
        // Every failure is recoverable; report it and exit non-zero
        eprintln!("{}", err.user_message(&Localizer::new(language)));
        tracing::debug!("{} ({})", err, err.code());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli, config: &Config, store: FileStore, backend: BackendClient) -> AppResult<()> {
    let language_override = cli.lang;
    let localizer = |ctx: &AppContext<FileStore>| {
        Localizer::new(language_override.unwrap_or_else(|| ctx.language()))
    };

    match cli.command {
        Command::Detect { lat, lon, accuracy } => {
            let provider = match (lat, lon, accuracy) {
                (Some(lat), Some(lon), Some(acc)) => {
                    FixedPositionProvider::new(RawPosition::new(lat, lon).with_accuracy(acc))
                }
                _ => FixedPositionProvider::from_coordinates(lat, lon),
            };
            let flow = LocationFlow::new(provider, config.location.position_options());
            let mut dashboard = DashboardService::new(backend, store, flow);
            let t = localizer(dashboard.context());

            let mut results = dashboard.recommend_from_location().await?;
            results.relocalize(t.language());

            if let Some(reading) = dashboard.reading() {
                println!(
                    "📍 {}: {}",
                    t.t("dashboard.location.detected"),
                    shared::format_coordinates(reading.latitude, reading.longitude)
                );
                if let Some(acc) = reading.accuracy {
                    println!(
                        "   {}: {:.0} {}",
                        t.t("dashboard.location.accuracy"),
                        acc,
                        t.t("dashboard.location.meters")
                    );
                }
            }
            if let Some(insights) = dashboard.insights() {
                if let Some(soil) = &insights.detected_soil {
                    println!("🏞️ {}: {} ({})", t.t("dashboard.soiltype"), soil.soil_type, soil.technical_name);
                }
                if let Some(weather) = &insights.current_weather {
                    println!(
                        "☁️ {}: {:.1}°C, {:.0}%, {} {:.1} mm, {}",
                        t.t("dashboard.weather"),
                        weather.temperature,
                        weather.humidity,
                        t.t("dashboard.weather.rainfall"),
                        weather.rainfall,
                        weather.description
                    );
                }
            }
            print_results(&t, &results);
            dashboard.flush_history_mirror().await;
        }

        Command::Manual(args) => {
            let inputs = manual_inputs(&args)?;
            let flow = LocationFlow::new(FixedPositionProvider::unsupported(), config.location.position_options());
            let mut dashboard = DashboardService::new(backend, store, flow);
            let t = localizer(dashboard.context());
            let mut results = dashboard.recommend_manual(&inputs).await?;
            results.relocalize(t.language());
            print_results(&t, &results);
            dashboard.flush_history_mirror().await;
        }

        Command::Soil { lat, lon } => {
            shared::validate_coordinates(lat, lon).map_err(|e| AppError::Validation(e.to_string()))?;
            let soil = backend.detect_soil(lat, lon).await?;
            let t = localizer(&load_context(store));
            println!("{}: {} ({})", t.t("dashboard.soiltype"), soil.soil_type, soil.technical_name);
        }

        Command::Weather { lat, lon } => {
            shared::validate_coordinates(lat, lon).map_err(|e| AppError::Validation(e.to_string()))?;
            let report = backend.weather(lat, lon).await?;
            let t = localizer(&load_context(store));
            println!(
                "{} ({}): {:.1}°C, {:.0}%, {} {:.1} mm, {}",
                t.t("dashboard.weather"),
                report.location,
                report.temperature,
                report.humidity,
                t.t("dashboard.weather.rainfall"),
                report.rainfall,
                report.weather_description
            );
        }

        Command::History { action } => {
            let flow = LocationFlow::new(FixedPositionProvider::unsupported(), config.location.position_options());
            let mut dashboard = DashboardService::new(backend, store, flow);
            let t = localizer(dashboard.context());
            match action {
                HistoryAction::List { filter } => {
                    let listed = dashboard.history().list(filter);
                    if listed.is_empty() {
                        println!("{}", t.t("history.empty"));
                    }
                    for (index, entry) in listed {
                        print_history_entry(&t, Some(index), entry);
                    }
                }
                HistoryAction::Remove { index } => {
                    if dashboard.remove_history(index) {
                        println!("{}", t.t("history.deleted"));
                    } else {
                        return Err(AppError::Validation(format!("no history entry at index {}", index)));
                    }
                }
                HistoryAction::Stats => {
                    let stats = dashboard.history().stats();
                    println!("{}: {}", t.t("history.total"), stats.total);
                    println!("{}: {}", t.t("history.filter.auto"), stats.auto);
                    println!("{}: {}", t.t("history.filter.manual"), stats.manual);
                    if let Some(crop) = stats.most_recommended {
                        println!("{}: {}", t.t("history.mostrecommended"), t.crop_name(&crop));
                    }
                }
                HistoryAction::Sync => {
                    let view = dashboard.sync_history().await;
                    let source = match view.origin {
                        HistoryOrigin::Remote => "server",
                        HistoryOrigin::Local => "this device",
                    };
                    println!("{} ({}): {}", t.t("history.title"), source, view.entries.len());
                    // Only local entries can be removed by index
                    for (index, entry) in view.entries.iter().enumerate() {
                        let index = (view.origin == HistoryOrigin::Local).then_some(index);
                        print_history_entry(&t, index, entry);
                    }
                }
            }
        }

        Command::Language { language } => {
            let flow = LocationFlow::new(FixedPositionProvider::unsupported(), config.location.position_options());
            let mut dashboard = DashboardService::new(backend, store, flow);
            if let Some(language) = language {
                dashboard.set_language(language);
            }
            let current = dashboard.context().language();
            println!(
                "{}: {} ({})",
                Localizer::new(current).t("settings.language"),
                current.native_name(),
                current.code()
            );
        }

        Command::Translate { text, to } => {
            let ctx = load_context(store);
            let target = to.or(language_override).unwrap_or_else(|| ctx.language());
            let translated = backend.translation_client().translate(&text, target).await;
            println!("{}", translated);
        }

        Command::Community { action } => {
            let t = localizer(&load_context(store));
            let service = CommunityService::new(backend);
            match action {
                CommunityAction::List => {
                    let posts = service.list_posts().await?;
                    if posts.is_empty() {
                        println!("{}", t.t("community.nopostsyet"));
                    }
                    for post in posts {
                        println!("[{}] {} · {} · {}", post.kind, post.title, post.author, post.date);
                        println!("    {}", post.preview);
                        println!("    👍 {}  💬 {}", post.likes, post.comments);
                    }
                }
                CommunityAction::Post { author, title, content } => {
                    let post_id = service
                        .create_post(&NewCommunityPost { author, title, content })
                        .await?;
                    println!("{} ({})", t.t("community.posted"), post_id);
                }
            }
        }

        Command::Feedback {
            name,
            email,
            feedback_type,
            rating,
            private,
            message,
        } => {
            let t = localizer(&load_context(store));
            let submission = FeedbackSubmission {
                name,
                email,
                feedback_type,
                message,
                rating,
                show_in_community: !private,
            };
            let response = FeedbackService::new(backend).submit(&submission).await?;
            println!("{}", t.t("feedback.thankyou"));
            if response.posted_to_community {
                println!("{}", t.t("feedback.postedtocommunity"));
            }
        }

        Command::Profile { action } => {
            let ctx = load_context(store);
            let t = localizer(&ctx);
            let service = ProfileService::new(backend);
            let mut profile = service.load(ctx.user_id()).await?;
            match action {
                ProfileAction::Show => {}
                ProfileAction::Save {
                    name,
                    email,
                    phone,
                    location,
                    farm_size,
                    farm_type,
                } => {
                    profile.name = name.unwrap_or(profile.name);
                    profile.email = email.unwrap_or(profile.email);
                    profile.phone = phone.unwrap_or(profile.phone);
                    profile.location = location.unwrap_or(profile.location);
                    profile.farm_size = farm_size.unwrap_or(profile.farm_size);
                    profile.farm_type = farm_type.unwrap_or(profile.farm_type);
                    profile.preferred_language = ctx.language();
                    service.save(&profile).await?;
                    println!("{}", t.t("profile.saved"));
                }
            }
            println!("{}: {}", t.t("profile.name"), profile.name);
            println!("{}: {}", t.t("profile.email"), profile.email);
            println!("{}: {}", t.t("profile.phone"), profile.phone);
            println!("{}: {}", t.t("profile.location"), profile.location);
            println!("{}: {}", t.t("profile.farmSize"), profile.farm_size);
            println!("{}: {}", t.t("profile.farmType"), profile.farm_type);
        }

        Command::Tutorials => {
            let t = localizer(&load_context(store));
            println!("{}", t.t("tutorials.title"));
            for tutorial in tutorials() {
                println!(
                    "{} {} ({}) - {}",
                    tutorial.thumbnail, tutorial.title, tutorial.duration, tutorial.description
                );
            }
        }

        Command::Chat { message } => {
            let mut bot = ChatbotService::new();
            println!("🤖 {}", bot.greeting());
            if let Some(reply) = message.as_deref().and_then(|m| bot.reply(m)) {
                println!("🤖 {}", reply);
            }
        }

        Command::Login {
            email,
            password,
            confirm,
        } => {
            let mut ctx = load_context(store);
            let t = localizer(&ctx);
            let credentials = match &confirm {
                Some(confirm) => Credentials::sign_up(&email, &password, confirm),
                None => Credentials::sign_in(&email, &password),
            };
            let user = ctx.login(&credentials)?;
            let key = if confirm.is_some() { "auth.signup.success" } else { "auth.signin.success" };
            println!("{} ({})", t.t(key), user.name);
        }

        Command::Logout => {
            let mut ctx = load_context(store);
            let t = localizer(&ctx);
            ctx.logout()?;
            println!("{}", t.t("auth.logout.success"));
        }

        Command::Theme { theme, toggle } => {
            let mut ctx = load_context(store);
            let t = localizer(&ctx);
            let next = if toggle { Some(ctx.theme().toggled()) } else { theme };
            if let Some(next) = next {
                ctx.set_theme(next)?;
            }
            println!("{}: {}", t.t("settings.theme"), t.t(&format!("settings.theme.{}", ctx.theme().code())));
        }
    }

    Ok(())
}

/// Load preferences, logging a user id that could not be stored
fn load_context(store: FileStore) -> AppContext<FileStore> {
    let ctx = AppContext::load(store);
    if let Some(e) = ctx.startup_error() {
        tracing::warn!("Could not persist user id: {}", e);
    }
    ctx
}

/// Build manual inputs from a preset overlaid with explicit values
fn manual_inputs(args: &ManualArgs) -> AppResult<SoilInputs> {
    let base = args.preset.map(|p| p.inputs());

    let field = |raw: &Option<String>, preset: Option<f64>, name: &str| -> AppResult<f64> {
        match (raw, preset) {
            (Some(raw), _) => parse_measurement(raw)
                .map_err(|e| AppError::Validation(format!("{}: {}", name, e))),
            (None, Some(value)) => Ok(value),
            (None, None) => Err(AppError::Validation(format!("{} is required", name))),
        }
    };

    Ok(SoilInputs {
        nitrogen: field(&args.nitrogen, base.as_ref().map(|b| b.nitrogen), "nitrogen")?,
        phosphorus: field(&args.phosphorus, base.as_ref().map(|b| b.phosphorus), "phosphorus")?,
        potassium: field(&args.potassium, base.as_ref().map(|b| b.potassium), "potassium")?,
        temperature: field(&args.temperature, base.as_ref().map(|b| b.temperature), "temperature")?,
        humidity: field(&args.humidity, base.as_ref().map(|b| b.humidity), "humidity")?,
        ph: field(&args.ph, base.as_ref().map(|b| b.ph), "ph")?,
        rainfall: field(&args.rainfall, base.as_ref().map(|b| b.rainfall), "rainfall")?,
    })
}

fn print_results(t: &Localizer, results: &RecommendationSet) {
    if results.is_empty() {
        println!("{}", t.t("dashboard.recommendations.empty"));
        return;
    }
    println!("{}", t.t("dashboard.recommendations.success"));
    println!("\n{}", t.t("dashboard.recommendations.title"));
    for (rank, crop) in results.items.iter().enumerate() {
        println!("{}. {} {} ({}%)", rank + 1, crop.emoji, crop.name, crop.suitability);
        println!("   {}: {}", t.t("results.price"), crop.price);
        println!("   {}: {}", t.t("results.reason"), crop.reason);
    }
}

fn print_history_entry(t: &Localizer, index: Option<usize>, entry: &HistoryEntry) {
    let source = match &entry.source {
        HistorySource::Location { label, .. } => format!("📍 {}", label),
        HistorySource::Manual { inputs: Some(inputs) } => format!(
            "✏️ N {} P {} K {}, {}°C, {}%, pH {}, {} mm",
            inputs.nitrogen,
            inputs.phosphorus,
            inputs.potassium,
            inputs.temperature,
            inputs.humidity,
            inputs.ph,
            inputs.rainfall
        ),
        HistorySource::Manual { inputs: None } => "✏️".to_string(),
    };
    let crops: Vec<String> = entry
        .crops
        .iter()
        .map(|c| format!("{} {} {}%", c.emoji, t.crop_name(&c.original_name), c.suitability))
        .collect();
    let index = index.map_or_else(|| "-".to_string(), |i| i.to_string());
    println!(
        "[{}] {} {} {}",
        index,
        entry.timestamp.format("%b %-d, %Y %H:%M"),
        source,
        crops.join(", ")
    );
}
