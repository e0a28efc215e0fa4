use anyhow::{Context, Result, anyhow};
use catalog::config::load_or_default;
use catalog::{AiTool, Language, LearningPlan, LearningResource, RankingConfig, Resource};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use linkcheck::{UrlKind, validate_urls};
use pipeline::filters::{DuplicateLinkFilter, LanguageFilter};
use pipeline::{ResourceRanker, ResourceScorer};
use planner::{PlanOrchestrator, PlanStore, RequestKind, SaveOutcome, StaticSource};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// learnpath - learning plan and resource ranking toolkit
#[derive(Parser)]
#[command(name = "learnpath")]
#[command(
    about = "Validate, score and rank learning resources and AI tool recommendations",
    long_about = None
)]
struct Cli {
    /// Ranking configuration (TOML); built-in defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate links and print their fixed form
    Check {
        /// Links to check
        #[arg(required = true)]
        urls: Vec<String>,

        /// Check as YouTube channel links instead of learning platform links
        #[arg(long)]
        youtube: bool,
    },

    /// Score and rank resources from a JSON file of `{url, metadata}` entries
    Rank {
        /// JSON file holding an array of resources
        #[arg(long)]
        input: PathBuf,

        /// Keep only resources in this language
        #[arg(long, value_enum)]
        language: Option<LanguageArg>,

        /// Collapse resources pointing at the same link
        #[arg(long)]
        dedup: bool,

        /// Number of resources to show
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Show the score breakdown for each resource
        #[arg(long)]
        explain: bool,
    },

    /// Build a ranked learning plan from a saved model response
    Plan {
        /// Topic the plan is for
        #[arg(long)]
        topic: String,

        /// File holding the raw model response (API envelope or plain text)
        #[arg(long)]
        response: PathBuf,

        /// Save the plan for `--user`
        #[arg(long, requires = "user")]
        save: bool,

        /// User the plan is saved for
        #[arg(long)]
        user: Option<String>,

        /// Plan store file
        #[arg(long, default_value = "learnpath-plans.json")]
        store: PathBuf,
    },

    /// Rank AI tool recommendations from a saved model response
    Tools {
        /// The search query the tools were recommended for
        #[arg(long)]
        query: String,

        /// File holding the raw model response
        #[arg(long)]
        response: PathBuf,
    },

    /// Manage saved plans
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },
}

#[derive(Subcommand)]
enum SavedAction {
    /// List a user's saved plans
    List {
        #[arg(long)]
        user: String,

        #[arg(long, default_value = "learnpath-plans.json")]
        store: PathBuf,
    },

    /// Delete one saved plan
    Delete {
        #[arg(long)]
        user: String,

        /// Plan id, as shown by `saved list`
        #[arg(long)]
        id: String,

        #[arg(long, default_value = "learnpath-plans.json")]
        store: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LanguageArg {
    Arabic,
    English,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Arabic => Language::Arabic,
            LanguageArg::English => Language::English,
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = load_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load config from {}", path.display()),
        None => "Failed to build default config".to_string(),
    })?;
    tracing::debug!(
        "Using {} trusted platforms, cache TTL {}s",
        config.platforms.len(),
        config.cache_ttl_secs
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Check { urls, youtube } => handle_check(&config, &urls, youtube)?,
        Commands::Rank {
            input,
            language,
            dedup,
            limit,
            explain,
        } => handle_rank(&config, &input, language, dedup, limit, explain)?,
        Commands::Plan {
            topic,
            response,
            save,
            user,
            store,
        } => handle_plan(&config, &topic, &response, save.then_some(user).flatten(), &store)?,
        Commands::Tools { query, response } => handle_tools(&config, &query, &response)?,
        Commands::Saved { action } => handle_saved(action)?,
    }

    Ok(())
}

/// Handle the 'check' command
fn handle_check(config: &RankingConfig, urls: &[String], youtube: bool) -> Result<()> {
    let table = config.platform_table()?;
    let kind = if youtube {
        UrlKind::Youtube
    } else {
        UrlKind::LearningPlatform
    };

    let checks = validate_urls(urls, kind, &table);
    for (raw, check) in urls.iter().zip(&checks) {
        if check.is_valid {
            println!("{} {} -> {}", "✓".green(), raw, check.fixed_url);
        } else {
            println!("{} {}", "✗".red(), raw);
        }
    }

    let valid = checks.iter().filter(|c| c.is_valid).count();
    println!("{}", format!("{valid}/{} links valid", checks.len()).bold());
    Ok(())
}

/// Handle the 'rank' command
fn handle_rank(
    config: &RankingConfig,
    input: &Path,
    language: Option<LanguageArg>,
    dedup: bool,
    limit: usize,
    explain: bool,
) -> Result<()> {
    let data = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let resources: Vec<Resource> = serde_json::from_str(&data)
        .with_context(|| format!("{} is not a JSON array of resources", input.display()))?;

    let scorer = ResourceScorer::new(Arc::new(config.platform_table()?), config.scoring);
    let mut ranker = ResourceRanker::new(scorer);
    if let Some(language) = language {
        ranker = ranker.with_filter(LanguageFilter::new(language.into()));
    }
    if dedup {
        ranker = ranker.with_filter(DuplicateLinkFilter);
    }

    let start = Instant::now();
    let total = resources.len();
    let ranked = ranker.top(resources, limit);
    println!(
        "{} Ranked {} of {} resources in {:?}",
        "✓".green(),
        ranked.len(),
        total,
        start.elapsed()
    );

    print!("{}", "Top Resources:\n".bold().blue());
    for (i, resource) in ranked.iter().enumerate() {
        println!(
            "{}. {} [{:?}] - Score: {:.2}",
            (i + 1).to_string().green(),
            resource.metadata.title,
            resource.metadata.kind,
            resource.score
        );
        println!("   {}", resource.url.dimmed());
        if explain {
            if let Some(b) = ranker.scorer().breakdown(&resource.url, &resource.metadata) {
                println!(
                    "   {}: base {:.2} + language {:.2} + rating {:.2} + topics {:.2}",
                    b.platform, b.base, b.language_bonus, b.rating_bonus, b.topic_bonus
                );
            }
        }
    }
    Ok(())
}

/// Handle the 'plan' command
fn handle_plan(
    config: &RankingConfig,
    topic: &str,
    response: &Path,
    save_for: Option<String>,
    store: &Path,
) -> Result<()> {
    let orchestrator = orchestrator_for(config, RequestKind::Plan, response)?;
    let plan = orchestrator.generate_plan(topic)?;
    print_plan(&plan);

    if let Some(user) = save_for {
        let outcome = PlanStore::new(store).save(&user, &plan)?;
        let verb = match outcome {
            SaveOutcome::Inserted => "Saved",
            SaveOutcome::Updated => "Updated",
        };
        println!(
            "{} {} plan {} for {} in {}",
            "✓".green(),
            verb,
            plan.id,
            user,
            store.display()
        );
    }
    Ok(())
}

/// Handle the 'tools' command
fn handle_tools(config: &RankingConfig, query: &str, response: &Path) -> Result<()> {
    let orchestrator = orchestrator_for(config, RequestKind::Tools, response)?;
    let tools = orchestrator.search_tools(query)?;
    if tools.is_empty() {
        println!("{}", "No tools found".yellow());
        return Ok(());
    }
    print_tools(&tools);
    Ok(())
}

/// Handle the 'saved' command
fn handle_saved(action: SavedAction) -> Result<()> {
    match action {
        SavedAction::List { user, store } => {
            let plans = PlanStore::new(&store).list(&user)?;
            if plans.is_empty() {
                println!("{}", format!("No saved plans for {user}").yellow());
                return Ok(());
            }
            println!("{}", format!("Saved plans for {user}:").bold().blue());
            for plan in &plans {
                println!(
                    "  {} {} ({} resources, {})",
                    plan.id.green(),
                    plan.topic,
                    plan.resource_count(),
                    plan.created_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        SavedAction::Delete { user, id, store } => {
            if !PlanStore::new(&store).delete(&user, &id)? {
                return Err(anyhow!("Plan {} not found for user {}", id, user));
            }
            println!("{} Deleted plan {}", "✓".green(), id);
        }
    }
    Ok(())
}

/// Orchestrator answering `kind` requests with the contents of `response`
fn orchestrator_for(
    config: &RankingConfig,
    kind: RequestKind,
    response: &Path,
) -> Result<PlanOrchestrator> {
    let body = fs::read_to_string(response)
        .with_context(|| format!("Failed to read model response {}", response.display()))?;
    let source = StaticSource::new().with_response(kind, body);
    PlanOrchestrator::from_config(Arc::new(source), config)
}

fn print_plan(plan: &LearningPlan) {
    println!("{}", format!("Learning plan: {}", plan.topic).bold().blue());
    for path in plan.paths.iter() {
        println!("\n{}", path.level.to_string().to_uppercase().bold());
        if !path.description.is_empty() {
            println!("  {}", path.description);
        }
        for (i, step) in path.steps.iter().enumerate() {
            println!("  {}. {}", i + 1, step);
        }
        print_resources("YouTube", &path.youtube);
        print_resources("Courses", &path.courses);
    }
}

fn print_resources(heading: &str, resources: &[LearningResource]) {
    if resources.is_empty() {
        return;
    }
    println!("  {}", heading.cyan());
    for resource in resources {
        println!(
            "    {} {} - Score: {:.2}",
            "•".green(),
            resource.title,
            resource.score.unwrap_or(0.0)
        );
        println!("      {}", resource.url.dimmed());
    }
}

fn print_tools(tools: &[AiTool]) {
    print!("{}", "Recommended Tools:\n".bold().blue());
    for (i, tool) in tools.iter().enumerate() {
        let rating = tool
            .rating
            .map(|r| format!("{r:.1}"))
            .unwrap_or_else(|| "-".to_string());
        let mut line = format!(
            "{}. {} ({:?}, rating {})",
            (i + 1).to_string().green(),
            tool.name,
            tool.pricing,
            rating
        );
        if tool.recommended {
            line.push_str(&format!(" {}", "recommended".yellow()));
        }
        if tool.arabic_support {
            line.push_str(" [ar]");
        }
        println!("{line}");
        if !tool.url.is_empty() {
            println!("   {}", tool.url.dimmed());
        }
    }
}
