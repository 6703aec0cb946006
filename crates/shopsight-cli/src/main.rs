use clap::{Parser, Subcommand, ValueEnum};
use shopsight_analytics::{aggregate, apply, kpis, score, sort_products, top_expensive, SortKey};
use shopsight_core::{AppConfig, FilterView};
use shopsight_ingest::{CatalogStore, DirectorySource};
use shopsight_insights::{
    CategoryInsights, DashboardInsights, DashboardSnapshot, InsightsClient, InsightsSession,
    CATEGORY_FAILURE_MESSAGE, DASHBOARD_FAILURE_MESSAGE,
};

mod report;

#[derive(Debug, Parser)]
#[command(name = "shopsight-cli")]
#[command(about = "Catalog analytics command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print dashboard KPIs and category health scores.
    Report,
    /// List products under the given filters.
    Products {
        /// Case-insensitive title search.
        #[arg(long)]
        search: Option<String>,
        /// Restrict to these categories (repeatable).
        #[arg(long)]
        category: Vec<String>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        #[arg(long)]
        discounts_only: bool,
        #[arg(long, value_enum, default_value_t = SortArg::Default)]
        sort: SortArg,
        /// Maximum number of products to print.
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Generate AI insights for the dashboard, or one category with
    /// `--category`.
    Insights {
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Default,
    PriceAsc,
    PriceDesc,
    DiscountDesc,
    NameAsc,
    ColorsDesc,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Default => SortKey::Default,
            SortArg::PriceAsc => SortKey::PriceAsc,
            SortArg::PriceDesc => SortKey::PriceDesc,
            SortArg::DiscountDesc => SortKey::DiscountDesc,
            SortArg::NameAsc => SortKey::NameAsc,
            SortArg::ColorsDesc => SortKey::ColorsDesc,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = shopsight_core::load_app_config_from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Report => run_report(&config).await,
        Commands::Products {
            search,
            category,
            min_price,
            max_price,
            discounts_only,
            sort,
            limit,
        } => {
            run_products(
                &config,
                search,
                category,
                min_price,
                max_price,
                discounts_only,
                sort,
                limit,
            )
            .await
        }
        Commands::Insights { category } => run_insights(&config, category.as_deref()).await,
    }
}

async fn load_catalog(config: &AppConfig) -> CatalogStore {
    let store = CatalogStore::new();
    let source = DirectorySource::new(config.data_dir.clone());
    let count = store.load(source, &config.source_prefix).await;
    tracing::info!(count, "catalog loaded");
    store
}

async fn run_report(config: &AppConfig) -> anyhow::Result<()> {
    let store = load_catalog(config).await;
    let products = store.products();
    let filters = store.filters();

    let filtered = apply(&products, &filters);
    let summary = kpis(&filtered);
    let scores = score(&aggregate(&filtered));

    if let Some(loaded_at) = store.loaded_at() {
        println!("Catalog loaded at {loaded_at}\n");
    }
    println!("{}", report::kpi_block(&summary, &filters));
    println!("{}", report::health_table(&scores));
    println!("Top 10 most expensive products:");
    println!("{}", report::product_lines(&top_expensive(&filtered, 10)));
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn run_products(
    config: &AppConfig,
    search: Option<String>,
    categories: Vec<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    discounts_only: bool,
    sort: SortArg,
    limit: usize,
) -> anyhow::Result<()> {
    let store = load_catalog(config).await;

    if let Some(query) = search {
        store.set_search_query(query);
    }
    for category in &categories {
        store.toggle_category(category);
    }
    if min_price.is_some() || max_price.is_some() {
        let full_max = store.filters().max_observed_price;
        store.set_price_range(min_price.unwrap_or(0.0), max_price.unwrap_or(full_max));
    }
    store.set_discounts_only(discounts_only);

    let products = store.products();
    let filters = store.filters();
    let filtered = apply(&products, &filters);
    let sorted = sort_products(&filtered, sort.into());
    let shown = sorted.len().min(limit);

    println!("{}", report::product_lines(&sorted[..shown]));
    println!(
        "{shown} of {} products shown ({} filters active)",
        filtered.len(),
        filters.active_filter_count(FilterView::Explorer)
    );
    Ok(())
}

async fn run_insights(config: &AppConfig, category: Option<&str>) -> anyhow::Result<()> {
    let store = load_catalog(config).await;
    let products = store.products();
    let filters = store.filters();
    let filtered = apply(&products, &filters);

    let session = match InsightsClient::from_app_config(config) {
        Ok(client) => Some(InsightsSession::new(
            client,
            config.insights_max_retries,
            config.insights_retry_backoff_base_ms,
        )),
        Err(e) => {
            tracing::error!(error = %e, "insights client unavailable");
            None
        }
    };

    match category {
        Some(name) => {
            let scores = score(&aggregate(&filtered));
            let Some(selected) = scores.into_iter().find(|h| h.name == name) else {
                anyhow::bail!("category '{name}' not found in catalog");
            };
            let insights = match &session {
                Some(session) => {
                    let token = session.begin_category_request();
                    session
                        .fetch_category(token, &selected)
                        .await
                        .unwrap_or_else(|| CategoryInsights::failure(CATEGORY_FAILURE_MESSAGE))
                }
                None => CategoryInsights::failure(CATEGORY_FAILURE_MESSAGE),
            };
            println!("{}", report::category_sections(&insights));
        }
        None => {
            let snapshot = DashboardSnapshot {
                kpis: kpis(&filtered),
                category_stats: aggregate(&filtered).into_iter().take(5).collect(),
                top_products: top_expensive(&filtered, 5),
            };
            let insights = match &session {
                Some(session) => {
                    let token = session.begin_dashboard_request();
                    session
                        .fetch_dashboard(token, &snapshot)
                        .await
                        .unwrap_or_else(|| DashboardInsights::failure(DASHBOARD_FAILURE_MESSAGE))
                }
                None => DashboardInsights::failure(DASHBOARD_FAILURE_MESSAGE),
            };
            println!("{}", report::dashboard_sections(&insights));
        }
    }
    Ok(())
}
