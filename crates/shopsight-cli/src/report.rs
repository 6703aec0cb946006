//! Plain-text rendering of KPIs, health tables, and insight sections.

use shopsight_core::{CategoryHealth, FilterState, FilterView, KpiSummary, Product};
use shopsight_insights::{CategoryInsights, DashboardInsights};

/// Renders the dashboard KPI block.
pub fn kpi_block(kpis: &KpiSummary, filters: &FilterState) -> String {
    format!(
        "Products: {}\n\
         Average price: ${:.2}\n\
         Categories: {}\n\
         Average discount: {:.2}%\n\
         Discounted products: {}\n\
         Average colors per product: {:.1}\n\
         Active filters: {}\n",
        kpis.total_products,
        kpis.average_price,
        kpis.total_categories,
        kpis.average_discount,
        kpis.discounted_products,
        kpis.avg_colors,
        filters.active_filter_count(FilterView::Dashboard),
    )
}

/// Renders the scored categories as an aligned table, best first.
pub fn health_table(scores: &[CategoryHealth]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<30} {:>8} {:>10} {:>10} {:>8} {:>7} {:>8}\n",
        "Category", "Products", "Avg price", "Discount", "Colors", "Score", "Band"
    ));
    for health in scores {
        out.push_str(&format!(
            "{:<30} {:>8} {:>10.2} {:>9.2}% {:>8.1} {:>7} {:>8}\n",
            health.name,
            health.product_count,
            health.avg_price,
            health.avg_discount,
            health.avg_colors,
            health.health_score,
            health.band(),
        ));
    }
    out
}

/// Renders one product per line for the explorer listing.
pub fn product_lines(products: &[Product]) -> String {
    let mut out = String::new();
    for product in products {
        let discount = if product.is_discounted() {
            format!("  -{:.0}%", product.discount_value)
        } else {
            String::new()
        };
        out.push_str(&format!(
            "{:<60.60} {:>10} {:>9.2}{}\n",
            product.title, product.category, product.price, discount
        ));
    }
    out
}

/// Renders the dashboard analysis sections.
pub fn dashboard_sections(insights: &DashboardInsights) -> String {
    [
        ("Trends", &insights.trends),
        ("Recommendations", &insights.recommendations),
        ("Anomalies", &insights.anomalies),
        ("Opportunities", &insights.opportunities),
    ]
    .iter()
    .filter(|(_, body)| !body.is_empty())
    .map(|(title, body)| format!("## {title}\n{body}\n"))
    .collect()
}

/// Renders the per-category insight sections, or the error placeholder.
pub fn category_sections(insights: &CategoryInsights) -> String {
    if let Some(error) = &insights.error {
        return format!("## Error\n{error}\n");
    }
    [
        ("Pricing strategy", &insights.pricing_strategy),
        ("Market positioning", &insights.market_positioning),
        ("Inventory optimization", &insights.inventory_optimization),
        ("Growth opportunities", &insights.growth_opportunities),
    ]
    .iter()
    .filter(|(_, body)| !body.is_empty())
    .map(|(title, body)| format!("## {title}\n{body}\n"))
    .collect()
}
