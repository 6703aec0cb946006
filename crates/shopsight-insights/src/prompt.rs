//! Prompt construction for the two analysis flavors.
//!
//! Both prompts pin the model to a strict JSON section format so the
//! response can be deserialized into the typed section structs.

/// Dashboard-wide analysis prompt. `snapshot_json` is the pretty-printed
/// [`crate::DashboardSnapshot`].
pub(crate) fn dashboard_prompt(snapshot_json: &str) -> String {
    format!(
        "You are a professional e-commerce data analyst. Provide a concise, \
         insightful analysis of the provided dashboard data. The user has \
         applied some filters, and this is the resulting dataset.\n\n\
         **Dashboard Data Summary:**\n{snapshot_json}\n\n\
         **Your Analysis (strictly follow this JSON format and use Markdown \
         for formatting within strings):**\n\
         {{\n\
         \"trends\": \"Identify 1-2 key trends from the data. What patterns are emerging?\",\n\
         \"recommendations\": \"Provide 1-2 actionable business recommendations based on your analysis.\",\n\
         \"anomalies\": \"Point out any surprising or unusual data points that might require further investigation.\",\n\
         \"opportunities\": \"Highlight 1-2 potential opportunities for business growth or optimization.\"\n\
         }}\n"
    )
}

/// Per-category analysis prompt. `category_json` is the pretty-printed
/// [`shopsight_core::CategoryHealth`].
pub(crate) fn category_prompt(category_json: &str) -> String {
    format!(
        "You are an expert e-commerce strategist. Analyze the following \
         category data and provide actionable insights.\n\n\
         **Category Data:**\n{category_json}\n\n\
         Based on this data, provide a concise analysis in the following \
         JSON format. Use Markdown for formatting within the strings.\n\
         {{\n\
         \"pricing_strategy\": \"Is this category overpriced, underpriced, or well-priced? Suggest a pricing adjustment if necessary.\",\n\
         \"market_positioning\": \"Describe the market position. Is it premium, budget, or mid-range? Are there competitive gaps or opportunities?\",\n\
         \"inventory_optimization\": \"Based on its health score and metrics, should we expand, reduce, or maintain inventory for this category?\",\n\
         \"growth_opportunities\": \"Identify one key growth opportunity for this category. Be specific and actionable.\"\n\
         }}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_prompt_embeds_snapshot() {
        let prompt = dashboard_prompt(r#"{"total_products": 42}"#);
        assert!(prompt.contains(r#""total_products": 42"#));
        assert!(prompt.contains("\"trends\""));
        assert!(prompt.contains("\"opportunities\""));
    }

    #[test]
    fn category_prompt_names_all_sections() {
        let prompt = category_prompt("{}");
        for section in [
            "pricing_strategy",
            "market_positioning",
            "inventory_optimization",
            "growth_opportunities",
        ] {
            assert!(prompt.contains(section), "missing section {section}");
        }
    }
}
