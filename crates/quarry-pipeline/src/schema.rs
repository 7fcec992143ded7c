//! The fixed business schema the pipeline queries.

/// A table and its columns.
#[derive(Clone, Copy, Debug)]
pub struct TableSpec {
    /// Table name.
    pub name: &'static str,
    /// Column names in declaration order.
    pub columns: &'static [&'static str],
}

/// The closed set of queryable tables.
pub const TABLES: &[TableSpec] = &[
    TableSpec {
        name: "sales",
        columns: &[
            "transaction_id", "revenue", "date", "region", "product", "customer_id", "discount",
            "quantity", "unit_price", "tax",
        ],
    },
    TableSpec {
        name: "customers",
        columns: &[
            "customer_id", "name", "email", "country", "signup_date", "loyalty_tier",
            "total_spend", "acquisition_channel", "last_login", "age",
        ],
    },
    TableSpec {
        name: "products",
        columns: &[
            "product_id", "name", "category", "base_price", "production_cost", "stock_level",
            "release_date", "rating", "returns_count", "shelf_life_days",
        ],
    },
    TableSpec {
        name: "regions",
        columns: &[
            "region_id", "name", "manager", "budget_allocated", "target_revenue", "active_reps",
            "population_coverage", "office_count", "tax_rate", "seasonality_factor",
        ],
    },
    TableSpec {
        name: "marketing",
        columns: &[
            "campaign_id", "name", "channel", "spend", "clicks", "conversions", "date",
            "impressions", "roi", "manager_id", "region",
        ],
    },
    TableSpec {
        name: "subscriptions",
        columns: &[
            "sub_id", "customer_id", "plan_name", "monthly_price", "start_date", "expiry_date",
            "status", "renewal_count", "churn_reason", "auto_renew",
        ],
    },
    TableSpec {
        name: "support_tickets",
        columns: &[
            "ticket_id", "customer_id", "issue_type", "priority", "status", "created_date",
            "resolved_date", "agent_name", "resolution_time_hrs", "customer_satisfaction",
        ],
    },
    TableSpec {
        name: "inventory",
        columns: &[
            "entry_id", "product_id", "warehouse_location", "quantity_on_hand", "reorder_point",
            "supplier_name", "last_restock_date", "unit_weight", "storage_cost", "bin_number",
        ],
    },
    TableSpec {
        name: "employee_performance",
        columns: &[
            "emp_id", "name", "role", "department", "quota", "actual_sales", "bonus_percentage",
            "join_date", "training_completed", "review_score",
        ],
    },
    TableSpec {
        name: "website_traffic",
        columns: &[
            "traffic_id", "date", "sessions", "users", "bounce_rate", "avg_session_duration",
            "pageviews_per_session", "conversion_rate", "device_type", "traffic_source",
        ],
    },
    TableSpec {
        name: "expenses",
        columns: &[
            "expense_id", "category", "amount", "date", "department_id", "vendor_name",
            "payment_method", "tax_deductible", "approval_status", "description",
        ],
    },
    TableSpec {
        name: "competitor_metrics",
        columns: &[
            "comp_id", "competitor_name", "product_name", "market_price", "market_share",
            "rating", "year", "tech_score", "region", "ad_spend_estimate",
        ],
    },
    TableSpec {
        name: "churn_analysis",
        columns: &[
            "churn_id", "customer_id", "churn_date", "primary_reason", "secondary_reason",
            "retention_offered", "feedback_score", "account_age_months", "switch_to_competitor",
            "refund_granted",
        ],
    },
    TableSpec {
        name: "product_reviews",
        columns: &[
            "review_id", "product_id", "customer_id", "rating", "review_date", "sentiment_score",
            "verified_purchase", "helpful_votes", "review_length", "platform",
        ],
    },
    TableSpec {
        name: "operating_budget",
        columns: &[
            "budget_id", "year", "quarter", "department", "allocated_budget", "actual_spend",
            "variance", "approved_by", "last_updated", "notes",
        ],
    },
];

/// Whether `name` is one of the queryable tables (exact, case-sensitive).
pub fn is_known_table(name: &str) -> bool {
    TABLES.iter().any(|t| t.name == name)
}

/// Comma-separated table names, for prompts.
pub fn table_list() -> String {
    TABLES.iter().map(|t| t.name).collect::<Vec<_>>().join(", ")
}

/// Numbered `table: col, col, ...` lines, for prompts.
pub fn describe() -> String {
    TABLES
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}. {}: {}", i + 1, t.name, t.columns.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}
