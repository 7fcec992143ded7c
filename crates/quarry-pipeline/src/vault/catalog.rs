//! Built-in catalog of pre-validated questions.

use super::CatalogEntry;

/// The curated questions, grouped by business area.
pub(super) const BUILTIN: &[CatalogEntry] = &[
    // ── Finance & Strategy ────────────────────────────────────────────────
    CatalogEntry {
        question: "Compare allocated budget vs actual spend by department for all quarters of 2025.",
        query: "SELECT department, year, quarter, SUM(allocated_budget) as total_budget, SUM(actual_spend) as total_actual FROM operating_budget WHERE year = 2025 GROUP BY department, quarter",
        entities: &["operating_budget"],
    },
    CatalogEntry {
        question: "Which departments have the highest total expenses across 2024 and 2025?",
        query: "SELECT department_id, SUM(amount) as total_expenses FROM expenses WHERE date BETWEEN '2024-01-01' AND '2025-12-31' GROUP BY department_id ORDER BY total_expenses DESC",
        entities: &["expenses"],
    },
    CatalogEntry {
        question: "What is the total projected revenue for each month in 2026 based on current sales?",
        query: "SELECT strftime('%Y-%m', date) as month, SUM(revenue) * 1.15 as projected_revenue FROM sales WHERE date LIKE '2026%' GROUP BY month ORDER BY month",
        entities: &["sales"],
    },
    CatalogEntry {
        question: "Show me departments where actual spend exceeded the budget by more than 10%.",
        query: "SELECT department, year, quarter, allocated_budget, actual_spend, ((actual_spend - allocated_budget)/allocated_budget)*100 as variance_pct FROM operating_budget WHERE actual_spend > (allocated_budget * 1.10)",
        entities: &["operating_budget"],
    },
    CatalogEntry {
        question: "Break down total operating expenses by category for the last 12 months.",
        query: "SELECT category, SUM(amount) as total_amount FROM expenses WHERE date >= date('now', '-12 months') GROUP BY category ORDER BY total_amount DESC",
        entities: &["expenses"],
    },
    CatalogEntry {
        question: "Calculate regional ROI by comparing marketing spend vs sales revenue for each region.",
        query: "SELECT m.region, (SUM(s.revenue) / SUM(m.spend)) as regional_ROI, SUM(m.spend) as total_marketing_spend, SUM(s.revenue) as total_sales_revenue FROM marketing m JOIN sales s ON m.region = s.region WHERE m.date BETWEEN '2024-01-01' AND '2025-12-31' AND s.date BETWEEN '2024-01-01' AND '2025-12-31' GROUP BY m.region",
        entities: &["marketing", "sales"],
    },
    // ── CRM & Retention ───────────────────────────────────────────────────
    CatalogEntry {
        question: "What are the top 3 reasons for customer churn in the last year?",
        query: "SELECT primary_reason, COUNT(*) as churn_count FROM churn_analysis WHERE churn_date >= date('now', '-1 year') GROUP BY primary_reason ORDER BY churn_count DESC LIMIT 3",
        entities: &["churn_analysis"],
    },
    CatalogEntry {
        question: "Show me the count of active vs canceled subscriptions across all plans.",
        query: "SELECT plan_name, status, COUNT(*) as count FROM subscriptions GROUP BY plan_name, status",
        entities: &["subscriptions"],
    },
    CatalogEntry {
        question: "Which loyalty tier (Gold/Silver/Bronze) has the highest total lifetime spend?",
        query: "SELECT loyalty_tier, SUM(total_spend) as lifetime_spend FROM customers GROUP BY loyalty_tier ORDER BY lifetime_spend DESC",
        entities: &["customers"],
    },
    CatalogEntry {
        question: "Show a monthly trend of new customer signups from 2023 to 2025.",
        query: "SELECT strftime('%Y-%m', signup_date) as month, COUNT(*) as signups FROM customers WHERE signup_date BETWEEN '2023-01-01' AND '2025-12-31' GROUP BY month ORDER BY month",
        entities: &["customers"],
    },
    CatalogEntry {
        question: "Compare the total spend of customers acquired through Google Ads vs Referrals.",
        query: "SELECT acquisition_channel, SUM(total_spend) as total_revenue FROM customers WHERE acquisition_channel IN ('GAds', 'Referral') GROUP BY acquisition_channel",
        entities: &["customers"],
    },
    CatalogEntry {
        question: "Show me the MRR (Monthly Recurring Revenue) share percentage of SaaS Pro vs Elite.",
        query: "SELECT plan_name, SUM(monthly_price) as MRR FROM subscriptions WHERE status = 'Active' AND plan_name IN ('SaaS Pro', 'SaaS Elite') GROUP BY plan_name",
        entities: &["subscriptions"],
    },
    // ── Growth & Marketing ────────────────────────────────────────────────
    CatalogEntry {
        question: "Show me the correlation between website sessions and marketing conversions for 2024.",
        query: "SELECT strftime('%Y-%m', date) as month, SUM(sessions) as sessions, SUM(conversions) as conversions FROM website_traffic WHERE date LIKE '2024%' GROUP BY month",
        entities: &["website_traffic"],
    },
    CatalogEntry {
        question: "Compare our SaaS Pro price against the average competitor market price.",
        query: "SELECT 'SaaS Pro' as product, 99.99 as our_price, AVG(market_price) as market_avg FROM competitor_metrics WHERE product_name = 'Standard Plan'",
        entities: &["competitor_metrics", "products"],
    },
    CatalogEntry {
        question: "Identify the marketing campaign with the single highest ROI ever recorded.",
        query: "SELECT name, roi, spend, conversions FROM marketing ORDER BY roi DESC",
        entities: &["marketing"],
    },
    CatalogEntry {
        question: "Compare the conversion rates of Mobile traffic vs Desktop traffic.",
        query: "SELECT device_type, AVG(conversion_rate) as avg_conv_rate FROM website_traffic GROUP BY device_type",
        entities: &["website_traffic"],
    },
    CatalogEntry {
        question: "Which marketing channel (FB, GAds, LI) has the lowest cost-per-conversion?",
        query: "SELECT channel, SUM(spend)/SUM(conversions) as cost_per_conv FROM marketing GROUP BY channel ORDER BY cost_per_conv ASC",
        entities: &["marketing"],
    },
    CatalogEntry {
        question: "Analyze the impact of product reviews on regional sales growth.",
        query: "SELECT s.region, AVG(pr.sentiment_score) as avg_sentiment, SUM(s.revenue) as revenue FROM product_reviews pr JOIN products p ON pr.product_id = p.product_id JOIN sales s ON p.name = s.product GROUP BY s.region",
        entities: &["product_reviews", "sales", "products"],
    },
    // ── Operations & Support ──────────────────────────────────────────────
    CatalogEntry {
        question: "Show me the average resolution time for High Priority tickets by support agent.",
        query: "SELECT agent_name, AVG(resolution_time_hrs) as avg_hours FROM support_tickets WHERE priority = 'High' GROUP BY agent_name",
        entities: &["support_tickets"],
    },
    CatalogEntry {
        question: "List all products where the current quantity on hand is below the reorder point.",
        query: "SELECT p.name, i.warehouse_location, i.quantity_on_hand, i.reorder_point FROM inventory i JOIN products p ON i.product_id = p.product_id WHERE i.quantity_on_hand < i.reorder_point",
        entities: &["inventory", "products"],
    },
    CatalogEntry {
        question: "Rank our top 5 Sales Reps by their Actual Sales vs Quota performance.",
        query: "SELECT name, actual_sales, quota, (actual_sales/quota)*100 as pct_attainment FROM employee_performance WHERE role = 'Sales Rep' ORDER BY pct_attainment DESC LIMIT 5",
        entities: &["employee_performance"],
    },
    CatalogEntry {
        question: "Identify all non-tax-deductible expenses greater than $5000 in the IT department.",
        query: "SELECT vendor_name, amount FROM expenses WHERE tax_deductible = 0 AND amount > 5000 AND department_id = 'IT' ORDER BY amount DESC",
        entities: &["expenses"],
    },
    CatalogEntry {
        question: "Show the distribution of inventory quantity across all warehouse locations.",
        query: "SELECT warehouse_location, SUM(quantity_on_hand) as total_inventory FROM inventory GROUP BY warehouse_location",
        entities: &["inventory"],
    },
    CatalogEntry {
        question: "Calculate the average customer satisfaction score for bug-related tickets.",
        query: "SELECT agent_name, AVG(customer_satisfaction) as avg_score FROM support_tickets WHERE issue_type = 'Bug' GROUP BY agent_name ORDER BY avg_score DESC",
        entities: &["support_tickets"],
    },
];
