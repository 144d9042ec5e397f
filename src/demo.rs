//! Built-in demonstration pipeline.
//!
//! Two blocks: one (re)creates and seeds a handful of demo tables, the other
//! stages an aggregate, materializes a joined report table, and ends with a
//! SELECT so the runner captures the report.
//!
//! Block invariant: `;` appears only as a statement delimiter, never inside
//! string literals or comments.

/// (Re)creates and seeds the demo tables.
pub const SETUP: &str = "
DROP TABLE IF EXISTS demo_orders;
DROP TABLE IF EXISTS demo_customers;

CREATE TABLE demo_customers (
    customer_id INT PRIMARY KEY,
    name        TEXT NOT NULL,
    region      TEXT NOT NULL
);

CREATE TABLE demo_orders (
    order_id    INT PRIMARY KEY,
    customer_id INT NOT NULL REFERENCES demo_customers (customer_id),
    order_date  DATE NOT NULL,
    amount      NUMERIC(10, 2) NOT NULL
);

INSERT INTO demo_customers (customer_id, name, region) VALUES
    (1, 'Acme Corp', 'EMEA'),
    (2, 'Globex', 'AMER'),
    (3, 'Initech', 'AMER'),
    (4, 'Umbrella', 'APAC');

INSERT INTO demo_orders (order_id, customer_id, order_date, amount) VALUES
    (101, 1, '2024-01-05', 250.00),
    (102, 1, '2024-02-11', 120.50),
    (103, 2, '2024-01-20', 830.25),
    (104, 2, '2024-03-02', 410.00),
    (105, 3, '2024-02-28', 75.10),
    (106, 4, '2024-03-15', 990.99),
    (107, 4, '2024-03-18', 340.40);
";

/// Stages per-customer totals, materializes the joined report, and selects it.
pub const REPORT_PIPELINE: &str = "
DROP TABLE IF EXISTS stage_customer_totals;

CREATE TABLE stage_customer_totals AS
SELECT
    customer_id,
    COUNT(*)    AS order_count,
    SUM(amount) AS total_spent
FROM demo_orders
GROUP BY customer_id;

DROP TABLE IF EXISTS demo_revenue_report;

CREATE TABLE demo_revenue_report AS
SELECT
    c.customer_id,
    c.name,
    c.region,
    t.order_count,
    t.total_spent,
    RANK() OVER (ORDER BY t.total_spent DESC) AS spend_rank
FROM demo_customers c
JOIN stage_customer_totals t ON t.customer_id = c.customer_id;

SELECT * FROM demo_revenue_report ORDER BY spend_rank;
";

/// Returns the demo blocks in the order they must run.
pub fn blocks() -> [&'static str; 2] {
    [SETUP, REPORT_PIPELINE]
}
