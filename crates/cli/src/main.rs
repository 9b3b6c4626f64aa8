//! `assetpro` - catalog maintenance from the command line.
//!
//! Runs the bulk price import against the demo catalog and prints results as
//! JSON on stdout. Logs go to stderr.

mod config;
mod seed;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;

use assetpro_auth::User;
use assetpro_catalog::{Catalog, CsvBulkParser, ProductMutationService};
use assetpro_core::{IdGenerator, UuidV7Generator};
use assetpro_plans::{PlanLimitPolicy, PlanUsage, SubscriptionPlan};

use crate::config::{GlobalArgs, Settings};

#[derive(Parser)]
#[command(name = "assetpro")]
#[command(about = "Product catalog maintenance")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply a `sku,price,reason` file to the demo catalog
    BulkUpdate {
        /// CSV file to import
        file: PathBuf,
    },

    /// Print the bulk-update sample template
    SampleCsv,

    /// List subscription tiers and their product limits
    Plans,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    assetpro_observability::init_with(cli.global.log_format);

    let settings = Settings::resolve(&cli.global);

    match cli.command {
        Command::BulkUpdate { file } => bulk_update(&settings, &file),
        Command::SampleCsv => {
            print!("{}", CsvBulkParser::sample_template());
            Ok(())
        }
        Command::Plans => print_json(&plan_table()),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkUpdateReport<'a> {
    actor: &'a str,
    updated_count: usize,
    unchanged: usize,
    unmatched: usize,
    invalid: usize,
    usage: PlanUsage,
    products: &'a Catalog,
}

fn bulk_update(settings: &Settings, file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let ids = UuidV7Generator;
    let actor = User::new(ids.next_id(), settings.actor.clone(), settings.role);
    let catalog = seed::demo_catalog(&ids);
    let service = ProductMutationService::new(ids, PlanLimitPolicy::for_plan(settings.plan));

    tracing::info!(
        file = %file.display(),
        actor = %actor.name,
        role = %actor.role,
        "running bulk update"
    );

    let outcome = service
        .bulk_update_csv(&catalog, &raw, &actor, Utc::now())
        .context("bulk update rejected")?;

    print_json(&BulkUpdateReport {
        actor: &actor.name,
        updated_count: outcome.updated_count,
        unchanged: outcome.unchanged,
        unmatched: outcome.unmatched,
        invalid: outcome.invalid,
        usage: outcome.catalog.summary(service.plan()).usage,
        products: &outcome.catalog,
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanRow {
    plan: SubscriptionPlan,
    product_limit: usize,
    monthly_price_cents: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    upgrade_to: Option<SubscriptionPlan>,
}

fn plan_table() -> Vec<PlanRow> {
    SubscriptionPlan::ALL
        .iter()
        .map(|plan| PlanRow {
            plan: *plan,
            product_limit: plan.product_limit(),
            monthly_price_cents: plan.monthly_price_cents(),
            upgrade_to: plan.upgrade(),
        })
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_table_lists_every_tier_in_order() {
        let rows = plan_table();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].product_limit, 10);
        assert_eq!(rows[3].upgrade_to, None);

        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json[1]["plan"], "professional");
        assert_eq!(json[1]["upgradeTo"], "business");
    }

    #[test]
    fn cli_parses_bulk_update_with_flags() {
        let cli = Cli::try_parse_from([
            "assetpro",
            "bulk-update",
            "prices.csv",
            "--role",
            "admin",
            "--actor",
            "Sam",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::BulkUpdate { .. }));
        assert_eq!(cli.global.role, Some(assetpro_auth::UserRole::Admin));
        assert_eq!(cli.global.actor.as_deref(), Some("Sam"));
    }
}
