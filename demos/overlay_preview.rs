//! Overlay preview
//!
//! Authors a few artifacts against a static catalog, then shows which of
//! them a CRM deal record would display and which glossary terms the
//! overlay would highlight in a snippet of page text.
//!
//! Run with `cargo run --example overlay_preview`. Verbosity comes from
//! `RUST_LOG` when set, else from the configured `log_level`.

use anyhow::Result;
use beacon_core::{
    Card, CardType, Condition, ConditionSet, GlossaryEntry, Operator, PropertyDefinition,
    PropertyType, Record, Rule, RuleType,
};
use beacon_sdk::{AdminConfig, AdminConsole, StaticPropertyProvider};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AdminConfig::load()?;
    init_tracing(&config.log_filter())?;

    let provider = StaticPropertyProvider::new().with_properties(
        "deals",
        vec![
            PropertyDefinition::new("dealstage", "Deal Stage", PropertyType::Enumeration)
                .with_option("contractsent", "Contract Sent")
                .with_option("closedwon", "Closed Won"),
            PropertyDefinition::new("amount", "Amount", PropertyType::Number),
            PropertyDefinition::new("competitor", "Competitor", PropertyType::String),
        ],
    );

    let mut console = AdminConsole::builder()
        .with_config(config)
        .with_provider(Arc::new(provider))
        .build()
        .await?;
    let mut changes = console.subscribe();

    let big_deal = ConditionSet::all(vec![
        Condition::new("dealstage", Operator::Equals, "contractsent"),
        Condition::new("amount", Operator::GreaterThan, "50000"),
    ]);
    for line in console.describe_conditions("deals", &big_deal).await? {
        println!(
            "condition: {} {} {}",
            line.label,
            line.operator,
            line.value.unwrap_or_default()
        );
    }

    let store = console.store_mut();
    store
        .create(
            Rule::new("Legal review", "deals", "Contracts over 50k need legal sign-off")
                .with_type(RuleType::Warning)
                .with_priority(10)
                .with_conditions(big_deal),
        )
        .await?;
    store
        .create(
            Card::new("Versus Acme", "deals")
                .with_type(CardType::Competitor)
                .with_section("Where we win", "Native CRM integration")
                .with_conditions(ConditionSet::all(vec![Condition::new(
                    "competitor",
                    Operator::Contains,
                    "acme",
                )])),
        )
        .await?;
    store
        .create(
            GlossaryEntry::new("ARR", "Annual recurring revenue").with_alias("annual run rate"),
        )
        .await?;
    console.seed_glossary_entry("deals", "dealstage").await?;

    while let Ok(event) = changes.try_recv() {
        println!("change: {:?}", event);
    }

    let record = Record::new()
        .with("dealstage", "ContractSent")
        .with("amount", 72_000.0)
        .with("competitor", "Acme Corp");

    let applicable = console.applicable("deals", &record);
    for rule in &applicable.rules {
        println!("rule [{:?}] {}", rule.rule_type, rule.message);
    }
    for card in &applicable.cards {
        println!("card {} ({} sections)", card.name, card.sections.len());
    }

    let text = "The deal stage moved; ARR impact is below the annual run rate target.";
    let index = console.store().trigger_index();
    for hit in index.scan(text) {
        let definition = index
            .entry(&hit.entry_id)
            .map(|e| e.definition.as_str())
            .unwrap_or_default();
        println!(
            "glossary: '{}' at {}..{} -> {}",
            &text[hit.start..hit.end],
            hit.start,
            hit.end,
            definition
        );
    }

    println!("{}", console.export_json()?);
    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured level applies to the beacon crates
fn init_tracing(fallback: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
