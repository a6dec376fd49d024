//! Wedding site server
//!
//! ```text
//! wedding-site                       serve the site
//! wedding-site pix <amount> [text]   print a payment code for the configured merchant
//! ```
//!
//! `WEDDING_DEMO=1` seeds a sample event and gift list into the in-memory store.

use anyhow::{Context, bail};
use chrono::{Duration, Utc};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;
use wedding::prelude::*;
use wedding::services::contribution_payload;

const DEMO_ENV: &str = "WEDDING_DEMO";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wedding=info,tower_http=info")),
        )
        .init();

    let config = SiteConfig::from_env()?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None => serve(config).await,
        Some("pix") => print_payment(&config, &args[1..]),
        Some(other) => bail!("Unknown command '{}'", other),
    }
}

async fn serve(config: SiteConfig) -> Result<()> {
    let bind = config.server.bind.clone();
    let mut builder = ServerBuilder::new();

    if std::env::var(DEMO_ENV).is_ok() {
        tracing::info!("Seeding demo data");
        builder = builder
            .with_gifts(InMemoryDataService::with_rows(demo_gifts()))
            .with_events(InMemoryDataService::with_rows(vec![demo_event()]));
    }

    builder.with_config(config).serve(&bind).await
}

fn print_payment(config: &SiteConfig, args: &[String]) -> Result<()> {
    let Some(amount) = args.first() else {
        bail!("Usage: wedding-site pix <amount> [description]");
    };
    let amount = Decimal::from_str(amount).with_context(|| format!("Invalid amount '{}'", amount))?;
    let description = args[1..].join(" ");

    let payload = contribution_payload(&config.merchant, amount, &description)?;
    println!("{}", payload);

    #[cfg(feature = "qrcode")]
    println!("{}", wedding::pix::render_terminal(&payload)?);

    Ok(())
}

fn demo_gifts() -> Vec<Gift> {
    vec![
        Gift::new("Jogo de Panelas", Decimal::from(150))
            .with_description("Conjunto antiaderente com 5 peças"),
        Gift::new("Cafeteira Elétrica", Decimal::new(500, 2)),
        Gift::new("Jogo de Jantar Porcelana Completo", Decimal::new(1230, 2)),
        Gift::new("Lua de Mel", Decimal::from(500)).with_description("Contribuição para a viagem"),
    ]
}

fn demo_event() -> WeddingEvent {
    let mut event = WeddingEvent::new(
        "Pauline",
        "Rafael",
        Utc::now() + Duration::days(90),
        "Fazenda Boa Vista",
        "Estrada Municipal, km 4 - Cataguases, MG",
    );
    event.dress_code = Some("Esporte fino".to_string());
    event
}
