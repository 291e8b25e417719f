mod api;
mod bill;
mod catalog;
mod cli;
mod core;
mod prelude;
mod quantity;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    api::extractor,
    bill::normalize::normalize,
    catalog::{
        Catalog,
        provider::{Eligibility, Provider},
    },
    cli::{Args, BillArgs, Command, CompareArgs, UsageProfile},
    core::{
        distribution::ColorDistribution,
        ranking::{ProviderCost, compare_providers, max_annual_savings},
    },
    prelude::*,
    quantity::cost::Cost,
    tables::{build_bill_table, build_catalog_table, build_comparison_table},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let catalog = match &args.catalog {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::load()?,
    };

    match args.command {
        Command::Compare(args) => compare(&catalog, &args),
        Command::Catalog => {
            println!("{}", build_catalog_table(catalog.providers()));
            Ok(())
        }
        Command::Bill(args) => bill(&catalog, *args).await,
    }
}

fn compare(catalog: &Catalog, args: &CompareArgs) -> Result {
    let kinds = args.tariff_kinds();
    let providers: Vec<Provider> = catalog
        .providers()
        .iter()
        .filter(|provider| kinds.contains(provider.tariff_kind()))
        .filter(|provider| !args.green_only || provider.green_energy)
        .filter(|provider| args.include_programs || !provider.is_program)
        .cloned()
        .collect();

    let consumption = args.consumption();
    let distribution = args.distribution();
    if catalog.find(&args.current_provider).is_none() {
        warn!(
            current_provider = %args.current_provider,
            "unknown provider id, comparing against a zero baseline",
        );
    }
    info!(%consumption, n_providers = providers.len(), "comparing…");

    let costs = compare_providers(
        &providers,
        consumption,
        &args.current_provider,
        distribution.as_ref(),
        catalog.regulated(),
    )?;
    render_comparison(&costs, &args.current_provider, distribution);
    Ok(())
}

async fn bill(catalog: &Catalog, args: BillArgs) -> Result {
    let extracted = if args.pre_extracted {
        let text = std::fs::read_to_string(&args.path)
            .with_context(|| format!("failed to read `{}`", args.path.display()))?;
        extractor::parse_extraction(&text)
    } else {
        let Some(api_key) = args.api_key else {
            warn!("no extraction API key is configured");
            println!("Bill reading is unavailable. Run `revma compare --kwh <value>` instead.");
            return Ok(());
        };
        match extractor::Api::try_new(api_key)?.extract(&args.path).await {
            Ok(extracted) => extracted,
            Err(error) => {
                warn!("bill extraction failed: {error:#}");
                println!("Could not read the bill. Run `revma compare --kwh <value>` instead.");
                return Ok(());
            }
        }
    };

    let normalized = normalize(extracted);
    println!("{}", build_bill_table(&normalized));

    let Some(consumption) = normalized.monthly_kwh else {
        println!("No usable consumption on the bill. Run `revma compare --kwh <value>` instead.");
        return Ok(());
    };
    let current_provider = args
        .current_provider
        .or_else(|| normalized.provider_id.map(str::to_owned))
        .unwrap_or_else(|| "dei".to_owned());
    let distribution =
        args.profile.map(UsageProfile::distribution).or(normalized.distribution);

    // A student bill unlocks the student-only programs in the ranking.
    let providers: Vec<Provider> = catalog
        .providers()
        .iter()
        .filter(|provider| {
            !provider.is_program
                || (normalized.student_tariff
                    && provider.program_eligibility == Some(Eligibility::Students))
        })
        .cloned()
        .collect();

    let costs = compare_providers(
        &providers,
        consumption,
        &current_provider,
        distribution.as_ref(),
        catalog.regulated(),
    )?;
    render_comparison(&costs, &current_provider, distribution);
    Ok(())
}

fn render_comparison(
    costs: &[ProviderCost<'_>],
    baseline_id: &str,
    distribution: Option<ColorDistribution>,
) {
    let distribution = distribution.unwrap_or(ColorDistribution::TYPICAL);
    println!("{}", build_comparison_table(costs, baseline_id, &distribution));

    match (max_annual_savings(costs), costs.first()) {
        (Some(savings), Some(cheapest)) if savings > Cost::from(1.0) => {
            println!(
                "Switching to {} would save up to {savings} per year.",
                cheapest.provider.name,
            );
        }
        (Some(_), Some(_)) => {
            println!("You are already on the cheapest offer for this consumption.");
        }
        _ => println!("Nothing matched the filters."),
    }
}
