use anyhow::Context;
use clap::Parser;
use kisan_kit::config::cli::{Command, ListingsCommand, ViewCommand};
use kisan_kit::core::{emi, harvest, market, trend, weather};
use kisan_kit::core::{LoanTerms, NewListing, PracticeFactor, View, YieldInputs};
use kisan_kit::utils::error::ErrorSeverity;
use kisan_kit::utils::logger;
use kisan_kit::{AppConfig, AppContext, Cli, KisanError};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())
        .with_context(|| format!("failed to load configuration {:?}", cli.config))?;
    cli.apply_overrides(&mut config);

    logger::init_logger(cli.verbose, config.logging.json);
    tracing::debug!("CLI args: {:?}", cli);

    let ctx = match AppContext::from_config(config) {
        Ok(ctx) => ctx,
        Err(e) => exit_with(e),
    };

    if let Err(e) = run(&ctx, cli.command).await {
        exit_with(e);
    }

    Ok(())
}

async fn run(ctx: &AppContext, command: Command) -> kisan_kit::Result<()> {
    match command {
        Command::Emi {
            principal,
            rate,
            months,
        } => {
            ctx.enter(View::Finance);
            let breakdown = emi::calculate_emi(&LoanTerms {
                principal,
                annual_rate_percent: rate,
                term_months: months,
            })?;
            println!("Monthly installment: ₹{:.0}", breakdown.installment);
            println!("Total interest:      ₹{:.0}", breakdown.total_interest);
            println!("Total payment:       ₹{:.0}", breakdown.total_payment);
        }
        Command::Yield {
            crop,
            area,
            practice,
        } => {
            ctx.enter(View::Finance);
            let estimate = harvest::estimate_yield(&YieldInputs {
                crop: crop.parse()?,
                area_units: area,
                practice_factor: practice.parse::<PracticeFactor>()?,
            })?;
            println!(
                "Expected {}: {:.1} qtl (about ₹{:.0})",
                estimate.crop, estimate.expected_yield, estimate.approximate_revenue
            );
        }
        Command::Listings { action } => {
            ctx.enter(View::Listings);
            let mut board = ctx.listings();
            match action {
                ListingsCommand::Add(args) => {
                    let listing = board.add(NewListing {
                        crop: args.crop,
                        quantity: args.quantity,
                        price_per_unit: args.price,
                        location: args.location,
                        contact: args.contact,
                    })?;
                    println!("✅ Listed {} ({})", listing.crop, listing.id);
                }
                ListingsCommand::Remove { id } => {
                    if board.remove(&id) {
                        println!("🗑️  Removed {}", id);
                    } else {
                        println!("No listing with id {}", id);
                    }
                }
                ListingsCommand::List { crop } => {
                    let listings = match crop.as_deref() {
                        Some(crop) => board.find_by_crop(crop),
                        None => board.list().iter().collect(),
                    };
                    if listings.is_empty() {
                        println!("No listings yet");
                    }
                    for l in listings {
                        println!(
                            "{}  {:<10} {:>8.1} qtl @ ₹{:<8.0} {:<12} {}  ({})",
                            l.created_at.format("%Y-%m-%d"),
                            l.crop,
                            l.quantity,
                            l.price_per_unit,
                            l.location,
                            l.contact,
                            l.id
                        );
                    }
                }
            }
        }
        Command::Trend { samples } => {
            ctx.enter(View::Market);
            println!("{}", trend::trend_advice(&samples));
        }
        Command::Prices {
            commodity,
            days,
            seed,
            csv,
        } => {
            ctx.enter(View::Market);
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let today = chrono::Local::now().date_naive();
            let series = market::price_series(&commodity, days, today, &mut rng)?;

            if csv {
                market::write_series_csv(&series, std::io::stdout().lock())?;
            } else {
                for point in &series {
                    println!("{}  ₹{:.0}", point.date, point.price);
                }
                let advice = trend::trend_advice(&market::prices_of(&series));
                println!("Decision meter: {}", advice);
            }
        }
        Command::Forecast { commodity, days } => {
            ctx.enter(View::Market);
            let forecast = market::linear_forecast(days);
            println!("{} forecast for the next {} days:", commodity, days);
            for (i, price) in forecast.iter().enumerate() {
                println!("  day {:>2}: ₹{:.0}", i + 1, price);
            }
        }
        Command::Quote { commodity } => {
            ctx.enter(View::Market);
            let today = chrono::Local::now().date_naive();
            let q = market::quote(&commodity, today);
            println!("{} in {}: ₹{:.0}/qtl ({})", q.commodity, q.state, q.price, q.date);
        }
        Command::Weather { city } => {
            ctx.enter(View::Weather);
            let advisory = weather::advisory_for(&city);
            println!(
                "{}: {:.0}°C, {}. {}",
                advisory.city, advisory.temp_celsius, advisory.condition, advisory.advice
            );
        }
        Command::Detect { image, strict } => {
            ctx.enter(View::CropDoctor);
            let file_name = image
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or_default()
                .to_string();
            let bytes = tokio::fs::read(&image).await?;

            let report = if strict {
                ctx.client().detect_disease(&file_name, bytes).await?
            } else {
                ctx.client()
                    .detect_disease_or_fallback(&file_name, bytes)
                    .await?
            };

            if report.is_fallback() {
                println!("⚠️  Service unavailable");
            }
            println!("Disease:    {}", report.disease);
            println!("Remedy:     {}", report.remedy);
            println!("Confidence: {:.0}%", report.confidence * 100.0);
        }
        Command::Health => {
            let health = ctx.client().health().await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
        Command::View { action } => {
            let state = ctx.view_state();
            match action {
                ViewCommand::Show => println!("{}", state.load()),
                ViewCommand::Set { view } => {
                    let view: View = view.parse()?;
                    state.save(view);
                    println!("Active view: {}", view);
                }
            }
        }
    }

    Ok(())
}

fn exit_with(e: KisanError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
