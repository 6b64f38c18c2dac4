use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use pawsit::config::AppConfig;
use pawsit::services::api::http::HttpGateway;
use pawsit::services::dashboard::{DashboardModel, DashboardService, DashboardStats};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    anyhow::ensure!(
        !config.api_token.is_empty(),
        "PAWSIT_API_TOKEN must be set"
    );
    anyhow::ensure!(!config.user_id.is_empty(), "PAWSIT_USER_ID must be set");

    let gateway = Arc::new(HttpGateway::new(
        config.api_base_url.clone(),
        config.api_token.clone(),
    ));
    let dashboard = DashboardService::new(gateway);

    tracing::info!(role = config.role.as_str(), url = %config.api_base_url, "fetching dashboard");
    let model = dashboard.dashboard(&config.user_id, config.role).await;

    print_dashboard(&model);
    Ok(())
}

fn print_dashboard(model: &DashboardModel) {
    println!("── {} dashboard ──", model.role);

    if let Some(error) = &model.error {
        println!("(some sections failed to load: {error})");
    }

    match &model.stats {
        DashboardStats::Owner(stats) => {
            println!(
                "bookings: {} total, {} upcoming, {} completed · {} pets",
                stats.total_bookings, stats.upcoming_bookings, stats.completed_bookings, stats.pets
            );
        }
        DashboardStats::Caregiver(stats) => {
            println!(
                "bookings: {} total, {} today, {} completed · rating {:.1}",
                stats.total_bookings,
                stats.today_bookings,
                stats.completed_bookings,
                stats.average_rating
            );
        }
    }

    if let Some(earnings) = &model.earnings {
        println!(
            "earnings: ${:.2} this week, ${:.2} this month, ${:.2} total",
            earnings.week, earnings.month, earnings.total
        );
    }

    for (label, bucket) in [
        ("Today", &model.today),
        ("Upcoming", &model.upcoming),
        ("Recent", &model.recent),
    ] {
        println!("\n{label}:");
        if bucket.is_empty() {
            println!("  (none)");
        }
        for view in bucket {
            let party = view
                .owner
                .as_ref()
                .or(view.caregiver.as_ref())
                .map(|p| p.name.as_str())
                .unwrap_or("-");
            println!(
                "  [{}] {} · {} {} ({}) · with {} · ${:.2}",
                view.status,
                view.service_title,
                view.date_label,
                view.time_range,
                view.duration,
                party,
                view.total_amount
            );
        }
    }

    if !model.pets.is_empty() {
        let names: Vec<&str> = model.pets.iter().map(|p| p.name.as_str()).collect();
        println!("\nPets: {}", names.join(", "));
    }
    if !model.services.is_empty() {
        println!("\nServices:");
        for listing in &model.services {
            let state = if listing.active { "active" } else { "inactive" };
            println!("  {} · ${:.2} ({state})", listing.title, listing.price);
        }
    }
}
