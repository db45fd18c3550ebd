//! Touch Grass demo
//!
//! Generates the dataset, prints the highlights and walks one stake from
//! start to payout against an instant wallet.

use chrono::{Duration, Utc};
use touchgrass::challenges::POPULAR_LIMIT;
use touchgrass::config::Config;
use touchgrass::format::{format_currency, format_time_remaining};
use touchgrass::social::{rank_users, LeaderboardMetric};
use touchgrass::staking::ActiveChallenge;
use touchgrass::wallet::{CryptoWallet, StakeLedger, WalletConfig};
use touchgrass::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_default();
    config.logging.init("");

    tracing::info!("Touch Grass v{}", env!("CARGO_PKG_VERSION"));

    // The demo never writes the stake ledger
    config.storage.persist_stakes = false;
    tracing::info!("Seed: {}", config.simulation.seed);

    let state = AppState::new(config)?;

    demo_catalogue(&state).await;
    demo_leaderboard(&state).await;
    demo_stake().await?;

    tracing::info!("Touch Grass demo complete");
    Ok(())
}

async fn demo_catalogue(state: &AppState) {
    let board = state.board.read().await;
    let now = Utc::now();

    tracing::info!("{} challenges, popular right now:", board.len());
    for challenge in board.popular(POPULAR_LIMIT) {
        tracing::info!(
            "  [{}] {} - {} staked, {} left",
            challenge.category,
            challenge.title,
            format_currency(challenge.stake_amount, challenge.stake_currency.symbol()),
            format_time_remaining(challenge.ends_at, now),
        );
    }
}

async fn demo_leaderboard(state: &AppState) {
    let users = state.all_users().await;

    for metric in LeaderboardMetric::all() {
        tracing::info!("Top 3 by {}:", metric.display_name());
        for entry in rank_users(&users, *metric, 3) {
            tracing::info!(
                "  {} {} ({})",
                entry.badge.label(),
                entry.user.username,
                entry.display_value
            );
        }
    }
}

/// Stake, let the clock run out, attach a photo and collect
async fn demo_stake() -> Result<(), Box<dyn std::error::Error>> {
    let wallet = CryptoWallet::new(WalletConfig::instant(), StakeLedger::in_memory());
    let started = Utc::now();

    let mut stake = ActiveChallenge::start("1", 10.0, 30, started)?;
    wallet.stake_tokens(10.0, "1").await?;
    tracing::info!("Staked 10 tokens, balance {}", wallet.balance().await);

    let later = started + Duration::minutes(31);
    tracing::info!("Countdown: {:?}", stake.urgency(later));
    stake.attach_photo("https://example.com/proof.jpg", later)?;

    let result = stake.submit_proof()?;
    let payout = wallet.process_payout("1", result.success).await?;
    tracing::info!(
        "Proof accepted, paid {} tokens, balance {}",
        payout.amount,
        wallet.balance().await
    );

    Ok(())
}
