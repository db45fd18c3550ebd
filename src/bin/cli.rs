//! Touch Grass CLI
//!
//! Command-line client for a running Touch Grass API:
//! - Browse challenges, the leaderboard and the feed
//! - Connect the simulated wallet
//! - Join, complete and verify challenges
//! - Stake, prove and settle

use clap::{Parser, Subcommand};
use reqwest::{Client, Method};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "touchgrass")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Stake on going outside, prove it with a photo")]
#[command(long_about = "Touch Grass turns going outside into a bet on yourself.\nStake tokens on a challenge, upload a photo as proof and collect 1.2x your stake.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8090", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show server status
    Status,

    /// List challenges
    Challenges {
        /// Only running (or only ended) challenges
        #[arg(long)]
        active: Option<bool>,
        /// outdoor, fitness, detox, social, mindfulness, adventure
        #[arg(short, long)]
        category: Option<String>,
        /// easy, medium, hard
        #[arg(short, long)]
        difficulty: Option<String>,
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show one challenge
    Challenge { id: String },

    /// Join a challenge
    Join {
        id: String,
        /// Stake amount (default: the challenge's stake)
        #[arg(short, long)]
        stake: Option<f64>,
    },

    /// Submit a joined challenge for verification
    Complete {
        id: String,
        #[arg(long)]
        photo_id: Option<String>,
    },

    /// Resolve a submitted challenge
    Verify { id: String },

    /// Show the leaderboard
    Leaderboard {
        /// earnings, streaks, success, challenges
        #[arg(short, long, default_value = "earnings")]
        metric: String,
        /// daily, weekly, monthly, all-time
        #[arg(short, long, default_value = "all-time")]
        period: String,
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show the activity feed
    Feed {
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Only events by this username
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Show a user's profile
    Profile { username: String },

    /// Connect the wallet
    Connect {
        /// metamask, walletconnect, coinbase
        #[arg(default_value = "metamask")]
        provider: String,
    },

    /// Disconnect the wallet
    Disconnect,

    /// Show token balance and open stakes
    Balance,

    /// Stake tokens on a challenge
    Stake {
        challenge_id: String,
        amount: f64,
        /// Countdown length, 15 to 480 in steps of 15
        #[arg(short, long, default_value = "30")]
        minutes: u32,
    },

    /// Show a running stake's countdown
    Countdown { challenge_id: String },

    /// Attach a proof photo once the countdown is over
    Proof { challenge_id: String, photo_url: String },

    /// Submit the proof and collect the payout
    Submit { challenge_id: String },

    /// Give up a stake
    Quit { challenge_id: String },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let api = Api {
        client: Client::new(),
        base: cli.api_url.trim_end_matches('/').to_string(),
    };
    let json_output = cli.format == "json";

    match cli.command {
        Commands::Status => {
            let response = api.client.get(format!("{}/health", api.base)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: Value = resp.json().await?;
                    if json_output {
                        return print_json(&health);
                    }

                    println!("Touch Grass v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!("API Status: {}", text(&health["status"]));
                    println!("  Challenges: {}", health["challenges"]);
                    println!("  Users: {}", health["users"]);
                    println!("  Open stakes: {}", health["open_stakes"]);
                    println!("  Live connections: {}", health["ws_connections"]);

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to Touch Grass API at {}", api.base);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the API server is running:");
                    eprintln!("  cargo run --bin touchgrass-api");
                    std::process::exit(1);
                }
            }
        }

        Commands::Challenges {
            active,
            category,
            difficulty,
            limit,
        } => {
            let mut query = vec![("limit".to_string(), limit.to_string())];
            if let Some(active) = active {
                query.push(("active".to_string(), active.to_string()));
            }
            if let Some(category) = category {
                query.push(("category".to_string(), category.to_lowercase()));
            }
            if let Some(difficulty) = difficulty {
                query.push(("difficulty".to_string(), difficulty.to_lowercase()));
            }

            let challenges = api.get("/api/v1/challenges", &query).await?;
            if json_output {
                return print_json(&challenges);
            }
            print_challenges(&challenges);
        }

        Commands::Challenge { id } => {
            let detail = api.get(&format!("/api/v1/challenges/{}", id), &[]).await?;
            if json_output {
                return print_json(&detail);
            }

            let challenge = &detail["challenge"];
            println!("{}", text(&challenge["title"]));
            println!("{}", text(&challenge["description"]));
            println!();
            println!(
                "Stake: {} {}   Pot: {}   Ends in: {}",
                challenge["stake_amount"],
                text(&challenge["stake_currency"]),
                challenge["total_pot"],
                text(&detail["time_remaining"])
            );
            println!(
                "Participants: {} ({} completed)   {} / {}",
                challenge["participants"],
                challenge["completed"],
                text(&challenge["category"]),
                text(&challenge["difficulty"])
            );

            if let Some(rules) = challenge["rules"].as_array().filter(|r| !r.is_empty()) {
                println!();
                println!("Rules:");
                for rule in rules {
                    println!("  - {}", text(rule));
                }
            }

            match detail.get("participation").filter(|p| !p.is_null()) {
                Some(record) => {
                    println!();
                    println!("You: {} (staked {})", text(&record["status"]), record["stake_amount"]);
                }
                None => {
                    println!();
                    println!("Join with:");
                    println!("  touchgrass join {}", id);
                }
            }
        }

        Commands::Join { id, stake } => {
            let body = json!({ "stake_amount": stake });
            let record = api
                .send(Method::POST, &format!("/api/v1/challenges/{}/join", id), Some(body))
                .await?;
            if json_output {
                return print_json(&record);
            }
            println!(
                "Joined challenge {} with {} {}",
                id,
                record["stake_amount"],
                text(&record["stake_currency"])
            );
        }

        Commands::Complete { id, photo_id } => {
            let body = json!({ "photo_id": photo_id });
            let record = api
                .send(Method::POST, &format!("/api/v1/challenges/{}/complete", id), Some(body))
                .await?;
            if json_output {
                return print_json(&record);
            }
            println!("Challenge {} is {}", id, text(&record["status"]));
        }

        Commands::Verify { id } => {
            let verification = api
                .send(Method::POST, &format!("/api/v1/challenges/{}/verify", id), None)
                .await?;
            if json_output {
                return print_json(&verification);
            }

            let record = &verification["record"];
            println!(
                "Challenge {} {}, payout {}",
                id,
                text(&record["status"]),
                record["payout"]
            );
            for achievement in verification["unlocked"].as_array().into_iter().flatten() {
                println!(
                    "  {} Unlocked: {}",
                    text(&achievement["icon"]),
                    text(&achievement["title"])
                );
            }
        }

        Commands::Leaderboard {
            metric,
            period,
            limit,
        } => {
            let query = [
                ("metric".to_string(), metric),
                ("period".to_string(), period),
                ("limit".to_string(), limit.to_string()),
            ];
            let board = api.get("/api/v1/leaderboard", &query).await?;
            if json_output {
                return print_json(&board);
            }

            println!(
                "{} - {}",
                text(&board["metric_label"]),
                text(&board["period_label"])
            );
            println!("{:<6} {:<24} {}", "Rank", "User", "Value");
            println!("{}", "-".repeat(44));
            for entry in board["entries"].as_array().into_iter().flatten() {
                println!(
                    "{:<6} {:<24} {}",
                    format!("#{}", entry["rank"]),
                    text(&entry["user"]["username"]),
                    text(&entry["display_value"])
                );
            }
        }

        Commands::Feed { limit, user } => {
            let mut query = vec![("limit".to_string(), limit.to_string())];
            if let Some(user) = user {
                query.push(("user".to_string(), user));
            }

            let feed = api.get("/api/v1/activities", &query).await?;
            if json_output {
                return print_json(&feed);
            }
            print_feed(&feed);
        }

        Commands::Profile { username } => {
            let profile = api.get(&format!("/api/v1/users/{}", username), &[]).await?;
            if json_output {
                return print_json(&profile);
            }

            let user = &profile["user"];
            println!("{} (rank #{})", text(&user["username"]), user["rank"]);
            println!(
                "Earned: {}   Streak: {} (best {})   Completed: {}",
                user["total_earned"],
                user["current_streak"],
                user["longest_streak"],
                user["completed_challenges"]
            );
            println!(
                "Followers: {}   Following: {}",
                user["followers"], user["following"]
            );

            let achievements = profile["achievements"].as_array().cloned().unwrap_or_default();
            if !achievements.is_empty() {
                println!();
                println!("Achievements:");
                for achievement in achievements {
                    println!("  {} {}", text(&achievement["icon"]), text(&achievement["title"]));
                }
            }

            println!();
            print_feed(&profile["activities"]);
        }

        Commands::Connect { provider } => {
            let wallet = api
                .send(
                    Method::POST,
                    "/api/v1/wallet/connect",
                    Some(json!({ "provider": provider.to_lowercase() })),
                )
                .await?;
            if json_output {
                return print_json(&wallet);
            }
            println!("Connected {}", text(&wallet["short_address"]));
            print_balances(&wallet);
        }

        Commands::Disconnect => {
            let wallet = api
                .send(Method::POST, "/api/v1/wallet/disconnect", None)
                .await?;
            if json_output {
                return print_json(&wallet);
            }
            println!("Wallet disconnected");
        }

        Commands::Balance => {
            let balance = api.get("/api/v1/stakes/balance", &[]).await?;
            if json_output {
                return print_json(&balance);
            }

            println!("Token balance: {}", balance["balance"]);
            let open = balance["open_stakes"].as_array().cloned().unwrap_or_default();
            if open.is_empty() {
                println!("No open stakes");
            } else {
                println!();
                println!("{:<12} {:<10} {}", "Challenge", "Amount", "Transaction");
                println!("{}", "-".repeat(60));
                for stake in open {
                    println!(
                        "{:<12} {:<10} {}",
                        text(&stake["challenge_id"]),
                        stake["transaction"]["amount"],
                        text(&stake["transaction"]["id"])
                    );
                }
            }
        }

        Commands::Stake {
            challenge_id,
            amount,
            minutes,
        } => {
            let body = json!({
                "challenge_id": challenge_id,
                "amount": amount,
                "duration_minutes": minutes,
            });
            let created = api.send(Method::POST, "/api/v1/stakes", Some(body)).await?;
            if json_output {
                return print_json(&created);
            }
            println!(
                "Staked {} on challenge {}, {} to go",
                amount,
                challenge_id,
                text(&created["countdown"])
            );
            println!(
                "Potential payout: {}   Balance: {}",
                created["potential_payout"], created["balance"]
            );
        }

        Commands::Countdown { challenge_id } => {
            let view = api
                .get(&format!("/api/v1/stakes/{}", challenge_id), &[])
                .await?;
            if json_output {
                return print_json(&view);
            }
            println!("{} ({})", text(&view["countdown"]), text(&view["urgency"]));
            if view["urgency"] == "time_up" {
                println!("Time is up. Attach your proof with:");
                println!("  touchgrass proof {} <photo-url>", challenge_id);
            }
        }

        Commands::Proof {
            challenge_id,
            photo_url,
        } => {
            let view = api
                .send(
                    Method::POST,
                    &format!("/api/v1/stakes/{}/photo", challenge_id),
                    Some(json!({ "photo_url": photo_url })),
                )
                .await?;
            if json_output {
                return print_json(&view);
            }
            println!("Photo attached to challenge {}", challenge_id);
        }

        Commands::Submit { challenge_id } => {
            let settled = api
                .send(
                    Method::POST,
                    &format!("/api/v1/stakes/{}/submit", challenge_id),
                    None,
                )
                .await?;
            if json_output {
                return print_json(&settled);
            }
            println!(
                "Proof accepted! Paid {} tokens, balance {}",
                settled["payout"]["amount"], settled["balance"]
            );
        }

        Commands::Quit { challenge_id } => {
            let settled = api
                .send(
                    Method::POST,
                    &format!("/api/v1/stakes/{}/quit", challenge_id),
                    None,
                )
                .await?;
            if json_output {
                return print_json(&settled);
            }
            println!(
                "Stake of {} lost. Balance {}",
                settled["result"]["stake"], settled["balance"]
            );
        }

        Commands::Config { output } => {
            let config = touchgrass::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

struct Api {
    client: Client,
    base: String,
}

impl Api {
    async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Value, Box<dyn std::error::Error>> {
        let response = self
            .client
            .get(format!("{}{}", self.base, path))
            .query(query)
            .send()
            .await?;
        read_response(response).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, Box<dyn std::error::Error>> {
        let mut request = self.client.request(method, format!("{}{}", self.base, path));
        if let Some(body) = body {
            request = request.json(&body);
        }
        read_response(request.send().await?).await
    }
}

/// Exits with the API's error message on a failed request
async fn read_response(response: reqwest::Response) -> Result<Value, Box<dyn std::error::Error>> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or(body);
    eprintln!("Failed ({}): {}", status, message);
    if status == reqwest::StatusCode::FORBIDDEN {
        eprintln!();
        eprintln!("Connect a wallet first:");
        eprintln!("  touchgrass connect");
    }
    std::process::exit(1);
}

fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn text(value: &Value) -> &str {
    value.as_str().unwrap_or("-")
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

fn print_challenges(challenges: &Value) {
    let rows = match challenges.as_array() {
        Some(rows) if !rows.is_empty() => rows,
        _ => {
            println!("No challenges match");
            return;
        }
    };

    println!(
        "{:<6} {:<32} {:<12} {:<8} {:>8} {:>6}",
        "ID", "Title", "Category", "Level", "Stake", "Users"
    );
    println!("{}", "-".repeat(78));

    for challenge in rows {
        let mut title = text(&challenge["title"]).to_string();
        if title.chars().count() > 30 {
            title = title.chars().take(29).collect::<String>() + "…";
        }
        println!(
            "{:<6} {:<32} {:<12} {:<8} {:>8} {:>6}",
            text(&challenge["id"]),
            title,
            text(&challenge["category"]),
            text(&challenge["difficulty"]),
            challenge["stake_amount"].as_f64().unwrap_or(0.0),
            challenge["participants"]
        );
    }
}

fn print_feed(feed: &Value) {
    let events = match feed.as_array() {
        Some(events) if !events.is_empty() => events,
        _ => {
            println!("No activity yet");
            return;
        }
    };

    for event in events {
        let when = event["timestamp"]
            .as_str()
            .and_then(|ts| chrono::DateTime::parse_from_rfc3339(ts).ok())
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}  {} {}",
            when,
            text(&event["user"]),
            text(&event["description"])
        );
    }
}

fn print_balances(wallet: &Value) {
    for line in wallet["balances"].as_array().into_iter().flatten() {
        println!(
            "  {:<6} {:<16} {}",
            text(&line["currency"]),
            text(&line["display"]),
            text(&line["usd"])
        );
    }
    println!("  Total: {}", text(&wallet["total_usd"]));
}
