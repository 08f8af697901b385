use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{
    api::types::OrderRole,
    codec::{BigId, BigIntMode},
    session::BearerToken,
};

#[derive(Parser)]
#[command(name = "slgaming")]
#[command(about = "SLGaming companion marketplace CLI", long_about = None)]
pub struct Cli {
    #[arg(short, long, help = "Path to the configuration file", default_value = "config/config.toml")]
    pub config: PathBuf,
    #[command(flatten)]
    pub client: ClientArgs,
    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the `[client]` configuration section.
#[derive(Args, Debug, Clone, Default)]
pub struct ClientArgs {
    #[arg(short = 'u', long, global = true, help = "Base URL of the API, including the /api prefix")]
    pub base_url: Option<String>,
    #[arg(long, global = true, help = "Request timeout in seconds")]
    pub timeout_secs: Option<u64>,
    #[arg(long, global = true, help = "Token presented as bearer: access or refresh")]
    pub bearer_token: Option<BearerToken>,
    #[arg(long, global = true, help = "Large integer handling: exact or string")]
    pub big_int_mode: Option<BigIntMode>,
    #[arg(short, long, global = true, help = "Path to the session database")]
    pub database_path: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RankingKind {
    Orders,
    Ratings,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RoleArg {
    Boss,
    Companion,
}

impl From<RoleArg> for OrderRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Boss => OrderRole::Boss,
            RoleArg::Companion => OrderRole::Companion,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with phone number and password
    Login {
        #[arg(long, help = "Phone number")]
        phone: String,
        #[arg(short, long, help = "Account password")]
        password: String,
    },
    /// Sign in with an SMS verification code
    LoginByCode {
        #[arg(long, help = "Phone number")]
        phone: String,
        #[arg(long, help = "Verification code")]
        code: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user's profile
    Whoami,
    /// Show the wallet balance
    Wallet,
    /// List companions
    Companions {
        #[arg(long)]
        game_skill: Option<String>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        #[arg(long, help = "0 offline, 1 online, 2 busy")]
        status: Option<i32>,
        #[arg(long, help = "Only verified companions")]
        verified: bool,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Show a companion leaderboard
    Ranking {
        #[arg(value_enum, default_value_t = RankingKind::Orders)]
        kind: RankingKind,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },
    /// List your orders
    Orders {
        #[arg(long, value_enum)]
        role: Option<RoleArg>,
        #[arg(long)]
        status: Option<i32>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Show one order by id or order number
    Order {
        #[arg(long, conflicts_with = "order_no", required_unless_present = "order_no")]
        id: Option<BigId>,
        #[arg(long)]
        order_no: Option<String>,
    },
    /// Book a companion
    CreateOrder {
        #[arg(long)]
        companion_id: BigId,
        #[arg(long)]
        game_name: String,
        #[arg(long)]
        duration_hours: i32,
    },
    /// Follow a user
    Follow { user_id: BigId },
    /// Stop following a user
    Unfollow { user_id: BigId },
    /// Upload a new avatar image
    UploadAvatar { file: PathBuf },
    /// Send an arbitrary request and print the decoded response
    Request {
        #[arg(help = "GET, POST, PUT or DELETE")]
        method: String,
        #[arg(help = "Path relative to the base URL, e.g. /user")]
        path: String,
        #[arg(short, long = "query", value_parser = parse_key_val, help = "Query parameter as key=value")]
        query: Vec<(String, String)>,
        #[arg(long, help = "JSON request body")]
        body: Option<String>,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("invalid key=value: no '=' found in '{s}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from([
            "slgaming",
            "order",
            "--id",
            "1996080936390758401",
            "--base-url",
            "http://127.0.0.1:9000/api",
            "--big-int-mode",
            "string",
        ])
        .unwrap();
        assert_eq!(cli.client.base_url.as_deref(), Some("http://127.0.0.1:9000/api"));
        assert_eq!(cli.client.big_int_mode, Some(BigIntMode::String));
        match cli.command {
            Commands::Order { id, order_no } => {
                assert_eq!(id.unwrap().as_str(), "1996080936390758401");
                assert!(order_no.is_none());
            },
            _ => panic!("expected order command"),
        }
    }

    #[test]
    fn request_query_pairs() {
        let cli = Cli::try_parse_from(["slgaming", "request", "GET", "/user", "-q", "uid=38830062"]).unwrap();
        match cli.command {
            Commands::Request { query, .. } => assert_eq!(query, vec![("uid".into(), "38830062".into())]),
            _ => panic!("expected request command"),
        }
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(Cli::try_parse_from(["slgaming", "follow", "0123"]).is_err());
    }
}
