use std::{str::FromStr, sync::Arc};

use anyhow::{Context, bail};
use clap::Parser;
use log::info;
use reqwest::Method;
use serde::Serialize;
use slgaming::{
    api::{
        self,
        types::{CompanionQuery, CreateOrderRequest, OrderKey, OrderQuery, PageQuery},
    },
    cli::{Cli, Commands, RankingKind},
    config::{ClientConfig, load_client_config, load_configuration},
    db::{SqlitePersistence, init_db},
    http::{HttpClient, LogNotifier, RequestDescriptor},
    log::init_logging,
    session::SessionStore,
    stores::{InfoStore, UserStore, WalletStore},
};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_logging()?;
    let cli = Cli::parse();

    let config = load_configuration(&cli.config)?;
    let mut client_config = load_client_config(&config)?;
    client_config.apply_args(&cli.client);

    let client = Arc::new(build_client(&client_config)?);

    match cli.command {
        Commands::Login { phone, password } => {
            let envelope = UserStore::new(client.clone()).login(&phone, &password).await?;
            print_status(envelope.code, &envelope.msg);
        },
        Commands::LoginByCode { phone, code } => {
            let envelope = UserStore::new(client.clone()).login_by_code(&phone, &code).await?;
            print_status(envelope.code, &envelope.msg);
        },
        Commands::Logout => {
            UserStore::new(client.clone()).logout().await;
            println!("Signed out");
        },
        Commands::Whoami => {
            if !client.session().is_authenticated().await {
                bail!("Not signed in, run `slgaming login` first");
            }
            let store = InfoStore::new(client.clone(), client_config.legacy_asset_origin.clone());
            print_json(&store.refresh().await?)?;
        },
        Commands::Wallet => {
            let envelope = WalletStore::new(client.clone()).refresh().await?;
            print_json(&envelope)?;
        },
        Commands::Companions {
            game_skill,
            min_price,
            max_price,
            status,
            verified,
            page,
            page_size,
        } => {
            let query = CompanionQuery {
                game_skill,
                min_price,
                max_price,
                status,
                is_verified: verified.then_some(true),
                page,
                page_size,
            };
            print_json(&api::list_companions(&client, &query).await?)?;
        },
        Commands::Ranking { kind, page, page_size } => {
            let page = Some(PageQuery::new(page, page_size));
            let envelope = match kind {
                RankingKind::Orders => api::orders_ranking(&client, page).await?,
                RankingKind::Ratings => api::ratings_ranking(&client, page).await?,
            };
            print_json(&envelope)?;
        },
        Commands::Orders {
            role,
            status,
            page,
            page_size,
        } => {
            let query = OrderQuery {
                role: role.map(Into::into),
                status,
                page,
                page_size,
            };
            let envelope = api::list_orders(&client, &query).await?;
            print_json(&envelope.into_data()?)?;
        },
        Commands::Order { id, order_no } => {
            let key = match (id, order_no) {
                (Some(id), _) => OrderKey::Id(id),
                (None, Some(order_no)) => OrderKey::OrderNo(order_no),
                (None, None) => bail!("Either --id or --order-no is required"),
            };
            print_json(&api::get_order(&client, &key).await?)?;
        },
        Commands::CreateOrder {
            companion_id,
            game_name,
            duration_hours,
        } => {
            let request = CreateOrderRequest {
                companion_id,
                game_name,
                duration_hours,
                game_mode: None,
            };
            print_json(&api::create_order(&client, &request).await?)?;
        },
        Commands::Follow { user_id } => {
            let envelope = api::follow_user(&client, &user_id).await?;
            print_status(envelope.code, &envelope.msg);
        },
        Commands::Unfollow { user_id } => {
            let envelope = api::unfollow_user(&client, &user_id).await?;
            print_status(envelope.code, &envelope.msg);
        },
        Commands::UploadAvatar { file } => {
            let content = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "avatar".to_string());
            print_json(&api::upload_avatar(&client, file_name, content).await?)?;
        },
        Commands::Request {
            method,
            path,
            query,
            body,
        } => {
            let method = Method::from_str(&method.to_ascii_uppercase()).context("Invalid HTTP method")?;
            let mut descriptor = RequestDescriptor::new(method, path);
            for (key, value) in query {
                descriptor = descriptor.query(key, value);
            }
            if let Some(body) = body {
                let value = serde_json::from_str(&body).context("Request body is not valid JSON")?;
                descriptor = descriptor.json_value(value);
            }
            print_json(&client.send(descriptor).await?)?;
        },
    }

    Ok(())
}

fn build_client(config: &ClientConfig) -> Result<HttpClient, anyhow::Error> {
    let pool = init_db(&config.database_path).context("Failed to open session database")?;
    let session = SessionStore::load(Arc::new(SqlitePersistence::new(pool))).context("Failed to load session")?;
    let base_url = config.base_url().context("Invalid base URL")?;
    info!(base_url:% = base_url, big_int_mode:% = config.big_int_mode; "Client configured");

    Ok(HttpClient::with_options(
        base_url,
        Arc::new(session),
        Arc::new(LogNotifier),
        config.client_options(),
    )?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), anyhow::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_status(code: i64, msg: &str) {
    if code == 0 {
        println!("OK");
    } else {
        println!("Failed ({code}): {msg}");
    }
}
