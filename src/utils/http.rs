use reqwest::{Client, ClientBuilder, Proxy};
use std::time::Duration;

use crate::error::{BotError, BotResult};

pub const DEFAULT_USER_AGENT: &str = "BmiBot/1.0";

pub fn create_telegram_client(proxy: Option<&str>) -> BotResult<Client> {
    let builder = Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .pool_idle_timeout(Duration::from_secs(60))
        .tcp_keepalive(Duration::from_secs(30))
        .user_agent(DEFAULT_USER_AGENT);

    build_client(builder, proxy)
}

fn build_client(builder: ClientBuilder, proxy: Option<&str>) -> BotResult<Client> {
    let builder = match proxy {
        Some(proxy_url) => {
            info!("Configuring Telegram client with proxy");
            let proxy = Proxy::all(proxy_url).map_err(|e| anyhow::anyhow!("Invalid proxy url: {}", e))?;
            builder.proxy(proxy)
        }
        None => builder,
    };

    builder
        .build()
        .map_err(|e| BotError::Other(anyhow::anyhow!("Failed to build http client: {}", e)))
}
