use uds_http::config::Config;
use uds_http::http::request::{Method, Request};

#[cfg(unix)]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let request = parse_args(std::env::args().skip(1).collect())?;

    tokio::select! {
        res = run(&cfg, request) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

#[cfg(not(unix))]
fn main() -> anyhow::Result<()> {
    anyhow::bail!("uds-http needs Unix domain sockets")
}

/// `[METHOD] TARGET`, method defaulting to GET.
fn parse_args(args: Vec<String>) -> anyhow::Result<Request> {
    let (method, target) = match args.as_slice() {
        [target] => (Method::GET, target.as_str()),
        [method, target] => (
            Method::from_str(method)
                .ok_or_else(|| anyhow::anyhow!("invalid method: {}", method))?,
            target.as_str(),
        ),
        _ => anyhow::bail!("usage: uds-http [METHOD] TARGET"),
    };

    Ok(Request::builder().method(method).target(target).build()?)
}

#[cfg(unix)]
async fn run(cfg: &Config, mut request: Request) -> anyhow::Result<()> {
    let client = uds_http::client::UdsClient::from_config(cfg);
    let response = client.send(&mut request).await?;

    let head = &response.head;
    println!("{} {} {}", head.version, head.status.as_u16(), head.reason);
    print!("{}{}", head.headers, head.content_headers);
    println!();
    println!("{}", response.text());

    Ok(())
}
