//! Drive the resource sidebar from the command line.
//!
//! ```text
//! resource-sidebar add <draft.json> <image>
//! resource-sidebar edit <resource.json> <draft.json>
//! resource-sidebar delete <resource.json> [--yes]
//! ```
//!
//! `draft.json` maps form input names to values, e.g.
//! `{"title": "Bike", "quantity": 2, "price": "5"}`.

use resource_sidebar::dropdown::PointerEvents;
use resource_sidebar::notice::drain;
use resource_sidebar::{
    AuthContext, HttpGateway, ImageFile, Notice, NoticeLevel, Resource, ResourceSidebar,
    SidebarConfig, SidebarHost,
};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: resource-sidebar add <draft.json> <image> | edit <resource.json> <draft.json> | delete <resource.json> [--yes]";

struct CliHost;

impl SidebarHost for CliHost {
    fn fetch_resources(&mut self) {
        info!("Listing refresh requested");
    }

    fn close_sidebar(&mut self) {
        info!("Sidebar closed");
    }
}

type CliSidebar = ResourceSidebar<HttpGateway, CliHost>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = SidebarConfig::load()?;
    info!(backend = %config.backend_url, "Configuration loaded");

    let email = std::env::var("SIDEBAR_OWNER_EMAIL")
        .map_err(|_| "SIDEBAR_OWNER_EMAIL must be set to the signed-in user's email")?;

    let (mut sidebar, mut notices) = ResourceSidebar::new(
        HttpGateway::new(config)?,
        CliHost,
        AuthContext::new(email),
        PointerEvents::new(),
    );

    let result = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["add", draft, image] => {
            sidebar.open(None);
            apply_draft(&mut sidebar, draft).await?;
            let file = ImageFile::from_path(image).await?;
            match sidebar.upload_image(file).await {
                Ok(()) => {
                    print_notices(&mut notices);
                    sidebar.submit().await
                }
                Err(e) => Err(e),
            }
        }
        ["edit", resource, draft] => {
            sidebar.open(Some(read_json(resource).await?));
            apply_draft(&mut sidebar, draft).await?;
            sidebar.submit().await
        }
        ["delete", resource, rest @ ..] => {
            let confirmed = rest.contains(&"--yes");
            sidebar.open(Some(read_json::<Resource>(resource).await?));
            sidebar.delete_resource(|_| confirmed).await
        }
        _ => return Err(USAGE.into()),
    };

    print_notices(&mut notices);
    result.map_err(Into::into)
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let text = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&text)?)
}

async fn apply_draft(sidebar: &mut CliSidebar, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let fields: serde_json::Map<String, Value> = read_json(path).await?;
    for (name, value) in fields {
        let text = match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };
        sidebar.set_field_by_name(&name, &text)?;
    }
    Ok(())
}

fn print_notices(rx: &mut UnboundedReceiver<Notice>) {
    for notice in drain(rx) {
        match notice.level {
            NoticeLevel::Success => println!("{}", notice.message),
            NoticeLevel::Error => eprintln!("{}", notice.message),
        }
    }
}
