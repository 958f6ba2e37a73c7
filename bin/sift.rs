use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use sift::entity::{AttributeKind, AttributeMeta, EntityMetadata};
use sift::schema::{Choice, FieldKind, PanelPosition};
use sift::{
    AppState, ConfigStore, Entity, EntityRegistry, FieldDescriptor, FieldValue, MemorySource,
    SearchConfig, SearchService, SearchSettings,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Configurable search panels for structured content", long_about = None)]
struct Args {
    /// HTTP API port
    #[arg(long, env = "SIFT_HTTP_PORT", default_value = "8080")]
    http_port: u16,

    /// Bind address for the HTTP API
    #[arg(long, env = "SIFT_BIND_ADDR", default_value = "0.0.0.0")]
    bind_addr: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting sift v{}", sift::VERSION);

    let registry = Arc::new(demo_registry());
    info!("Entity registry built: {:?}", registry.keys());

    let store = Arc::new(ConfigStore::new());
    seed_demo_config(&store)?;
    info!("Seeded {} search configuration(s)", store.config_count());

    let service = SearchService::new(store, registry, SearchSettings::default());
    let app = sift::create_router(AppState { service });

    let http_addr = format!("{}:{}", args.bind_addr, args.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    info!("HTTP API server listening on {}", http_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");
            info!("Received shutdown signal, gracefully shutting down");
        })
        .await?;

    Ok(())
}

/// Demo registry: a small blog content set to search over
fn demo_registry() -> EntityRegistry {
    let mut registry = EntityRegistry::new();

    let categories = MemorySource::new(
        EntityMetadata::new().attribute("title", AttributeMeta::new(AttributeKind::Text)),
    )
    .with_records(vec![
        Entity::new(1, "Rust").set("title", FieldValue::Text("Rust".into())),
        Entity::new(2, "Web").set("title", FieldValue::Text("Web".into())),
    ]);
    registry.register("blog.category", Arc::new(categories));

    let post_metadata = EntityMetadata::new()
        .attribute("title", AttributeMeta::new(AttributeKind::Text))
        .attribute("description", AttributeMeta::new(AttributeKind::Text))
        .attribute(
            "status",
            AttributeMeta::new(AttributeKind::Text).with_choices(vec![
                Choice::new("DF", "Draft"),
                Choice::new("PB", "Published"),
            ]),
        )
        .attribute(
            "category",
            AttributeMeta::new(AttributeKind::Relation {
                target: "blog.category".to_string(),
            }),
        )
        .attribute("created", AttributeMeta::new(AttributeKind::Date));

    let posts = MemorySource::new(post_metadata).with_records(vec![
        post(1, "Ownership in practice", "PB", 1, "2024-01-15")
            .with_url("/blog/rust/2024/1/15/ownership-in-practice/"),
        post(2, "Async pitfalls", "PB", 1, "2024-03-02")
            .with_url("/blog/rust/2024/3/2/async-pitfalls/"),
        post(3, "CSS grid notes", "DF", 2, "2024-02-20"),
        post(4, "HTTP caching", "PB", 2, "2024-04-11")
            .with_url("/blog/web/2024/4/11/http-caching/"),
    ]);
    registry.register("blog.post", Arc::new(posts));

    registry
}

fn post(id: u64, title: &str, status: &str, category: u64, created: &str) -> Entity {
    let date = NaiveDate::parse_from_str(created, "%Y-%m-%d").expect("valid demo date");
    Entity::new(id, title)
        .set("title", FieldValue::Text(title.to_string()))
        .set(
            "description",
            FieldValue::Text(format!("Notes on {}", title.to_lowercase())),
        )
        .set("status", FieldValue::Text(status.to_string()))
        .set("category", FieldValue::Reference(category))
        .set("created", FieldValue::Date(date))
}

fn seed_demo_config(store: &ConfigStore) -> Result<()> {
    let config_id = store.insert_config(
        SearchConfig::new("Blog search", "blog.post")
            .with_position(PanelPosition::Top)
            .with_results_limit(10),
    );

    store.insert_field(
        config_id,
        FieldDescriptor::new("title", "Title", FieldKind::Text)
            .with_order(0)
            .with_placeholder("Search posts..."),
    )?;
    store.insert_field(
        config_id,
        FieldDescriptor::new("status", "Status", FieldKind::SingleChoice).with_order(1),
    )?;
    store.insert_field(
        config_id,
        FieldDescriptor::new("category", "Category", FieldKind::MultiChoice).with_order(2),
    )?;
    store.insert_field(
        config_id,
        FieldDescriptor::new("created", "Published between", FieldKind::DateRange).with_order(3),
    )?;

    Ok(())
}
