//! # University Records - نقطه ورود برنامه
//!
//! تنظیمات رو میخونه، لاگ رو راه میندازه، migration‌ها رو اجرا میکنه و
//! سرور HTTP رو بالا میاره.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use uni_records::{
    api::create_router,
    config::{Config, Environment},
    database::Database,
    error::Result,
};

/// نقطه ورود اصلی برنامه
///
/// # Errors
/// خطا برمیگردونه اگه:
/// - تنظیمات نامعتبر باشن
/// - دیتابیس متصل نشه یا migration شکست بخوره
/// - سرور استارت نشه
#[tokio::main]
async fn main() -> Result<()> {
    // نبودن فایل .env مشکلی نیست
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.environment);

    info!(environment = ?config.environment, "🚀 Starting University Records Service...");

    let database = Database::connect(&config.database_url).await?;
    info!("✅ Database connected successfully");

    database.migrate().await?;
    info!("✅ Database migrations applied");

    let addr = config.server_addr();
    let app = create_router(database);

    let listener = TcpListener::bind(addr.as_str()).await?;
    info!("🌐 Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// راه‌اندازی سیستم tracing
///
/// در development خروجی pretty و در production خروجی JSON.
/// `RUST_LOG` فیلتر پیش‌فرض رو override میکنه.
fn init_tracing(environment: Environment) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("uni_records=debug,tower_http=debug"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if environment.is_production() {
        registry
            .with(fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .pretty(),
            )
            .init();
    }
}
