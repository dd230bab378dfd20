//! Backend entry-point: wires REST endpoints, the recipe change feed, and
//! OpenAPI docs.

use std::env;
use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::Trace;
use backend::domain::ports::{
    FixtureLoginService, FixtureRecipeRepository, FixtureStatsRepository, FixtureUserRepository,
    LoginService, RecipeRepository, StatsRepository, UserRepository,
};
use backend::domain::{DashboardService, FavoritesService, RecipeService, SearchService};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{dashboard, favorites, recipes, users};
use backend::inbound::ws::{RecipeFeed, ws_entry};
use backend::outbound::persistence::{
    DbPool, DieselLoginService, DieselRecipeRepository, DieselStatsRepository,
    DieselUserRepository, PoolConfig,
};

/// Driven-side ports selected at startup: database-backed when
/// `DATABASE_URL` is set, fixtures otherwise.
struct Ports {
    login: Arc<dyn LoginService>,
    users: Arc<dyn UserRepository>,
    recipes: Arc<dyn RecipeRepository>,
    stats: Arc<dyn StatsRepository>,
}

async fn build_ports() -> std::io::Result<Ports> {
    match env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = DbPool::new(PoolConfig::new(url)).await.map_err(|error| {
                std::io::Error::other(format!("failed to build database pool: {error}"))
            })?;
            let stats = DieselStatsRepository::new(pool.clone());
            if let Err(error) = stats.ensure_initialised().await {
                warn!(error = %error, "could not seed the stats record");
            }
            Ok(Ports {
                login: Arc::new(DieselLoginService::new(pool.clone())),
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                recipes: Arc::new(DieselRecipeRepository::new(pool)),
                stats: Arc::new(stats),
            })
        }
        Err(_) => {
            warn!("DATABASE_URL not set; using fixture adapters (dev only, nothing persists)");
            Ok(Ports {
                login: Arc::new(FixtureLoginService),
                users: Arc::new(FixtureUserRepository),
                recipes: Arc::new(FixtureRecipeRepository),
                stats: Arc::new(FixtureStatsRepository),
            })
        }
    }
}

fn build_http_state(ports: &Ports, feed: &RecipeFeed) -> HttpState {
    HttpState {
        login: ports.login.clone(),
        recipes: RecipeService::new(
            ports.recipes.clone(),
            ports.users.clone(),
            Arc::new(feed.clone()),
        ),
        search: SearchService::new(ports.recipes.clone(), ports.stats.clone()),
        favorites: FavoritesService::new(
            ports.users.clone(),
            ports.recipes.clone(),
            ports.stats.clone(),
        ),
        dashboard: DashboardService::new(ports.recipes.clone(), ports.stats.clone()),
    }
}

fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(error) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %error, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {error}"
                )))
            }
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }

    let key = load_session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

    let ports = build_ports().await?;
    let feed = RecipeFeed::new();
    let http_state = web::Data::new(build_http_state(&ports, &feed));
    let feed_state = web::Data::new(feed);
    let health_state = web::Data::new(HealthState::new());

    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = build_app(
            http_state.clone(),
            feed_state.clone(),
            server_health_state.clone(),
            key.clone(),
            cookie_secure,
        );
        #[cfg(feature = "metrics")]
        let app = app.wrap(make_metrics());
        app
    })
    .bind(bind_addr)?;

    health_state.mark_ready();
    server.run().await
}

fn build_app(
    http_state: web::Data<HttpState>,
    feed_state: web::Data<RecipeFeed>,
    health_state: web::Data<HealthState>,
    key: Key,
    cookie_secure: bool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build();

    let api = web::scope("/api/v1")
        .service(users::register)
        .service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(recipes::search_recipes)
        .service(recipes::list_recipes)
        .service(recipes::create_recipe)
        .service(recipes::get_recipe)
        .service(recipes::update_recipe)
        .service(recipes::delete_recipe)
        .service(favorites::list_favorites)
        .service(favorites::toggle_favorite)
        .service(dashboard::get_dashboard);

    // Session middleware sits at app level so the WebSocket upgrade can
    // read the cookie too; Trace is registered last and therefore wraps
    // everything.
    let mut app = App::new()
        .app_data(http_state)
        .app_data(feed_state)
        .app_data(health_state)
        .wrap(session)
        .wrap(Trace)
        .service(api)
        .service(ws_entry)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    {
        app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app
}

#[cfg(feature = "metrics")]
fn make_metrics() -> actix_web_prom::PrometheusMetrics {
    PrometheusMetricsBuilder::new("cookeasy")
        .endpoint("/metrics")
        .build()
        .expect("configure Prometheus metrics")
}
