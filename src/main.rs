use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Extension, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use campus_api::config;
use campus_api::database::DatabaseManager;
use campus_api::email::EmailClient;
use campus_api::handlers::{ops, protected, public};
use campus_api::middleware::session_auth_middleware;
use campus_api::queue::{
    handlers as job_handlers, job_types, QueueService, QueueStore, QueueWorker, WorkerHandle,
};
use campus_api::services::NotificationService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, EMAIL_API_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting campus-api in {:?} mode", config.environment);

    if config.database.run_migrations {
        DatabaseManager::migrate().await?;
    }

    let pool = DatabaseManager::pool().await?;
    let store = QueueStore::new(pool);
    let queue = QueueService::new(store.clone());
    let notifications = NotificationService::new(queue.clone());
    let email_client = EmailClient::new();

    let worker = spawn_worker(store, email_client);
    let app = app(queue, notifications, worker.clone());

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    worker.shutdown();
    DatabaseManager::close().await;
    Ok(())
}

/// Register every job handler and start the background poll loop
fn spawn_worker(store: QueueStore, email_client: EmailClient) -> WorkerHandle {
    let mut worker = QueueWorker::new(store);

    worker.register_handler(
        job_types::WELCOME_EMAIL,
        Arc::new(job_handlers::WelcomeEmailHandler::new(email_client.clone())),
    );
    worker.register_handler(
        job_types::SCHOOL_WELCOME_EMAIL,
        Arc::new(job_handlers::SchoolWelcomeEmailHandler::new(
            email_client.clone(),
        )),
    );
    worker.register_handler(
        job_types::PASSWORD_RESET_EMAIL,
        Arc::new(job_handlers::PasswordResetEmailHandler::new(
            email_client.clone(),
        )),
    );
    worker.register_handler(
        job_types::NOTIFICATION_EMAIL,
        Arc::new(job_handlers::NotificationEmailHandler::new(
            email_client.clone(),
        )),
    );
    worker.register_handler(
        job_types::TEMPLATED_EMAIL,
        Arc::new(job_handlers::TemplatedEmailHandler::new(email_client)),
    );
    worker.register_handler(job_types::TEST_JOB, Arc::new(job_handlers::TestJobHandler));

    worker.spawn()
}

fn app(queue: QueueService, notifications: NotificationService, worker: WorkerHandle) -> Router {
    Router::new()
        .route("/", get(public::health::root))
        .route("/health", get(public::health::health))
        // Public routes - no session required
        .route("/auth/login", post(public::auth::login_post))
        .route("/users", post(public::users::create_user_post))
        .route(
            "/users/activate-account",
            post(public::users::activate_account_post),
        )
        .route("/onboarding/submit", post(public::onboarding::submit_post))
        // Protected routes under /api
        .merge(api_routes())
        // Operational smoke-test surface
        .merge(ops_routes())
        .layer(Extension(queue))
        .layer(Extension(notifications))
        .layer(Extension(worker))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router {
    use protected::{auth, onboarding, users};

    Router::new()
        .route("/api/auth/logout", post(auth::logout_post))
        .route("/api/users", get(users::list_users))
        .route(
            "/api/users/:id",
            get(users::get_user).delete(users::delete_user),
        )
        .route(
            "/api/users/:id/create-password",
            post(users::create_password_post),
        )
        .route(
            "/api/onboarding/status/:user_id",
            get(onboarding::status_get),
        )
        .layer(axum_middleware::from_fn(session_auth_middleware))
}

fn ops_routes() -> Router {
    Router::new()
        .route("/queue/test", post(ops::queue_test::test_post))
        .route("/queue/test/bulk", post(ops::queue_test::test_bulk_post))
        .route(
            "/queue/worker/status",
            get(ops::queue_test::worker_status_get),
        )
        .route("/queue/health", get(ops::queue_test::queue_health_get))
        .route("/email/test", post(ops::email_test::test_post))
}
