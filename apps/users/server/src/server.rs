//! gRPC server initialization and lifecycle management
//!
//! - Tracing initialization
//! - Database readiness and migrations
//! - Service creation
//! - gRPC server configuration, health service and graceful shutdown

use std::future::Future;

use core_config::FromEnv;
use database::postgres::{connect_when_ready, run_migrations};
use domain_users::{PostgresUserRepository, UserRepository, UserService};
use eyre::{Result, WrapErr};
use grpc_client::server::{GrpcServer, ServerConfig, create_health_service};
use migration::Migrator;
use rpc::users::v1::users_service_server::{SERVICE_NAME, UsersServiceServer};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tracing::{info, warn};

use crate::config::Config;
use crate::service::UsersServiceImpl;

/// Run the gRPC server
///
/// 1. Loads configuration and sets up structured logging
/// 2. Waits for PostgreSQL within the readiness budget
/// 3. Applies pending migrations
/// 4. Serves until Ctrl-C or SIGTERM
///
/// # Errors
///
/// Returns an error if configuration is invalid, PostgreSQL never becomes
/// ready, migrations fail, or the listener cannot be bound.
pub async fn run() -> Result<()> {
    let config = Config::from_env().wrap_err("Failed to load configuration")?;

    // Initialize tracing (env-aware: JSON for prod, pretty for dev)
    core_config::tracing::init_tracing(&config.environment);

    info!(
        url = %config.database.redacted_url(),
        max_attempts = config.db_readiness.max_attempts,
        delay = ?config.db_readiness.delay,
        "Waiting for database..."
    );
    let db = connect_when_ready(config.database.clone(), &config.db_readiness)
        .await
        .wrap_err("Database did not become ready")?;

    run_migrations::<Migrator>(&db, "users_server")
        .await
        .wrap_err("Failed to run database migrations")?;

    let service = UserService::new(PostgresUserRepository::new(db));

    let addr = config.grpc.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;

    serve(listener, service, &config.grpc, shutdown_signal()).await
}

/// Serve the users service on an already bound listener until `shutdown` resolves.
///
/// The health service reports SERVING for `users.v1.UsersService` and the
/// empty service name while requests are accepted, and NOT_SERVING once
/// shutdown begins.
pub async fn serve<R, F>(
    listener: TcpListener,
    service: UserService<R>,
    config: &ServerConfig,
    shutdown: F,
) -> Result<()>
where
    R: UserRepository + 'static,
    F: Future<Output = ()> + Send,
{
    let local_addr = listener.local_addr().wrap_err("Listener has no local address")?;

    let (health_reporter, health_service) = create_health_service();
    GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;

    let mut users_service = UsersServiceServer::new(UsersServiceImpl::new(service))
        .max_decoding_message_size(config.max_message_size)
        .max_encoding_message_size(config.max_message_size);
    if let Some(encoding) = config.compression() {
        users_service = users_service
            .accept_compressed(encoding)
            .send_compressed(encoding);
    }

    GrpcServer::log_startup(config, SERVICE_NAME);
    info!(addr = %local_addr, "UsersService listening");

    let draining = async {
        shutdown.await;
        GrpcServer::mark_not_serving(&health_reporter, SERVICE_NAME).await;
        info!("Shutdown requested, draining in-flight requests");
    };

    Server::builder()
        .add_service(health_service)
        .add_service(users_service)
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), draining)
        .await
        .wrap_err("gRPC server failed")?;

    info!("UsersService stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
