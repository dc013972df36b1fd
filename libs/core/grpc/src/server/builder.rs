use super::config::ServerConfig;
use tonic_health::ServingStatus;
use tonic_health::server::HealthReporter;
use tracing::info;

/// Startup logging and health reporting for gRPC servers.
pub struct GrpcServer;

impl GrpcServer {
    /// Log server startup information for a single service.
    pub fn log_startup(config: &ServerConfig, service_name: &str) {
        info!(
            addr = %config.addr_string(),
            service = service_name,
            compression = config.enable_compression,
            max_message_size = config.max_message_size,
            "gRPC server starting"
        );

        info!("Health check service enabled (grpc.health.v1.Health)");
    }

    /// Mark a service as serving.
    ///
    /// The empty service name is marked too; it is what generic health
    /// checkers query.
    pub async fn setup_health(health_reporter: &HealthReporter, service_name: &str) {
        Self::set_status(health_reporter, service_name, ServingStatus::Serving).await;
        info!(service = service_name, "Service marked as serving");
    }

    /// Mark a service as not serving, used while draining on shutdown.
    pub async fn mark_not_serving(health_reporter: &HealthReporter, service_name: &str) {
        Self::set_status(health_reporter, service_name, ServingStatus::NotServing).await;
        info!(service = service_name, "Service marked as not serving");
    }

    async fn set_status(
        health_reporter: &HealthReporter,
        service_name: &str,
        status: ServingStatus,
    ) {
        health_reporter
            .set_service_status(service_name, status)
            .await;
        health_reporter.set_service_status("", status).await;
    }
}

// Re-export health_reporter for convenience
pub use tonic_health::server::health_reporter as create_health_service;
