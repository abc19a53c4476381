use async_trait::async_trait;
use model::{RouteModel, RouteRequest, RouteResult};

pub mod client;
pub mod config;
pub mod sequence;

pub use client::RouteClient;
pub use config::{ConfigError, RouteClientConfig};
pub use sequence::{PlanTicket, RequestSequencer};

/// Anything that can turn a request into a route. Implemented by
/// [`RouteClient`]; test code and alternative backends plug in here.
#[async_trait]
pub trait RoutePlanner: Send + Sync {
    async fn plan(&self, request: &RouteRequest) -> RouteResult<RouteModel>;
}

#[async_trait]
impl RoutePlanner for RouteClient {
    async fn plan(&self, request: &RouteRequest) -> RouteResult<RouteModel> {
        RouteClient::plan(self, request).await
    }
}
