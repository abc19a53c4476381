use model::{RouteModel, RouteRequest, RouteResult};
use route_client::{PlanTicket, RoutePlanner};

use crate::{RenderedRoute, RouteView};

/// A route that was planned and is now on the map.
#[derive(Debug, Clone)]
pub struct PlannedRoute {
    pub ticket: PlanTicket,
    pub model: RouteModel,
    pub rendered: RenderedRoute,
}

/// Plans routes and draws them, one request/render cycle per call.
///
/// Calls may overlap. Each call takes a ticket before going to the planner;
/// a result that comes back after a newer call started is rejected with
/// `StaleResponse` and never reaches the map. Failures leave the map as it
/// was.
pub struct RouteSession<P: RoutePlanner> {
    planner: P,
    view: RouteView,
}

impl<P: RoutePlanner> RouteSession<P> {
    pub fn new(planner: P, view: RouteView) -> Self {
        Self { planner, view }
    }

    pub fn planner(&self) -> &P {
        &self.planner
    }

    pub fn view(&self) -> &RouteView {
        &self.view
    }

    pub async fn plan(&self, request: &RouteRequest) -> RouteResult<PlannedRoute> {
        let ticket = self.view.sequencer().issue();
        log::debug!(
            "planning request #{} ({} mode)",
            ticket.sequence(),
            request.transport_mode
        );

        let model = self.planner.plan(request).await.map_err(|why| {
            log::warn!("request #{} failed: {}", ticket.sequence(), why);
            why
        })?;
        let rendered = self.view.render(ticket, model.clone()).await?;

        log::info!(
            "showing route #{}: {} points, {:.2} m",
            ticket.sequence(),
            model.path().len(),
            model.metrics().total_distance
        );
        Ok(PlannedRoute {
            ticket,
            model,
            rendered,
        })
    }

    pub async fn clear(&self) -> RouteResult<()> {
        self.view.clear().await
    }
}
