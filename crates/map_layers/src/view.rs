use model::{RouteError, RouteModel, RouteResult};
use route_client::{PlanTicket, RequestSequencer};
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::{LayerId, MapLayerManager, MapSurface, RenderedRoute, RouteRenderer};

/// What the map currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSnapshot {
    pub generation: Option<u64>,
    pub layers: Vec<LayerId>,
    pub last_ticket: Option<PlanTicket>,
}

#[derive(Debug)]
enum Command {
    Render {
        ticket: Option<PlanTicket>,
        model: RouteModel,
        responder: oneshot::Sender<RouteResult<RenderedRoute>>,
    },
    Clear {
        responder: oneshot::Sender<()>,
    },
    Snapshot {
        responder: oneshot::Sender<ViewSnapshot>,
    },
}

struct ViewTask<S: MapSurface> {
    manager: MapLayerManager<S>,
    renderer: RouteRenderer,
    sequencer: RequestSequencer,
    last_ticket: Option<PlanTicket>,
}

impl<S: MapSurface> ViewTask<S> {
    fn render(
        &mut self,
        ticket: Option<PlanTicket>,
        model: &RouteModel,
    ) -> RouteResult<RenderedRoute> {
        if let Some(ticket) = ticket {
            if let Err(why) = self.sequencer.check(ticket) {
                log::info!("dropping stale route: {}", why);
                return Err(why);
            }
        }
        let rendered = self.renderer.render(model, &mut self.manager)?;
        self.last_ticket = ticket.or(self.last_ticket);
        Ok(rendered)
    }

    fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            generation: self.manager.active_generation(),
            layers: self.manager.active_handles().to_vec(),
            last_ticket: self.last_ticket,
        }
    }

    fn handle(&mut self, command: Command) {
        // a dropped responder only means the caller stopped waiting
        match command {
            Command::Render {
                ticket,
                model,
                responder,
            } => {
                let _ = responder.send(self.render(ticket, &model));
            }
            Command::Clear { responder } => {
                self.manager.clear();
                let _ = responder.send(());
            }
            Command::Snapshot { responder } => {
                let _ = responder.send(self.snapshot());
            }
        }
    }
}

/// Handle to the task that owns the map. All map mutation happens on that
/// task, one command at a time, so two routes can never be drawn
/// interleaved. Cheap to clone.
#[derive(Debug, Clone)]
pub struct RouteView {
    sender: mpsc::Sender<Command>,
    sequencer: RequestSequencer,
}

impl RouteView {
    /// Moves `manager` onto a new task. The task ends once every handle is
    /// dropped and gives the manager back through the join handle.
    pub fn spawn<S: MapSurface>(
        manager: MapLayerManager<S>,
        renderer: RouteRenderer,
        sequencer: RequestSequencer,
    ) -> (Self, JoinHandle<MapLayerManager<S>>) {
        let (sender, mut receiver) = mpsc::channel(32);
        let mut task = ViewTask {
            manager,
            renderer,
            sequencer: sequencer.clone(),
            last_ticket: None,
        };

        let handle = tokio::spawn(async move {
            while let Some(command) = receiver.recv().await {
                task.handle(command);
            }
            log::debug!("route view closed");
            task.manager
        });

        (Self { sender, sequencer }, handle)
    }

    /// Tickets checked by [`RouteView::render`] must come from this sequencer.
    pub fn sequencer(&self) -> &RequestSequencer {
        &self.sequencer
    }

    /// Draws `model` unless `ticket` has been overtaken by a newer one, in
    /// which case the map is left alone and `StaleResponse` is returned.
    pub async fn render(
        &self,
        ticket: PlanTicket,
        model: RouteModel,
    ) -> RouteResult<RenderedRoute> {
        self.send_render(Some(ticket), model).await
    }

    /// Draws `model` without any ordering check.
    pub async fn render_latest(&self, model: RouteModel) -> RouteResult<RenderedRoute> {
        self.send_render(None, model).await
    }

    async fn send_render(
        &self,
        ticket: Option<PlanTicket>,
        model: RouteModel,
    ) -> RouteResult<RenderedRoute> {
        let (responder, response) = oneshot::channel();
        self.send(Command::Render {
            ticket,
            model,
            responder,
        })
        .await?;
        response.await.map_err(|_| RouteError::ViewClosed)?
    }

    pub async fn clear(&self) -> RouteResult<()> {
        let (responder, response) = oneshot::channel();
        self.send(Command::Clear { responder }).await?;
        response.await.map_err(|_| RouteError::ViewClosed)
    }

    pub async fn snapshot(&self) -> RouteResult<ViewSnapshot> {
        let (responder, response) = oneshot::channel();
        self.send(Command::Snapshot { responder }).await?;
        response.await.map_err(|_| RouteError::ViewClosed)
    }

    async fn send(&self, command: Command) -> RouteResult<()> {
        self.sender
            .send(command)
            .await
            .map_err(|_| RouteError::ViewClosed)
    }
}
