use std::{fs, process::ExitCode};

use clap::Parser;
use map_layers::{GeoJsonSurface, MapLayerManager, RouteRenderer, RouteSession, RouteView};
use presentation::{ErrorPresenter, RouteDetailPresenter};
use route_client::{RequestSequencer, RouteClient, RouteClientConfig};

mod args;

use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let errors = ErrorPresenter::new();

    // backend client
    let config = match RouteClientConfig::from_env() {
        Ok(config) => config,
        Err(why) => {
            eprintln!("{why}");
            return ExitCode::from(2);
        }
    };
    let client = match RouteClient::new(config) {
        Ok(client) => client,
        Err(why) => {
            eprintln!("{why}");
            return ExitCode::from(2);
        }
    };

    let request = match args.request() {
        Ok(request) => request,
        Err(why) => {
            eprintln!("{}", errors.present(&why));
            return ExitCode::from(2);
        }
    };

    // map
    let (view, task) = RouteView::spawn(
        MapLayerManager::new(GeoJsonSurface::new()),
        RouteRenderer::new(),
        RequestSequencer::new(),
    );
    let session = RouteSession::new(client, view);
    let result = session.plan(&request).await;

    /* dropping the session closes the view and hands the surface back */
    drop(session);
    let surface = match task.await {
        Ok(manager) => manager.into_surface(),
        Err(why) => {
            log::error!("route view task failed: {}", why);
            return ExitCode::FAILURE;
        }
    };

    let planned = match result {
        Ok(planned) => planned,
        Err(why) => {
            log::debug!("planning failed: {:?}", why);
            eprintln!("{}", errors.present(&why));
            return ExitCode::FAILURE;
        }
    };

    let summary = RouteDetailPresenter::new().present(&planned.model);
    if args.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(why) => {
                eprintln!("could not serialize summary: {why}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{summary}");
    }

    if let Some(path) = &args.output {
        let written = surface
            .to_json_string()
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(path, json).map_err(|e| e.to_string()));
        if let Err(why) = written {
            eprintln!("could not write {}: {why}", path.display());
            return ExitCode::FAILURE;
        }
        log::info!("wrote route map to {}", path.display());
    }

    ExitCode::SUCCESS
}
