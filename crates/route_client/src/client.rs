use model::{RouteError, RouteModel, RouteRequest, RouteResponse, RouteResult};

use crate::config::{ConfigError, RouteClientConfig};

/// Talks to the route planning backend. One call to [`RouteClient::plan`] is
/// exactly one POST; nothing is cached and nothing is retried.
#[derive(Debug, Clone)]
pub struct RouteClient {
    config: RouteClientConfig,
    http: reqwest::Client,
}

impl RouteClient {
    pub fn new(config: RouteClientConfig) -> Result<Self, ConfigError> {
        /* build a new http client with optional proxy */
        let mut builder = reqwest::Client::builder().timeout(config.timeout());
        if let Some(proxy_url) = &config.proxy {
            log::info!("Routing planner requests through proxy '{proxy_url}'.");
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }
        let http = builder.build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &RouteClientConfig {
        &self.config
    }

    pub async fn plan(&self, request: &RouteRequest) -> RouteResult<RouteModel> {
        let url = self.config.url();
        log::debug!(
            "Requesting route from '{}': {:?} -> {:?}, {} waypoint(s), mode {}.",
            url,
            request.start_point,
            request.end_point,
            request.path_points.len(),
            request.transport_mode
        );

        /* perform post-request */
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|why| {
                log::error!("Failed to send route request. URL: {url}\nError: {why}");
                RouteError::connection(url.clone(), why)
            })?;

        /* check transport status */
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.ok().filter(|text| !text.is_empty());
            log::warn!(
                "Route backend answered {} for {}: {}",
                status,
                url,
                text.as_deref().unwrap_or("<empty body>")
            );
            return Err(RouteError::status(status.as_u16(), url, text));
        }

        /* parse response */
        let text = response
            .text()
            .await
            .map_err(|why| RouteError::connection(url.clone(), why))?;
        let body: RouteResponse = serde_json::from_str(&text).map_err(|why| {
            log::error!("Failed to parse route response. URL: {url}\nError: {why}. Body: {text}");
            why
        })?;

        let model = RouteModel::decode(body, request.transport_mode)?;
        log::debug!(
            "Planned route with {} point(s) and {} road(s).",
            model.path().len(),
            model.roads().len()
        );
        Ok(model)
    }
}
