use std::{convert::Infallible, net::SocketAddr, sync::Arc};

use hyper::{
    body,
    header::CONTENT_TYPE,
    service::{make_service_fn, service_fn},
    Body, Method as HttpMethod, Request, Response, Server, StatusCode,
};

use crate::application::Application;

/// HTTP transport adapter for an [`Application`].
///
/// The adapter is a thin wrapper: it delivers POSTed `application/json`
/// bodies to the dispatcher and maps the dispatcher's output to the
/// response contract — a JSON body for answered requests, an empty
/// `text/plain` body when the message contained only notifications.
#[derive(Clone)]
pub struct RpcService {
    app: Arc<Application>,
}

impl RpcService {
    /// Wraps the given application.
    pub fn new(app: Arc<Application>) -> Self {
        Self { app }
    }

    /// Handles one HTTP request.
    pub async fn handle(&self, request: Request<Body>) -> hyper::Result<Response<Body>> {
        if request.method() != HttpMethod::POST {
            return Ok(plain_status(StatusCode::METHOD_NOT_ALLOWED));
        }
        let is_json = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/json"))
            .unwrap_or(false);
        if !is_json {
            return Ok(plain_status(StatusCode::UNSUPPORTED_MEDIA_TYPE));
        }

        let content = body::to_bytes(request.into_body()).await?;
        let content = String::from_utf8_lossy(&content);
        log::debug!("Request: {}", content);

        let response = match self.app.handle_request_string(&content) {
            Some(response) => {
                log::debug!("Response: {}", response);
                Response::builder()
                    .status(StatusCode::OK)
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(response))
            }
            None => Response::builder()
                .status(StatusCode::OK)
                .header(CONTENT_TYPE, "text/plain")
                .body(Body::empty()),
        };
        Ok(response.expect("response parts are valid"))
    }

    /// Binds `addr` and serves the application until the server is stopped.
    pub async fn serve(self, addr: SocketAddr) -> hyper::Result<()> {
        let service = Arc::new(self);
        let make_service = make_service_fn(move |_| {
            let service = service.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |request| {
                    let service = service.clone();
                    async move { service.handle(request).await }
                }))
            }
        });
        Server::bind(&addr).serve(make_service).await
    }
}

fn plain_status(status: StatusCode) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}
