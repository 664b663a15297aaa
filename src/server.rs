//! Native host: serves the component's router through actix-web.

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};

use crate::core::db::MemoryStore;
use crate::handle_request;

mod adapter {
    use actix_web::http::StatusCode;
    use actix_web::HttpRequest;
    use spin_sdk::http::{Method, Request, Response};

    pub fn actix_to_spin_request(req: &HttpRequest, body: actix_web::web::Bytes) -> Request {
        let method = match req.method().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "PATCH" => Method::Patch,
            "DELETE" => Method::Delete,
            "HEAD" => Method::Head,
            "OPTIONS" => Method::Options,
            other => Method::Other(other.to_string()),
        };

        let mut builder = Request::builder();
        builder.method(method).uri(req.uri().to_string());

        for (name, value) in req.headers() {
            if let Ok(val_str) = value.to_str() {
                builder.header(name.as_str(), val_str);
            }
        }

        builder.body(body.to_vec()).build()
    }

    pub fn spin_to_actix_response(spin_resp: Response) -> actix_web::HttpResponse {
        let status = StatusCode::from_u16(*spin_resp.status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = spin_resp.body().to_vec();

        let mut response = actix_web::HttpResponse::build(status);
        if body.is_empty() {
            return response.finish();
        }
        response.content_type("application/json").body(body)
    }
}

pub async fn handle_all(
    store: web::Data<MemoryStore>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    tracing::debug!(method = %req.method(), path = %req.path(), "incoming request");

    let spin_req = adapter::actix_to_spin_request(&req, body);
    let spin_resp = handle_request(store.get_ref(), &spin_req);

    adapter::spin_to_actix_response(spin_resp)
}

pub async fn run(store: web::Data<MemoryStore>, addr: &str) -> std::io::Result<()> {
    tracing::info!(%addr, "server listening");

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .default_service(web::route().to(handle_all))
    })
    .bind(addr)?
    .run()
    .await
}
