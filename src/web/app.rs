use std::sync::Arc;

use actix_web::error::InternalError;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Result};
use base64::{Engine as _, engine::general_purpose};
use log::{error, info, warn};
use serde_json::Value;

use crate::config::Settings;
use crate::domain::{ErrorKind, Errors, OfferId, OffersService, UserId};
use crate::persistence::json_file::{read_snapshot, write_snapshot};
use crate::persistence::InMemoryStore;
use super::types::{ApiError, AppState, CreateOfferRequest};

// Wire the offers service to a store that backs all three ports
pub fn init_app_state(store: Arc<InMemoryStore>) -> AppState {
    OffersService::new(store.clone(), store.clone(), store)
}

// Read x-jwt-payload header and extract the acting user's id
fn get_auth_user_id(req: &HttpRequest) -> Option<UserId> {
    let auth_header = req.headers().get("x-jwt-payload")?;
    let auth_str = auth_header.to_str().ok()?;

    let decoded = general_purpose::STANDARD.decode(auth_str).ok()?;
    let json: Value = serde_json::from_slice(&decoded).ok()?;

    // Gateways send `sub` either as a number or as a numeric string
    match json.get("sub")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiError {
        message: "Unauthorized".to_string(),
    })
}

pub fn error_response(err: &Errors) -> HttpResponse {
    let body = ApiError {
        message: err.to_string(),
    };
    match err.kind() {
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::InvalidOperation => HttpResponse::BadRequest().json(body),
        ErrorKind::Conflict => HttpResponse::Conflict().json(body),
        ErrorKind::Internal => {
            error!("Request failed: {}", err);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

// Contribute to a wish
async fn create_offer(
    req: HttpRequest,
    offer_req: Result<web::Json<CreateOfferRequest>, actix_web::Error>,
    data: web::Data<AppState>,
) -> Result<HttpResponse> {
    let Some(user_id) = get_auth_user_id(&req) else {
        return Ok(unauthorized());
    };
    // Body errors are reported only once the caller is known
    let offer_req = match offer_req {
        Ok(offer_req) => offer_req,
        Err(err) => return Ok(err.error_response()),
    };

    let contribution = match offer_req.to_create_offer() {
        Ok(contribution) => contribution,
        Err(err) => return Ok(error_response(&err)),
    };

    match data.create(contribution, user_id).await {
        Ok(offer) => Ok(HttpResponse::Created().json(offer)),
        Err(err) => Ok(error_response(&err)),
    }
}

// Get all offers
async fn get_offers(req: HttpRequest, data: web::Data<AppState>) -> Result<HttpResponse> {
    if get_auth_user_id(&req).is_none() {
        return Ok(unauthorized());
    }

    match data.find_all().await {
        Ok(offers) => Ok(HttpResponse::Ok().json(offers)),
        Err(err) => Ok(error_response(&err)),
    }
}

// Get offer by ID
async fn get_offer(
    req: HttpRequest,
    path: web::Path<OfferId>,
    data: web::Data<AppState>,
) -> Result<HttpResponse> {
    if get_auth_user_id(&req).is_none() {
        return Ok(unauthorized());
    }

    match data.find_offer_by_id(path.into_inner()).await {
        Ok(offer) => Ok(HttpResponse::Ok().json(offer)),
        Err(err) => Ok(error_response(&err)),
    }
}

// Configure routes
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ApiError {
            message: err.to_string(),
        });
        InternalError::from_response(err, response).into()
    });

    cfg.app_data(json_config).service(
        web::scope("")
            .route("/offers", web::get().to(get_offers))
            .route("/offers", web::post().to(create_offer))
            .route("/offers/{id}", web::get().to(get_offer)),
    );
}

fn load_store(settings: &Settings) -> std::io::Result<InMemoryStore> {
    match &settings.data_file {
        Some(path) if path.exists() => read_snapshot(path)
            .map(InMemoryStore::from_snapshot)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
        Some(path) => {
            warn!("Data file {} does not exist, starting empty", path.display());
            Ok(InMemoryStore::new())
        }
        None => Ok(InMemoryStore::new()),
    }
}

// Main application
pub async fn run_app(settings: Settings) -> std::io::Result<()> {
    let store = Arc::new(load_store(&settings)?);
    let app_state = init_app_state(store.clone());

    info!("Starting server on {}:{}", settings.host, settings.port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(Logger::default())
            .configure(configure_app)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await?;

    if let Some(path) = &settings.data_file {
        let snapshot = store
            .snapshot()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        write_snapshot(path, &snapshot)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    }

    Ok(())
}
