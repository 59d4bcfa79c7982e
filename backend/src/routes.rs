use std::panic::{self, AssertUnwindSafe};

use actix_cors::Cors;
use actix_web::{HttpResponse, web};
use log::{info, warn};
use shared::{AnalyzeRequest, AnalyzeResponse};

use crate::analysis;
use crate::error::AnalyzeError;

pub fn configure_routes(cfg: &mut web::ServiceConfig, max_payload_bytes: usize) {
    cfg.app_data(json_config(max_payload_bytes))
        .service(web::resource("/analyze").route(web::post().to(analyze)));
}

pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}

fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let err = AnalyzeError::from_json_error(err);
            warn!("Rejected /analyze body: {}", err);
            err.into()
        })
}

async fn analyze(body: web::Json<AnalyzeRequest>) -> Result<HttpResponse, AnalyzeError> {
    let data_uri = body.into_inner().image.ok_or_else(|| {
        warn!("Request without 'image' key");
        AnalyzeError::MissingField
    })?;

    let classification = run_pipeline(move || Ok(analysis::analyze_data_uri(&data_uri)?)).await?;

    info!(
        "Classified sample: ripeness={}, quality={}, Y={:.2}, Cr={:.2}, Cb={:.2}",
        classification.ripeness,
        classification.quality,
        classification.means.y,
        classification.means.cr,
        classification.means.cb
    );

    Ok(HttpResponse::Ok().json(AnalyzeResponse::from(classification)))
}

/// Runs CPU-bound work on the blocking pool. A panic inside `job` becomes an
/// `Internal` error carrying the panic message.
async fn run_pipeline<T, F>(job: F) -> Result<T, AnalyzeError>
where
    F: FnOnce() -> Result<T, AnalyzeError> + Send + 'static,
    T: Send + 'static,
{
    web::block(move || panic::catch_unwind(AssertUnwindSafe(job)))
        .await?
        .map_err(AnalyzeError::from_panic)?
}
