use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, info};
use validator::Validate;

use crate::application::Converter;
use crate::domain::error::AppError;
use crate::domain::Dialect;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::csv::CsvParser;

pub struct HttpState {
    pub config: AppConfig,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PreviewRequest {
    #[validate(length(min = 1, message = "csv_text must not be empty"))]
    pub csv_text: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ConvertRequest {
    #[validate(length(min = 1, message = "csv_text must not be empty"))]
    pub csv_text: String,

    /// Sanitized before use; defaults to "imported_data"
    #[validate(length(min = 1, max = 255))]
    pub table_name: Option<String>,

    /// Dialect token; unknown tokens fall back to postgresql
    pub dialect: Option<String>,

    /// Sanitized column name -> generic type string (e.g. "VARCHAR(10)")
    #[serde(default)]
    pub type_overrides: HashMap<String, String>,
}

#[derive(Serialize)]
pub struct DialectsResponse {
    pub dialects: Vec<&'static str>,
    pub default: &'static str,
}

fn error_response(err: AppError) -> HttpResponse {
    match &err {
        AppError::ValidationError(_) | AppError::ParseError(_) => {
            HttpResponse::BadRequest().body(err.to_string())
        }
        _ => {
            error!("request failed: {}", err);
            HttpResponse::InternalServerError().body(err.to_string())
        }
    }
}

fn parse_table(state: &HttpState, csv_text: &str) -> Result<crate::domain::DataTable, AppError> {
    CsvParser::new()
        .with_max_rows(state.config.max_upload_rows)
        .parse_content_auto_detect(csv_text)
}

#[post("/preview")]
async fn preview(data: web::Data<HttpState>, req: web::Json<PreviewRequest>) -> impl Responder {
    if let Err(e) = req.validate() {
        return HttpResponse::BadRequest().body(e.to_string());
    }

    let table = match parse_table(&data, &req.csv_text) {
        Ok(table) => table,
        Err(e) => return error_response(e),
    };

    info!(
        rows = table.row_count(),
        columns = table.column_count(),
        "preview request"
    );

    let converter = Converter::new(data.config.conversion.clone());
    match converter.preview(&table) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(e),
    }
}

#[post("/convert")]
async fn convert(data: web::Data<HttpState>, req: web::Json<ConvertRequest>) -> impl Responder {
    if let Err(e) = req.validate() {
        return HttpResponse::BadRequest().body(e.to_string());
    }

    let table = match parse_table(&data, &req.csv_text) {
        Ok(table) => table,
        Err(e) => return error_response(e),
    };

    let dialect = req
        .dialect
        .as_deref()
        .map(Dialect::from_token)
        .unwrap_or_default();
    let table_name = req.table_name.as_deref().unwrap_or("imported_data");

    info!(
        dialect = %dialect,
        table = table_name,
        rows = table.row_count(),
        "convert request"
    );

    let converter = Converter::new(data.config.conversion.clone());
    match converter.convert(&table, table_name, dialect, &req.type_overrides) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(e),
    }
}

#[get("/dialects")]
async fn dialects() -> impl Responder {
    HttpResponse::Ok().json(DialectsResponse {
        dialects: Dialect::ALL.iter().map(|d| d.as_str()).collect(),
        default: Dialect::default().as_str(),
    })
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn start_server(config: AppConfig) -> std::io::Result<Server> {
    let bind = (config.host.clone(), config.port);
    let state = web::Data::new(HttpState { config });

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new().wrap(cors).app_data(state.clone()).service(
            web::scope("/api")
                .service(preview)
                .service(convert)
                .service(dialects)
                .service(health),
        )
    })
    .bind(bind)?
    .run();

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, test};

    fn test_state() -> web::Data<HttpState> {
        web::Data::new(HttpState {
            config: AppConfig::default(),
        })
    }

    async fn body_string(resp: HttpResponse) -> String {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn test_convert_endpoint_round_trip() {
        let app = test::init_service(
            App::new()
                .app_data(test_state())
                .service(web::scope("/api").service(convert)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/convert")
            .set_json(serde_json::json!({
                "csv_text": "id,name\n1,O'Brien\n2,",
                "dialect": "postgresql"
            }))
            .to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert!(resp["create_table"]
            .as_str()
            .unwrap()
            .starts_with("CREATE TABLE imported_data"));
        assert!(resp["insert"].as_str().unwrap().contains("'O''Brien'"));
        assert_eq!(resp["row_count"], 2);
        assert_eq!(resp["dialect"], "postgresql");
    }

    #[actix_web::test]
    async fn test_preview_endpoint_reports_findings() {
        let app = test::init_service(
            App::new()
                .app_data(test_state())
                .service(web::scope("/api").service(preview)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/preview")
            .set_json(serde_json::json!({ "csv_text": "v\nA\nA\nB" }))
            .to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp["row_count"], 3);
        assert_eq!(resp["columns"][0]["sanitized_name"], "v");
        assert!(!resp["report"]["warnings"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_empty_csv_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(test_state())
                .service(web::scope("/api").service(convert)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/convert")
            .set_json(serde_json::json!({ "csv_text": "id,name\n" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_dialects_endpoint() {
        let app = test::init_service(App::new().service(web::scope("/api").service(dialects))).await;
        let req = test::TestRequest::get().uri("/api/dialects").to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp["default"], "postgresql");
        assert_eq!(resp["dialects"].as_array().unwrap().len(), 5);
    }

    #[actix_web::test]
    async fn test_error_response_mapping() {
        let bad = error_response(AppError::ValidationError("nope".into()));
        assert_eq!(bad.status(), 400);
        assert!(body_string(bad).await.contains("nope"));

        let internal = error_response(AppError::Internal("boom".into()));
        assert_eq!(internal.status(), 500);
    }
}
