use actix_web::{web, App, HttpServer, Result, HttpResponse, middleware::Logger};
use chrono::Local;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::stem_cache::StemCache;
use crate::stemmer::Stemmer;
use crate::tag_analyzer::TagAnalyzer;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub tags: Vec<String>,
    pub text: String,
}

#[derive(Deserialize)]
pub struct AnalyzeBatchRequest {
    pub tags: Vec<String>,
    pub texts: Vec<String>,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub matched_indices: Vec<usize>,
    pub matched_tags: Vec<String>,
    pub tags_total: usize,
    pub processing_time_ms: u128,
    pub analyzed_at: String,
}

#[derive(Serialize)]
pub struct BatchItemResult {
    pub matched_indices: Vec<usize>,
    pub matched_tags: Vec<String>,
    // false = текст не пройшов валідацію (порожній)
    pub valid: bool,
}

#[derive(Serialize)]
pub struct AnalyzeBatchResponse {
    pub results: Vec<BatchItemResult>,
    pub texts_total: usize,
    pub processing_time_ms: u128,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub struct AppState {
    pub stem_cache: Arc<StemCache>,
}

// Витягує тексти тегів за знайденими індексами для зручності клієнта
fn collect_matched_tags(tags: &[String], indices: &[usize]) -> Vec<String> {
    indices.iter().filter_map(|&key| tags.get(key).cloned()).collect()
}

pub async fn analyze_handler(
    data: web::Data<AppState>,
    request: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse> {
    let start_time = std::time::Instant::now();

    let stemmer = Stemmer::with_cache(Arc::clone(&data.stem_cache));
    let analyzer = TagAnalyzer::new(&request.tags, &request.text, stemmer);

    let matched_indices = match analyzer.analyze() {
        Some(indices) => indices,
        None => {
            return Ok(HttpResponse::BadRequest().json(ErrorResponse {
                error: "Порожній список тегів або порожній текст".to_string(),
            }));
        }
    };

    let processing_time = start_time.elapsed().as_millis();
    println!(
        "🔍 Аналіз: {} тегів, знайдено {}, за {} мс",
        request.tags.len(),
        matched_indices.len(),
        processing_time
    );

    let response = AnalyzeResponse {
        matched_tags: collect_matched_tags(&request.tags, &matched_indices),
        matched_indices,
        tags_total: request.tags.len(),
        processing_time_ms: processing_time,
        analyzed_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };

    Ok(HttpResponse::Ok().json(response))
}

pub async fn analyze_batch_handler(
    data: web::Data<AppState>,
    request: web::Json<AnalyzeBatchRequest>,
) -> Result<HttpResponse> {
    let start_time = std::time::Instant::now();

    if request.tags.is_empty() || request.texts.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: "Порожній список тегів або порожній список текстів".to_string(),
        }));
    }

    // Тексти незалежні, аналізуємо паралельно зі спільним кешем основ
    let results: Vec<BatchItemResult> = request
        .texts
        .par_iter()
        .map(|text| {
            let stemmer = Stemmer::with_cache(Arc::clone(&data.stem_cache));
            let analyzer = TagAnalyzer::new(&request.tags, text, stemmer);

            match analyzer.analyze() {
                Some(matched_indices) => BatchItemResult {
                    matched_tags: collect_matched_tags(&request.tags, &matched_indices),
                    matched_indices,
                    valid: true,
                },
                None => BatchItemResult {
                    matched_indices: Vec::new(),
                    matched_tags: Vec::new(),
                    valid: false,
                },
            }
        })
        .collect();

    let processing_time = start_time.elapsed().as_millis();
    println!(
        "🔍 Пакетний аналіз: {} текстів проти {} тегів за {} мс",
        request.texts.len(),
        request.tags.len(),
        processing_time
    );

    let response = AnalyzeBatchResponse {
        texts_total: request.texts.len(),
        results,
        processing_time_ms: processing_time,
    };

    Ok(HttpResponse::Ok().json(response))
}

pub async fn stats_handler(data: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "cached_words": data.stem_cache.len()
    })))
}

pub async fn index_handler() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
        .insert_header(("Pragma", "no-cache"))
        .insert_header(("Expires", "0"))
        .body(include_str!("../web/index.html")))
}

pub async fn static_handler(req: actix_web::HttpRequest) -> Result<HttpResponse> {
    let path: std::path::PathBuf = req.match_info()
        .query("filename")
        .parse()
        .map_err(|_| actix_web::error::ErrorBadRequest("Invalid file path"))?;
    let file_path = std::path::Path::new("./web").join(path);

    match std::fs::read(&file_path) {
        Ok(content) => {
            let content_type = mime_guess::from_path(&file_path).first_or_octet_stream().to_string();
            Ok(HttpResponse::Ok()
                .content_type(content_type)
                .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
                .insert_header(("Pragma", "no-cache"))
                .insert_header(("Expires", "0"))
                .body(content))
        },
        Err(_) => Ok(HttpResponse::NotFound().body("File not found"))
    }
}

pub async fn start_web_server(stem_cache: Arc<StemCache>) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState {
        stem_cache: Arc::clone(&stem_cache),
    });

    println!("Запуск веб-сервера на http://0.0.0.0:8080");

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .route("/", web::get().to(index_handler))
            .route("/api/analyze", web::post().to(analyze_handler))
            .route("/api/analyze-batch", web::post().to(analyze_batch_handler))
            .route("/api/stats", web::get().to(stats_handler))
            .route("/static/{filename:.*}", web::get().to(static_handler))
            .route("/static/{filename:.*}", web::head().to(static_handler))
    })
        .bind("0.0.0.0:8080")?
        .run()
        .await
}
