use actix_files::{Files, NamedFile};
use actix_web::{get, middleware, web, App, HttpServer, Responder};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

const GRAPH_SNAPSHOT: &str = "graph.json";

#[derive(Debug, Serialize, Deserialize)]
struct Health {
    status: String,
}

/// Directory holding network snapshots
#[derive(Clone)]
struct DataDir(PathBuf);

#[get("/health")]
async fn health() -> impl Responder {
    web::Json(Health { status: "ok".to_string() })
}

#[get("/api/graph")]
async fn graph(data: web::Data<DataDir>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open(data.0.join(GRAPH_SNAPSHOT))?)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Get port from environment or default to 8080
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);
    let data_dir = PathBuf::from(env::var("METRO_DATA_DIR").unwrap_or_else(|_| "./data".to_string()));

    println!("Starting server on 0.0.0.0:{port}, data from {}", data_dir.display());

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(DataDir(data_dir.clone())))
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(health)
            .service(graph)
            .service(Files::new("/data", data_dir.clone()))
            .service(Files::new("/", "./dist").index_file("index.html"))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(App::new().service(health)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Health = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.status, "ok");
    }

    #[actix_web::test]
    async fn test_missing_snapshot_is_not_found() {
        let dir = DataDir(PathBuf::from("./definitely-missing-data-dir"));
        let app = test::init_service(App::new().app_data(web::Data::new(dir)).service(graph)).await;
        let req = test::TestRequest::get().uri("/api/graph").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
