use actix_web::{get, HttpResponse, Responder};

#[get("/backend_health")]
pub async fn backend_health() -> impl Responder {
    HttpResponse::Ok().finish()
}
