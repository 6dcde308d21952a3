use actix_web::web;

pub mod backend_health;
pub mod championship;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    // Read-only ranking routes; authentication belongs to the platform
    cfg.service(
        web::scope("/championships")
            .service(championship::list_championships)
            .service(championship::get_standings)
            .service(championship::get_highlander)
            .service(championship::get_leaderboard)
            .service(championship::get_scorecard)
    );
}
