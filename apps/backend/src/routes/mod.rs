use actix_web::web;

pub mod events;
pub mod health;
pub mod leaderboard;
pub mod scores;

/// Register every route. `main.rs` and the integration tests share this so
/// both see the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Score feed: /api/scores
    cfg.service(web::scope("/api/scores").configure(scores::configure_routes));

    // Standings: /api/leaderboard
    cfg.service(web::scope("/api/leaderboard").configure(leaderboard::configure_routes));

    // Settlement: /api/admin/events/**
    cfg.service(web::scope("/api/admin/events").configure(events::configure_routes));
}
