use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use parikshya_server::{
    app_state::AppState,
    auth::{AuthMiddleware, JwtService},
    config::Config,
    handlers,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);

    let state = AppState::new(config.clone())
        .await
        .expect("failed to initialise application state");

    let bind_host = config.web_server_host.clone();
    let bind_port = config.web_server_port;
    log::info!("Starting HTTP server on {}:{}", bind_host, bind_port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&config.cors_allowed_origin)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(jwt_service.clone()))
            .wrap(Logger::default())
            .wrap(cors)
            .service(handlers::health_check)
            .service(
                web::scope("/api/auth")
                    .service(handlers::register)
                    .service(handlers::verify_email)
                    .service(handlers::login),
            )
            .service(
                web::scope("/api/exam")
                    .wrap(AuthMiddleware)
                    .service(handlers::get_paper)
                    .service(handlers::submit_answers)
                    .service(handlers::list_results)
                    .service(handlers::get_result),
            )
            .service(
                web::scope("/api/admin")
                    .wrap(AuthMiddleware)
                    .service(handlers::create_question)
                    .service(handlers::import_questions),
            )
    })
    .bind((bind_host, bind_port))?
    .run()
    .await
}
