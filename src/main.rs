use dotenvy::dotenv;

use dealdesk::logging::init_tracing;
use dealdesk::metrics;
use dealdesk::router::init_router;
use dealdesk::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("create-company-admin") {
        run_create_company_admin(&args).await;
        return;
    }

    init_tracing();

    let state = init_app_state().await;
    let mut app = init_router(state);
    if let Some(handle) = metrics::init_metrics() {
        app = app.merge(metrics::metrics_app(handle));
    }

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
        .await
        .expect("Failed to bind 0.0.0.0:3000");
    tracing::info!("listening on http://localhost:3000 (docs at /swagger-ui and /scalar)");
    axum::serve(listener, app).await.expect("server error");
}

async fn run_create_company_admin(args: &[String]) {
    let [company_name, email, password] = match args.get(2..5) {
        Some([a, b, c]) => [a, b, c],
        _ => {
            eprintln!(
                "Usage: {} create-company-admin <company_name> <email> <password>",
                args[0]
            );
            std::process::exit(1);
        }
    };

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    match dealdesk::cli::create_company_admin(&pool, company_name, email, password).await {
        Ok(user_id) => {
            println!("Company admin created for {}", company_name);
            println!("  email:   {}", email);
            println!("  user id: {}", user_id);
        }
        Err(e) => {
            eprintln!("Error creating company admin: {}", e);
            std::process::exit(1);
        }
    }
}
