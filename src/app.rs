use axum::routing::{get, post, put};
use axum::Router;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        // Role-gated API
        .merge(user_routes())
        .merge(course_routes())
        .merge(content_routes())
        .merge(discussion_routes())
        .merge(assignment_routes())
        .merge(task_routes())
        .route("/api/ai-explain", post(handlers::explain::explain))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
}

fn user_routes() -> Router<AppState> {
    use handlers::users;

    Router::new()
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/users/:id", put(users::update).delete(users::delete))
}

fn course_routes() -> Router<AppState> {
    use handlers::courses;

    Router::new()
        .route("/api/courses", get(courses::list).post(courses::create))
        .route(
            "/api/courses/:id",
            put(courses::update).delete(courses::delete),
        )
}

fn content_routes() -> Router<AppState> {
    use handlers::content;

    Router::new()
        // :kind is videos | recordings | notes
        .route(
            "/api/content/:kind",
            get(content::list).post(content::create),
        )
        .route(
            "/api/content/:kind/:id",
            put(content::update).delete(content::delete),
        )
}

fn discussion_routes() -> Router<AppState> {
    use handlers::discussions;

    Router::new()
        .route(
            "/api/discussions",
            get(discussions::list).post(discussions::create),
        )
        .route(
            "/api/discussions/:id",
            put(discussions::update).delete(discussions::delete),
        )
        .route("/api/discussions/:id/replies", post(discussions::reply))
}

fn assignment_routes() -> Router<AppState> {
    use handlers::assignments;

    Router::new()
        .route(
            "/api/assignments",
            get(assignments::list).post(assignments::create),
        )
        .route(
            "/api/assignments/:id",
            put(assignments::update).delete(assignments::delete),
        )
}

fn task_routes() -> Router<AppState> {
    use handlers::tasks;

    Router::new()
        .route("/api/tasks", get(tasks::list).post(tasks::create))
        .route("/api/tasks/:id", put(tasks::update).delete(tasks::delete))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "LMS API",
            "version": version,
            "description": "Role-based LMS backend API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/api/auth/login, /api/auth/register (public)",
                "users": "/api/users[/:id] (admin)",
                "courses": "/api/courses[/:id] (reads: any role, writes: admin)",
                "content": "/api/content/:kind[/:id] (admin/faculty; kind = videos|recordings|notes)",
                "discussions": "/api/discussions[/:id][/replies] (create: admin/faculty)",
                "assignments": "/api/assignments[/:id] (any role, in-memory)",
                "tasks": "/api/tasks[/:id] (admin, in-memory)",
                "ai_explain": "/api/ai-explain (best-effort web extraction)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
