use axum::{
    http::Method,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod addons;
pub mod auth;
pub mod bookings;
pub mod drivers;
pub mod error;
pub mod pagination;
pub mod payments;
pub mod routes;
pub mod search;
pub mod state;
pub mod tickets;
pub mod trips;
pub mod vehicles;
pub mod webhooks;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let admin = Router::new()
        .route("/v1/admin/routes", post(routes::create_route).get(routes::list_routes))
        .route(
            "/v1/admin/routes/{id}",
            get(routes::get_route).put(routes::update_route).delete(routes::delete_route),
        )
        .route(
            "/v1/admin/vehicles",
            post(vehicles::create_vehicle).get(vehicles::list_vehicles),
        )
        .route(
            "/v1/admin/vehicles/{id}",
            get(vehicles::get_vehicle)
                .put(vehicles::update_vehicle)
                .delete(vehicles::delete_vehicle),
        )
        .route("/v1/admin/drivers", post(drivers::create_driver).get(drivers::list_drivers))
        .route(
            "/v1/admin/drivers/{id}",
            get(drivers::get_driver).put(drivers::update_driver).delete(drivers::delete_driver),
        )
        .route("/v1/admin/add-ons", post(addons::create_add_on).get(addons::list_add_ons))
        .route(
            "/v1/admin/add-ons/{id}",
            get(addons::get_add_on).put(addons::update_add_on).delete(addons::delete_add_on),
        )
        .route("/v1/admin/trips", post(trips::create_trip).get(trips::list_trips))
        .route("/v1/admin/trips/{id}", put(trips::update_trip).delete(trips::delete_trip))
        .route("/v1/admin/bookings", get(bookings::list_bookings))
        .route(
            "/v1/admin/bookings/{id}",
            get(bookings::get_booking).put(bookings::update_booking),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth::admin_auth_middleware));

    Router::new()
        .route("/v1/trips/search", get(search::search_trips))
        .route("/v1/trips/{id}", get(trips::get_public_trip))
        .route("/v1/locations/origins", get(search::list_origins))
        .route("/v1/locations/destinations", get(search::list_destinations))
        .route("/v1/routes/featured", get(search::featured_routes))
        .route("/v1/bookings", post(bookings::create_booking))
        .route("/v1/bookings/find", post(bookings::find_bookings))
        .route("/v1/payments/verify", get(payments::verify_payment))
        .route("/v1/webhooks/paystack", post(webhooks::handle_paystack_webhook))
        .route("/v1/tickets/send", post(tickets::send_ticket))
        .merge(admin)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
