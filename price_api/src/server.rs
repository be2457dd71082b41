use {
	crate::handlers::{handle_chart, handle_hi, handle_market},
	axum::{Router, http::HeaderName, routing::get},
	price_client::PriceClient,
	std::time::Duration,
	tower_http::{
		compression::CompressionLayer,
		cors::{Any, CorsLayer},
		request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	},
};

#[derive(Clone)]
pub struct AppState {
	pub price_client: PriceClient,
}

impl AppState {
	pub fn new(price_client: PriceClient) -> Self {
		Self { price_client }
	}
}

pub fn app(state: AppState) -> Router {
	let x_request_id = HeaderName::from_static("x-request-id");
	let sub_router = Router::new()
		.route("/hi", get(handle_hi))
		.route("/market", get(handle_market))
		.route("/chart", get(handle_chart))
		.layer(PropagateRequestIdLayer::new(x_request_id.clone())) //将请求id从请求头中传递到响应头中
		.layer(CompressionLayer::new())
		.layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid)) //生成请求id 并放到请求头中
		.layer(CorsLayer::new().allow_methods(Any).allow_origin(Any).allow_credentials(false).allow_headers(Any).expose_headers(Any).max_age(Duration::from_secs(60) * 10))
		.with_state(state);

	Router::new().nest("/api", sub_router)
}
