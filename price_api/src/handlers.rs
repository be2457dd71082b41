use {
	crate::{
		api_error::{ApiErrorCode, InternalError},
		api_types::{ApiResponse, ChartRequest, MarketRequest, required},
		server::AppState,
	},
	axum::{
		extract::{Query, State},
		response::Json,
	},
	price_client::{ChartSeries, PriceError, PricePoint},
};

pub async fn handle_hi() -> &'static str {
	"You will succeed."
}

/// 批量行情 GET /api/market?ids=btc,eth&currency=usd
pub async fn handle_market(State(state): State<AppState>, Query(params): Query<MarketRequest>) -> Result<Json<ApiResponse<Vec<PricePoint>>>, InternalError> {
	let Some(currency) = required(&params.currency) else {
		return Ok(Json(ApiResponse::error(ApiErrorCode::InvalidParameter)));
	};
	let ids = params.id_list();

	match state.price_client.market(&ids, currency).await {
		Ok(prices) => Ok(Json(ApiResponse::success(prices))),
		Err(e) => error_response(e, "market"),
	}
}

/// 历史走势 GET /api/chart?id=btc&period=1M&currency=usd
pub async fn handle_chart(State(state): State<AppState>, Query(params): Query<ChartRequest>) -> Result<Json<ApiResponse<ChartSeries>>, InternalError> {
	let (Some(id), Some(period), Some(currency)) = (required(&params.id), required(&params.period), required(&params.currency)) else {
		return Ok(Json(ApiResponse::error(ApiErrorCode::InvalidParameter)));
	};

	match state.price_client.chart(id, period, currency).await {
		Ok(series) => Ok(Json(ApiResponse::success(series))),
		Err(e) => error_response(e, "chart"),
	}
}

fn error_response<T>(err: PriceError, operation: &str) -> Result<Json<ApiResponse<T>>, InternalError> {
	match ApiErrorCode::from_price_error(&err) {
		Some(code) => {
			tracing::warn!("{} query failed: {}", operation, err);
			Ok(Json(ApiResponse::error(code)))
		}
		None => {
			tracing::error!("{} query failed: {}", operation, err);
			Err(InternalError)
		}
	}
}
