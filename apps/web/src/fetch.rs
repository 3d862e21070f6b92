use covid_dashboard_core::model::{decode_series, decode_summary};
use covid_dashboard_core::{ApiConfig, DashboardError, DetailRequest, DetailSeries, Summary};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| js_sys::JSON::stringify(value).ok().map(String::from))
        .unwrap_or_else(|| "unknown error".to_string())
}

async fn fetch_text(url: &str) -> Result<String, DashboardError> {
    let window =
        web_sys::window().ok_or_else(|| DashboardError::transport(url, "no window available"))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| DashboardError::transport(url, js_message(&e)))?;

    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| DashboardError::transport(url, js_message(&e)))?;

    let response = response_value
        .dyn_into::<Response>()
        .map_err(|_| DashboardError::transport(url, "fetch did not return a Response"))?;

    if !response.ok() {
        return Err(DashboardError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let body = response
        .text()
        .map_err(|e| DashboardError::transport(url, js_message(&e)))?;
    let text = JsFuture::from(body)
        .await
        .map_err(|e| DashboardError::transport(url, js_message(&e)))?;

    text.as_string()
        .ok_or_else(|| DashboardError::transport(url, "response body is not text"))
}

pub async fn fetch_summary(api: &ApiConfig) -> Result<Summary, DashboardError> {
    let body = fetch_text(&api.summary_url()).await?;
    decode_summary(&body)
}

pub async fn fetch_detail(
    api: &ApiConfig,
    request: &DetailRequest,
) -> Result<DetailSeries, DashboardError> {
    let mut detail = DetailSeries::default();
    for status in &request.statuses {
        let body = fetch_text(&api.country_url(&request.slug, *status)).await?;
        detail.insert(*status, decode_series(&body)?);
    }
    Ok(detail)
}
