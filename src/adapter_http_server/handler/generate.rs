use askama::Template;
use axum::response::Html;

use crate::adapter_html::GeneratorPage;

pub async fn handler() -> Result<Html<String>, super::ApiError> {
    Ok(Html(GeneratorPage::default().render()?))
}
