use axum::response::Html;
use tera::{Context, Tera};

mod app;
pub use app::app_router;

/// Renders `view` and wraps it in the main layout.
pub fn render_page(tera: &Tera, view: &str, context: Context) -> Result<Html<String>, tera::Error> {
    let inner = tera.render(view, &context)?;

    let mut context = Context::new();
    context.insert("view", &inner);
    Ok(Html(tera.render("views/main.html", &context)?))
}
