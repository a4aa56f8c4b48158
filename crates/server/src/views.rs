use axum::{http::StatusCode, response::Html};
use minijinja::{context, Environment, Value};
use shared::{
    domain::{Item, ItemId},
    error::{ApiError, ErrorCode},
    protocol::ItemForm,
};
use tracing::error;

const TEMPLATES: [(&str, &str); 7] = [
    ("layout.html", include_str!("../templates/layout.html")),
    ("items.html", include_str!("../templates/items.html")),
    ("item.html", include_str!("../templates/item.html")),
    ("item_fields.html", include_str!("../templates/item_fields.html")),
    ("add_form.html", include_str!("../templates/add_form.html")),
    ("edit_form.html", include_str!("../templates/edit_form.html")),
    ("error.html", include_str!("../templates/error.html")),
];

/// HTML pages compiled into the binary. Names end in `.html`, so every
/// interpolated value is HTML-escaped.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn items(&self, items: &[Item]) -> Result<Html<String>, ApiError> {
        self.render("items.html", context! { items })
    }

    pub fn item(&self, item: &Item, just_created: bool) -> Result<Html<String>, ApiError> {
        self.render("item.html", context! { item, status => just_created })
    }

    pub fn add_form(&self, form: &ItemForm, error: Option<&str>) -> Result<Html<String>, ApiError> {
        self.render("add_form.html", context! { form, error })
    }

    pub fn edit_form(
        &self,
        item_id: ItemId,
        form: &ItemForm,
        error: Option<&str>,
    ) -> Result<Html<String>, ApiError> {
        self.render("edit_form.html", context! { item_id, form, error })
    }

    /// Error page for `err`, with the status its code maps to.
    pub fn error_page(&self, err: &ApiError) -> (StatusCode, Html<String>) {
        let status = status_for(err.code);
        let message = match err.code {
            ErrorCode::Internal => "something went wrong",
            _ => err.message.as_str(),
        };
        let page = self
            .render(
                "error.html",
                context! { status => status.to_string(), message },
            )
            .unwrap_or_else(|_| Html(format!("<h1>{status}</h1>")));
        (status, page)
    }

    fn render(&self, name: &str, ctx: Value) -> Result<Html<String>, ApiError> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(ctx))
            .map(Html)
            .map_err(|e| {
                error!(template = name, error = %e, "failed to render view");
                ApiError::new(ErrorCode::Internal, format!("failed to render {name}"))
            })
    }
}

pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
#[path = "tests/views_tests.rs"]
mod tests;
