use tera::Context;

use super::ExportError;

// Only the certificate, one A4 sheet at the origin.
pub fn print_page(svg: &str, title: &str) -> Result<String, ExportError> {
    let mut ctx = Context::new();
    ctx.insert("svg", svg);
    ctx.insert("title", title);
    Ok(crate::templates::get_tera().render("print.html", &ctx)?)
}
