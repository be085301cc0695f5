use std::sync::OnceLock;
use tera::Tera;

static TERA: OnceLock<Tera> = OnceLock::new();

const TEMPLATES: [(&str, &str); 5] = [
    ("base.html", include_str!("../templates/base.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("form.html", include_str!("../templates/form.html")),
    ("preview.html", include_str!("../templates/preview.html")),
    ("print.html", include_str!("../templates/print.html")),
];

pub fn get_tera() -> &'static Tera {
    TERA.get_or_init(|| {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())
            .expect("Failed to load templates");
        tera
    })
}
