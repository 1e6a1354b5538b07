use axum::response::Html;

const WHEEL_TEMPLATE: &str = include_str!("../../templates/wheel.html");
const STUDENTS_SLOT: &str = "{{STUDENTS}}";

// Render the wheel page with the names embedded as a JSON array literal.
pub fn render_wheel(names: &[String]) -> Html<String> {
    Html(WHEEL_TEMPLATE.replace(STUDENTS_SLOT, &names_literal(names)))
}

// `</` is escaped so a name can never close the surrounding script tag.
fn names_literal(names: &[String]) -> String {
    serde_json::to_string(names)
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/")
}
