use crate::error::PipelineError;
use crate::profiles::ProfileRegistry;
use actix_web::{get, web, HttpResponse};

const INDEX_TEMPLATE: &str = include_str!("../../static/index.html");
const TOOL_TEMPLATE: &str = include_str!("../../static/tool.html");

#[get("/")]
pub async fn index(profiles: web::Data<ProfileRegistry>) -> HttpResponse {
    let links: Vec<String> = profiles
        .iter()
        .map(|profile| {
            format!(
                r#"    <li><a href="/tools/{}">{}</a></li>"#,
                escape_html(&profile.id),
                escape_html(&profile.title)
            )
        })
        .collect();

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_TEMPLATE.replace("{{TOOL_LINKS}}", &links.join("\n")))
}

#[get("/tools/{tool}")]
pub async fn tool_page(
    path: web::Path<String>,
    profiles: web::Data<ProfileRegistry>,
) -> Result<HttpResponse, PipelineError> {
    let tool = path.into_inner();
    let profile = profiles
        .get(&tool)
        .ok_or_else(|| PipelineError::UnknownTool(tool.clone()))?;

    let accept: Vec<String> = profile
        .accepts
        .iter()
        .map(|kind| format!(".{}", kind.extension()))
        .collect();

    let page = TOOL_TEMPLATE
        .replace("{{TITLE}}", &escape_html(&profile.title))
        .replace("{{TOOL_ID}}", &escape_html(&profile.id))
        .replace("{{ACCEPT}}", &accept.join(","))
        .replace("{{DOWNLOAD_NAME}}", &escape_html(&profile.download_name));

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page))
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}
