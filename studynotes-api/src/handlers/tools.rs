use crate::error::PipelineError;
use crate::models::{
    ExtractResponse, GenerateResponse, RenderRequest, ToolInfo, ToolsResponse, UploadQuery,
};
use crate::pipeline::{self, Upload};
use crate::profiles::{ProfileRegistry, ToolProfile};
use actix_web::http::header;
use actix_web::{get, post, web, HttpResponse, Responder};
use std::sync::Arc;
use studynotes_llm_sdk::client::LlmClient;
use tracing::info;
use uuid::Uuid;

fn lookup<'a>(profiles: &'a ProfileRegistry, tool: &str) -> Result<&'a ToolProfile, PipelineError> {
    profiles
        .get(tool)
        .ok_or_else(|| PipelineError::UnknownTool(tool.to_string()))
}

fn upload_from(query: UploadQuery, body: web::Bytes) -> Result<Upload, PipelineError> {
    let file_name = query
        .file_name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| PipelineError::unsupported(""))?;
    Ok(Upload::new(file_name, body))
}

fn pdf_attachment(profile: &ToolProfile, pdf: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", profile.download_name),
        ))
        .body(pdf)
}

#[get("/api/tools")]
pub async fn list_tools(profiles: web::Data<ProfileRegistry>) -> impl Responder {
    let tools = profiles
        .iter()
        .map(|profile| ToolInfo {
            id: profile.id.clone(),
            title: profile.title.clone(),
            accepts: profile.accepts.clone(),
            download_name: profile.download_name.clone(),
            model: profile.model.clone(),
        })
        .collect();

    HttpResponse::Ok().json(ToolsResponse { tools })
}

#[post("/api/tools/{tool}/extract")]
pub async fn extract(
    path: web::Path<String>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
    profiles: web::Data<ProfileRegistry>,
) -> Result<HttpResponse, PipelineError> {
    let profile = lookup(&profiles, &path)?;
    let upload = upload_from(query.into_inner(), body)?;
    let file_name = upload.file_name.clone();

    info!(tool = %profile.id, file_name = %file_name, bytes = upload.bytes.len(), "Extracting upload");

    let document = pipeline::extract_upload(profile, upload).await?;

    Ok(HttpResponse::Ok().json(ExtractResponse {
        file_name,
        kind: document.kind,
        units: document.units,
        text: document.text,
    }))
}

#[post("/api/tools/{tool}/generate")]
pub async fn generate(
    path: web::Path<String>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
    profiles: web::Data<ProfileRegistry>,
    llm_client: web::Data<Arc<dyn LlmClient>>,
) -> Result<HttpResponse, PipelineError> {
    let profile = lookup(&profiles, &path)?;
    let upload = upload_from(query.into_inner(), body)?;
    let file_name = upload.file_name.clone();
    let request_id = Uuid::new_v4();

    info!(request_id = %request_id, tool = %profile.id, file_name = %file_name, "Generating notes");

    let document = pipeline::extract_upload(profile, upload).await?;
    let generation = pipeline::generate(profile, llm_client.get_ref().as_ref(), &document.text).await?;

    info!(
        request_id = %request_id,
        requests = generation.requests,
        fell_back = generation.fell_back,
        "Notes generated"
    );

    Ok(HttpResponse::Ok().json(GenerateResponse {
        file_name,
        extracted_chars: document.char_count(),
        requests: generation.requests,
        text: generation.text,
    }))
}

#[post("/api/tools/{tool}/render")]
pub async fn render(
    path: web::Path<String>,
    req: web::Json<RenderRequest>,
    profiles: web::Data<ProfileRegistry>,
) -> Result<HttpResponse, PipelineError> {
    let profile = lookup(&profiles, &path)?;
    let pdf = pipeline::render(profile, req.into_inner().text).await?;

    info!(tool = %profile.id, bytes = pdf.len(), "Rendered download");
    Ok(pdf_attachment(profile, pdf))
}

#[post("/api/tools/{tool}/run")]
pub async fn run(
    path: web::Path<String>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
    profiles: web::Data<ProfileRegistry>,
    llm_client: web::Data<Arc<dyn LlmClient>>,
) -> Result<HttpResponse, PipelineError> {
    let profile = lookup(&profiles, &path)?;
    let upload = upload_from(query.into_inner(), body)?;
    let request_id = Uuid::new_v4();

    info!(request_id = %request_id, tool = %profile.id, file_name = %upload.file_name, "Running pipeline");

    let output = pipeline::run(profile, llm_client.get_ref().as_ref(), upload).await?;

    info!(
        request_id = %request_id,
        units = output.extracted.units,
        requests = output.generation.requests,
        fell_back = output.generation.fell_back,
        pdf_bytes = output.pdf.len(),
        "Pipeline completed"
    );

    Ok(pdf_attachment(profile, output.pdf))
}
