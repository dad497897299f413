use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("file io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("server returned {status}: {message}")]
    ServerError { status: u16, message: String },
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "photoshelf-cli", about = "Photoshelf image API CLI")]
struct Cli {
    #[arg(long, env = "PHOTOSHELF_BASE_URL", default_value = "http://127.0.0.1:8000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up.
    Ping,
    /// List image records, optionally filtered.
    List(ListArgs),
    /// Show one image record.
    Get { id: i64 },
    /// Upload an image file with optional metadata.
    Upload(UploadArgs),
    /// Download the stored bytes of an image.
    Download(DownloadArgs),
    /// Ask the server for an automatic review of an image.
    Review(ReviewArgs),
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(long)]
    subject: Option<String>,

    #[arg(long)]
    owner_name: Option<String>,

    #[arg(long)]
    location: Option<String>,

    #[arg(long)]
    guide_name: Option<String>,

    /// RFC 3339 lower bound on upload time.
    #[arg(long)]
    uploaded_from: Option<String>,

    /// RFC 3339 upper bound on upload time.
    #[arg(long)]
    uploaded_to: Option<String>,
}

#[derive(Args, Debug)]
struct UploadArgs {
    /// Path of the image file to upload.
    file: PathBuf,

    #[arg(long)]
    subject: Option<String>,

    #[arg(long)]
    owner_name: Option<String>,

    #[arg(long)]
    location: Option<String>,

    #[arg(long)]
    guide_name: Option<String>,

    #[arg(long)]
    notes: Option<String>,
}

#[derive(Args, Debug)]
struct DownloadArgs {
    id: i64,

    /// Output path; defaults to the record's original file name.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ReviewArgs {
    id: i64,

    /// Review criteria to hand to the model.
    #[arg(long)]
    criteria: String,

    #[arg(long)]
    tone: Option<String>,

    #[arg(long)]
    language: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let base_url = cli.base_url;

    match cli.command {
        Command::Ping => run_ping(&base_url).await,
        Command::List(args) => run_list(&base_url, args).await,
        Command::Get { id } => {
            let path = format!("/images/{id}");
            let json = api_request(&base_url, reqwest::Method::GET, &path, &[], None).await?;
            print_json(&json)
        }
        Command::Upload(args) => run_upload(&base_url, args).await,
        Command::Download(args) => run_download(&base_url, args).await,
        Command::Review(args) => run_review(&base_url, args).await,
    }
}

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let client = reqwest::Client::new();
    let url = format!("{}/healthz", base_url.trim_end_matches('/'));
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError {
            status: status.as_u16(),
            message: "health check failed".to_owned(),
        });
    }
    println!("ok");
    Ok(())
}

async fn run_list(base_url: &str, args: ListArgs) -> Result<(), CliError> {
    let mut query = Vec::new();
    for (key, value) in [
        ("subject", args.subject),
        ("owner_name", args.owner_name),
        ("location", args.location),
        ("guide_name", args.guide_name),
        ("uploaded_from", args.uploaded_from),
        ("uploaded_to", args.uploaded_to),
    ] {
        if let Some(value) = value {
            query.push((key.to_owned(), value));
        }
    }

    let json = api_request(base_url, reqwest::Method::GET, "/images", &query, None).await?;
    print_json(&json)
}

async fn run_upload(base_url: &str, args: UploadArgs) -> Result<(), CliError> {
    let bytes = tokio::fs::read(&args.file).await?;
    let file_name = args
        .file
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or("upload")
        .to_owned();
    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(guess_image_mime(&args.file))?;

    let mut form = reqwest::multipart::Form::new().part("file", part);
    for (key, value) in [
        ("subject", args.subject),
        ("owner_name", args.owner_name),
        ("location", args.location),
        ("guide_name", args.guide_name),
        ("notes", args.notes),
    ] {
        if let Some(value) = value {
            form = form.text(key, value);
        }
    }

    let client = reqwest::Client::new();
    let url = format!("{}/images", base_url.trim_end_matches('/'));
    let response = client.post(url).multipart(form).send().await?;
    let status = response.status();
    let value = response.json::<Value>().await.unwrap_or_else(|_| Value::Null);
    if !status.is_success() {
        return Err(CliError::ServerError {
            status: status.as_u16(),
            message: detail_message(&value),
        });
    }
    print_json(&value)
}

async fn run_download(base_url: &str, args: DownloadArgs) -> Result<(), CliError> {
    let output = match args.output {
        Some(path) => path,
        None => {
            // Fall back to the original file name stored on the record.
            let path = format!("/images/{}", args.id);
            let record = api_request(base_url, reqwest::Method::GET, &path, &[], None).await?;
            let name = record
                .get("filename")
                .and_then(Value::as_str)
                .unwrap_or("download")
                .to_owned();
            PathBuf::from(name)
        }
    };

    let client = reqwest::Client::new();
    let url = format!("{}/images/{}/file", base_url.trim_end_matches('/'), args.id);
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        let value = response.json::<Value>().await.unwrap_or_else(|_| Value::Null);
        return Err(CliError::ServerError {
            status: status.as_u16(),
            message: detail_message(&value),
        });
    }

    let bytes = response.bytes().await?;
    tokio::fs::write(&output, &bytes).await?;
    eprintln!("saved {} bytes to {}", bytes.len(), output.display());
    Ok(())
}

async fn run_review(base_url: &str, args: ReviewArgs) -> Result<(), CliError> {
    let mut body = Map::new();
    body.insert("criteria".to_owned(), Value::String(args.criteria));
    if let Some(tone) = args.tone {
        body.insert("tone".to_owned(), Value::String(tone));
    }
    if let Some(language) = args.language {
        body.insert("language".to_owned(), Value::String(language));
    }

    let path = format!("/images/{}/review", args.id);
    let json = api_request(
        base_url,
        reqwest::Method::POST,
        &path,
        &[],
        Some(Value::Object(body)),
    )
    .await?;
    print_json(&json)
}

async fn api_request(
    base_url: &str,
    method: reqwest::Method,
    path: &str,
    query: &[(String, String)],
    body: Option<Value>,
) -> Result<Value, CliError> {
    let client = reqwest::Client::new();
    let url = format!("{}{}", base_url.trim_end_matches('/'), path);

    let mut request = client.request(method, &url);
    if !query.is_empty() {
        request = request.query(query);
    }
    if let Some(json) = body {
        request = request.json(&json);
    }

    let response = request.send().await?;
    let status = response.status();
    let value = response.json::<Value>().await.unwrap_or_else(|_| Value::Null);

    if !status.is_success() {
        return Err(CliError::ServerError {
            status: status.as_u16(),
            message: detail_message(&value),
        });
    }

    Ok(value)
}

/// Pull the server's `detail` message out of an error body, falling back to
/// the raw JSON.
fn detail_message(value: &Value) -> String {
    value
        .get("detail")
        .and_then(Value::as_str)
        .map_or_else(|| value.to_string(), ToOwned::to_owned)
}

fn guess_image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        // jpg, jpeg, and anything unrecognized.
        _ => "image/jpeg",
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
