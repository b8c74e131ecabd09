// SPDX-License-Identifier: MPL-2.0
use geolens::boundary::{self, AccessTokens, UploadEndpoint, UploadRequest, UploadedFile};
use geolens::application::LocationResolver;
use geolens::config;
use geolens::diagnostics::DiagnosticsCollector;
use geolens::media::ImageKind;
use serde_json::json;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

const HELP: &str = "\
geolens - locate images from embedded GPS metadata

USAGE:
  geolens locate [OPTIONS] FILE...
  geolens issue-token [--config-dir DIR]
  geolens health

OPTIONS:
  --config-dir DIR      Read settings.toml from DIR
  --type MIME           Declared content type for every FILE
  --token KEY           Access token (required when tokens are configured)
  --diagnostics FILE    Write a diagnostics report to FILE
  -h, --help            Print this help
";

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[tokio::main]
async fn main() -> ExitCode {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    let outcome = match args.subcommand() {
        Ok(Some(command)) => match command.as_str() {
            "locate" => locate(args).await,
            "issue-token" => issue_token(args),
            "health" => {
                println!("{}", boundary::health().body);
                Ok(true)
            }
            other => Err(format!("unknown command '{other}'")),
        },
        Ok(None) => Err("missing command".to_string()),
        Err(err) => Err(err.to_string()),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(message) => {
            eprintln!("error: {message}\n\n{HELP}");
            ExitCode::from(2)
        }
    }
}

fn load_config(args: &mut pico_args::Arguments) -> Result<config::Config, String> {
    let config_dir: Option<PathBuf> = args
        .opt_value_from_str("--config-dir")
        .map_err(|e| e.to_string())?;
    let (config, warning) = config::load_with_override(config_dir);
    if let Some(message) = warning {
        eprintln!("warning: {message}");
    }
    Ok(config)
}

/// Resolves every file concurrently and prints one JSON line per file.
///
/// Returns `Ok(false)` when at least one file did not resolve.
async fn locate(mut args: pico_args::Arguments) -> Result<bool, String> {
    let config = load_config(&mut args)?;
    let declared_type: Option<String> =
        args.opt_value_from_str("--type").map_err(|e| e.to_string())?;
    let token: Option<String> = args
        .opt_value_from_str("--token")
        .map_err(|e| e.to_string())?;
    let report_path: Option<PathBuf> = args
        .opt_value_from_str("--diagnostics")
        .map_err(|e| e.to_string())?;
    let files: Vec<PathBuf> = args.finish().into_iter().map(PathBuf::from).collect();
    if files.is_empty() {
        return Err("no input files".to_string());
    }

    let mut collector = DiagnosticsCollector::new(config.diagnostics.capacity());
    let resolver = LocationResolver::from_config(&config).with_diagnostics(collector.handle());

    // Local runs without configured tokens are trusted.
    let tokens = AccessTokens::from_config(&config.auth);
    let authorization = if tokens.is_empty() {
        None
    } else {
        token.map(|key| format!("Token {key}"))
    };
    let require_auth = !tokens.is_empty();
    let endpoint = Arc::new(UploadEndpoint::new(Arc::new(resolver), tokens));

    let tasks: Vec<_> = files
        .into_iter()
        .map(|path| {
            let endpoint = Arc::clone(&endpoint);
            let authorization = authorization.clone();
            let declared_type = declared_type.clone();
            tokio::spawn(async move {
                let upload = match read_upload(&path, declared_type) {
                    Ok(upload) => upload,
                    Err(err) => {
                        return (path, 400, json!({ "error": err.to_string() }));
                    }
                };
                let response = if require_auth {
                    endpoint
                        .handle_async(UploadRequest {
                            authorization,
                            file: Some(upload),
                        })
                        .await
                } else {
                    boundary::handle_upload_async(endpoint.resolver(), true, Some(upload)).await
                };
                (path, response.status, response.body)
            })
        })
        .collect();

    let mut all_ok = true;
    for task in tasks {
        match task.await {
            Ok((path, status, body)) => {
                all_ok &= (200..300).contains(&status);
                println!(
                    "{}",
                    json!({ "file": path.display().to_string(), "status": status, "body": body })
                );
            }
            Err(err) => {
                all_ok = false;
                eprintln!("error: task failed: {err}");
            }
        }
    }

    if let Some(path) = report_path {
        collector.process_pending();
        match collector.export_to_file(&path) {
            Ok(written) => eprintln!("diagnostics written to {}", written.display()),
            Err(err) => eprintln!("warning: diagnostics export failed: {err}"),
        }
    }

    Ok(all_ok)
}

fn read_upload(path: &Path, declared_type: Option<String>) -> std::io::Result<UploadedFile> {
    let bytes = std::fs::read(path)?;
    let content_type = declared_type.unwrap_or_else(|| {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageKind::mime_for_extension)
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string()
    });
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(UploadedFile::new(name, content_type, bytes))
}

/// Issues a new access token, persisting only its digest.
fn issue_token(mut args: pico_args::Arguments) -> Result<bool, String> {
    let config_dir: Option<PathBuf> = args
        .opt_value_from_str("--config-dir")
        .map_err(|e| e.to_string())?;
    let leftover: Vec<OsString> = args.finish();
    if !leftover.is_empty() {
        return Err(format!("unexpected arguments: {leftover:?}"));
    }

    let (mut config, warning) = config::load_with_override(config_dir.clone());
    if let Some(message) = warning {
        // Overwriting an unreadable file would discard its other settings.
        return Err(message);
    }

    let mut tokens = AccessTokens::from_config(&config.auth);
    let issued = tokens.issue().map_err(|e| e.to_string())?;
    config.auth.token_hashes.push(issued.digest);
    config::save_with_override(&config, config_dir).map_err(|e| e.to_string())?;

    println!("{}", issued.key);
    Ok(true)
}
