use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use url::Url;

use crate::signatures::SignaturesError;

fn progress_for(total: Option<u64>) -> ProgressBar {
    match total {
        Some(len) => {
            let pb = ProgressBar::new(len);
            if let Ok(style) = ProgressStyle::with_template(
                "{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})",
            ) {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb
        }
        // Servers that stream without a length only get a spinner.
        None => ProgressBar::new_spinner(),
    }
}

/// GET `locator` and return the body as text, showing download progress.
pub async fn download_document(client: &Client, locator: &str, user_agent: &str) -> Result<String, SignaturesError> {
    let url = Url::parse(locator).map_err(|e| SignaturesError::source_unavailable(locator, e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SignaturesError::source_unavailable(
            locator,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    let mut res = client
        .get(url)
        .header("User-Agent", user_agent)
        .send()
        .await
        .map_err(|e| SignaturesError::source_unavailable(locator, e))?;

    let status = res.status();
    if !status.is_success() {
        return Err(SignaturesError::source_unavailable(locator, format!("HTTP {status}")));
    }

    let pb = progress_for(res.content_length());
    pb.set_message(format!("Downloading {locator}"));

    let mut body: Vec<u8> = Vec::new();
    while let Some(chunk) = res
        .chunk()
        .await
        .map_err(|e| SignaturesError::source_unavailable(locator, e))?
    {
        body.extend_from_slice(&chunk);
        pb.set_position(body.len() as u64);
    }
    pb.finish_and_clear();

    tracing::debug!(url = %locator, bytes = body.len(), "downloaded signatures document");
    String::from_utf8(body).map_err(|e| SignaturesError::source_unavailable(locator, e))
}
