use crate::options::Config;

/// Builds the HTTP client shared by every request of a run.
///
/// The configured timeout applies to each request individually; there is no
/// overall deadline and no retry.
pub fn build_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.request_timeout)
        .build()
}

/// Fetches the body of a given URL as raw bytes.
///
/// # Errors
///
/// This function will return an error if:
/// - The GET request fails (e.g., network issues or a timeout).
/// - The HTTP response status is not successful (e.g., 4xx or 5xx error).
/// - The response body cannot be read.
pub async fn get_url_bytes(url: &str, client: &reqwest::Client) -> Result<Vec<u8>, reqwest::Error> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    Ok(body.to_vec())
}
