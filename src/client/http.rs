//! HTTP fetcher
//!
//! `reqwest` implementation of [`Fetcher`], used by the `nodeprobe` binary
//! and by anyone embedding the provider against a real inventory service.

use super::{Auth, FetchedBody, Fetcher, RequestOptions};
use eyre::{Context, Result, eyre};
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use url::Url;

/// Fetches node documents over HTTP(S).
///
/// Two clients are kept: one verifying TLS certificates and one that
/// accepts any certificate, chosen per request by
/// [`RequestOptions::reject_unauthorized`].
///
/// # Example
/// ```no_run
/// use generic_node_provider::client::{Auth, Fetcher, HttpFetcher, RequestOptions};
///
/// # async fn example() -> eyre::Result<()> {
/// let fetcher = HttpFetcher::try_new(Auth::Bearer("token".to_string()))?;
/// let options = RequestOptions::default().header("Accept", "application/json");
/// let body = fetcher.fetch("https://inventory.example.com/nodes", &options).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    verified: Client,
    unverified: Client,
    auth: String,
}

impl HttpFetcher {
    /// Create a new fetcher sending `auth` with every request.
    ///
    /// # Errors
    /// Returns an error if the credentials are not a valid header value or
    /// an HTTP client cannot be built.
    pub fn try_new(auth: Auth) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(value) = auth.header_value() {
            let mut value: HeaderValue = value
                .parse()
                .with_context(|| format!("Invalid {} credentials", auth))?;
            value.set_sensitive(true);
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        let verified = Client::builder()
            .default_headers(headers.clone())
            .build()
            .context("Failed to build HTTP client")?;
        let unverified = Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            verified,
            unverified,
            auth: auth.to_string(),
        })
    }

    fn client(&self, options: &RequestOptions) -> &Client {
        if options.reject_unauthorized {
            &self.verified
        } else {
            &self.unverified
        }
    }
}

/// Convert the string header map into a reqwest `HeaderMap`
fn header_map(options: &RequestOptions) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in &options.headers {
        let header_name: HeaderName = name
            .parse()
            .with_context(|| format!("Invalid header name: {}", name))?;
        let header_value: HeaderValue = value
            .parse()
            .with_context(|| format!("Invalid value for header {}", name))?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| {
            let mime = v.split(';').next().unwrap_or_default().trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, options: &RequestOptions) -> Result<FetchedBody> {
        let url = Url::parse(url).with_context(|| format!("Invalid URL: {}", url))?;
        let headers = header_map(options)?;

        log::debug!(
            "GET {} (auth: {}, verify tls: {})",
            url,
            self.auth,
            options.reject_unauthorized
        );

        let response = self
            .client(options)
            .get(url.clone())
            .headers(headers)
            .send()
            .await
            .map_err(|e| eyre!("Failed to send request to {}: {}", url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            eyre::bail!("Failed to fetch nodes from {} ({}): {}", url, status, body);
        }

        let json = is_json(response.headers());
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))?;
        log::debug!("Received {} bytes from {}", text.len(), url);

        // Malformed JSON is left as text so the provider reports it
        if json {
            if let Ok(value) = serde_json::from_str(&text) {
                return Ok(FetchedBody::Json(value));
            }
            log::trace!("Response from {} claims JSON but does not parse", url);
        }
        Ok(FetchedBody::Text(text))
    }
}
