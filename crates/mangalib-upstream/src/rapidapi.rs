use reqwest::{RequestBuilder, Url};

use crate::{Error, Result};

/// Attaches the RapidAPI credentials; the host header mirrors the endpoint host.
pub(crate) fn authorize(
    req: RequestBuilder,
    api_url: &str,
    key: Option<&String>,
    name: &'static str,
) -> Result<RequestBuilder> {
    let key = key.ok_or(Error::MissingKey(name))?;
    let host = Url::parse(api_url)
        .ok()
        .and_then(|url| url.host_str().map(|host| host.to_string()))
        .unwrap_or_default();

    Ok(req
        .header("x-rapidapi-host", host)
        .header("x-rapidapi-key", key))
}
