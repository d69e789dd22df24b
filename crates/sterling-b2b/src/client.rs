//! HTTP client for the Sterling B2Bi / FileGateway REST API
//!
//! Every operation issues exactly one GET request. A 200 response is decoded
//! and returned as-is; every other outcome becomes a [`SterlingError`] after a
//! diagnostic has been logged.

use crate::config::ConnectionProfile;
use crate::error::{SterlingError, SterlingResult};
use crate::validation::{validate_partner_id, validate_search_filter};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

pub const TRADING_PARTNERS_PATH: &str = "/B2BAPIs/svc/tradingpartners/";
pub const COMMUNITIES_PATH: &str = "/B2BAPIs/svc/communities/";

const SERVICE_SEGMENTS: &[&str] = &["B2BAPIs", "svc"];

/// The only page ever requested
pub const DEFAULT_RANGE: &str = "0-100";

/// Fields returned by default on a trading partner listing
pub const DEFAULT_INCLUDE: &[&str] = &["community"];

/// Fields requested for the detailed trading partner listing
pub const DETAIL_FIELDS: &[&str] = &["community", "emailAddress", "username", "phone"];

/// Parameters of a trading partner listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradingPartnerQuery {
    search: Option<String>,
    include: Vec<String>,
    range: String,
}

impl Default for TradingPartnerQuery {
    fn default() -> Self {
        Self {
            search: None,
            include: DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect(),
            range: DEFAULT_RANGE.to_string(),
        }
    }
}

impl TradingPartnerQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to partners whose id contains `filter`
    pub fn with_search(mut self, filter: impl Into<String>) -> Self {
        self.search = Some(filter.into());
        self
    }

    /// Replace the include list; the remote service always adds `_id`
    pub fn with_include<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = range.into();
        self
    }

    /// Query parameters in wire order (`_range`, `searchFor`, `_include`).
    ///
    /// Fails without side effects when the search filter is not acceptable.
    pub fn params(&self) -> SterlingResult<Vec<(&'static str, String)>> {
        let search_for = match &self.search {
            Some(filter) => validate_search_filter(filter)?,
            None => String::new(),
        };

        Ok(vec![
            ("_range", self.range.clone()),
            ("searchFor", search_for),
            ("_include", self.include.join(",")),
        ])
    }
}

/// Client bound to one [`ConnectionProfile`]
#[derive(Clone)]
pub struct SterlingB2bClient {
    http: Client,
    profile: ConnectionProfile,
    trading_partners_url: Url,
    communities_url: Url,
}

impl SterlingB2bClient {
    pub fn new(profile: ConnectionProfile) -> SterlingResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(!profile.verify_ssl())
            .timeout(profile.timeout())
            .build()?;

        let trading_partners_url = endpoint(&profile, "tradingpartners")?;
        let communities_url = endpoint(&profile, "communities")?;

        Ok(Self {
            http,
            profile,
            trading_partners_url,
            communities_url,
        })
    }

    /// Profile the client was built from
    pub fn profile(&self) -> &ConnectionProfile {
        &self.profile
    }

    /// List trading partners matching `query`, first page only
    pub async fn list_trading_partners(&self, query: &TradingPartnerQuery) -> SterlingResult<Value> {
        let params = query.params().inspect_err(|e| {
            warn!(category = e.category(), "Cannot read trading partners: {}", e);
        })?;
        self.get_json(self.trading_partners_url.clone(), &params).await
    }

    /// List trading partners with community, email, username and phone
    pub async fn list_trading_partners_with_details(&self) -> SterlingResult<Value> {
        let query = TradingPartnerQuery::new().with_include(DETAIL_FIELDS.iter().copied());
        self.list_trading_partners(&query).await
    }

    /// Fetch `{base}/tradingpartners/{id}`
    pub async fn get_trading_partner_by_id(&self, id: &str) -> SterlingResult<Value> {
        let id = validate_partner_id(id).inspect_err(|e| {
            warn!(category = e.category(), "Cannot read trading partner: {}", e);
        })?;

        let mut url = self.trading_partners_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                SterlingError::InvalidConfig(format!("{} cannot be a base URL", self.profile.host()))
            })?
            .pop_if_empty()
            .push(id);

        self.get_json(url, &[]).await
    }

    /// List all communities
    pub async fn list_communities(&self) -> SterlingResult<Value> {
        self.get_json(self.communities_url.clone(), &[]).await
    }

    async fn get_json(&self, url: Url, params: &[(&'static str, String)]) -> SterlingResult<Value> {
        let mut request = self
            .http
            .get(url.clone())
            .basic_auth(self.profile.username(), Some(self.profile.password()));
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send().await.map_err(|e| {
            error!(
                url = %url,
                category = "transport",
                timeout = e.is_timeout(),
                "Sterling B2Bi transport failure: {}",
                e
            );
            SterlingError::Transport {
                url: url.to_string(),
                source: e,
            }
        })?;

        let request_url = response.url().to_string();
        let status = response.status();
        if status != StatusCode::OK {
            warn!(
                url = %request_url,
                status = status.as_u16(),
                "Sterling B2Bi request failed: GET {} = {}",
                request_url,
                status
            );
            return Err(SterlingError::Status {
                url: request_url,
                status: status.as_u16(),
            });
        }

        debug!(url = %request_url, "Sterling B2Bi request succeeded");
        response.json::<Value>().await.map_err(|e| {
            warn!(url = %request_url, "Sterling B2Bi returned an unreadable body: {}", e);
            SterlingError::Decode {
                url: request_url,
                source: e,
            }
        })
    }
}

/// `{host}/B2BAPIs/svc/{resource}/`, appended segment by segment so the
/// host's own path is kept and nothing leaks into a query or fragment
fn endpoint(profile: &ConnectionProfile, resource: &str) -> SterlingResult<Url> {
    let invalid = |reason: String| {
        SterlingError::InvalidConfig(format!("{} {}", profile.host(), reason))
    };

    let mut url = Url::parse(profile.host()).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("cannot be a base URL".to_string()))?
        .pop_if_empty()
        .extend(SERVICE_SEGMENTS)
        .push(resource)
        .push("");
    Ok(url)
}
