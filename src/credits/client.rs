//! Credit operations.

use std::{
    future::{Future, IntoFuture},
    pin::Pin,
};

use chrono::NaiveDate;

use super::types::{Balance, DailyUsage};
use crate::{
    Error,
    client::{Client, inner::ClientInner},
    transport::InvokeRequest,
    types::{ListSegment, Page},
    validations::format_date,
};

/// Client for the credits of the account.
///
/// Access via `client.credits()`.
///
/// ## Example
///
/// ```rust,ignore
/// let balance = client.credits().get_balance().await?;
/// println!("{} credit packs", balance.credit_packs);
///
/// let usages = client.credits()
///     .list_daily_usages()
///     .since(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
///     .await?;
/// ```
#[derive(Clone)]
pub struct CreditsClient {
    client: Client,
}

impl CreditsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Gets the current credit balance.
    pub async fn get_balance(&self) -> Result<Balance, Error> {
        let request = InvokeRequest::get(ClientInner::resource("credits/balance"));
        self.client.inner().invoke_json(request).await
    }

    /// Lists the daily credit consumption.
    pub fn list_daily_usages(&self) -> ListDailyUsagesRequest {
        ListDailyUsagesRequest {
            client: self.client.clone(),
            since: None,
            until: None,
            limit: None,
            cursor: None,
        }
    }
}

impl std::fmt::Debug for CreditsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreditsClient").finish_non_exhaustive()
    }
}

/// Request to list daily credit usages.
pub struct ListDailyUsagesRequest {
    client: Client,
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
    limit: Option<usize>,
    cursor: Option<String>,
}

impl ListDailyUsagesRequest {
    /// Keeps only days on or after `date`.
    #[must_use]
    pub fn since(mut self, date: NaiveDate) -> Self {
        self.since = Some(date);
        self
    }

    /// Keeps only days on or before `date`.
    #[must_use]
    pub fn until(mut self, date: NaiveDate) -> Self {
        self.until = Some(date);
        self
    }

    /// Sets the maximum number of results to return.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the pagination cursor.
    #[must_use]
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    async fn execute(self) -> Result<Page<DailyUsage>, Error> {
        if let (Some(since), Some(until)) = (self.since, self.until) {
            if since > until {
                return Err(Error::invalid_argument(format!(
                    "date range is reversed: {} is after {}",
                    since, until
                )));
            }
        }

        let request = InvokeRequest::get(ClientInner::resource("credits/daily-usage"))
            .with_optional_query("date:since", self.since.map(format_date))
            .with_optional_query("date:until", self.until.map(format_date))
            .with_optional_query("limit", self.limit.map(|limit| limit.to_string()))
            .with_optional_query("cursor", self.cursor);

        let segment: ListSegment<DailyUsage> = self.client.inner().invoke_json(request).await?;
        Ok(segment.into())
    }
}

impl IntoFuture for ListDailyUsagesRequest {
    type Output = Result<Page<DailyUsage>, Error>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod wiremock_tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::{BearerCredentialsConfig, EndpointSet, ErrorKind};

    fn client_for(servers: &[&MockServer]) -> Client {
        Client::builder()
            .credentials(BearerCredentialsConfig::new("test_token"))
            .endpoints(EndpointSet::parse(servers.iter().map(|s| s.uri())).unwrap())
            .insecure()
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_balance() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2.6/credits/balance"))
            .and(header("authorization", "Bearer test_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "creditPacks": 42.0,
                "freeCredits": 10.0,
                "freeCreditsResetIn": "10:00:00"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let balance = client_for(&[&server]).credits().get_balance().await.unwrap();
        assert_eq!(balance.credit_packs, 42.0);
        assert_eq!(balance.free_credits, Some(10.0));
    }

    #[tokio::test]
    async fn test_get_balance_fails_over() {
        let a = MockServer::start().await;
        let b = MockServer::start().await;
        Mock::given(path("/v2.6/credits/balance"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&a)
            .await;
        Mock::given(path("/v2.6/credits/balance"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"creditPacks": 1.0})))
            .expect(1)
            .mount(&b)
            .await;

        let balance = client_for(&[&a, &b]).credits().get_balance().await.unwrap();
        assert_eq!(balance.credit_packs, 1.0);
    }

    #[tokio::test]
    async fn test_get_balance_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(path("/v2.6/credits/balance"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client_for(&[&server]).credits().get_balance().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn test_list_daily_usages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2.6/credits/daily-usage"))
            .and(query_param("date:since", "2026-01-01"))
            .and(query_param("date:until", "2026-01-31"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meta": {"isTruncated": false},
                "data": [
                    {"date": "2026-01-02", "creditPacks": 3.0, "freeCredits": 1.0},
                    {"date": "2026-01-05", "creditPacks": 0.0, "freeCredits": 25.0}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&[&server])
            .credits()
            .list_daily_usages()
            .since(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
            .until(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap())
            .await
            .unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page.items[1].free_credits, 25.0);
    }

    #[tokio::test]
    async fn test_list_daily_usages_reversed_range() {
        let server = MockServer::start().await;
        let err = client_for(&[&server])
            .credits()
            .list_daily_usages()
            .since(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap())
            .until(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
