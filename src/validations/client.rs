//! Email validation operations.

use std::{
    future::{Future, IntoFuture},
    pin::Pin,
    time::Duration,
};

use chrono::NaiveDate;
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use super::types::{
    EntryStatus, Validation, ValidationEntry, ValidationOverview, ValidationRequest,
    ValidationSnapshot, ValidationStatus, wire_name,
};
use crate::{
    Error, ErrorKind,
    client::{Client, inner::ClientInner},
    config::WaitOptions,
    transport::{InvokeRequest, JsonContent},
    types::{ListSegment, Page, SortOrder},
};

const EMAIL_VALIDATIONS: &str = "email-validations";

/// Client for email validation jobs.
///
/// Access via `client.email_validations()`.
///
/// ## Example
///
/// ```rust,ignore
/// let validations = client.email_validations();
///
/// // Submit and wait for the results
/// let job = validations
///     .submit(ValidationRequest::new(["batman@gmail.com"]), WaitOptions::default())
///     .await?;
///
/// // Fetch it again later, without waiting
/// let job = validations.get(job.id(), WaitOptions::no_wait()).await?;
///
/// // Remove it
/// validations.delete(job.id()).await?;
/// ```
#[derive(Clone)]
pub struct EmailValidationsClient {
    client: Client,
}

impl EmailValidationsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Submits a new validation job.
    ///
    /// Returns the completed job if the API finished it within the wait
    /// time. Otherwise, when `wait` asks for completion, polls until the job
    /// completes or the polling budget runs out; the job is then returned in
    /// its latest state.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::InvalidArgument`] if the request has no entries.
    /// - [`ErrorKind::InsufficientCredit`] if the account cannot pay for it.
    /// - [`ErrorKind::Gone`] if the job disappears while waiting.
    pub async fn submit(
        &self,
        request: ValidationRequest,
        wait: WaitOptions,
    ) -> Result<Validation, Error> {
        if request.entries.is_empty() {
            return Err(Error::invalid_argument("at least one entry is required"));
        }

        let entries = request.entries.len();
        let invoke = InvokeRequest::post(ClientInner::resource(EMAIL_VALIDATIONS))
            .with_query("waitTime", wait_time_millis(wait.wait_time))
            .with_timeout(self.client.inner().held_call_timeout(wait.wait_time))
            .with_content(JsonContent::new(request))
            .with_optional_cancellation(wait.cancellation().cloned());

        let response = self.client.inner().invoke(invoke).await?.error_for_status()?;
        let snapshot: ValidationSnapshot = response.json()?;
        tracing::debug!(id = %snapshot.overview.id, entries, "validation submitted");

        match self.resolve(snapshot, &wait).await? {
            Some(validation) => Ok(validation),
            None => Err(Error::new(
                ErrorKind::Gone,
                "validation job was removed while waiting for its completion",
            )),
        }
    }

    /// Gets a validation job.
    ///
    /// Returns `Ok(None)` if the job does not exist, was deleted or expired.
    /// When `wait` asks for completion, polls while the job is in progress.
    pub async fn get(&self, id: &str, wait: WaitOptions) -> Result<Option<Validation>, Error> {
        let id = job_id(id)?;
        match self.fetch(id, &wait).await? {
            Some(snapshot) => self.resolve(snapshot, &wait).await,
            None => Ok(None),
        }
    }

    /// Gets the overview of a validation job, without its entries.
    ///
    /// Returns `Ok(None)` if the job does not exist, was deleted or expired.
    pub async fn get_overview(&self, id: &str) -> Result<Option<ValidationOverview>, Error> {
        let id = job_id(id)?;
        let request =
            InvokeRequest::get(ClientInner::resource(&format!("{}/{}/overview", EMAIL_VALIDATIONS, id)));

        let response = self.client.inner().invoke(request).await?;
        if is_missing(response.status()) {
            return Ok(None);
        }
        response.error_for_status()?.json().map(Some)
    }

    /// Lists the entries of a completed validation job.
    ///
    /// ## Example
    ///
    /// ```rust,ignore
    /// let page = client.email_validations()
    ///     .list_entries("b4e8d3b0")
    ///     .limit(100)
    ///     .await?;
    /// ```
    pub fn list_entries(&self, id: impl Into<String>) -> ListEntriesRequest {
        ListEntriesRequest {
            client: self.client.clone(),
            id: id.into(),
            limit: None,
            cursor: None,
            statuses: Vec::new(),
            cancellation: None,
        }
    }

    /// Lists the validation jobs of the account.
    ///
    /// ## Example
    ///
    /// ```rust,ignore
    /// let page = client.email_validations()
    ///     .list()
    ///     .status(ValidationStatus::Completed)
    ///     .sort(SortOrder::Descending)
    ///     .await?;
    /// ```
    pub fn list(&self) -> ListValidationsRequest {
        ListValidationsRequest {
            client: self.client.clone(),
            limit: None,
            cursor: None,
            created_since: None,
            created_until: None,
            statuses: Vec::new(),
            owner: None,
            sort: None,
        }
    }

    /// Deletes a validation job.
    ///
    /// Deleting a job that is already gone succeeds.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let id = job_id(id)?;
        let request =
            InvokeRequest::delete(ClientInner::resource(&format!("{}/{}", EMAIL_VALIDATIONS, id)));

        let response = self.client.inner().invoke(request).await?;
        if response.status() == StatusCode::GONE {
            return Ok(());
        }
        response.error_for_status()?;
        tracing::debug!(id, "validation deleted");
        Ok(())
    }

    /// Fetches the current snapshot of a job.
    async fn fetch(&self, id: &str, wait: &WaitOptions) -> Result<Option<ValidationSnapshot>, Error> {
        let request = InvokeRequest::get(ClientInner::resource(&format!("{}/{}", EMAIL_VALIDATIONS, id)))
            .with_query("waitTime", wait_time_millis(wait.wait_time))
            .with_timeout(self.client.inner().held_call_timeout(wait.wait_time))
            .with_optional_cancellation(wait.cancellation().cloned());

        let response = self.client.inner().invoke(request).await?;
        if is_missing(response.status()) {
            return Ok(None);
        }
        response.error_for_status()?.json().map(Some)
    }

    /// Polls as `wait` allows, then gathers every entry of a completed job.
    async fn resolve(
        &self,
        mut snapshot: ValidationSnapshot,
        wait: &WaitOptions,
    ) -> Result<Option<Validation>, Error> {
        let cancellation = wait.cancellation().cloned().unwrap_or_default();
        let started = tokio::time::Instant::now();
        let mut polls = 0;

        while wait.wait_for_completion && snapshot.overview.status == ValidationStatus::InProgress {
            if let Some(progress) = wait.progress() {
                progress(&snapshot.overview);
            }

            if !wait.allows_poll(polls) {
                tracing::debug!(id = %snapshot.overview.id, polls, "poll limit reached");
                break;
            }

            polls += 1;
            let delay = wait.delay_for_poll(polls);
            if wait
                .deadline
                .is_some_and(|deadline| started.elapsed() + delay > deadline)
            {
                tracing::debug!(id = %snapshot.overview.id, polls, "wait deadline reached");
                break;
            }

            sleep(delay, &cancellation).await?;
            tracing::debug!(id = %snapshot.overview.id, poll = polls, "polling validation");

            snapshot = match self.fetch(&snapshot.overview.id, wait).await? {
                Some(snapshot) => snapshot,
                None => return Ok(None),
            };
        }

        let (mut validation, mut page) = snapshot.into_parts();
        if validation.is_completed() {
            validation.entries = std::mem::take(&mut page.items);
            while let Some(cursor) = page.next_cursor().map(str::to_owned) {
                page = self
                    .list_entries(validation.id())
                    .cursor(cursor)
                    .with_cancellation(cancellation.clone())
                    .await?;
                validation.entries.append(&mut page.items);
            }
        }

        Ok(Some(validation))
    }
}

impl std::fmt::Debug for EmailValidationsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailValidationsClient").finish_non_exhaustive()
    }
}

// ============================================================================
// List Requests
// ============================================================================

/// Request to list the entries of a job.
pub struct ListEntriesRequest {
    client: Client,
    id: String,
    limit: Option<usize>,
    cursor: Option<String>,
    statuses: Vec<EntryStatus>,
    cancellation: Option<CancellationToken>,
}

impl ListEntriesRequest {
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

    /// Keeps only entries with the given status. May be repeated.
    #[must_use]
    pub fn status(mut self, status: EntryStatus) -> Self {
        self.statuses.push(status);
        self
    }

    /// Sets the cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    async fn execute(self) -> Result<Page<ValidationEntry>, Error> {
        let id = job_id(&self.id)?;
        let request = InvokeRequest::get(ClientInner::resource(&format!(
            "{}/{}/entries",
            EMAIL_VALIDATIONS, id
        )))
        .with_optional_query("limit", self.limit.map(|limit| limit.to_string()))
        .with_optional_query("cursor", self.cursor)
        .with_optional_query("status", join_wire_names(&self.statuses))
        .with_optional_cancellation(self.cancellation);

        let segment: ListSegment<ValidationEntry> = self.client.inner().invoke_json(request).await?;
        Ok(segment.into())
    }
}

impl IntoFuture for ListEntriesRequest {
    type Output = Result<Page<ValidationEntry>, Error>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}

/// Request to list validation jobs.
pub struct ListValidationsRequest {
    client: Client,
    limit: Option<usize>,
    cursor: Option<String>,
    created_since: Option<NaiveDate>,
    created_until: Option<NaiveDate>,
    statuses: Vec<ValidationStatus>,
    owner: Option<String>,
    sort: Option<SortOrder>,
}

impl ListValidationsRequest {
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

    /// Keeps only jobs created on or after `date`.
    #[must_use]
    pub fn created_since(mut self, date: NaiveDate) -> Self {
        self.created_since = Some(date);
        self
    }

    /// Keeps only jobs created on or before `date`.
    #[must_use]
    pub fn created_until(mut self, date: NaiveDate) -> Self {
        self.created_until = Some(date);
        self
    }

    /// Keeps only jobs with the given status. May be repeated.
    #[must_use]
    pub fn status(mut self, status: ValidationStatus) -> Self {
        self.statuses.push(status);
        self
    }

    /// Keeps only jobs owned by the given user.
    #[must_use]
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Sorts by creation date.
    #[must_use]
    pub fn sort(mut self, order: SortOrder) -> Self {
        self.sort = Some(order);
        self
    }

    async fn execute(self) -> Result<Page<ValidationOverview>, Error> {
        let request = InvokeRequest::get(ClientInner::resource(EMAIL_VALIDATIONS))
            .with_optional_query("limit", self.limit.map(|limit| limit.to_string()))
            .with_optional_query("cursor", self.cursor)
            .with_optional_query("createdOn:since", self.created_since.map(format_date))
            .with_optional_query("createdOn:until", self.created_until.map(format_date))
            .with_optional_query("status", join_wire_names(&self.statuses))
            .with_optional_query("owner", self.owner)
            .with_optional_query("sort", self.sort.map(|order| order.apply("createdOn")));

        let segment: ListSegment<ValidationOverview> =
            self.client.inner().invoke_json(request).await?;
        Ok(segment.into())
    }
}

impl IntoFuture for ListValidationsRequest {
    type Output = Result<Page<ValidationOverview>, Error>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn job_id(id: &str) -> Result<&str, Error> {
    let id = id.trim();
    if id.is_empty() || id.contains('/') {
        return Err(Error::invalid_argument(format!("invalid validation id '{}'", id)));
    }
    Ok(id)
}

/// 404 and 410 both mean the job is not available anymore.
fn is_missing(status: StatusCode) -> bool {
    matches!(status, StatusCode::NOT_FOUND | StatusCode::GONE)
}

fn wait_time_millis(wait_time: Duration) -> String {
    wait_time.as_millis().to_string()
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn join_wire_names<T: serde::Serialize>(values: &[T]) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().filter_map(wire_name).collect::<Vec<_>>().join(","))
}

/// Sleeps for `delay` unless cancelled first.
async fn sleep(delay: Duration, cancellation: &CancellationToken) -> Result<(), Error> {
    tokio::select! {
        biased;
        () = cancellation.cancelled() => Err(Error::cancelled()),
        () = tokio::time::sleep(delay) => Ok(()),
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod wiremock_tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::{Classification, EndpointSet, UsernamePasswordConfig};

    const JOB: &str = "/v2.6/email-validations/b4e8d3b0";

    fn client_for(server: &MockServer) -> Client {
        Client::builder()
            .credentials(UsernamePasswordConfig::new("samantha", "42"))
            .endpoints(EndpointSet::parse([server.uri()]).unwrap())
            .insecure()
            .build()
            .unwrap()
    }

    fn fast_polling() -> WaitOptions {
        WaitOptions::new()
            .with_poll_delay(Duration::from_millis(10))
            .with_jitter(0.0)
    }

    fn overview(status: &str) -> serde_json::Value {
        json!({
            "id": "b4e8d3b0",
            "status": status,
            "submittedOn": "2026-01-10T10:00:00Z",
            "noOfEntries": 2,
            "progress": {"percentage": 0.5}
        })
    }

    fn entry(index: u32, input: &str) -> serde_json::Value {
        json!({
            "index": index,
            "inputData": input,
            "classification": "Deliverable",
            "status": "Success"
        })
    }

    fn completed(entries: Vec<serde_json::Value>, cursor: Option<&str>) -> serde_json::Value {
        json!({
            "overview": overview("Completed"),
            "entries": {
                "meta": {"cursor": cursor, "isTruncated": cursor.is_some()},
                "data": entries
            }
        })
    }

    #[tokio::test]
    async fn test_submit_completed_immediately() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2.6/email-validations"))
            .and(query_param("waitTime", "30000"))
            .and(body_json(json!({"entries": [{"inputData": "batman@gmail.com"}]})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completed(vec![entry(0, "batman@gmail.com")], None)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let validation = client_for(&server)
            .email_validations()
            .submit(ValidationRequest::new(["batman@gmail.com"]), WaitOptions::default())
            .await
            .unwrap();

        assert!(validation.is_completed());
        assert_eq!(validation.entries.len(), 1);
        assert_eq!(validation.entries[0].classification, Classification::Deliverable);
    }

    #[tokio::test]
    async fn test_submit_empty_request_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .email_validations()
            .submit(ValidationRequest::new(Vec::<String>::new()), WaitOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn test_submit_without_waiting_returns_in_progress() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2.6/email-validations"))
            .and(query_param("waitTime", "0"))
            .respond_with(
                ResponseTemplate::new(202).set_body_json(json!({"overview": overview("InProgress")})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let validation = client_for(&server)
            .email_validations()
            .submit(ValidationRequest::new(["batman@gmail.com"]), WaitOptions::no_wait())
            .await
            .unwrap();

        assert!(!validation.is_completed());
        assert!(validation.entries.is_empty());
    }

    #[tokio::test]
    async fn test_submit_polls_until_completed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(202).set_body_json(json!({"overview": overview("InProgress")})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(JOB))
            .respond_with(
                ResponseTemplate::new(202).set_body_json(json!({"overview": overview("InProgress")})),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(JOB))
            .respond_with(ResponseTemplate::new(200).set_body_json(completed(
                vec![entry(0, "a@b.com"), entry(1, "c@d.com")],
                None,
            )))
            .mount(&server)
            .await;

        let progress_calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&progress_calls);
        let wait = fast_polling().with_progress(move |overview| {
            assert_eq!(overview.status, ValidationStatus::InProgress);
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let validation = client_for(&server)
            .email_validations()
            .submit(ValidationRequest::new(["a@b.com", "c@d.com"]), wait)
            .await
            .unwrap();

        assert!(validation.is_completed());
        assert_eq!(validation.entries.len(), 2);
        assert_eq!(progress_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_polling_stops_at_max_polls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(JOB))
            .respond_with(
                ResponseTemplate::new(202).set_body_json(json!({"overview": overview("InProgress")})),
            )
            .expect(3)
            .mount(&server)
            .await;

        let validation = client_for(&server)
            .email_validations()
            .get("b4e8d3b0", fast_polling().with_max_polls(2))
            .await
            .unwrap()
            .unwrap();

        assert!(!validation.is_completed());
    }

    #[tokio::test]
    async fn test_polling_cancelled() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(JOB))
            .respond_with(
                ResponseTemplate::new(202).set_body_json(json!({"overview": overview("InProgress")})),
            )
            .mount(&server)
            .await;

        let token = CancellationToken::new();
        let trigger = token.clone();
        let wait = WaitOptions::new()
            .with_poll_delay(Duration::from_secs(30))
            .with_cancellation(token);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let err = client_for(&server)
            .email_validations()
            .get("b4e8d3b0", wait)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }

    #[tokio::test]
    async fn test_get_fetches_truncated_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(JOB))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completed(vec![entry(0, "a@b.com")], Some("page-2"))),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("{}/entries", JOB)))
            .and(query_param("cursor", "page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meta": {"isTruncated": false},
                "data": [entry(1, "c@d.com")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let validation = client_for(&server)
            .email_validations()
            .get("b4e8d3b0", WaitOptions::no_wait())
            .await
            .unwrap()
            .unwrap();

        let inputs: Vec<_> = validation.entries.iter().map(|e| e.input_data.as_str()).collect();
        assert_eq!(inputs, ["a@b.com", "c@d.com"]);
    }

    #[tokio::test]
    async fn test_get_missing_job() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(JOB))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .email_validations()
            .get("b4e8d3b0", WaitOptions::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_overview() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("{}/overview", JOB)))
            .respond_with(ResponseTemplate::new(200).set_body_json(overview("Completed")))
            .mount(&server)
            .await;

        let overview = client_for(&server)
            .email_validations()
            .get_overview("b4e8d3b0")
            .await
            .unwrap()
            .unwrap();
        assert!(overview.is_completed());
        assert_eq!(overview.no_of_entries, 2);
    }

    #[tokio::test]
    async fn test_get_overview_gone() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("{}/overview", JOB)))
            .respond_with(ResponseTemplate::new(410))
            .mount(&server)
            .await;

        let overview = client_for(&server)
            .email_validations()
            .get_overview("b4e8d3b0")
            .await
            .unwrap();
        assert!(overview.is_none());
    }

    #[tokio::test]
    async fn test_list_validations() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2.6/email-validations"))
            .and(query_param("limit", "2"))
            .and(query_param("createdOn:since", "2026-01-01"))
            .and(query_param("status", "InProgress,Completed"))
            .and(query_param("sort", "-createdOn"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meta": {"cursor": "next", "isTruncated": true},
                "data": [overview("InProgress"), overview("Completed")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server)
            .email_validations()
            .list()
            .limit(2)
            .created_since(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
            .status(ValidationStatus::InProgress)
            .status(ValidationStatus::Completed)
            .sort(SortOrder::Descending)
            .await
            .unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page.next_cursor(), Some("next"));
    }

    #[tokio::test]
    async fn test_list_entries_filtered() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("{}/entries", JOB)))
            .and(query_param("status", "Success"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meta": {"isTruncated": false},
                "data": [entry(0, "a@b.com")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server)
            .email_validations()
            .list_entries("b4e8d3b0")
            .status(EntryStatus::Success)
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert!(!page.has_next());
    }

    #[tokio::test]
    async fn test_delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(JOB))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .email_validations()
            .delete("b4e8d3b0")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_already_gone() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(JOB))
            .respond_with(ResponseTemplate::new(410))
            .mount(&server)
            .await;

        assert!(client_for(&server)
            .email_validations()
            .delete("b4e8d3b0")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_insufficient_credit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(402).set_body_json(json!({"message": "Not enough credits"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .email_validations()
            .submit(ValidationRequest::new(["batman@gmail.com"]), WaitOptions::no_wait())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientCredit);
        assert_eq!(err.message(), "Not enough credits");
    }

    #[tokio::test]
    async fn test_held_submit_outlasting_attempt_timeout_is_not_resubmitted() {
        let first = MockServer::start().await;
        let second = MockServer::start().await;
        let held = Duration::from_millis(300);

        Mock::given(method("POST"))
            .and(path("/v2.6/email-validations"))
            .and(query_param("waitTime", "300"))
            .respond_with(
                ResponseTemplate::new(202)
                    .set_body_json(json!({"overview": overview("InProgress")}))
                    .set_delay(held + Duration::from_millis(100)),
            )
            .expect(1)
            .mount(&first)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(202))
            .expect(0)
            .mount(&second)
            .await;

        let client = Client::builder()
            .credentials(UsernamePasswordConfig::new("samantha", "42"))
            .endpoints(EndpointSet::parse([first.uri(), second.uri()]).unwrap())
            .timeout(held)
            .insecure()
            .build()
            .unwrap();

        let validation = client
            .email_validations()
            .submit(
                ValidationRequest::new(["batman@gmail.com"]),
                WaitOptions::no_wait().with_wait_time(held),
            )
            .await
            .unwrap();

        assert!(!validation.is_completed());
        assert_eq!(client.stats().attempts, 1);
    }
}
