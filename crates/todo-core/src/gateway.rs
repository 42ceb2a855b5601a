//! Remote data gateway: one method per todo service endpoint.
//!
//! The gateway is stateless apart from its base endpoint. Each call is a
//! single round trip through a [`Transport`]; nothing is retried or cached.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use todo_shared::{PageQuery, StatusFilter, TodoCreate, TodoDto, TodoId, TodoPage, wire_datetime};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::GatewayError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5106/api/ToDOList";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Create,
    GetById,
    GetAll,
    SelectCompleted,
    SelectIncomplete,
    SelectByDueDate,
    Update,
    Delete,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Create => "Create",
            Endpoint::GetById => "GetById",
            Endpoint::GetAll => "GetAll",
            Endpoint::SelectCompleted => "SelectCompletedAsync",
            Endpoint::SelectIncomplete => "SelectIncompleteAsync",
            Endpoint::SelectByDueDate => "SelectByDueDateAsync",
            Endpoint::Update => "Update",
            Endpoint::Delete => "Delete",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Endpoint::Create => Method::Post,
            Endpoint::Update => Method::Put,
            Endpoint::Delete => Method::Delete,
            _ => Method::Get,
        }
    }

    /// List endpoint serving the given status filter.
    pub fn for_status(status: StatusFilter) -> Self {
        match status {
            StatusFilter::All => Endpoint::GetAll,
            StatusFilter::Completed => Endpoint::SelectCompleted,
            StatusFilter::Incomplete => Endpoint::SelectIncomplete,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    /// JSON body, present for POST and PUT.
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn query_value(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Last path segment, i.e. the endpoint name.
    pub fn endpoint_name(&self) -> &str {
        self.url.path().rsplit('/').next().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One HTTP round trip. Implementations must not retry.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, GatewayError>;
}

#[derive(Debug, Clone)]
pub struct Gateway<T> {
    base: Url,
    transport: T,
}

impl<T> Gateway<T> {
    pub fn new(base_url: &str, transport: T) -> Result<Self, GatewayError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base =
            Url::parse(&format!("{trimmed}/")).map_err(|source| GatewayError::InvalidUrl {
                url: base_url.to_string(),
                source,
            })?;
        Ok(Self { base, transport })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, endpoint: Endpoint, query: &[(&str, String)]) -> Result<Url, GatewayError> {
        let mut url = self
            .base
            .join(endpoint.path())
            .map_err(|source| GatewayError::InvalidUrl {
                url: format!("{}{}", self.base, endpoint.path()),
                source,
            })?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }
}

impl<T: Transport> Gateway<T> {
    #[instrument(skip(self, todo), fields(title_len = todo.title.len()))]
    pub async fn create(&self, todo: &TodoCreate) -> Result<TodoId, GatewayError> {
        let body = encode(Endpoint::Create, todo)?;
        let response = self.call(Endpoint::Create, &[], Some(body)).await?;
        decode(Endpoint::Create, &response)
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_id(&self, id: TodoId) -> Result<TodoDto, GatewayError> {
        let response = self
            .call(Endpoint::GetById, &[("id", id.to_string())], None)
            .await
            .map_err(|err| match err {
                GatewayError::Server { status: 404, .. } => GatewayError::NotFound { id },
                other => other,
            })?;
        decode(Endpoint::GetById, &response)
    }

    pub async fn fetch_all(&self, skip: u32, take: u32) -> Result<TodoPage, GatewayError> {
        self.list(Endpoint::GetAll, skip, take).await
    }

    pub async fn fetch_completed(&self, skip: u32, take: u32) -> Result<TodoPage, GatewayError> {
        self.list(Endpoint::SelectCompleted, skip, take).await
    }

    pub async fn fetch_incomplete(&self, skip: u32, take: u32) -> Result<TodoPage, GatewayError> {
        self.list(Endpoint::SelectIncomplete, skip, take).await
    }

    /// The service has no unified list query; pick the endpoint matching the status.
    pub async fn fetch_page(&self, query: PageQuery) -> Result<TodoPage, GatewayError> {
        match query.status {
            StatusFilter::All => self.fetch_all(query.skip, query.take).await,
            StatusFilter::Completed => self.fetch_completed(query.skip, query.take).await,
            StatusFilter::Incomplete => self.fetch_incomplete(query.skip, query.take).await,
        }
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_due_date(&self, date: DateTime<Utc>) -> Result<TodoPage, GatewayError> {
        let response = self
            .call(
                Endpoint::SelectByDueDate,
                &[("data", wire_datetime::format(&date))],
                None,
            )
            .await?;
        decode(Endpoint::SelectByDueDate, &response)
    }

    /// Replaces the stored record wholesale.
    #[instrument(skip(self, todo), fields(id = todo.id))]
    pub async fn update(&self, todo: &TodoDto) -> Result<(), GatewayError> {
        let body = encode(Endpoint::Update, todo)?;
        self.call(Endpoint::Update, &[], Some(body)).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: TodoId) -> Result<(), GatewayError> {
        self.call(Endpoint::Delete, &[("id", id.to_string())], None)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, endpoint: Endpoint, skip: u32, take: u32) -> Result<TodoPage, GatewayError> {
        let response = self
            .call(
                endpoint,
                &[("skip", skip.to_string()), ("take", take.to_string())],
                None,
            )
            .await?;
        decode(endpoint, &response)
    }

    async fn call(
        &self,
        endpoint: Endpoint,
        query: &[(&str, String)],
        body: Option<String>,
    ) -> Result<HttpResponse, GatewayError> {
        let url = self.url(endpoint, query)?;
        debug!(method = %endpoint.method(), url = %url, "issuing todo service request");

        let request = HttpRequest {
            method: endpoint.method(),
            url,
            body,
        };
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(endpoint = %endpoint, error = %err, "todo service request failed");
                return Err(err);
            }
        };

        if !response.is_success() {
            warn!(
                endpoint = %endpoint,
                status = response.status,
                "todo service returned an error status"
            );
            return Err(GatewayError::Server {
                path: endpoint.to_string(),
                status: response.status,
                body: response.body,
            });
        }

        debug!(endpoint = %endpoint, status = response.status, "todo service request done");
        Ok(response)
    }
}

fn encode<B: Serialize + ?Sized>(endpoint: Endpoint, body: &B) -> Result<String, GatewayError> {
    serde_json::to_string(body).map_err(|source| GatewayError::Encode {
        path: endpoint.to_string(),
        source,
    })
}

fn decode<R: DeserializeOwned>(endpoint: Endpoint, response: &HttpResponse) -> Result<R, GatewayError> {
    serde_json::from_str(&response.body).map_err(|source| GatewayError::Decode {
        path: endpoint.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Unused;

    #[test]
    fn urls_join_endpoint_to_base() {
        let gateway = Gateway::new("http://localhost:5106/api/ToDOList/", Unused).unwrap();
        let url = gateway
            .url(
                Endpoint::SelectCompleted,
                &[("skip", "10".to_string()), ("take", "10".to_string())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5106/api/ToDOList/SelectCompletedAsync?skip=10&take=10"
        );
    }

    #[test]
    fn query_values_are_form_encoded() {
        let gateway = Gateway::new(DEFAULT_BASE_URL, Unused).unwrap();
        let url = gateway
            .url(
                Endpoint::SelectByDueDate,
                &[("data", "2025-01-01T00:00:00.000Z".to_string())],
            )
            .unwrap();
        assert_eq!(url.query(), Some("data=2025-01-01T00%3A00%3A00.000Z"));
    }

    #[test]
    fn rejects_unparseable_base() {
        let err = Gateway::new("not a url", Unused).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidUrl { .. }));
    }

    #[test]
    fn endpoints_map_to_methods() {
        assert_eq!(Endpoint::Create.method(), Method::Post);
        assert_eq!(Endpoint::Update.method(), Method::Put);
        assert_eq!(Endpoint::Delete.method(), Method::Delete);
        assert_eq!(Endpoint::GetById.method(), Method::Get);
        assert_eq!(
            Endpoint::for_status(StatusFilter::Incomplete).to_string(),
            "/SelectIncompleteAsync"
        );
    }
}
