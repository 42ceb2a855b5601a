use gloo::net::http::{
  Request,
  RequestBuilder
};
use todo_core::GatewayError;
use todo_core::gateway::{
  DEFAULT_BASE_URL,
  Gateway,
  HttpRequest,
  HttpResponse,
  Method,
  Transport
};

/// Base endpoint baked in at build time through `TODO_API_URL`.
pub fn base_url() -> &'static str {
  option_env!("TODO_API_URL")
    .unwrap_or(DEFAULT_BASE_URL)
}

pub fn connect()
-> Result<Gateway<GlooTransport>, GatewayError>
{
  Gateway::new(
    base_url(),
    GlooTransport
  )
}

/// `fetch` based transport for the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

impl Transport for GlooTransport {
  async fn send(
    &self,
    request: HttpRequest
  ) -> Result<HttpResponse, GatewayError>
  {
    let path =
      request.url.path().to_string();
    let url = request.url.as_str();
    let builder = match request.method {
      | Method::Get => Request::get(url),
      | Method::Post => {
        Request::post(url)
      }
      | Method::Put => Request::put(url),
      | Method::Delete => {
        Request::delete(url)
      }
    }
    .header(
      "Accept",
      "application/json"
    );

    let response =
      dispatch(builder, request.body)
        .await
        .map_err(|err| {
          GatewayError::network(
            &path, err
          )
        })?;

    let status = response.status();
    let body = response
      .text()
      .await
      .map_err(|err| {
        GatewayError::network(
          &path, err
        )
      })?;

    Ok(HttpResponse {
      status,
      body
    })
  }
}

async fn dispatch(
  builder: RequestBuilder,
  body: Option<String>
) -> Result<
  gloo::net::http::Response,
  gloo::net::Error
> {
  match body {
    | Some(body) => {
      builder
        .header(
          "Content-Type",
          "application/json"
        )
        .body(body)?
        .send()
        .await
    }
    | None => builder.send().await
  }
}
