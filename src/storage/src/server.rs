// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::StorageFaker;
use crate::transport::{RequestKey, Transport};
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tokio::task::JoinHandle;

#[derive(Clone)]
struct ServerState {
    transport: Transport,
    base_url: String,
}

impl StorageFaker {
    /// Serves the registered responses from a local HTTP server.
    ///
    /// Use this when the code under test builds its own HTTP client and can
    /// only be configured with an endpoint. The server maps each request to
    /// the registered responses by replacing its scheme and authority with
    /// the faker's base URL. That is, a `GET http://127.0.0.1:1234/b/o`
    /// request consumes the responses registered with
    /// [add_get_object_response()][StorageFaker::add_get_object_response].
    ///
    /// A background server cannot fail the test, requests without a
    /// registered response get a `500 Internal Server Error` containing the
    /// error message.
    pub async fn start(&self) -> anyhow::Result<(String, JoinHandle<()>)> {
        let state = ServerState {
            transport: self.transport(),
            base_url: self.base_url().to_string(),
        };
        let app = axum::Router::new().fallback(handler).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("storage fake server stopped: {e}");
            }
        });

        Ok((format!("http://{}:{}", addr.ip(), addr.port()), server))
    }
}

async fn handler(State(state): State<ServerState>, request: Request) -> Response {
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or("/");
    let key = RequestKey::new(format!("{}{path}", state.base_url), request.method().as_str());
    let outcome = match state.transport.next(&key) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("unexpected: {e}");
            return internal_error(e);
        }
    };
    match Transport::outcome_to_response(key, outcome) {
        Ok(response) => response.map(axum::body::Body::from).into_response(),
        Err(e) => internal_error(e),
    }
}

fn internal_error<E: std::fmt::Display>(e: E) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, format!("{e}")).into_response()
}
