#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, TimeZone, Utc};
use todo_core::error::GatewayError;
use todo_core::gateway::{HttpRequest, HttpResponse, Transport};
use todo_core::{Gateway, gateway::DEFAULT_BASE_URL};
use todo_shared::{TodoCreate, TodoDto, TodoId, TodoPage, wire_datetime};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
}

pub fn todo(id: TodoId, title: &str, completed: bool) -> TodoDto {
    TodoDto {
        id,
        title: title.to_string(),
        description: format!("{title} before the weekend"),
        is_completed: completed,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
        due_date: Utc.with_ymd_and_hms(2025, 1, 20, 0, 0, 0).unwrap(),
    }
}

/// Replays canned responses in order and keeps every request it saw.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: RefCell<Vec<HttpRequest>>,
    responses: RefCell<VecDeque<Result<HttpResponse, GatewayError>>>,
}

impl RecordingTransport {
    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn fail(&self, err: GatewayError) -> &Self {
        self.responses.borrow_mut().push_back(Err(err));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, GatewayError> {
        self.requests.borrow_mut().push(request);
        self.responses.borrow_mut().pop_front().unwrap_or(Ok(HttpResponse {
            status: 200,
            body: String::new(),
        }))
    }
}

pub fn recording_gateway() -> Gateway<RecordingTransport> {
    Gateway::new(DEFAULT_BASE_URL, RecordingTransport::default()).unwrap()
}

/// In-memory stand-in for the todo service, endpoint for endpoint.
#[derive(Debug, Default)]
pub struct FakeServer {
    todos: RefCell<BTreeMap<TodoId, TodoDto>>,
    next_id: Cell<TodoId>,
    requests: RefCell<Vec<HttpRequest>>,
    failures: RefCell<Vec<(String, u16)>>,
}

impl FakeServer {
    pub fn with_todos(todos: Vec<TodoDto>) -> Self {
        let server = Self::default();
        for todo in todos {
            server.next_id.set(server.next_id.get().max(todo.id));
            server.todos.borrow_mut().insert(todo.id, todo);
        }
        server
    }

    /// Next request to `endpoint` answers with `status` instead of being served.
    pub fn fail_next(&self, endpoint: &str, status: u16) {
        self.failures.borrow_mut().push((endpoint.to_string(), status));
    }

    pub fn stored(&self, id: TodoId) -> Option<TodoDto> {
        self.todos.borrow().get(&id).cloned()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn calls_to(&self, endpoint: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.endpoint_name() == endpoint)
            .count()
    }

    fn take_failure(&self, endpoint: &str) -> Option<u16> {
        let mut failures = self.failures.borrow_mut();
        let idx = failures.iter().position(|(name, _)| name == endpoint)?;
        Some(failures.remove(idx).1)
    }

    fn page(&self, request: &HttpRequest, keep: impl Fn(&TodoDto) -> bool) -> HttpResponse {
        let skip: usize = request.query_value("skip").unwrap().parse().unwrap();
        let take: usize = request.query_value("take").unwrap().parse().unwrap();
        let matching: Vec<TodoDto> = self.todos.borrow().values().filter(|t| keep(t)).cloned().collect();
        let page = TodoPage {
            count: matching.len() as u64,
            items: matching.into_iter().skip(skip).take(take).collect(),
        };
        json(&page)
    }

    fn serve(&self, request: &HttpRequest) -> HttpResponse {
        let id = || -> TodoId { request.query_value("id").unwrap().parse().unwrap() };

        match request.endpoint_name() {
            "Create" => {
                let create: TodoCreate = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
                let id = self.next_id.get() + 1;
                self.next_id.set(id);
                self.todos.borrow_mut().insert(
                    id,
                    TodoDto {
                        id,
                        title: create.title,
                        description: create.description,
                        is_completed: false,
                        created_at: fixed_now(),
                        due_date: create.due_date,
                    },
                );
                json(&id)
            }
            "GetById" => match self.stored(id()) {
                Some(todo) => json(&todo),
                None => status(404),
            },
            "GetAll" => self.page(request, |_| true),
            "SelectCompletedAsync" => self.page(request, |t| t.is_completed),
            "SelectIncompleteAsync" => self.page(request, |t| !t.is_completed),
            "SelectByDueDateAsync" => {
                let day = wire_datetime::parse(&request.query_value("data").unwrap())
                    .unwrap()
                    .date_naive();
                let items: Vec<TodoDto> = self
                    .todos
                    .borrow()
                    .values()
                    .filter(|t| t.due_date.date_naive() == day)
                    .cloned()
                    .collect();
                json(&TodoPage {
                    count: items.len() as u64,
                    items,
                })
            }
            "Update" => {
                let todo: TodoDto = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
                let mut todos = self.todos.borrow_mut();
                match todos.get_mut(&todo.id) {
                    Some(slot) => {
                        *slot = todo;
                        status(204)
                    }
                    None => status(404),
                }
            }
            "Delete" => match self.todos.borrow_mut().remove(&id()) {
                Some(_) => status(204),
                None => status(404),
            },
            other => panic!("unexpected endpoint {other}"),
        }
    }
}

impl Transport for FakeServer {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, GatewayError> {
        self.requests.borrow_mut().push(request.clone());
        if let Some(code) = self.take_failure(request.endpoint_name()) {
            return Ok(HttpResponse {
                status: code,
                body: "simulated failure".to_string(),
            });
        }
        Ok(self.serve(&request))
    }
}

pub fn fake_gateway(todos: Vec<TodoDto>) -> Gateway<FakeServer> {
    Gateway::new(DEFAULT_BASE_URL, FakeServer::with_todos(todos)).unwrap()
}

fn json<T: serde::Serialize>(value: &T) -> HttpResponse {
    HttpResponse {
        status: 200,
        body: serde_json::to_string(value).unwrap(),
    }
}

fn status(code: u16) -> HttpResponse {
    HttpResponse {
        status: code,
        body: String::new(),
    }
}
