use std::fmt;
use std::str::FromStr;

use chrono::{
  DateTime,
  Utc
};
use serde::{
  Deserialize,
  Serialize
};

pub type TodoId = i64;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(rename_all = "camelCase")]
pub struct TodoDto {
  pub id:           TodoId,
  #[serde(default)]
  pub title:        String,
  #[serde(
    default,
    rename = "discription",
    alias = "description"
  )]
  pub description:  String,
  #[serde(default)]
  pub is_completed: bool,
  #[serde(with = "wire_datetime")]
  pub created_at:   DateTime<Utc>,
  #[serde(with = "wire_datetime")]
  pub due_date:     DateTime<Utc>
}

impl TodoDto {
  /// Full record with only the completion flag flipped.
  pub fn with_completion_toggled(
    &self
  ) -> Self {
    Self {
      is_completed: !self.is_completed,
      ..self.clone()
    }
  }

  pub fn is_overdue(
    &self,
    now: DateTime<Utc>
  ) -> bool {
    is_overdue(self.due_date, now)
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(rename_all = "camelCase")]
pub struct TodoCreate {
  pub title:       String,
  #[serde(
    rename = "discription",
    alias = "description"
  )]
  pub description: String,
  #[serde(with = "wire_datetime")]
  pub due_date:    DateTime<Utc>
}

#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TodoPage {
  #[serde(default)]
  pub count: u64,
  #[serde(
    default,
    rename = "dtos",
    alias = "items"
  )]
  pub items: Vec<TodoDto>
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
  #[default]
  All,
  Completed,
  Incomplete
}

impl StatusFilter {
  pub const ALL: [StatusFilter; 3] = [
    StatusFilter::All,
    StatusFilter::Completed,
    StatusFilter::Incomplete
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      | StatusFilter::All => "all",
      | StatusFilter::Completed => {
        "completed"
      }
      | StatusFilter::Incomplete => {
        "incomplete"
      }
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | StatusFilter::All => "All",
      | StatusFilter::Completed => {
        "Completed"
      }
      | StatusFilter::Incomplete => {
        "Incomplete"
      }
    }
  }
}

impl fmt::Display for StatusFilter {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatusFilter(
  pub String
);

impl fmt::Display
  for UnknownStatusFilter
{
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(
      f,
      "unknown status filter `{}` \
       (expected all, completed or \
       incomplete)",
      self.0
    )
  }
}

impl std::error::Error
  for UnknownStatusFilter
{
}

impl FromStr for StatusFilter {
  type Err = UnknownStatusFilter;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "all" => Ok(StatusFilter::All),
      | "completed" | "done" => {
        Ok(StatusFilter::Completed)
      }
      | "incomplete" | "pending" => {
        Ok(StatusFilter::Incomplete)
      }
      | _ => {
        Err(UnknownStatusFilter(
          s.to_string()
        ))
      }
    }
  }
}

/// Read-mode selector. `due_date` narrows reads through the by-due-date
/// endpoint; the list view only drives `status`.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TodoFilter {
  pub status:   StatusFilter,
  #[serde(default)]
  pub due_date: Option<DateTime<Utc>>
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct PageQuery {
  pub skip:   u32,
  pub take:   u32,
  pub status: StatusFilter
}

impl PageQuery {
  pub fn for_page(
    page_index: u32,
    page_size: u32,
    status: StatusFilter
  ) -> Self {
    Self {
      skip: page_index
        .saturating_mul(page_size),
      take: page_size,
      status
    }
  }
}

pub fn is_overdue(
  due: DateTime<Utc>,
  now: DateTime<Utc>
) -> bool {
  due < now
}

/// Date-times as the todo service speaks them: written as ISO-8601 UTC with
/// milliseconds, read from RFC 3339 or a naive timestamp taken as UTC.
pub mod wire_datetime {
  use chrono::{
    DateTime,
    NaiveDate,
    NaiveDateTime,
    SecondsFormat,
    Utc
  };
  use serde::{
    Deserialize,
    Deserializer,
    Serializer
  };

  pub fn format(
    dt: &DateTime<Utc>
  ) -> String {
    dt.to_rfc3339_opts(
      SecondsFormat::Millis,
      true
    )
  }

  pub fn parse(
    raw: &str
  ) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) =
      DateTime::parse_from_rfc3339(raw)
    {
      return Some(
        dt.with_timezone(&Utc)
      );
    }
    if let Ok(ndt) =
      NaiveDateTime::parse_from_str(
        raw,
        "%Y-%m-%dT%H:%M:%S%.f"
      )
    {
      return Some(ndt.and_utc());
    }
    NaiveDate::parse_from_str(
      raw, "%Y-%m-%d"
    )
    .ok()
    .and_then(|date| {
      date.and_hms_opt(0, 0, 0)
    })
    .map(|ndt| ndt.and_utc())
  }

  pub fn serialize<S>(
    dt: &DateTime<Utc>,
    serializer: S
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer
  {
    serializer
      .serialize_str(&format(dt))
  }

  pub fn deserialize<'de, D>(
    deserializer: D
  ) -> Result<DateTime<Utc>, D::Error>
  where
    D: Deserializer<'de>
  {
    let raw = String::deserialize(
      deserializer
    )?;
    parse(&raw).ok_or_else(|| {
      serde::de::Error::custom(
        format!(
          "invalid date-time: {raw}"
        )
      )
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::{
    TimeZone,
    Utc
  };

  use super::*;

  #[test]
  fn create_payload_uses_service_field_names()
   {
    let create = TodoCreate {
      title:       "Buy milk".to_string(),
      description: "Get milk from the \
                    store today"
        .to_string(),
      due_date:    Utc
        .with_ymd_and_hms(
          2025, 1, 1, 0, 0, 0
        )
        .unwrap()
    };

    let value =
      serde_json::to_value(&create)
        .unwrap();
    let object =
      value.as_object().unwrap();

    assert_eq!(object.len(), 3);
    assert_eq!(
      object["title"],
      "Buy milk"
    );
    assert_eq!(
      object["discription"],
      "Get milk from the store today"
    );
    assert_eq!(
      object["dueDate"],
      "2025-01-01T00:00:00.000Z"
    );
  }

  #[test]
  fn page_reads_naive_server_timestamps()
   {
    let raw = r#"{
      "count": 12,
      "dtos": [{
        "id": 7,
        "title": "Pay rent",
        "discription": "Transfer before the fifth",
        "isCompleted": true,
        "createdAt": "2024-12-30T08:15:00.123",
        "dueDate": "2025-01-05T00:00:00Z"
      }]
    }"#;

    let page: TodoPage =
      serde_json::from_str(raw).unwrap();
    assert_eq!(page.count, 12);
    let item = &page.items[0];
    assert_eq!(item.id, 7);
    assert!(item.is_completed);
    assert_eq!(
      item.description,
      "Transfer before the fifth"
    );
    assert_eq!(
      wire_datetime::format(
        &item.created_at
      ),
      "2024-12-30T08:15:00.123Z"
    );
  }

  #[test]
  fn toggle_preserves_other_fields() {
    let now = Utc
      .with_ymd_and_hms(
        2025, 3, 1, 12, 0, 0
      )
      .unwrap();
    let item = TodoDto {
      id:           3,
      title:        "Write report"
        .to_string(),
      description:  "Quarterly numbers \
                     for finance"
        .to_string(),
      is_completed: false,
      created_at:   now,
      due_date:     now
    };

    let toggled =
      item.with_completion_toggled();
    assert!(toggled.is_completed);
    assert_eq!(toggled.title, item.title);
    assert_eq!(
      toggled.with_completion_toggled(),
      item
    );
  }

  #[test]
  fn status_filter_parses_aliases() {
    assert_eq!(
      "Completed"
        .parse::<StatusFilter>()
        .unwrap(),
      StatusFilter::Completed
    );
    assert_eq!(
      "pending"
        .parse::<StatusFilter>()
        .unwrap(),
      StatusFilter::Incomplete
    );
    assert!(
      "archived"
        .parse::<StatusFilter>()
        .is_err()
    );
  }

  #[test]
  fn page_query_offsets_by_page_size() {
    let query = PageQuery::for_page(
      1,
      10,
      StatusFilter::Completed
    );
    assert_eq!(query.skip, 10);
    assert_eq!(query.take, 10);
  }

  #[test]
  fn overdue_is_strictly_before_now() {
    let now = Utc
      .with_ymd_and_hms(
        2025, 1, 1, 0, 0, 0
      )
      .unwrap();
    assert!(!is_overdue(now, now));
    assert!(is_overdue(
      now - chrono::Duration::seconds(1),
      now
    ));
  }
}
