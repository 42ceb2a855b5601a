use chrono::{
  DateTime,
  NaiveDateTime,
  Utc
};
use todo_shared::wire_datetime;

const INPUT_FORMATS: [&str; 3] = [
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%d %H:%M",
  "%Y-%m-%d %H:%M:%S"
];

/// Parses a due date as typed into a form or on the command line.
///
/// Accepts RFC 3339, `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM` (what a
/// `datetime-local` input yields) and `YYYY-MM-DD HH:MM[:SS]`. Values
/// without an offset are taken as UTC; date-only values mean midnight.
pub fn parse_due_input(
  raw: &str
) -> Option<DateTime<Utc>> {
  let raw = raw.trim();
  if raw.is_empty() {
    return None;
  }

  for format in INPUT_FORMATS {
    if let Ok(ndt) =
      NaiveDateTime::parse_from_str(
        raw, format
      )
    {
      return Some(ndt.and_utc());
    }
  }

  wire_datetime::parse(raw)
}

/// Form value for an existing due date, in `datetime-local` shape.
pub fn due_input_value(
  dt: &DateTime<Utc>
) -> String {
  dt.format("%Y-%m-%dT%H:%M")
    .to_string()
}

pub fn format_date(
  dt: &DateTime<Utc>
) -> String {
  dt.format("%Y-%m-%d").to_string()
}

pub fn format_datetime(
  dt: &DateTime<Utc>
) -> String {
  dt.format("%Y-%m-%d %H:%M")
    .to_string()
}

#[cfg(test)]
mod tests {
  use chrono::{
    TimeZone,
    Utc
  };

  use super::*;

  #[test]
  fn date_only_means_midnight_utc() {
    assert_eq!(
      parse_due_input("2025-01-01"),
      Some(
        Utc
          .with_ymd_and_hms(
            2025, 1, 1, 0, 0, 0
          )
          .unwrap()
      )
    );
  }

  #[test]
  fn accepts_datetime_local_and_offsets()
  {
    let expected = Utc
      .with_ymd_and_hms(
        2025, 6, 30, 17, 45, 0
      )
      .unwrap();
    assert_eq!(
      parse_due_input(
        "2025-06-30T17:45"
      ),
      Some(expected)
    );
    assert_eq!(
      parse_due_input(
        "2025-06-30 17:45"
      ),
      Some(expected)
    );
    assert_eq!(
      parse_due_input(
        "2025-06-30T19:45:00+02:00"
      ),
      Some(expected)
    );
  }

  #[test]
  fn rejects_blank_and_garbage() {
    assert_eq!(
      parse_due_input("   "),
      None
    );
    assert_eq!(
      parse_due_input("tomorrow"),
      None
    );
    assert_eq!(
      parse_due_input("2025-13-40"),
      None
    );
  }

  #[test]
  fn input_value_round_trips_minutes() {
    let due = Utc
      .with_ymd_and_hms(
        2025, 2, 3, 4, 5, 0
      )
      .unwrap();
    assert_eq!(
      parse_due_input(
        &due_input_value(&due)
      ),
      Some(due)
    );
  }
}
