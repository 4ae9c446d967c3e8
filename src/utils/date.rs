use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse an instant.
///
/// Accepted forms:
/// - RFC 3339 (`2025-10-06T09:00:00+02:00`, `2025-10-06T07:00:00.000Z`)
/// - local date-time (`2025-10-06T09:00`, `2025-10-06 09:00`, with optional seconds)
/// - local date only (`2025-10-06`, read as midnight)
pub fn parse_instant(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    const LOCAL_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
    ];

    for fmt in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return local_from_naive(naive);
        }
    }

    parse_date(s)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(local_from_naive)
}

/// Resolve a wall-clock time in the local zone. On a DST overlap the earlier
/// instant wins; a time inside a DST gap moves forward past the gap, as a
/// browser does for `datetime-local` values.
pub fn local_from_naive(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&naive).earliest().or_else(|| {
        (1..=4)
            .map(|step| naive + Duration::minutes(30 * step))
            .find_map(|shifted| Local.from_local_datetime(&shifted).earliest())
    })
}

/// Serde adapter for `DateTime<Local>` fields: written as RFC 3339,
/// read with [`parse_instant`].
pub mod instant {
    use chrono::{DateTime, Local};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(value: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_instant(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid instant '{}'", raw)))
    }
}
