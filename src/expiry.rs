use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use tracing::warn;

use crate::{constants::KEY_EXPIRATION, store::IniStore};

/// Whether the credentials stored under `alias` must be (re)assumed.
///
/// A missing alias counts as expired. A record without an expiration never
/// expires. Otherwise it is expired from the instant of its expiration on.
pub fn is_expired(credentials: &IniStore, alias: &str, now: DateTime<Utc>) -> bool {
    let Some(section) = credentials.section(alias) else {
        return true;
    };

    let Some(raw) = section.get(KEY_EXPIRATION) else {
        return false;
    };

    match parse_expiration(raw) {
        Some(expiration) => now >= expiration,
        None => {
            warn!("Unreadable {} '{}' in profile {}", KEY_EXPIRATION, raw, alias);
            true
        }
    }
}

/// Parse a stored expiration into UTC.
///
/// Offsets are honoured; a timestamp without one is taken as UTC.
pub fn parse_expiration(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(parsed) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Text form written to the credentials file, e.g. `2021-07-29T16:18:13+00:00`
pub fn format_expiration(expiration: &DateTime<Utc>) -> String {
    expiration.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::fs;
    use tempfile::TempDir;

    fn store(contents: &str) -> (TempDir, IniStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials");
        fs::write(&path, contents).unwrap();
        let store = IniStore::load(&path).unwrap();
        (dir, store)
    }

    fn fixture(now: DateTime<Utc>) -> (TempDir, IniStore) {
        store(&format!(
            "[default]
aws_access_key_id=AKID
aws_secret_access_key=SECRET

[role1]

[valid_temp]
aws_access_key_id=AKID
aws_secret_access_key=SECRET
aws_session_token=TOKEN
aws_expiration={}

[expired_temp]
aws_access_key_id=AKID
aws_secret_access_key=SECRET
aws_session_token=TOKEN
aws_expiration=2021-07-29T16:18:13+00:00
",
            format_expiration(&(now + Duration::hours(1)))
        ))
    }

    #[test]
    fn test_is_expired_outcomes() {
        let now = Utc::now();
        let (_dir, credentials) = fixture(now);

        assert!(!is_expired(&credentials, "default", now), "default cannot expire");
        assert!(!is_expired(&credentials, "role1", now), "role1 cannot expire");
        assert!(!is_expired(&credentials, "valid_temp", now));
        assert!(is_expired(&credentials, "expired_temp", now));
        assert!(is_expired(&credentials, "unknown", now));
    }

    #[test]
    fn test_is_expired_boundary_is_inclusive() {
        let expiration = Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap();
        let (_dir, credentials) = store(&format!(
            "[edge]\naws_expiration={}\n",
            format_expiration(&expiration)
        ));

        assert!(!is_expired(
            &credentials,
            "edge",
            expiration - Duration::seconds(1)
        ));
        assert!(is_expired(&credentials, "edge", expiration));
        assert!(is_expired(
            &credentials,
            "edge",
            expiration + Duration::seconds(1)
        ));
    }

    #[test]
    fn test_unparsable_expiration_counts_as_expired() {
        let (_dir, credentials) = store("[broken]\naws_expiration=tomorrow\n");
        assert!(is_expired(&credentials, "broken", Utc::now()));
    }

    #[test]
    fn test_parse_expiration_formats() {
        let expected = Utc.with_ymd_and_hms(2021, 7, 29, 16, 18, 13).unwrap();

        assert_eq!(
            parse_expiration("2021-07-29T16:18:13+00:00"),
            Some(expected)
        );
        assert_eq!(parse_expiration("2021-07-29T16:18:13Z"), Some(expected));
        assert_eq!(
            parse_expiration("2021-07-29T18:18:13+02:00"),
            Some(expected)
        );
        assert_eq!(
            parse_expiration("2021-07-29 16:18:13+00:00"),
            Some(expected)
        );
        assert_eq!(parse_expiration("2021-07-29T16:18:13"), Some(expected));
        assert_eq!(parse_expiration("not a date"), None);
    }

    #[test]
    fn test_format_expiration_round_trips() {
        let expiration = Utc.with_ymd_and_hms(2021, 7, 29, 16, 18, 13).unwrap();
        let text = format_expiration(&expiration);
        assert_eq!(text, "2021-07-29T16:18:13+00:00");
        assert_eq!(parse_expiration(&text), Some(expiration));

        let precise = expiration + Duration::microseconds(123_456);
        assert_eq!(parse_expiration(&format_expiration(&precise)), Some(precise));
    }
}
