use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::{
    constants::{KEY_EXPIRATION, KEY_SESSION_TOKEN},
    expiry::parse_expiration,
    store::IniStore,
};

/// How long a listed profile remains usable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Long-lived keys, or a session without a recorded expiration
    Permanent,
    Remaining(Duration),
    Expired,
}

/// One line of `list` / `sessions` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEntry {
    pub name: String,
    pub state: SessionState,
}

impl fmt::Display for SessionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state {
            SessionState::Permanent => write!(f, "{}", self.name),
            SessionState::Remaining(left) => write!(f, "{} ({})", self.name, natural_delta(left)),
            SessionState::Expired => write!(f, "{} (expired)", self.name),
        }
    }
}

/// Every credentials section, sorted by name.
///
/// With `sessions_only`, sections without a session token are left out.
pub fn entries(
    credentials: &IniStore,
    now: DateTime<Utc>,
    sessions_only: bool,
) -> Vec<SessionEntry> {
    let mut names = credentials.sections();
    names.sort_unstable();

    names
        .into_iter()
        .filter_map(|name| {
            let has_token = credentials.has_key(name, KEY_SESSION_TOKEN);
            if sessions_only && !has_token {
                return None;
            }

            let state = if has_token {
                session_state(credentials.get(name, KEY_EXPIRATION), now)
            } else {
                SessionState::Permanent
            };

            Some(SessionEntry {
                name: name.to_string(),
                state,
            })
        })
        .collect()
}

fn session_state(expiration: Option<&str>, now: DateTime<Utc>) -> SessionState {
    let Some(raw) = expiration else {
        return SessionState::Permanent;
    };

    match parse_expiration(raw) {
        Some(expiration) if expiration > now => SessionState::Remaining(expiration - now),
        _ => SessionState::Expired,
    }
}

/// Rough English rendering of a duration: "59 minutes", "an hour", "2 days"
pub fn natural_delta(delta: Duration) -> String {
    let days = delta.num_days();
    let seconds = delta.num_seconds() - days * 86_400;

    match days {
        0 => match seconds {
            0 => "a moment".to_string(),
            1 => "a second".to_string(),
            2..=59 => format!("{seconds} seconds"),
            60..=119 => "a minute".to_string(),
            120..=3_599 => format!("{} minutes", seconds / 60),
            3_600..=7_199 => "an hour".to_string(),
            _ => format!("{} hours", seconds / 3_600),
        },
        1 => "a day".to_string(),
        _ => format!("{days} days"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry::format_expiration;
    use std::fs;
    use tempfile::TempDir;

    fn fixture(now: DateTime<Utc>) -> (TempDir, IniStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials");
        fs::write(
            &path,
            format!(
                "[valid_temp]
aws_access_key_id=AKID
aws_secret_access_key=SECRET
aws_session_token=TOKEN
aws_expiration={}

[default]
aws_access_key_id=AKID
aws_secret_access_key=SECRET

[role2]

[role1]

[expired_temp]
aws_access_key_id=AKID
aws_secret_access_key=SECRET
aws_session_token=TOKEN
aws_expiration=2021-07-29T16:18:13+00:00
",
                format_expiration(&(now + Duration::hours(1)))
            ),
        )
        .unwrap();
        let store = IniStore::load(&path).unwrap();
        (dir, store)
    }

    fn render(entries: &[SessionEntry]) -> Vec<String> {
        entries.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_entries_list_all() {
        let now = Utc::now();
        let (_dir, credentials) = fixture(now);
        let later = now + Duration::milliseconds(5);

        assert_eq!(
            render(&entries(&credentials, later, false)),
            vec![
                "default",
                "expired_temp (expired)",
                "role1",
                "role2",
                "valid_temp (59 minutes)",
            ]
        );
    }

    #[test]
    fn test_entries_sessions_only() {
        let now = Utc::now();
        let (_dir, credentials) = fixture(now);
        let later = now + Duration::milliseconds(5);

        assert_eq!(
            render(&entries(&credentials, later, true)),
            vec!["expired_temp (expired)", "valid_temp (59 minutes)"]
        );
    }

    #[test]
    fn test_session_state() {
        let now = Utc::now();
        assert_eq!(session_state(None, now), SessionState::Permanent);
        assert_eq!(session_state(Some("garbage"), now), SessionState::Expired);
        assert_eq!(
            session_state(Some(&format_expiration(&now)), now),
            SessionState::Expired
        );
        assert_eq!(
            session_state(Some(&format_expiration(&(now + Duration::minutes(5)))), now),
            SessionState::Remaining(Duration::minutes(5))
        );
    }

    #[test]
    fn test_natural_delta() {
        let cases = [
            (Duration::zero(), "a moment"),
            (Duration::milliseconds(999), "a moment"),
            (Duration::seconds(1), "a second"),
            (Duration::seconds(45), "45 seconds"),
            (Duration::seconds(90), "a minute"),
            (Duration::seconds(3_599), "59 minutes"),
            (Duration::hours(1), "an hour"),
            (Duration::minutes(119), "an hour"),
            (Duration::hours(11) + Duration::minutes(59), "11 hours"),
            (Duration::hours(30), "a day"),
            (Duration::days(3), "3 days"),
        ];

        for (delta, expected) in cases {
            assert_eq!(natural_delta(delta), expected, "{delta:?}");
        }
    }
}
