use serde::Serialize;

/// Playback state as reported by the embedded player's state-change events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    #[default]
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
    Unknown,
}

impl PlaybackState {
    pub fn from_code(code: i32) -> Self {
        match code {
            -1 => PlaybackState::Unstarted,
            0 => PlaybackState::Ended,
            1 => PlaybackState::Playing,
            2 => PlaybackState::Paused,
            3 => PlaybackState::Buffering,
            5 => PlaybackState::Cued,
            _ => PlaybackState::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlaybackState::Unstarted => "unstarted",
            PlaybackState::Ended => "ended",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Buffering => "buffering",
            PlaybackState::Cued => "cued",
            PlaybackState::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formats seconds as `m:ss`, truncating fractional seconds.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let whole = seconds.trunc() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

pub fn progress_percent(current_time: f64, duration: f64) -> f64 {
    if duration > 0.0 {
        current_time / duration * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_codes() {
        let states: Vec<_> = [-1, 3, 1, 2, 0, 5]
            .into_iter()
            .map(PlaybackState::from_code)
            .collect();
        assert_eq!(
            states,
            vec![
                PlaybackState::Unstarted,
                PlaybackState::Buffering,
                PlaybackState::Playing,
                PlaybackState::Paused,
                PlaybackState::Ended,
                PlaybackState::Cued,
            ]
        );
    }

    #[test]
    fn unrecognized_codes_are_unknown() {
        assert_eq!(PlaybackState::from_code(4), PlaybackState::Unknown);
        assert_eq!(PlaybackState::from_code(-7), PlaybackState::Unknown);
    }

    #[test]
    fn serializes_lowercase() {
        let value = serde_json::to_value(PlaybackState::Buffering).unwrap();
        assert_eq!(value, serde_json::json!("buffering"));
    }

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(75.0), "1:15");
        assert_eq!(format_time(9.0), "0:09");
        assert_eq!(format_time(600.0), "10:00");
    }

    #[test]
    fn format_truncates_fractions() {
        assert_eq!(format_time(59.99), "0:59");
        assert_eq!(format_time(61.5), "1:01");
    }

    #[test]
    fn format_handles_garbage_input() {
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
    }

    #[test]
    fn progress_is_zero_without_duration() {
        assert_eq!(progress_percent(12.0, 0.0), 0.0);
        assert_eq!(progress_percent(30.0, 120.0), 25.0);
        assert_eq!(progress_percent(120.0, 120.0), 100.0);
    }
}
