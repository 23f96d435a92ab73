use chrono::{Local, Offset};
use tracing::warn;

/// Host timezone lookup. Injected into the default-window reconciliation so
/// both the detected name and the offset are controllable in tests.
pub trait HostTimezone: Send + Sync {
    /// IANA zone name of the host machine, e.g. "America/Sao_Paulo".
    fn zone_name(&self) -> String;
    /// Current UTC offset of the host machine, in minutes.
    fn utc_offset_minutes(&self) -> i32;
}

/// Reads the timezone the process is actually running under.
pub struct SystemTimezone;

impl HostTimezone for SystemTimezone {
    fn zone_name(&self) -> String {
        iana_time_zone::get_timezone().unwrap_or_else(|e| {
            warn!("Could not detect host timezone, falling back to UTC: {}", e);
            "UTC".to_string()
        })
    }

    fn utc_offset_minutes(&self) -> i32 {
        Local::now().offset().fix().local_minus_utc() / 60
    }
}

/// Offset in hours as a decimal string: whole-hour zones render with no
/// decimal point ("-5"), fractional zones keep it ("5.5", "5.75").
pub fn offset_hours_string(offset_minutes: i32) -> String {
    if offset_minutes % 60 == 0 {
        (offset_minutes / 60).to_string()
    } else {
        (f64::from(offset_minutes) / 60.0).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_hour_offsets_have_no_decimal_point() {
        assert_eq!(offset_hours_string(0), "0");
        assert_eq!(offset_hours_string(-300), "-5");
        assert_eq!(offset_hours_string(120), "2");
        assert_eq!(offset_hours_string(840), "14");
    }

    #[test]
    fn fractional_offsets_keep_the_fraction() {
        assert_eq!(offset_hours_string(330), "5.5");
        assert_eq!(offset_hours_string(345), "5.75");
        assert_eq!(offset_hours_string(-570), "-9.5");
    }
}
