/// (De)serializes a `std::time::Duration` as `hh:mm:ss` with an optional
/// millisecond fraction, e.g. `00:00:01` or `00:00:00.100`.
pub mod duration {
    use std::time::Duration as StdDuration;

    use chrono::Duration;
    use serde::de::Error as DeError;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(duration: &StdDuration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;
        let millis = duration.subsec_millis();

        if millis == 0 {
            format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
        }
    }

    pub fn parse(s: &str) -> Result<StdDuration, String> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 {
            return Err(format!("expected format hh:mm:ss[.mmm], got '{}'", s));
        }

        let (seconds, millis) = match parts[2].split_once('.') {
            Some((seconds, millis)) => (seconds, Some(millis)),
            None => (parts[2], None),
        };

        let hours: i64 = parts[0].parse().map_err(|why| format!("{}", why))?;
        let minutes: i64 = parts[1].parse().map_err(|why| format!("{}", why))?;
        let seconds: i64 = seconds.parse().map_err(|why| format!("{}", why))?;
        let millis: i64 = match millis {
            // right pad, so ".1" means 100ms
            Some(millis) if millis.len() <= 3 => format!("{:0<3}", millis)
                .parse()
                .map_err(|why| format!("{}", why))?,
            Some(millis) => return Err(format!("too many fraction digits: '{}'", millis)),
            None => 0,
        };

        let out_of_range = || format!("duration out of range: '{}'", s);
        let total = Duration::try_hours(hours)
            .zip(Duration::try_minutes(minutes))
            .and_then(|(hours, minutes)| hours.checked_add(&minutes))
            .and_then(|total| total.checked_add(&Duration::try_seconds(seconds)?))
            .and_then(|total| total.checked_add(&Duration::try_milliseconds(millis)?))
            .ok_or_else(out_of_range)?;
        total.to_std().map_err(|why| format!("{}", why))
    }

    pub fn serialize<S>(duration: &StdDuration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(duration))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<StdDuration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(D::Error::custom)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn parses_whole_seconds() {
            assert_eq!(parse("00:00:01"), Ok(StdDuration::from_secs(1)));
            assert_eq!(parse("01:02:03"), Ok(StdDuration::from_secs(3723)));
        }

        #[test]
        fn parses_fraction() {
            assert_eq!(parse("00:00:00.100"), Ok(StdDuration::from_millis(100)));
            assert_eq!(parse("00:00:00.5"), Ok(StdDuration::from_millis(500)));
        }

        #[test]
        fn rejects_garbage() {
            assert!(parse("100").is_err());
            assert!(parse("00:00:xx").is_err());
            assert!(parse("-1:00:00").is_err());
            assert!(parse("9999999999999999:00:00").is_err());
            assert!(parse("00:9223372036854775807:00").is_err());
        }

        #[test]
        fn formats_roundtrip_values() {
            assert_eq!(format(&StdDuration::from_secs(1)), "00:00:01");
            assert_eq!(format(&StdDuration::from_millis(100)), "00:00:00.100");
        }
    }
}
