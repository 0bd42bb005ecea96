use chrono::{DateTime, Utc};

/// One fire-alert entry from the upstream feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incident {
    pub id: String,
    pub alert_type: String,
    pub location: String,
    pub reported_at: String,
}

impl Incident {
    /// Builds an incident keyed on its report time and location.
    pub fn new(
        alert_type: impl Into<String>,
        location: impl Into<String>,
        reported_at: impl Into<String>,
    ) -> Self {
        let location = location.into();
        let reported_at = reported_at.into();
        Self {
            id: incident_id(&reported_at, &location),
            alert_type: alert_type.into(),
            location,
            reported_at,
        }
    }
}

pub fn incident_id(reported_at: &str, location: &str) -> String {
    format!("{reported_at} @ {location}")
}

/// Classification of the feed's free-text alert type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertType {
    /// Numbered alarm level: "1ST ALARM", "FIRE - ALERT 2", ...
    Alarm(u8),
    PositiveAlarm,
    GasStoveFire,
    ElectricalFire,
    VehicularFire,
    RubbishFire,
    CeilingFire,
    KitchenFire,
    VisibleSmoke,
    PostFire,
    ForVerification,
    FireUnderControl,
    FireOut,
    FalseAlarm,
    NegativeAlarm,
    Other(String),
}

impl AlertType {
    pub fn parse(raw: &str) -> Self {
        let text = raw.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();

        if let Some(level) = alarm_level(&text) {
            return AlertType::Alarm(level);
        }

        match text.as_str() {
            // The feed spells it both ways.
            "POSITIVE ALARM" | "POSSITIVE ALARM" => AlertType::PositiveAlarm,
            "GAS STOVE FIRE" => AlertType::GasStoveFire,
            "ELECTRICAL FIRE" => AlertType::ElectricalFire,
            "VEHICULAR FIRE" => AlertType::VehicularFire,
            "RUBBISH FIRE" => AlertType::RubbishFire,
            "CEILING FIRE" => AlertType::CeilingFire,
            "KITCHEN FIRE" => AlertType::KitchenFire,
            "VISIBLE SMOKE" => AlertType::VisibleSmoke,
            "POST FIRE" => AlertType::PostFire,
            "FOR VERIFICATION" => AlertType::ForVerification,
            "FIRE UNDER CONTROL" => AlertType::FireUnderControl,
            "FIRE OUT" => AlertType::FireOut,
            "FALSE ALARM" => AlertType::FalseAlarm,
            "NEGATIVE ALARM" => AlertType::NegativeAlarm,
            _ => AlertType::Other(text),
        }
    }

    pub fn is_dangerous(&self) -> bool {
        !matches!(
            self,
            AlertType::FireUnderControl
                | AlertType::FireOut
                | AlertType::FalseAlarm
                | AlertType::NegativeAlarm
                | AlertType::Other(_)
        )
    }
}

/// "1ST ALARM", "2ND ALARM", "FIRE - ALERT 3", "ALERT 4"
fn alarm_level(text: &str) -> Option<u8> {
    if let Some(ordinal) = text.strip_suffix(" ALARM") {
        let digits = ordinal
            .strip_suffix("ST")
            .or_else(|| ordinal.strip_suffix("ND"))
            .or_else(|| ordinal.strip_suffix("RD"))
            .or_else(|| ordinal.strip_suffix("TH"))?;
        return positive_level(digits);
    }

    let number = text
        .strip_prefix("FIRE - ALERT ")
        .or_else(|| text.strip_prefix("ALERT "))?;
    positive_level(number)
}

fn positive_level(digits: &str) -> Option<u8> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|level| *level > 0)
}

#[derive(Debug, Clone)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AlertType, Incident};

    #[test]
    fn incident_id_combines_time_and_location() {
        let incident = Incident::new("1ST ALARM", "BRGY. HOLY SPIRIT, QUEZON CITY", "10/16/2026 08:15 AM");
        assert_eq!(incident.id, "10/16/2026 08:15 AM @ BRGY. HOLY SPIRIT, QUEZON CITY");
    }

    #[test]
    fn parses_numbered_alarms() {
        assert_eq!(AlertType::parse("1ST ALARM"), AlertType::Alarm(1));
        assert_eq!(AlertType::parse("2nd alarm"), AlertType::Alarm(2));
        assert_eq!(AlertType::parse(" 3RD  ALARM "), AlertType::Alarm(3));
        assert_eq!(AlertType::parse("4TH ALARM"), AlertType::Alarm(4));
        assert_eq!(AlertType::parse("Fire - Alert 1"), AlertType::Alarm(1));
        assert_eq!(AlertType::parse("ALERT 5"), AlertType::Alarm(5));
    }

    #[test]
    fn rejects_malformed_alarm_levels() {
        assert!(matches!(AlertType::parse("0TH ALARM"), AlertType::Other(_)));
        assert!(matches!(AlertType::parse("ST ALARM"), AlertType::Other(_)));
        assert!(matches!(AlertType::parse("FIRE - ALERT X"), AlertType::Other(_)));
    }

    #[test]
    fn accepts_both_positive_spellings() {
        assert_eq!(AlertType::parse("POSITIVE ALARM"), AlertType::PositiveAlarm);
        assert_eq!(AlertType::parse("POSSITIVE ALARM"), AlertType::PositiveAlarm);
    }

    #[test]
    fn dangerous_set_matches_feed_statuses() {
        let dangerous = [
            "1ST ALARM",
            "2ND ALARM",
            "3RD ALARM",
            "4TH ALARM",
            "POSITIVE ALARM",
            "GAS STOVE FIRE",
            "ELECTRICAL FIRE",
            "VEHICULAR FIRE",
            "RUBBISH FIRE",
            "CEILING FIRE",
            "KITCHEN FIRE",
            "VISIBLE SMOKE",
            "POST FIRE",
            "FOR VERIFICATION",
        ];
        for raw in dangerous {
            assert!(AlertType::parse(raw).is_dangerous(), "{raw} should be dangerous");
        }

        let calm = ["FIRE UNDER CONTROL", "FIRE OUT", "FALSE ALARM", "NEGATIVE ALARM", "DRILL", ""];
        for raw in calm {
            assert!(!AlertType::parse(raw).is_dangerous(), "{raw} should not be dangerous");
        }
    }
}
