use crate::domain::{Alert, AlertType, Incident};
use crate::utils::capitalize_words;

/// Dangerous alert type, and if a keyword is set, a case-insensitive match on
/// the location text.
pub fn is_notifiable(incident: &Incident, keyword: &str) -> bool {
    if !AlertType::parse(&incident.alert_type).is_dangerous() {
        return false;
    }

    let keyword = keyword.trim();
    if keyword.is_empty() {
        return true;
    }

    incident
        .location
        .to_lowercase()
        .contains(&keyword.to_lowercase())
}

#[derive(Debug, Clone, Default)]
pub struct IncidentFilter {
    keyword: String,
}

impl IncidentFilter {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn is_notifiable(&self, incident: &Incident) -> bool {
        is_notifiable(incident, &self.keyword)
    }

    pub fn should_alert(&self, incident: &Incident) -> Option<Alert> {
        if self.is_notifiable(incident) {
            Some(format_alert(incident))
        } else {
            None
        }
    }
}

pub fn format_alert(incident: &Incident) -> Alert {
    let alert_type = capitalize_words(&incident.alert_type);
    let location = capitalize_words(&incident.location);
    Alert::new(
        alert_type.clone(),
        format!("{alert_type}\n{location}\n{}", incident.reported_at),
    )
}
