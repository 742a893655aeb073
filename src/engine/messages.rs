use crate::config;
use crate::models::FacilitySearch;

/// Message template builder for the assistant's canned replies.
pub struct MessageTemplates;

impl MessageTemplates {
    /// Opening message of every session.
    pub fn greeting() -> String {
        "Hi! Describe your symptoms and I'll share general guidance from my \
         knowledge base. This is general information, not medical advice."
            .to_string()
    }

    /// Fixed safety message for medication emergencies.
    pub fn emergency() -> String {
        "If you are feeling unwell or experiencing severe symptoms like chest pain, \
         difficulty breathing, or confusion, please call emergency services \
         immediately or go to the nearest hospital."
            .to_string()
    }

    /// Prompt for a city/area after a severe condition was mentioned.
    pub fn ask_location() -> String {
        "You mentioned a severe condition. Please name your city and area so I can \
         help you find nearby hospitals."
            .to_string()
    }

    /// Single human-readable failure for geocoding/directory errors.
    pub fn location_failure() -> String {
        "Sorry, there was an error finding your location or fetching hospital data. \
         Please try again with a more specific city or area name!"
            .to_string()
    }

    /// Generic failure when the analysis itself cannot complete.
    pub fn analysis_failed() -> String {
        "Failed to analyze symptoms. Please try again.".to_string()
    }

    /// Intro line on messages carrying an analysis result.
    pub fn analysis_intro() -> String {
        "Here's what I found based on your symptoms:".to_string()
    }

    /// Render a facility search as a chat message. Advisory-only when
    /// the list is empty; otherwise header, optional advisory, and one
    /// block per facility.
    pub fn facilities(search: &FacilitySearch) -> String {
        if search.facilities.is_empty() {
            return search
                .advisory
                .clone()
                .unwrap_or_else(|| "No facilities to show.".to_string());
        }

        let mut out = format!(
            "Showing hospitals within {:.0} km of: {}",
            config::FACILITY_RADIUS_KM,
            search.anchor.display_name
        );
        if let Some(advisory) = &search.advisory {
            out.push('\n');
            out.push_str(advisory);
        }
        for facility in &search.facilities {
            let (name, short_address) = facility.name_and_short_address();
            out.push_str(&format!("\n\n• {name}"));
            if !short_address.is_empty() {
                out.push_str(&format!("\n{short_address}"));
            }
            out.push_str(&format!(
                "\nDistance: {:.2} km\n{}",
                facility.distance_km,
                facility.maps_url()
            ));
        }
        out
    }
}
