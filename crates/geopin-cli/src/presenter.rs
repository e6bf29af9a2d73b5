use geopin_core::models::{format_kilometers, DistanceUnit, NearbyResult};
use geopin_core::ports::{DisplayedResult, InputKind, PresentationEvent, Presenter};
use tabled::Tabled;

use crate::output::OutputWriter;

/// Row of the nearby places table
#[derive(Debug, Tabled)]
pub struct NearbyRow {
    #[tabled(rename = "Place Name")]
    pub name: String,
    #[tabled(rename = "Place Type")]
    pub place_type: String,
    #[tabled(rename = "Distance")]
    pub distance: String,
}

pub fn nearby_rows(places: &NearbyResult) -> Vec<NearbyRow> {
    places
        .iter()
        .map(|entry| NearbyRow {
            name: entry.place.name.clone(),
            place_type: entry.place.place_type.clone(),
            distance: format_kilometers(entry.distance_m),
        })
        .collect()
}

pub fn input_prompt(kind: InputKind, unit: DistanceUnit) -> String {
    match kind {
        InputKind::PlaceDetails => {
            "Enter the place details with 'name <text>' and 'type <text>', then 'confirm'"
                .to_string()
        }
        InputKind::Radius => format!(
            "Enter a radius in {} with 'radius <value>', then 'confirm'",
            unit.abbreviation()
        ),
    }
}

/// Prints presentation events to the terminal
pub struct TerminalPresenter {
    out: OutputWriter,
    radius_unit: DistanceUnit,
}

impl TerminalPresenter {
    pub fn new(out: OutputWriter, radius_unit: DistanceUnit) -> Self {
        Self { out, radius_unit }
    }

    fn show_result(&self, result: &DisplayedResult) {
        match result {
            DisplayedResult::Created(place) => {
                self.out.section("Add New Place");
                if let Some(id) = &place.id {
                    self.out.kv("Id", id);
                }
                self.out.kv("Place Name", &place.name);
                self.out.kv("Place Type", &place.place_type);
                self.out.kv("Location", place.location);
            }
            DisplayedResult::Nearby(places) => {
                self.out.section("Nearby Places");
                self.out.table(nearby_rows(places), "No nearby place available");
            }
            DisplayedResult::Nearest(nearest) => {
                self.out.section("Nearest Place");
                self.out.kv("Place Name", &nearest.place.name);
                self.out.kv("Place Type", &nearest.place.place_type);
                self.out.kv("Distance", format_kilometers(nearest.distance_m));
            }
            DisplayedResult::Distance(meters) => {
                self.out.section("Distance");
                self.out.success(format!(
                    "Total distance between the 2 points is {}",
                    format_kilometers(*meters)
                ));
            }
        }
    }
}

impl Presenter for TerminalPresenter {
    fn present(&mut self, event: PresentationEvent) {
        if self.out.is_json() {
            self.out.data(&event);
            return;
        }
        match &event {
            PresentationEvent::ResultReady { result } => self.show_result(result),
            PresentationEvent::InputRequired { input } => {
                self.out.info(input_prompt(*input, self.radius_unit))
            }
            PresentationEvent::Notification { message } => self.out.info(message),
            PresentationEvent::Error { message } => self.out.error(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geopin_core::models::{GeoPoint, NearbyPlace, Place};

    #[test]
    fn test_nearby_rows_keep_order() {
        let at = GeoPoint::new(20.3, 85.8).unwrap();
        let places = vec![
            NearbyPlace {
                place: Place { id: None, name: "B".into(), place_type: "shop".into(), location: at },
                distance_m: 2500.0,
            },
            NearbyPlace {
                place: Place { id: None, name: "A".into(), place_type: "food".into(), location: at },
                distance_m: 1200.0,
            },
        ];

        let rows = nearby_rows(&places);
        assert_eq!(rows[0].name, "B");
        assert_eq!(rows[0].distance, "2.50 km");
        assert_eq!(rows[1].distance, "1.20 km");
    }

    #[test]
    fn test_radius_prompt_names_unit() {
        assert!(input_prompt(InputKind::Radius, DistanceUnit::Miles).contains("mi"));
        assert!(input_prompt(InputKind::PlaceDetails, DistanceUnit::Kilometers).contains("name"));
    }
}
