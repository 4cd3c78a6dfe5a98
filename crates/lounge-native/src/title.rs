//! Window-title readouts.

use lounge_core::ui::format_uptime;
use lounge_core::{UiField, UiUpdate, Variant};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct TitleReadouts {
    values: Vec<(UiField, String)>,
    uptime: String,
}

impl TitleReadouts {
    pub fn get(&self, field: UiField) -> &str {
        self.values
            .iter()
            .find(|(f, _)| *f == field)
            .map_or("", |(_, v)| v.as_str())
    }

    /// Store and drain `updates`. Returns true on a clock tick.
    pub fn apply(&mut self, updates: &mut Vec<UiUpdate>, uptime: Duration) -> bool {
        let mut ticked = false;
        for update in updates.drain(..) {
            match update {
                UiUpdate::Text { field, text } => {
                    match self.values.iter_mut().find(|(f, _)| *f == field) {
                        Some((_, value)) => *value = text,
                        None => self.values.push((field, text)),
                    }
                }
                UiUpdate::ClockTick => {
                    self.uptime = format_uptime(uptime);
                    ticked = true;
                }
            }
        }
        ticked
    }

    pub fn title(&self, variant: Variant, query: &str) -> String {
        match variant {
            Variant::Librarian => {
                let mut title = format!(
                    "lounge · librarian · {} · {} + {} = {} · {}",
                    self.get(UiField::SystemState),
                    self.get(UiField::NodeA),
                    self.get(UiField::NodeB),
                    self.get(UiField::NodeResult),
                    self.uptime
                );
                if !query.is_empty() {
                    title.push_str(&format!(" · > {query}_"));
                }
                title
            }
            _ => format!(
                "lounge · {variant} · {} · amp {} · freq {} · {}",
                self.get(UiField::SystemState),
                self.get(UiField::Amplitude),
                self.get(UiField::Frequency),
                self.uptime
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_text_wins_and_clock_sets_uptime() {
        let mut readouts = TitleReadouts::default();
        let mut updates = vec![
            UiUpdate::text(UiField::Amplitude, "1.0"),
            UiUpdate::text(UiField::Amplitude, "2.5"),
            UiUpdate::text(UiField::Frequency, "5"),
            UiUpdate::text(UiField::SystemState, "DEMO // SYNTHETIC SIGNAL"),
        ];
        assert!(!readouts.apply(&mut updates, Duration::ZERO));
        assert!(updates.is_empty());
        assert_eq!(readouts.get(UiField::Amplitude), "2.5");

        let mut tick = vec![UiUpdate::ClockTick];
        assert!(readouts.apply(&mut tick, Duration::from_secs(61)));
        assert_eq!(
            readouts.title(Variant::Pulse, ""),
            "lounge · pulse · DEMO // SYNTHETIC SIGNAL · amp 2.5 · freq 5 · 00:01:01"
        );
    }

    #[test]
    fn librarian_title_shows_pending_query() {
        let mut readouts = TitleReadouts::default();
        let mut updates = vec![
            UiUpdate::text(UiField::NodeA, "A"),
            UiUpdate::text(UiField::NodeB, "B"),
            UiUpdate::text(UiField::NodeResult, "C"),
        ];
        readouts.apply(&mut updates, Duration::ZERO);
        let title = readouts.title(Variant::Librarian, "bees");
        assert!(title.contains("A + B = C"));
        assert!(title.ends_with("> bees_"));
    }
}
