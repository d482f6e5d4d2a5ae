//! The chart grid: which panels exist, in what order, and when they show.

use crate::data::{Caption, DatasetStore};

use super::chart::{bar_chart, proportion_chart, BarBinding, ChartSpec, ProportionBinding};
use super::toggle::ToggleState;


/// Identifies one chart panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Appointments,
    Prescriptions,
    NursesOnCall,
    Atomicity,
    PatientsPerDepartment,
    AppointmentsByPhysician,
    TopPatientsByMeds,
    RoomAvailability,
}


/// When a panel is part of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Always,
    WhenToggleVisible,
}


impl Visibility {
    pub fn is_visible(self, toggle: ToggleState) -> bool {
        match self {
            Visibility::Always => true,
            Visibility::WhenToggleVisible => toggle.is_visible(),
        }
    }
}


/// Grid order, with each panel's visibility predicate.
pub const PANELS: [(PanelId, Visibility); 8] = [
    (PanelId::Appointments, Visibility::Always),
    (PanelId::Prescriptions, Visibility::Always),
    (PanelId::NursesOnCall, Visibility::Always),
    (PanelId::Atomicity, Visibility::WhenToggleVisible),
    (PanelId::PatientsPerDepartment, Visibility::Always),
    (PanelId::AppointmentsByPhysician, Visibility::Always),
    (PanelId::TopPatientsByMeds, Visibility::Always),
    (PanelId::RoomAvailability, Visibility::Always),
];


/// Panels to draw for the given toggle state, in grid order.
pub fn visible_panels(toggle: ToggleState) -> impl Iterator<Item = PanelId> {
    PANELS
        .into_iter()
        .filter(move |(_, visibility)| visibility.is_visible(toggle))
        .map(|(id, _)| id)
}


impl PanelId {
    /// Stable identifier used for anchors and file output.
    pub fn slug(self) -> &'static str {
        match self {
            PanelId::Appointments => "appointments",
            PanelId::Prescriptions => "prescriptions",
            PanelId::NursesOnCall => "nurses-on-call",
            PanelId::Atomicity => "atomicity",
            PanelId::PatientsPerDepartment => "patients-per-department",
            PanelId::AppointmentsByPhysician => "appointments-by-physician",
            PanelId::TopPatientsByMeds => "top-patients-by-meds",
            PanelId::RoomAvailability => "room-availability",
        }
    }

    pub fn caption(self) -> Caption {
        match self {
            PanelId::Appointments => Caption::new(
                "Monthly appointment volumes",
                "—peaks indicate high-demand months for clinic resources.",
            ),
            PanelId::Prescriptions => Caption::new(
                "Prescribed quantities",
                " per drug—use this to spot high-usage medications.",
            ),
            PanelId::NursesOnCall => Caption::new(
                "Nurse allocation",
                " by block—helps balance staffing across floors.",
            ),
            PanelId::Atomicity => Caption::new(
                "Transaction atomicity",
                "—trigger logs undone on rollback, so both tables end empty.",
            ),
            PanelId::PatientsPerDepartment => Caption::new(
                "Patient distribution",
                " across departments—identify capacity imbalances.",
            ),
            PanelId::AppointmentsByPhysician => Caption::new(
                "Appointment load",
                " by physician—spot overbooked providers.",
            ),
            PanelId::TopPatientsByMeds => Caption::new(
                "Top 5 patients",
                " by distinct medication counts—monitor high-utilization cases.",
            ),
            PanelId::RoomAvailability => Caption::new(
                "Room availability",
                "—ratio of free vs. occupied rooms.",
            ),
        }
    }

    /// Bind this panel's dataset to its chart primitive.
    pub fn chart(self, store: &DatasetStore) -> ChartSpec {
        match self {
            PanelId::Appointments => bar_chart(
                &store.appointments_per_month,
                BarBinding::vertical("Appointments", "#4A90E2", 32),
            ),
            PanelId::Prescriptions => bar_chart(
                &store.prescriptions_by_drug,
                BarBinding::horizontal("Prescriptions", "#82ca9d", 24),
            ),
            PanelId::NursesOnCall => bar_chart(
                &store.on_call_by_block,
                BarBinding::vertical("On-Call Nurses", "#ffc658", 32),
            ),
            PanelId::Atomicity => bar_chart(
                &store.trigger_data,
                BarBinding::vertical("Count", "#E94E77", 32),
            ),
            PanelId::PatientsPerDepartment => bar_chart(
                &store.patients_per_department,
                BarBinding::vertical("Patients", "#8884d8", 20),
            ),
            PanelId::AppointmentsByPhysician => bar_chart(
                &store.appointments_by_physician,
                BarBinding::horizontal("Appointments", "#a4de6c", 20),
            ),
            PanelId::TopPatientsByMeds => bar_chart(
                &store.meds_per_patient_top5,
                BarBinding::vertical("Medications", "#d0ed57", 20),
            ),
            PanelId::RoomAvailability => {
                proportion_chart(&store.room_availability, ProportionBinding::default())
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::chart::ChartKind;
    use crate::data::STORE;

    #[test]
    fn test_all_panels_visible_by_default() {
        let panels: Vec<PanelId> = visible_panels(ToggleState::Visible).collect();
        assert_eq!(panels.len(), 8);
        assert_eq!(panels[3], PanelId::Atomicity);
    }

    #[test]
    fn test_hidden_drops_only_atomicity() {
        let panels: Vec<PanelId> = visible_panels(ToggleState::Hidden).collect();
        assert_eq!(panels.len(), 7);
        assert!(!panels.contains(&PanelId::Atomicity));
        assert_eq!(panels[3], PanelId::PatientsPerDepartment);
    }

    #[test]
    fn test_chart_kinds() {
        let kinds: Vec<ChartKind> = PANELS.iter().map(|(id, _)| id.chart(&STORE).kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ChartKind::Bar,
                ChartKind::HorizontalBar,
                ChartKind::Bar,
                ChartKind::Bar,
                ChartKind::Bar,
                ChartKind::HorizontalBar,
                ChartKind::Bar,
                ChartKind::Proportion,
            ]
        );
    }

    #[test]
    fn test_slugs_are_unique() {
        let mut slugs: Vec<&str> = PANELS.iter().map(|(id, _)| id.slug()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), PANELS.len());
    }
}
