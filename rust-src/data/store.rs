//! The literal datasets behind every chart.
//!
//! Defined once, never mutated. Field names mirror the keys the datasets
//! are published under.

use serde::Serialize;

use crate::models::{CategoryCount, Dataset, ProportionSlice, RowCount, TimeSeriesPoint};


/// Every dataset the dashboard draws from.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStore {
    pub appointments_per_month: Dataset<TimeSeriesPoint>,
    pub prescriptions_by_drug: Dataset<CategoryCount>,
    pub on_call_by_block: Dataset<CategoryCount>,
    pub trigger_data: Dataset<CategoryCount>,
    pub patients_per_department: Dataset<CategoryCount>,
    pub appointments_by_physician: Dataset<CategoryCount>,
    pub meds_per_patient_top5: Dataset<CategoryCount>,
    pub room_availability: Dataset<ProportionSlice>,
    pub row_counts: Dataset<RowCount>,
}


const fn count(label: &'static str, quantity: u64) -> CategoryCount {
    CategoryCount { label, quantity }
}


static APPOINTMENTS_PER_MONTH: [TimeSeriesPoint; 6] = [
    TimeSeriesPoint { month: "Jan", appointments: 320 },
    TimeSeriesPoint { month: "Feb", appointments: 280 },
    TimeSeriesPoint { month: "Mar", appointments: 350 },
    TimeSeriesPoint { month: "Apr", appointments: 410 },
    TimeSeriesPoint { month: "May", appointments: 390 },
    TimeSeriesPoint { month: "Jun", appointments: 450 },
];

static PRESCRIPTIONS_BY_DRUG: [CategoryCount; 4] = [
    count("Drug A", 120),
    count("Drug B", 95),
    count("Drug C", 160),
    count("Drug D", 70),
];

static ON_CALL_BY_BLOCK: [CategoryCount; 4] = [
    count("1", 14),
    count("2", 11),
    count("3", 17),
    count("4", 9),
];

static TRIGGER_DATA: [CategoryCount; 2] = [
    count("Attempted Inserts", 1),
    count("Log Entries After Rollback", 0),
];

static PATIENTS_PER_DEPARTMENT: [CategoryCount; 5] = [
    count("Dept 1", 320),
    count("Dept 2", 280),
    count("Dept 3", 150),
    count("Dept 4", 90),
    count("Dept 5", 60),
];

static APPOINTMENTS_BY_PHYSICIAN: [CategoryCount; 4] = [
    count("Dr. Smith", 45),
    count("Dr. Lee", 38),
    count("Dr. Patel", 30),
    count("Dr. Chen", 25),
];

static MEDS_PER_PATIENT_TOP5: [CategoryCount; 5] = [
    count("Patient 101", 8),
    count("Patient 256", 7),
    count("Patient 342", 6),
    count("Patient 119", 5),
    count("Patient 478", 5),
];

static ROOM_AVAILABILITY: [ProportionSlice; 2] = [
    ProportionSlice { status: "Available", value: 2300 },
    ProportionSlice { status: "Unavailable", value: 700 },
];

static ROW_COUNTS: [RowCount; 5] = [
    RowCount { table: "Patients", rows: 3000 },
    RowCount { table: "Appointments", rows: 3000 },
    RowCount { table: "Prescriptions", rows: 3000 },
    RowCount { table: "Nurses", rows: 3000 },
    RowCount { table: "Departments", rows: 3000 },
];


/// The process-wide dataset store.
pub static STORE: DatasetStore = DatasetStore {
    appointments_per_month: Dataset {
        category_key: "month",
        value_key: "appointments",
        records: &APPOINTMENTS_PER_MONTH,
    },
    prescriptions_by_drug: Dataset {
        category_key: "drug",
        value_key: "qty",
        records: &PRESCRIPTIONS_BY_DRUG,
    },
    on_call_by_block: Dataset {
        category_key: "block",
        value_key: "nurses",
        records: &ON_CALL_BY_BLOCK,
    },
    trigger_data: Dataset {
        category_key: "label",
        value_key: "value",
        records: &TRIGGER_DATA,
    },
    patients_per_department: Dataset {
        category_key: "department",
        value_key: "count",
        records: &PATIENTS_PER_DEPARTMENT,
    },
    appointments_by_physician: Dataset {
        category_key: "physician",
        value_key: "count",
        records: &APPOINTMENTS_BY_PHYSICIAN,
    },
    meds_per_patient_top5: Dataset {
        category_key: "patient",
        value_key: "meds",
        records: &MEDS_PER_PATIENT_TOP5,
    },
    room_availability: Dataset {
        category_key: "status",
        value_key: "value",
        records: &ROOM_AVAILABILITY,
    },
    row_counts: Dataset {
        category_key: "table",
        value_key: "rows",
        records: &ROW_COUNTS,
    },
};


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;

    #[test]
    fn test_appointments_are_chronological() {
        let months: Vec<&str> = STORE
            .appointments_per_month
            .records
            .iter()
            .map(|p| p.month)
            .collect();
        assert_eq!(months, ["Jan", "Feb", "Mar", "Apr", "May", "Jun"]);
    }

    #[test]
    fn test_room_availability_literals() {
        assert_eq!(STORE.room_availability.values(), vec![2300, 700]);
    }

    #[test]
    fn test_row_counts() {
        let rows = STORE.row_counts.records;
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.value() == 3000));
    }

    #[test]
    fn test_store_json_uses_dataset_names() {
        let json = serde_json::to_value(STORE).unwrap();
        assert_eq!(json["roomAvailability"][0]["status"], "Available");
        assert_eq!(json["roomAvailability"][1]["value"], 700);
        assert_eq!(json["medsPerPatientTop5"][0]["patient"], "Patient 101");
    }
}
