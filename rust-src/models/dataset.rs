//! Dataset records and the named dataset wrapper.
//!
//! All values are `u64`, so a record can never hold a negative count.

use serde::ser::{Serialize, SerializeMap, Serializer};


/// One month of appointment volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSeriesPoint {
    pub month: &'static str,
    pub appointments: u64,
}


/// A labeled count, e.g. prescriptions for one drug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCount {
    pub label: &'static str,
    pub quantity: u64,
}


/// One part of a whole, e.g. available rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProportionSlice {
    pub status: &'static str,
    pub value: u64,
}


/// A row of the table-size summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCount {
    pub table: &'static str,
    pub rows: u64,
}


/// Common view over every record kind: one category and one value.
pub trait Record {
    fn category(&self) -> &str;
    fn value(&self) -> u64;
}


impl Record for TimeSeriesPoint {
    fn category(&self) -> &str {
        self.month
    }

    fn value(&self) -> u64 {
        self.appointments
    }
}


impl Record for CategoryCount {
    fn category(&self) -> &str {
        self.label
    }

    fn value(&self) -> u64 {
        self.quantity
    }
}


impl Record for ProportionSlice {
    fn category(&self) -> &str {
        self.status
    }

    fn value(&self) -> u64 {
        self.value
    }
}


impl Record for RowCount {
    fn category(&self) -> &str {
        self.table
    }

    fn value(&self) -> u64 {
        self.rows
    }
}


/// A fixed array of records.
///
/// `category_key` and `value_key` are the field names the records are
/// published under, so `prescriptions_by_drug` serialises as
/// `{"drug": "Drug A", "qty": 120}` rather than with generic names.
#[derive(Debug, Clone, Copy)]
pub struct Dataset<T: 'static> {
    pub category_key: &'static str,
    pub value_key: &'static str,
    pub records: &'static [T],
}


impl<T: Record> Dataset<T> {
    /// Category labels in dataset order.
    pub fn categories(&self) -> Vec<String> {
        self.records.iter().map(|r| r.category().to_string()).collect()
    }

    /// Values in dataset order.
    pub fn values(&self) -> Vec<u64> {
        self.records.iter().map(Record::value).collect()
    }
}


impl<T: Record> Serialize for Dataset<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<KeyedRecord<'_>> = self
            .records
            .iter()
            .map(|r| KeyedRecord {
                category_key: self.category_key,
                value_key: self.value_key,
                category: r.category(),
                value: r.value(),
            })
            .collect();
        rows.serialize(serializer)
    }
}


/// A record serialised under its dataset's field names.
struct KeyedRecord<'a> {
    category_key: &'a str,
    value_key: &'a str,
    category: &'a str,
    value: u64,
}


impl Serialize for KeyedRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.category_key, self.category)?;
        map.serialize_entry(self.value_key, &self.value)?;
        map.end()
    }
}
