//! Chart adapter: binds dataset fields to chart channels.
//!
//! Every function here is pure. Datasets are passed through unchecked, so
//! an empty dataset yields a chart with no categories.

use crate::models::{Dataset, Record};


/// Default slice colors for proportion charts.
pub const PROPORTION_PALETTE: [&str; 2] = ["#4A90E2", "#E94E77"];


/// The chart primitive a panel is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    GroupedBar,
    HorizontalBar,
    Proportion,
}


impl ChartKind {
    pub fn name(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::GroupedBar => "grouped-bar",
            ChartKind::HorizontalBar => "horizontal-bar",
            ChartKind::Proportion => "proportion",
        }
    }
}


/// Which axis carries the categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Categories along x, values up.
    Vertical,
    /// Categories along y, values to the right.
    Horizontal,
}


/// One named run of values, aligned with the chart's categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub name: String,
    pub fill: String,
    pub values: Vec<u64>,
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarChartSpec {
    pub orientation: Orientation,
    pub category_key: String,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    pub bar_size: u32,
}


impl BarChartSpec {
    /// Largest value across every series.
    pub fn max_value(&self) -> u64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .max()
            .unwrap_or(0)
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice {
    pub label: String,
    pub value: u64,
    pub fill: String,
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProportionSpec {
    pub category_key: String,
    pub slices: Vec<Slice>,
    pub inner_radius: u32,
    pub outer_radius: u32,
}


impl ProportionSpec {
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}


/// Visual structure handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartSpec {
    Bars(BarChartSpec),
    Proportion(ProportionSpec),
}


impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSpec::Bars(bars) if bars.series.len() > 1 => ChartKind::GroupedBar,
            ChartSpec::Bars(bars) => match bars.orientation {
                Orientation::Vertical => ChartKind::Bar,
                Orientation::Horizontal => ChartKind::HorizontalBar,
            },
            ChartSpec::Proportion(_) => ChartKind::Proportion,
        }
    }
}


/// How a dataset maps onto a bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarBinding {
    pub series_name: &'static str,
    pub fill: &'static str,
    pub bar_size: u32,
    pub orientation: Orientation,
}


impl BarBinding {
    pub const fn vertical(series_name: &'static str, fill: &'static str, bar_size: u32) -> Self {
        Self { series_name, fill, bar_size, orientation: Orientation::Vertical }
    }

    pub const fn horizontal(series_name: &'static str, fill: &'static str, bar_size: u32) -> Self {
        Self { series_name, fill, bar_size, orientation: Orientation::Horizontal }
    }
}


/// How a dataset maps onto a proportion chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProportionBinding {
    pub palette: &'static [&'static str],
    pub inner_radius: u32,
    pub outer_radius: u32,
}


impl Default for ProportionBinding {
    fn default() -> Self {
        Self {
            palette: &PROPORTION_PALETTE,
            inner_radius: 50,
            outer_radius: 80,
        }
    }
}


/// Single-series bar chart over a dataset.
pub fn bar_chart<T: Record>(dataset: &Dataset<T>, binding: BarBinding) -> ChartSpec {
    ChartSpec::Bars(BarChartSpec {
        orientation: binding.orientation,
        category_key: dataset.category_key.to_string(),
        categories: dataset.categories(),
        series: vec![Series {
            name: binding.series_name.to_string(),
            fill: binding.fill.to_string(),
            values: dataset.values(),
        }],
        bar_size: binding.bar_size,
    })
}


/// Several datasets drawn side by side per category.
///
/// Categories and orientation come from the first dataset. Later datasets
/// are matched by category label; a label they lack plots as 0.
#[allow(dead_code)]
pub fn grouped_bar<T: Record>(layers: &[(&Dataset<T>, BarBinding)]) -> ChartSpec {
    let Some((first, first_binding)) = layers.first() else {
        return ChartSpec::Bars(BarChartSpec {
            orientation: Orientation::Vertical,
            category_key: String::new(),
            categories: Vec::new(),
            series: Vec::new(),
            bar_size: 0,
        });
    };

    let categories = first.categories();
    let series = layers
        .iter()
        .map(|(dataset, binding)| Series {
            name: binding.series_name.to_string(),
            fill: binding.fill.to_string(),
            values: categories
                .iter()
                .map(|category| {
                    dataset
                        .records
                        .iter()
                        .find(|r| r.category() == category.as_str())
                        .map(Record::value)
                        .unwrap_or(0)
                })
                .collect(),
        })
        .collect();

    ChartSpec::Bars(BarChartSpec {
        orientation: first_binding.orientation,
        category_key: first.category_key.to_string(),
        categories,
        series,
        bar_size: first_binding.bar_size,
    })
}


/// Parts-of-a-whole chart; slice colors cycle through the palette.
pub fn proportion_chart<T: Record>(dataset: &Dataset<T>, binding: ProportionBinding) -> ChartSpec {
    let palette: &[&str] = if binding.palette.is_empty() {
        &PROPORTION_PALETTE
    } else {
        binding.palette
    };

    let slices = dataset
        .records
        .iter()
        .enumerate()
        .map(|(idx, r)| Slice {
            label: r.category().to_string(),
            value: r.value(),
            fill: palette[idx % palette.len()].to_string(),
        })
        .collect();

    ChartSpec::Proportion(ProportionSpec {
        category_key: dataset.category_key.to_string(),
        slices,
        inner_radius: binding.inner_radius,
        outer_radius: binding.outer_radius,
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::STORE;
    use crate::models::CategoryCount;

    static SHIFT_A: [CategoryCount; 2] = [
        CategoryCount { label: "1", quantity: 4 },
        CategoryCount { label: "2", quantity: 6 },
    ];

    static SHIFT_B: [CategoryCount; 1] = [CategoryCount { label: "2", quantity: 3 }];

    fn dataset(records: &'static [CategoryCount]) -> Dataset<CategoryCount> {
        Dataset { category_key: "block", value_key: "nurses", records }
    }

    #[test]
    fn test_bar_chart_binds_fields() {
        let chart = bar_chart(
            &STORE.appointments_per_month,
            BarBinding::vertical("Appointments", "#4A90E2", 32),
        );
        assert_eq!(chart.kind(), ChartKind::Bar);
        let ChartSpec::Bars(bars) = chart else { panic!("expected bars") };
        assert_eq!(bars.category_key, "month");
        assert_eq!(bars.categories.len(), 6);
        assert_eq!(bars.series[0].values, vec![320, 280, 350, 410, 390, 450]);
        assert_eq!(bars.max_value(), 450);
    }

    #[test]
    fn test_adapter_is_pure() {
        let binding = BarBinding::horizontal("Prescriptions", "#82ca9d", 24);
        let first = bar_chart(&STORE.prescriptions_by_drug, binding);
        let second = bar_chart(&STORE.prescriptions_by_drug, binding);
        assert_eq!(first, second);
        assert_eq!(first.kind(), ChartKind::HorizontalBar);
    }

    #[test]
    fn test_grouped_bar_aligns_by_category() {
        let a = dataset(&SHIFT_A);
        let b = dataset(&SHIFT_B);
        let chart = grouped_bar(&[
            (&a, BarBinding::vertical("Day", "#111111", 20)),
            (&b, BarBinding::vertical("Night", "#222222", 20)),
        ]);
        assert_eq!(chart.kind(), ChartKind::GroupedBar);
        let ChartSpec::Bars(bars) = chart else { panic!("expected bars") };
        assert_eq!(bars.series[0].values, vec![4, 6]);
        assert_eq!(bars.series[1].values, vec![0, 3]);
    }

    #[test]
    fn test_grouped_bar_with_no_layers() {
        let chart = grouped_bar::<CategoryCount>(&[]);
        let ChartSpec::Bars(bars) = chart else { panic!("expected bars") };
        assert!(bars.categories.is_empty());
        assert_eq!(bars.max_value(), 0);
    }

    #[test]
    fn test_proportion_keeps_literal_values() {
        let chart = proportion_chart(&STORE.room_availability, ProportionBinding::default());
        let ChartSpec::Proportion(pie) = chart else { panic!("expected proportion") };
        let values: Vec<u64> = pie.slices.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![2300, 700]);
        assert_eq!(pie.slices[0].fill, "#4A90E2");
        assert_eq!(pie.slices[1].fill, "#E94E77");
        assert_eq!((pie.inner_radius, pie.outer_radius), (50, 80));
    }

    #[test]
    fn test_empty_dataset_passes_through() {
        let empty = dataset(&[]);
        let ChartSpec::Bars(bars) = bar_chart(&empty, BarBinding::vertical("x", "#000000", 10)) else {
            panic!("expected bars")
        };
        assert!(bars.categories.is_empty());
        assert_eq!(bars.max_value(), 0);
    }
}
