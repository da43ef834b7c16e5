use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use launch_dashboard::data::loader::columns;
use launch_dashboard::data::model::{LaunchRecord, OutcomeClass};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Booster generations in flight order: (category, first flight, max payload).
const ERAS: [(&str, u32, f64); 5] = [
    ("v1.0", 1, 700.0),
    ("v1.1", 6, 4500.0),
    ("FT", 21, 6800.0),
    ("B4", 45, 9600.0),
    ("B5", 53, 9600.0),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

const N_FLIGHTS: u32 = 56;

fn generate(rng: &mut SimpleRng) -> Vec<LaunchRecord> {
    (1..=N_FLIGHTS)
        .map(|flight| {
            let (category, _, max_payload) = ERAS
                .iter()
                .rev()
                .find(|(_, first, _)| flight >= *first)
                .copied()
                .unwrap_or(ERAS[0]);

            // Later flights land more often.
            let p_success = 0.15 + 0.8 * flight as f64 / N_FLIGHTS as f64;
            let class = if rng.next_f64() < p_success {
                OutcomeClass::Success
            } else {
                OutcomeClass::Failure
            };

            let site = match category {
                "v1.0" => SITES[0],
                "v1.1" | "FT" => rng.pick(&SITES[..3]),
                _ => rng.pick(&SITES[1..]),
            };

            LaunchRecord {
                flight_number: Some(flight),
                site: site.to_string(),
                mission_outcome: Some("Success".to_string()),
                class,
                payload_mass_kg: Some((rng.next_f64() * max_payload).round()),
                booster_version: Some(format!("F9 {category}  B{:04}", 1000 + flight)),
                booster_category: category.to_string(),
            }
        })
        .collect()
}

fn write_csv(path: &str, records: &[LaunchRecord]) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    for rec in records {
        writer.serialize(rec).expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");
}

fn write_parquet(path: &str, records: &[LaunchRecord]) {
    let schema = Arc::new(Schema::new(vec![
        Field::new(columns::FLIGHT_NUMBER, DataType::Int64, true),
        Field::new(columns::LAUNCH_SITE, DataType::Utf8, false),
        Field::new(columns::MISSION_OUTCOME, DataType::Utf8, true),
        Field::new(columns::CLASS, DataType::Int64, false),
        Field::new(columns::PAYLOAD_MASS, DataType::Float64, true),
        Field::new(columns::BOOSTER_VERSION, DataType::Utf8, true),
        Field::new(columns::BOOSTER_CATEGORY, DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter(
                records.iter().map(|r| r.flight_number.map(i64::from)),
            )),
            Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.site.as_str()))),
            Arc::new(StringArray::from_iter(
                records.iter().map(|r| r.mission_outcome.as_deref()),
            )),
            Arc::new(Int64Array::from_iter_values(
                records.iter().map(|r| i64::from(r.class)),
            )),
            Arc::new(Float64Array::from_iter(records.iter().map(|r| r.payload_mass_kg))),
            Arc::new(StringArray::from_iter(
                records.iter().map(|r| r.booster_version.as_deref()),
            )),
            Arc::new(StringArray::from_iter_values(
                records.iter().map(|r| r.booster_category.as_str()),
            )),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let records = generate(&mut rng);

    write_csv("sample_launches.csv", &records);
    write_parquet("sample_launches.parquet", &records);

    let successes = records
        .iter()
        .filter(|r| r.class == OutcomeClass::Success)
        .count();
    println!(
        "Wrote {} launches ({successes} successful) to sample_launches.csv and sample_launches.parquet",
        records.len()
    );
}
