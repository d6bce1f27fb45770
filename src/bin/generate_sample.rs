use std::sync::Arc;

use arrow::array::{Int64Array, StringArray, TimestampMillisecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate};
use parquet::arrow::ArrowWriter;

const HEADLINES: &[&str] = &[
    "Bundestag debattiert über grüne Energiepolitik",
    "Gaspreise steigen erneut",
    "Grüne fordern schnelleren Kohleausstieg",
    "Bauernproteste in mehreren Städten",
    "Regierung plant neues Heizungsgesetz",
    "Ukraine-Konflikt: Neue Verhandlungen angekündigt",
    "Umfrage: Mehrheit skeptisch gegenüber Ampel",
    "Windkraftausbau stockt in Bayern",
    "Inflation sinkt leicht im Euroraum",
    "Parteitag der GRÜNEN in Karlsruhe",
];

const REACTIONS: [&str; 7] = ["haha", "like", "wow", "angry", "sad", "love", "hug"];

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

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n.max(1)
    }
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);
    let first_day = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    let days = 60;

    let mut dates: Vec<i64> = Vec::new();
    let mut texts: Vec<String> = Vec::new();
    let mut fulltexts: Vec<Option<String>> = Vec::new();
    let mut counts: Vec<Vec<i64>> = vec![Vec::new(); REACTIONS.len() + 2];

    for day in 0..days {
        let date = first_day + Duration::days(day);
        let posts = 3 + rng.below(6);
        for _ in 0..posts {
            let hour = rng.below(24) as u32;
            let timestamp = date
                .and_hms_opt(hour, 0, 0)
                .expect("valid time")
                .and_utc()
                .timestamp_millis();
            let headline = HEADLINES[rng.below(HEADLINES.len() as u64) as usize];
            let green = headline.to_lowercase().contains("grün");

            dates.push(timestamp);
            texts.push(headline.to_string());
            fulltexts.push((rng.below(4) != 0).then(|| format!("{headline}. Weitere Details im Artikel.")));

            // Green-topic posts draw more angry and haha reactions.
            for (i, name) in REACTIONS.iter().enumerate() {
                let boost = match (*name, green) {
                    ("angry", true) | ("haha", true) => 40,
                    _ => 0,
                };
                counts[i].push((rng.below(60) + boost) as i64);
            }
            counts[REACTIONS.len()].push(rng.below(200) as i64);
            counts[REACTIONS.len() + 1].push(rng.below(120) as i64);
        }
    }

    let mut fields = vec![
        Field::new("date", DataType::Timestamp(TimeUnit::Millisecond, None), false),
        Field::new("text", DataType::Utf8, false),
        Field::new("fulltext", DataType::Utf8, true),
    ];
    for name in REACTIONS.iter().chain(["shares", "comments_num"].iter()) {
        fields.push(Field::new(*name, DataType::Int64, false));
    }
    let schema = Arc::new(Schema::new(fields));

    let n_rows = dates.len();
    let mut columns: Vec<arrow::array::ArrayRef> = vec![
        Arc::new(TimestampMillisecondArray::from(dates)),
        Arc::new(StringArray::from(texts)),
        Arc::new(StringArray::from(fulltexts)),
    ];
    for values in counts {
        columns.push(Arc::new(Int64Array::from(values)));
    }
    let batch = RecordBatch::try_new(schema.clone(), columns)?;

    // Write Parquet
    let output_path = "sample_articles.parquet";
    let file = std::fs::File::create(output_path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    println!("Wrote {n_rows} articles over {days} days to {output_path}");
    Ok(())
}
