use anyhow::{Context, Result};
use serde::Serialize;

/// (genre, mean duration in minutes, mean popularity, share of explicit tracks)
const GENRES: &[(&str, f64, f64, f64)] = &[
    ("pop", 3.4, 62.0, 0.25),
    ("dance pop", 3.5, 58.0, 0.15),
    ("k-pop", 3.3, 55.0, 0.05),
    ("j-pop", 4.3, 38.0, 0.02),
    ("synth-pop", 4.1, 33.0, 0.05),
    ("indie-pop", 3.7, 40.0, 0.10),
    ("power-pop", 3.2, 27.0, 0.03),
    ("pop-film", 4.6, 50.0, 0.01),
    ("cantopop", 4.2, 35.0, 0.01),
    ("mandopop", 4.4, 37.0, 0.01),
    ("rock", 4.0, 45.0, 0.10),
    ("jazz", 5.5, 25.0, 0.00),
    ("metal", 5.0, 30.0, 0.20),
];

const ARTISTS: &[&str] = &[
    "Ava Max",
    "Dua Lipa",
    "BLACKPINK",
    "IU",
    "Lorde",
    "Carly Rae Jepsen",
    "Kenshi Yonezu",
    "The Weeknd",
    "Jay Chou",
    "Eason Chan",
    "Phoenix",
    "Robyn",
];

const TRACKS_PER_GENRE: usize = 60;

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One CSV row, laid out like the public Spotify tracks dataset.
#[derive(Serialize)]
struct SampleRow {
    #[serde(rename = "Unnamed: 0")]
    index: usize,
    track_id: String,
    artists: String,
    track_name: String,
    popularity: i64,
    duration_ms: i64,
    explicit: &'static str,
    track_genre: &'static str,
}

fn generate(rng: &mut SimpleRng) -> Vec<SampleRow> {
    let mut rows = Vec::with_capacity(GENRES.len() * TRACKS_PER_GENRE);
    for &(genre, minutes, popularity, explicit_share) in GENRES {
        for _ in 0..TRACKS_PER_GENRE {
            let index = rows.len();
            // A few very long tracks so the histogram cap has something to drop.
            let minutes = if rng.next_f64() < 0.01 {
                rng.gauss(18.0, 2.0)
            } else {
                rng.gauss(minutes, 0.7)
            };
            let artist = if rng.next_f64() < 0.1 {
                format!("{};{}", rng.pick(ARTISTS), rng.pick(ARTISTS))
            } else {
                rng.pick(ARTISTS).to_string()
            };

            rows.push(SampleRow {
                index,
                track_id: format!("trk{index:05}"),
                artists: artist,
                track_name: format!("Track {index}"),
                popularity: rng.gauss(popularity, 15.0).clamp(0.0, 100.0).round() as i64,
                duration_ms: (minutes.max(0.5) * 60_000.0).round() as i64,
                explicit: if rng.next_f64() < explicit_share { "True" } else { "False" },
                track_genre: genre,
            });
        }
    }
    rows
}

fn write_csv(rows: &[SampleRow], path: &str) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().context("flushing CSV")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    write_csv(&rows, "datasetspotify.csv")?;

    println!(
        "Wrote {} tracks across {} genres to datasetspotify.csv",
        rows.len(),
        GENRES.len()
    );
    Ok(())
}
