use chrono::NaiveDate;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

const PATHS: [(&str, u8); 12] = [
    ("/", 10),
    ("/index.html", 20),
    ("/login", 10),
    ("/api/items", 30),
    ("/img/logo.png", 25),
    ("/img/banner.JPG", 10),
    ("/img/spinner.gif", 8),
    ("/static/photo.jpg", 15),
    ("/static/Thumb.Png", 5),
    ("/img/logo.png?v=2", 5),
    ("/downloads/gif-guide.pdf", 3),
    ("/search?q=a,b", 4),
];
const USER_AGENTS: [(&str, u8); 8] = [
    (
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
        20,
    ),
    (
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        45,
    ),
    (
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_2) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
        20,
    ),
    ("Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 6.1)", 3),
    ("Mozilla/5.0 (Windows NT 10.0; Trident/7.0; rv:11.0) like Gecko", 4),
    ("curl/8.5.0", 3),
    ("Googlebot/2.1 (+http://www.google.com/bot.html)", 4),
    ("", 1),
];
const STATUS: [(u16, u8); 6] = [
    (200, 70),
    (304, 10),
    (301, 5),
    (404, 10),
    (403, 2),
    (500, 3),
];
const BAD_TIMESTAMPS: [&str; 4] = ["not-a-date", "-", "2024/13/45 25:61:00", "yesterday"];

/// Shape of one generated access log document.
#[derive(Debug, Clone)]
pub struct LogSpec {
    pub rows: usize,
    pub seed: Option<u64>,
    pub bad_timestamp_percent: u8,
    pub date: NaiveDate,
}

impl LogSpec {
    /// Renders the whole document. With a seed the output is identical on
    /// every call.
    pub fn render(&self) -> String {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut buffer = String::with_capacity(self.rows * 160);
        for _ in 0..self.rows {
            buffer.push_str(&generate_csv_row(
                &mut rng,
                self.date,
                self.bad_timestamp_percent,
            ));
            buffer.push('\n');
        }
        buffer
    }
}

pub fn generate_csv_row<R: Rng + ?Sized>(
    rng: &mut R,
    date: NaiveDate,
    bad_timestamp_percent: u8,
) -> String {
    let path = pick(rng, &PATHS);
    let agent = pick(rng, &USER_AGENTS);
    let status = pick(rng, &STATUS);
    let size = rng.random_range(100..20_000u64);
    let timestamp = if rng.random_ratio(bad_timestamp_percent.into(), 100) {
        BAD_TIMESTAMPS
            .choose(rng)
            .copied()
            .unwrap_or(BAD_TIMESTAMPS[0])
            .to_string()
    } else {
        format!(
            "{date} {:02}:{:02}:{:02}",
            rng.random_range(0..24),
            rng.random_range(0..60),
            rng.random_range(0..60)
        )
    };

    format!(
        "{},{timestamp},{},{status},{size}",
        csv_escape(path),
        csv_escape(agent)
    )
}

fn pick<R: Rng + ?Sized, T: Copy>(rng: &mut R, table: &[(T, u8)]) -> T {
    table
        .choose_weighted(rng, |(_, w)| *w)
        .map(|(value, _)| *value)
        .expect("weighted tables are non-empty with positive weights")
}

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
