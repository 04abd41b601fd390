use std::path::PathBuf;

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
        self.next_u64() % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }
}

const GEMARKUNGEN: [&str; 4] = ["Nordheim", "Suedfeld", "Altdorf", "Bergen"];
const VORNAMEN: [&str; 8] = [
    "Anna", "Bob", "Carla", "Dieter", "Erika", "Franz", "Greta", "Hans",
];
const NAMEN: [&str; 6] = ["Muster", "Beispiel", "Schmidt", "Meyer", "Weber", "Wagner"];
const STRASSEN: [&str; 5] = ["Hauptstr.", "Bahnhofstr.", "Am Markt", "Lindenweg", "Schulgasse"];
const ORTE: [(&str, &str); 5] = [
    ("12345", "Berlin"),
    ("54321", "Hamburg"),
    ("80331", "München"),
    ("50667", "Köln"),
    ("01067", "Dresden Altstadt"),
];

fn main() -> anyhow::Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let mut rng = SimpleRng::new(42);

    let data_path = out_dir.join("sample_data.csv");
    let mut data = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(&data_path)?;
    data.write_record([
        "Gemkg-Name",
        "Flur",
        "Flurstuecksnummer",
        "Vorname",
        "Name",
        "Adresse",
        "Ort",
    ])?;

    let mut parcels = Vec::new();
    for _ in 0..200 {
        let gemarkung = rng.pick(&GEMARKUNGEN);
        let flur = (rng.below(5) + 1).to_string();
        let nummer = (rng.below(120) + 1).to_string();
        let (plz, ort) = ORTE[rng.below(ORTE.len() as u64) as usize];
        let adresse = format!("{} {}", rng.pick(&STRASSEN), rng.below(80) + 1);

        data.write_record([
            gemarkung,
            flur.as_str(),
            nummer.as_str(),
            rng.pick(&VORNAMEN),
            rng.pick(&NAMEN),
            adresse.as_str(),
            format!("{plz} {ort}").as_str(),
        ])?;
        parcels.push((gemarkung, flur, nummer));
    }
    data.flush()?;

    // Every 25th parcel, with the Gemarkung lower-cased to show case folding.
    let criteria_path = out_dir.join("sample_criteria.csv");
    let mut criteria = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(&criteria_path)?;
    criteria.write_record(["Gemkg-Name", "Flur", "Flurstuecksnummer"])?;
    for (gemarkung, flur, nummer) in parcels.iter().step_by(25) {
        criteria.write_record([gemarkung.to_lowercase().as_str(), flur.as_str(), nummer.as_str()])?;
    }
    criteria.flush()?;

    println!(
        "Wrote {} rows to {} and {} criteria to {}",
        parcels.len(),
        data_path.display(),
        parcels.len().div_ceil(25),
        criteria_path.display()
    );
    Ok(())
}
