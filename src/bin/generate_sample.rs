//! Writes a synthetic `results_data.csv` so the viewer can be demoed
//! without running the external hash-table simulation.
//!
//! Usage: `generate_sample [v1|v2|v3]`

use anyhow::{bail, Context, Result};

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
}

// ---------------------------------------------------------------------------
// Collision-cost curves
// ---------------------------------------------------------------------------

/// Textbook expected probes per insertion at load factor `a`, scaled by a
/// per-distribution clustering penalty.
fn expected_probes(a: f64, penalty: f64) -> [f64; 4] {
    let chaining = 1.0 + a / 2.0;
    let linear = 0.5 * (1.0 + 1.0 / (1.0 - a).powi(2));
    let quadratic = 1.0 - (1.0 - a).ln() - a / 2.0;
    let double = 1.0 / (1.0 - a);
    [
        1.0 + (chaining - 1.0) * penalty,
        1.0 + (linear - 1.0) * penalty,
        1.0 + (quadratic - 1.0) * penalty,
        1.0 + (double - 1.0) * penalty,
    ]
}

fn penalty_for(distribution: &str) -> f64 {
    match distribution {
        "Uniform" => 1.0,
        "Skewed" => 1.6,
        _ => 2.5, // Worst_Case
    }
}

/// Per-insertion CPU cost in ms: roughly proportional to probes, noisy.
fn time_ms(probes: f64, rng: &mut SimpleRng) -> f64 {
    let base = probes * 0.011;
    (base + rng.gauss(0.0, base * 0.08)).max(0.0001)
}

// ---------------------------------------------------------------------------
// Writers, one per schema version
// ---------------------------------------------------------------------------

fn load_factors() -> Vec<f64> {
    // 0.05 .. 0.95; open-addressing curves blow up at 1.0.
    (1..=19).map(|i| i as f64 * 0.05).collect()
}

fn write_v1(w: &mut csv::Writer<std::fs::File>, rng: &mut SimpleRng) -> csv::Result<()> {
    w.write_record([
        "Distribution",
        "Load_Factor",
        "Chaining_Probes",
        "Linear_Probing_Probes",
        "Quadratic_Probing_Probes",
        "Double_Hashing_Probes",
        "Linear_Time_ms",
        "Quadratic_Time_ms",
        "Double_Time_ms",
    ])?;

    for dist in ["Uniform", "Skewed"] {
        let penalty = penalty_for(dist);
        for a in load_factors() {
            let [c, l, q, d] = expected_probes(a, penalty);
            w.write_record([
                dist.to_string(),
                format!("{a:.2}"),
                format!("{:.4}", c + rng.gauss(0.0, 0.02)),
                format!("{:.4}", l + rng.gauss(0.0, 0.05)),
                format!("{:.4}", q + rng.gauss(0.0, 0.04)),
                format!("{:.4}", d + rng.gauss(0.0, 0.03)),
                format!("{:.6}", time_ms(l, rng)),
                format!("{:.6}", time_ms(q, rng)),
                format!("{:.6}", time_ms(d, rng)),
            ])?;
        }
    }
    Ok(())
}

fn write_v2(w: &mut csv::Writer<std::fs::File>, rng: &mut SimpleRng) -> csv::Result<()> {
    w.write_record([
        "Distribution",
        "Scale",
        "Load_Factor",
        "Chaining_Probes",
        "Linear_Probing_Probes",
        "Quadratic_Probing_Probes",
        "Double_Hashing_Probes",
        "Linear_Time_ms",
        "Quadratic_Time_ms",
        "Double_Time_ms",
    ])?;

    for dist in ["Uniform", "Skewed"] {
        let penalty = penalty_for(dist);
        for (scale, time_mult, noise) in [("Small", 0.4, 0.10), ("Large", 3.0, 0.02)] {
            for a in load_factors() {
                let [c, l, q, d] = expected_probes(a, penalty);
                w.write_record([
                    dist.to_string(),
                    scale.to_string(),
                    format!("{a:.2}"),
                    format!("{:.4}", c + rng.gauss(0.0, noise)),
                    format!("{:.4}", l + rng.gauss(0.0, noise * 2.0)),
                    format!("{:.4}", q + rng.gauss(0.0, noise * 1.5)),
                    format!("{:.4}", d + rng.gauss(0.0, noise)),
                    format!("{:.6}", time_ms(l, rng) * time_mult),
                    format!("{:.6}", time_ms(q, rng) * time_mult),
                    format!("{:.6}", time_ms(d, rng) * time_mult),
                ])?;
            }
        }
    }
    Ok(())
}

fn write_v3(w: &mut csv::Writer<std::fs::File>, rng: &mut SimpleRng) -> csv::Result<()> {
    w.write_record([
        "Key_Index",
        "Load_Factor",
        "Distribution",
        "Chaining_Probes",
        "Linear_Probing_Probes",
        "Quadratic_Probing_Probes",
        "Double_Hashing_Probes",
        "Chaining_Time_ms",
        "Linear_Probing_Time_ms",
        "Quadratic_Probing_Time_ms",
        "Double_Hashing_Time_ms",
    ])?;

    const TABLE_SIZE: u32 = 128;
    let max_keys = (TABLE_SIZE as f64 * 0.95) as u32;

    for dist in ["Uniform", "Skewed", "Worst_Case"] {
        let penalty = penalty_for(dist);
        // The per-key layout reports cumulative totals.
        let mut totals = [0.0f64; 4];
        let mut time_totals = [0.0f64; 4];

        for key in 1..=max_keys {
            let a = key as f64 / TABLE_SIZE as f64;
            let probes = expected_probes(a, penalty);
            for (i, p) in probes.iter().enumerate() {
                let observed = (p + rng.gauss(0.0, 0.1)).max(1.0);
                totals[i] += observed.round();
                time_totals[i] += time_ms(observed, rng);
            }

            w.write_record([
                key.to_string(),
                format!("{a:.6}"),
                dist.to_string(),
                format!("{:.0}", totals[0]),
                format!("{:.0}", totals[1]),
                format!("{:.0}", totals[2]),
                format!("{:.0}", totals[3]),
                format!("{:.6}", time_totals[0]),
                format!("{:.6}", time_totals[1]),
                format!("{:.6}", time_totals[2]),
                format!("{:.6}", time_totals[3]),
            ])?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let version = std::env::args().nth(1).unwrap_or_else(|| "v1".to_string());
    let mut rng = SimpleRng::new(42);

    let output_path = "results_data.csv";
    let file = std::fs::File::create(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    let mut writer = csv::Writer::from_writer(file);

    match version.as_str() {
        "v1" => write_v1(&mut writer, &mut rng).context("writing v1 rows")?,
        "v2" => write_v2(&mut writer, &mut rng).context("writing v2 rows")?,
        "v3" => write_v3(&mut writer, &mut rng).context("writing v3 rows")?,
        other => bail!("unknown schema version '{other}' (expected v1, v2, or v3)"),
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {version} sample data to {output_path}");
    Ok(())
}
