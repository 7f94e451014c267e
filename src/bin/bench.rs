//! t1ha benchmark harness
//! Sweeps the small-input sizes that matter for hash tables, then compares
//! bulk throughput against SHA-256 with fair, reproducible tests

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Input sizes for the small-input sweep.
const SWEEP_SIZES: [usize; 17] = [
    1, 2, 3, 4, 5, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 1024, 8192,
];

struct BenchConfig {
    file: Option<PathBuf>,
    size: usize,
    chunk: usize,
    threads: usize,
    seed: u64,
    repeat: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            file: None,
            size: 100_000_000, // 100 MB default
            chunk: 65536,      // 64 KB chunks
            threads: 8,
            seed: 0,
            repeat: 3,
        }
    }
}

struct BenchResult {
    algorithm: String,
    threads: usize,
    size: usize,
    seed: u64,
    mb_per_sec: f64,
    digest_hex: String,
}

fn parse_args() -> BenchConfig {
    let mut config = BenchConfig::default();
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--file" => {
                i += 1;
                config.file = Some(PathBuf::from(&args[i]));
            }
            "--size" => {
                i += 1;
                config.size = args[i].parse().expect("Invalid size");
            }
            "--chunk" => {
                i += 1;
                config.chunk = args[i].parse().expect("Invalid chunk size");
            }
            "--threads" => {
                i += 1;
                config.threads = args[i].parse().expect("Invalid thread count");
            }
            "--seed" => {
                i += 1;
                config.seed = args[i].parse().expect("Invalid seed");
            }
            "--repeat" => {
                i += 1;
                config.repeat = args[i].parse().expect("Invalid repeat count");
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    config
}

fn load_or_generate_data(config: &BenchConfig) -> Vec<u8> {
    if let Some(path) = &config.file {
        println!("📂 Loading file: {}", path.display());
        let mut file = File::open(path).expect("Failed to open file");
        let mut data = Vec::new();
        file.read_to_end(&mut data).expect("Failed to read file");
        println!(
            "   Loaded {} bytes ({:.2} MB)",
            data.len(),
            data.len() as f64 / 1_000_000.0
        );
        data
    } else {
        println!(
            "🎲 Generating random data: {} bytes ({} MB)",
            config.size,
            config.size / 1_000_000
        );
        // Fast pseudo-random generation (not secure, just for benchmarking)
        let mut data = vec![0u8; config.size];
        let mut rng_state = 0x123456789abcdef0u64;
        for chunk in data.chunks_mut(8) {
            rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let bytes = rng_state.to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
        data
    }
}

/// Small-input sweep. Digests accumulate into a running total that gets
/// printed at the end so the optimizer cannot elide the calls.
fn run_sweep(seed: u64) {
    let buf = vec![0u8; 8192];
    let mut total: u64 = 0;

    println!("📏 SMALL-INPUT SWEEP (seed {})", seed);
    println!("   {:>6} │ {:>10} │ {:>10}", "bytes", "ns/hash", "MB/s");

    for &size in &SWEEP_SIZES {
        let iters = (200_000_000 / (size + 32)).clamp(10_000, 2_000_000);
        let start = Instant::now();
        for _ in 0..iters {
            total = total.wrapping_add(t1ha::hash(&buf[..size], seed));
        }
        let elapsed = start.elapsed().as_secs_f64();
        let ns_per_hash = elapsed * 1e9 / iters as f64;
        let mb_per_sec = (size as f64 * iters as f64 / 1_000_000.0) / elapsed;
        println!(
            "   {:>6} │ {:>10.1} │ {:>10.2}",
            size, ns_per_hash, mb_per_sec
        );
    }

    println!(
        "   (accumulated total: {})\n",
        hex::encode(total.to_le_bytes())
    );
}

fn bench_sha256_streaming(data: &[u8], chunk_size: usize) -> (f64, String) {
    let start = Instant::now();
    let mut hasher = Sha256::new();

    for chunk in data.chunks(chunk_size) {
        hasher.update(chunk);
    }

    let result = hasher.finalize();
    let elapsed = start.elapsed().as_secs_f64();
    let mb_per_sec = (data.len() as f64 / 1_000_000.0) / elapsed;
    let digest = hex::encode(&result[..8]); // First 8 bytes for display

    (mb_per_sec, digest)
}

fn bench_t1ha_single(data: &[u8], seed: u64) -> (f64, String) {
    let start = Instant::now();

    let result = t1ha::hash(data, seed);

    let elapsed = start.elapsed().as_secs_f64();
    let mb_per_sec = (data.len() as f64 / 1_000_000.0) / elapsed;
    let digest = hex::encode(result.to_le_bytes());

    (mb_per_sec, digest)
}

/// Aggregate multi-thread throughput: shards the buffer, hashes each shard
/// independently and xor-folds the results. The folded value is NOT a t1ha
/// digest; it only keeps the work observable.
fn bench_t1ha_parallel(data: &[u8], threads: usize, seed: u64) -> (f64, String) {
    use rayon::prelude::*;

    if data.len() < 1_000_000 || threads <= 1 {
        return bench_t1ha_single(data, seed);
    }

    let chunk_size = (data.len() + threads - 1) / threads;
    let start = Instant::now();

    let folded = data
        .par_chunks(chunk_size)
        .enumerate()
        .map(|(idx, chunk)| t1ha::hash(chunk, seed.wrapping_add(idx as u64)))
        .reduce(|| 0u64, |x, y| x ^ y);

    let elapsed = start.elapsed().as_secs_f64();
    let mb_per_sec = (data.len() as f64 / 1_000_000.0) / elapsed;
    let digest = hex::encode(folded.to_le_bytes());

    (mb_per_sec, digest)
}

fn run_benchmark(config: &BenchConfig, data: &[u8]) -> Vec<BenchResult> {
    let mut results = Vec::new();

    println!("🔥 BULK BENCHMARK CONFIGURATION");
    println!(
        "   Data size: {} bytes ({:.2} MB)",
        data.len(),
        data.len() as f64 / 1_000_000.0
    );
    println!("   Chunk size: {} bytes", config.chunk);
    println!("   Threads: {}", config.threads);
    println!("   Seed: {}", config.seed);
    println!("   Repeats: {}", config.repeat);
    println!();

    // Warm-up
    print!("🔧 Warming up... ");
    std::io::stdout().flush().unwrap();
    let _ = bench_sha256_streaming(data, config.chunk);
    let _ = bench_t1ha_single(data, config.seed);
    println!("done\n");

    // SHA-256 baseline (single-threaded)
    println!("📊 Running SHA-256 (baseline)...");
    let mut sha_speeds = Vec::new();
    for i in 0..config.repeat {
        print!("   Run {}/{}: ", i + 1, config.repeat);
        std::io::stdout().flush().unwrap();
        let (speed, digest) = bench_sha256_streaming(data, config.chunk);
        sha_speeds.push(speed);
        println!("{:.2} MB/s (digest: {}...)", speed, digest);
        if i == 0 {
            results.push(BenchResult {
                algorithm: "SHA-256".to_string(),
                threads: 1,
                size: data.len(),
                seed: config.seed,
                mb_per_sec: speed,
                digest_hex: digest,
            });
        }
    }
    sha_speeds.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let sha_median = sha_speeds[sha_speeds.len() / 2];
    println!("   Median: {:.2} MB/s\n", sha_median);

    // t1ha single-threaded
    println!("📊 Running t1ha (single-threaded)...");
    let mut single_speeds = Vec::new();
    for i in 0..config.repeat {
        print!("   Run {}/{}: ", i + 1, config.repeat);
        std::io::stdout().flush().unwrap();
        let (speed, digest) = bench_t1ha_single(data, config.seed);
        single_speeds.push(speed);
        println!("{:.2} MB/s (digest: {})", speed, digest);
        if i == 0 {
            results.push(BenchResult {
                algorithm: "t1ha".to_string(),
                threads: 1,
                size: data.len(),
                seed: config.seed,
                mb_per_sec: speed,
                digest_hex: digest,
            });
        }
    }
    single_speeds.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let single_median = single_speeds[single_speeds.len() / 2];
    println!(
        "   Median: {:.2} MB/s ({:.2}x SHA-256)\n",
        single_median,
        single_median / sha_median
    );

    // t1ha sharded across threads
    println!(
        "📊 Running t1ha (sharded, {} threads, xor fold)...",
        config.threads
    );
    let mut parallel_speeds = Vec::new();
    for i in 0..config.repeat {
        print!("   Run {}/{}: ", i + 1, config.repeat);
        std::io::stdout().flush().unwrap();
        let (speed, digest) = bench_t1ha_parallel(data, config.threads, config.seed);
        parallel_speeds.push(speed);
        println!("{:.2} MB/s (fold: {})", speed, digest);
        if i == 0 {
            results.push(BenchResult {
                algorithm: "t1ha-MT".to_string(),
                threads: config.threads,
                size: data.len(),
                seed: config.seed,
                mb_per_sec: speed,
                digest_hex: digest,
            });
        }
    }
    parallel_speeds.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let parallel_median = parallel_speeds[parallel_speeds.len() / 2];
    println!(
        "   Median: {:.2} MB/s ({:.2}x SHA-256)\n",
        parallel_median,
        parallel_median / sha_median
    );

    results
}

fn print_results_table(results: &[BenchResult]) {
    println!("\n╔═══════════════════════════════════════════════════════════╗");
    println!("║                    BENCHMARK RESULTS                      ║");
    println!("╠═══════════════════════════════════════════════════════════╣");
    println!("║ Algorithm         │ Threads │  Size   │    MB/s │ Speedup ║");
    println!("╠═══════════════════════════════════════════════════════════╣");

    let baseline = results[0].mb_per_sec;
    for result in results {
        let speedup = result.mb_per_sec / baseline;
        println!(
            "║ {:16} │ {:7} │ {:6}M │ {:7.2} │ {:6.2}x ║",
            result.algorithm,
            result.threads,
            result.size / 1_000_000,
            result.mb_per_sec,
            speedup
        );
    }

    println!("╚═══════════════════════════════════════════════════════════╝\n");
}

fn append_to_csv(results: &[BenchResult]) {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();

    let file_exists = std::path::Path::new("bench_results.csv").exists();
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("bench_results.csv")
        .expect("Failed to open CSV file");

    if !file_exists {
        writeln!(file, "algorithm,threads,size,seed,mb_s,digest,timestamp")
            .expect("Failed to write CSV header");
    }

    for result in results {
        writeln!(
            file,
            "{},{},{},{},{:.2},{},{}",
            result.algorithm,
            result.threads,
            result.size,
            result.seed,
            result.mb_per_sec,
            result.digest_hex,
            timestamp
        )
        .expect("Failed to write CSV row");
    }

    println!("✅ Results appended to bench_results.csv");
}

fn main() {
    println!("\n╔═══════════════════════════════════════════════════════════╗");
    println!("║                        t1ha bench                         ║");
    println!("║           Fast Positive Hash throughput harness           ║");
    println!("║                                                           ║");
    println!("║  ⚠️  NOT CRYPTOGRAPHICALLY SECURE - HASH TABLES ONLY ⚠️    ║");
    println!("╚═══════════════════════════════════════════════════════════╝\n");

    let config = parse_args();

    run_sweep(config.seed);

    let data = load_or_generate_data(&config);
    let results = run_benchmark(&config, &data);

    print_results_table(&results);
    append_to_csv(&results);

    println!("\n🎉 Benchmark complete!");
}
