use std::process::exit;

use clap::Parser;
use eyre::Result;
use rayon::ThreadPoolBuilder;

use combicrack::{
    format_clock,
    loader::{read_hashes, read_wordlist},
    Engine, EngineConfig, Estimate, RunContext, RunState, Summary, TargetSet, TerminalReporter,
    SEPARATORS,
};

const BANNER: &str = r"
                 _     _                     _
  ___ ___  _ __ | |__ (_) ___ _ __ __ _  ___| | __
 / __/ _ \| '_ \| '_ \| |/ __| '__/ _` |/ __| |/ /
| (_| (_) | | | | |_) | | (__| | | (_| | (__|   <
 \___\___/|_| |_|_.__/|_|\___|_|  \__,_|\___|_|\_\
";

/// Candidates hashed per parallel batch when more than one thread is used.
const PARALLEL_CHUNK: usize = 4096;

#[derive(Parser)]
#[command(
    version,
    about = "Brute-force permutations of input strings to match given hashes (algorithm guessed from hash length).",
    long_about = format!("{BANNER}\nBrute-force permutations of input strings to match given hashes (algorithm guessed from hash length).")
)]
struct Args {
    /// File with candidate input strings, one per line
    #[arg(long = "input-strings", value_name = "FILE")]
    input_strings: String,

    /// File with target hashes, one per line, hex encoded
    #[arg(long = "hashes", value_name = "FILE")]
    hashes: String,

    /// Show every attempt with its input and digest
    #[arg(short, long)]
    verbose: bool,

    /// Worker threads used for hashing; 1 hashes strictly in order
    #[arg(
        short,
        long,
        default_value_t = num_cpus::get(),
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    threads: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let words = read_wordlist(&args.input_strings).await?;
    let targets = TargetSet::new(read_hashes(&args.hashes).await?);

    for hash in targets.undetermined() {
        log::debug!("excluding {hash} from the search");
        println!("[!] Could not guess algorithm for hash: {hash}");
    }

    let config = EngineConfig {
        verbose: args.verbose,
        chunk_size: if args.threads > 1 { PARALLEL_CHUNK } else { 1 },
    };
    let engine = Engine::new(&words, &targets, config);
    let total = engine.total();

    println!("[+] Loaded {} input strings", words.len());
    println!("[+] Loaded {} target hashes", targets.len());
    println!("[+] Common separators to try: {SEPARATORS:?}");
    if total == Estimate::Overflow {
        log::warn!("attempt estimate overflowed, progress will show counts only");
    }
    println!("[+] Estimated total hashing attempts: {total}");
    println!("[+] Detected hash algorithms:");
    for target in targets.targets() {
        let names: Vec<&str> = target.algorithms.iter().map(|a| a.name()).collect();
        println!("    {} -> {}", target.hex, names.join(", "));
    }

    let tp = ThreadPoolBuilder::new().num_threads(args.threads).build()?;

    let mut reporter = TerminalReporter::new(total, args.verbose);
    let mut ctx = RunContext::new();
    let report = tp.install(|| engine.run(&mut ctx, &mut reporter));
    reporter.finish();

    log::info!(
        "{} attempts, {} digests over {} candidates",
        report.attempts,
        report.digests,
        report.candidates
    );
    println!(
        "[+] {} attempts in {}",
        report.attempts,
        format_clock(report.elapsed)
    );

    match report.summary() {
        Summary::NoMatches => println!("[-] No matches found."),
        Summary::AllFound => println!("[+] All hashes found."),
        Summary::Partial { .. } => {}
    }
    if !report.unmatched.is_empty() {
        println!("[-] Unmatched hashes:");
        for hash in &report.unmatched {
            println!("    {hash}");
        }
    }

    if report.state == RunState::Exhausted && !report.unmatched.is_empty() {
        exit(2);
    }
    Ok(())
}
