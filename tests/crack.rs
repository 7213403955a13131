use std::path::PathBuf;

use combicrack::{
    gen_hash,
    loader::{read_hashes, read_wordlist},
    Algorithm, Engine, EngineConfig, Estimate, RunContext, RunState, Summary, TargetSet,
};

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("combicrack-it-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

fn hex_digest(text: &str, algorithm: Algorithm) -> String {
    hex::encode(gen_hash(text.as_bytes(), algorithm))
}

#[tokio::test]
async fn cracks_hashes_loaded_from_files() {
    let words = scratch_file("words", "summer\n2024\nsummer\n!\n");
    let hashes = scratch_file(
        "hashes",
        &format!(
            "{}\n{}\nnot-a-hash\n{}\n",
            hex_digest("summer_2024", Algorithm::Sha256),
            hex_digest("2024|!|summer", Algorithm::Sha1).to_uppercase(),
            hex_digest("summer", Algorithm::Blake2b),
        ),
    );

    let words_list = read_wordlist(&words).await.unwrap();
    let targets = TargetSet::new(read_hashes(&hashes).await.unwrap());
    assert_eq!(words_list, ["summer", "2024", "!"]);
    assert_eq!(targets.undetermined(), ["not-a-hash"]);

    let engine = Engine::new(&words_list, &targets, EngineConfig::default());
    let report = engine.run(&mut RunContext::new(), &mut ());

    assert!(report.state.is_terminal());
    assert_eq!(report.state, RunState::AllMatched);
    assert_eq!(report.summary(), Summary::AllFound);

    let mut found: Vec<(String, Algorithm, String)> = report
        .matches
        .iter()
        .map(|m| (m.candidate.clone(), m.algorithm, m.separator.clone()))
        .collect();
    found.sort();
    assert_eq!(
        found,
        [
            ("2024|!|summer".to_string(), Algorithm::Sha1, "|".to_string()),
            ("summer".to_string(), Algorithm::Blake2b, String::new()),
            ("summer_2024".to_string(), Algorithm::Sha256, "_".to_string()),
        ]
    );
    assert!(u128::from(report.attempts) < report.total.exact().unwrap());

    std::fs::remove_file(words).unwrap();
    std::fs::remove_file(hashes).unwrap();
}

#[test]
fn parallel_run_matches_sequential_run() {
    let words: Vec<String> = ["north", "south", "east", "west", "up"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    let targets = TargetSet::new([
        hex_digest("west:up:north", Algorithm::Md5),
        hex_digest("east south", Algorithm::Sha3_512),
        "e".repeat(56),
    ]);

    let sequential = Engine::new(&words, &targets, EngineConfig::default())
        .run(&mut RunContext::new(), &mut ());
    let pool = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();
    let parallel = pool.install(|| {
        Engine::new(&words, &targets, EngineConfig {
            verbose: false,
            chunk_size: 128,
        })
        .run(&mut RunContext::new(), &mut ())
    });

    assert_eq!(sequential.state, RunState::Exhausted);
    assert_eq!(parallel.state, RunState::Exhausted);
    assert_eq!(parallel.matches, sequential.matches);
    assert_eq!(parallel.attempts, sequential.attempts);
    assert_eq!(parallel.unmatched, ["e".repeat(56)]);
    assert_eq!(
        sequential.total,
        Estimate::Exact(((5 + 20 + 60 + 120 + 120) * 6 * (1 + 2 + 1)) as u128)
    );
}
